pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod models;

pub use guard::{authorize_owner, parse_video_id};
pub use models::Principal;
