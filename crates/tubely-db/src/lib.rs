//! Video record store
//!
//! The upload pipelines only read a record and write it back; records are created
//! elsewhere. [`PgVideoRepository`] is the Postgres store, [`InMemoryVideoRepository`]
//! backs tests and local runs without a database.

pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryVideoRepository;
pub use postgres::PgVideoRepository;
pub use repository::VideoRepository;
