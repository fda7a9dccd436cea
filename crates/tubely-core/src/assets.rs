//! Generated asset names.
//!
//! Names are 32 bytes from a CSPRNG, URL-safe base64 without padding, plus
//! an extension: `<43 chars>.<ext>`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

use crate::media_type::MediaType;

const NAME_BYTES: usize = 32;

/// `<random>.<extension>`
pub fn random_asset_name(extension: &str) -> String {
    let mut name = [0u8; NAME_BYTES];
    rand::rng().fill_bytes(&mut name);
    format!("{}.{}", URL_SAFE_NO_PAD.encode(name), extension)
}

/// Random asset name with the extension implied by `media`.
pub fn asset_file_name(media: &MediaType) -> String {
    random_asset_name(&media.extension())
}
