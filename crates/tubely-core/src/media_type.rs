//! Declared media types of uploaded parts.
//!
//! A part's `Content-Type` is parsed into its essence (`type/subtype`, lowercased,
//! parameters dropped). Parameters are checked for shape only.

use crate::error::AppError;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// MP4 is the only container the video pipeline accepts.
pub const VIDEO_MP4: &str = "video/mp4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    essence: String,
    slash: usize,
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#' | b'$' | b'&' | b'^' | b'_' | b'.' | b'+' | b'-' | b'\''
                )
        })
}

impl MediaType {
    /// Parse a `Content-Type` header value such as `image/jpeg; charset=binary`.
    pub fn parse(content_type: &str) -> Result<Self, AppError> {
        let mut segments = content_type.split(';');
        let essence = segments
            .next()
            .map(|s| s.trim())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let (main, sub) = essence
            .split_once('/')
            .ok_or_else(|| AppError::InvalidMediaType(format!("missing subtype in '{}'", content_type)))?;
        if !is_token(main) || !is_token(sub) {
            return Err(AppError::InvalidMediaType(format!(
                "invalid type token in '{}'",
                content_type
            )));
        }

        for param in segments.map(str::trim).filter(|p| !p.is_empty()) {
            match param.split_once('=') {
                Some((key, _)) if is_token(key.trim()) => {}
                _ => {
                    return Err(AppError::InvalidMediaType(format!(
                        "invalid parameter '{}' in '{}'",
                        param, content_type
                    )))
                }
            }
        }

        let slash = main.len();
        Ok(Self { essence, slash })
    }

    /// `type/subtype`, lowercased.
    pub fn essence(&self) -> &str {
        &self.essence
    }

    pub fn subtype(&self) -> &str {
        &self.essence[self.slash + 1..]
    }

    pub fn is_mp4(&self) -> bool {
        self.essence == VIDEO_MP4
    }

    /// File extension derived from the subtype.
    pub fn extension(&self) -> String {
        match self.subtype() {
            "jpeg" => "jpg".to_string(),
            "svg+xml" => "svg".to_string(),
            other => {
                let ext: String = other.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
                if ext.is_empty() {
                    "bin".to_string()
                } else {
                    ext
                }
            }
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.essence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_parameters_and_lowercases() {
        let media = MediaType::parse("Video/MP4; codecs=\"avc1\"").unwrap();
        assert_eq!(media.essence(), "video/mp4");
        assert!(media.is_mp4());
        assert_eq!(media.subtype(), "mp4");
    }

    #[test]
    fn rejects_malformed_types() {
        for bad in ["", "image", "/png", "image/", "image/png; =x", "ima ge/png", "image/png; charset"] {
            let err = MediaType::parse(bad).unwrap_err();
            assert_eq!(err.error_type(), "InvalidMediaType", "input: {:?}", bad);
        }
    }

    #[test]
    fn extension_follows_subtype() {
        assert_eq!(MediaType::parse("image/jpeg").unwrap().extension(), "jpg");
        assert_eq!(MediaType::parse("image/png").unwrap().extension(), "png");
        assert_eq!(MediaType::parse("image/svg+xml").unwrap().extension(), "svg");
        assert_eq!(MediaType::parse("video/mp4").unwrap().extension(), "mp4");
        assert_eq!(MediaType::parse("image/vnd.microsoft.icon").unwrap().extension(), "vndmicrosofticon");
    }

    #[test]
    fn only_exact_mp4_is_mp4() {
        assert!(!MediaType::parse("video/quicktime").unwrap().is_mp4());
        assert!(!MediaType::parse("audio/mp4").unwrap().is_mp4());
    }
}
