use std::fmt::{Display, Formatter, Result as FmtResult};

/// Bucket a video is filed under, chosen by its display aspect ratio.
///
/// Matching is exact on the probe's token: `"16:9"` and `"9:16"` only. Equivalent
/// ratios written differently (`"1.78:1"`, `"32:18"`) land in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoCategory {
    Landscape,
    Portrait,
    Other,
}

impl VideoCategory {
    pub fn from_aspect_ratio(token: &str) -> Self {
        match token {
            "16:9" => VideoCategory::Landscape,
            "9:16" => VideoCategory::Portrait,
            _ => VideoCategory::Other,
        }
    }

    /// Storage key prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            VideoCategory::Landscape => "landscape",
            VideoCategory::Portrait => "portrait",
            VideoCategory::Other => "other",
        }
    }

    /// `<prefix>/<file_name>`
    pub fn storage_key(&self, file_name: &str) -> String {
        format!("{}/{}", self.prefix(), file_name)
    }
}

impl Display for VideoCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_tokens() {
        assert_eq!(VideoCategory::from_aspect_ratio("16:9"), VideoCategory::Landscape);
        assert_eq!(VideoCategory::from_aspect_ratio("9:16"), VideoCategory::Portrait);
    }

    #[test]
    fn everything_else_is_other() {
        for token in ["", "4:3", "1:1", "1.78:1", "16:9 ", " 16:9", "16/9", "N/A", "0:1", "９:16"] {
            assert_eq!(VideoCategory::from_aspect_ratio(token), VideoCategory::Other, "{:?}", token);
        }
    }

    #[test]
    fn keys_carry_prefix() {
        assert_eq!(VideoCategory::Landscape.storage_key("abc.mp4"), "landscape/abc.mp4");
        assert_eq!(VideoCategory::Portrait.storage_key("abc.mp4"), "portrait/abc.mp4");
        assert_eq!(VideoCategory::Other.to_string(), "other");
    }
}
