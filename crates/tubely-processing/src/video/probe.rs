//! ffprobe invocation contract and output parsing.

use serde::Deserialize;
use std::ffi::OsString;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

use crate::error::{MediaError, MediaResult};

/// Display aspect ratio exactly as the probe reported it, e.g. `"16:9"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AspectRatio(String);

impl AspectRatio {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    #[serde(default)]
    display_aspect_ratio: String,
}

/// `ffprobe -v error -print_format json -show_streams <path>`
pub fn probe_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-v", "error", "-print_format", "json", "-show_streams"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(path.as_os_str().to_owned());
    args
}

/// Aspect ratio of the first stream in ffprobe's JSON output.
///
/// A stream without a `display_aspect_ratio` yields an empty token.
pub fn parse_aspect_ratio(stdout: &[u8], path: &Path) -> MediaResult<AspectRatio> {
    let output: FfprobeOutput = serde_json::from_slice(stdout)?;
    output
        .streams
        .into_iter()
        .next()
        .map(|s| AspectRatio(s.display_aspect_ratio))
        .ok_or_else(|| MediaError::NoStreams(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    const PATH: &str = "/tmp/tubely-upload-x/upload.mp4";

    #[test]
    fn first_stream_wins() {
        let json = br#"{
            "streams": [
                {"index": 0, "codec_type": "video", "width": 1920, "height": 1080, "display_aspect_ratio": "16:9"},
                {"index": 1, "codec_type": "audio"}
            ]
        }"#;
        let ratio = parse_aspect_ratio(json, Path::new(PATH)).unwrap();
        assert_eq!(ratio.as_str(), "16:9");
    }

    #[test]
    fn missing_ratio_is_an_empty_token() {
        let json = br#"{"streams": [{"codec_type": "audio"}, {"display_aspect_ratio": "9:16"}]}"#;
        let ratio = parse_aspect_ratio(json, Path::new(PATH)).unwrap();
        assert_eq!(ratio.as_str(), "");
    }

    #[test]
    fn empty_stream_list() {
        for json in [&br#"{"streams": []}"#[..], &br#"{}"#[..]] {
            let err = parse_aspect_ratio(json, Path::new(PATH)).unwrap_err();
            assert!(matches!(err, MediaError::NoStreams(_)));
        }
    }

    #[test]
    fn unparseable_output() {
        let err = parse_aspect_ratio(b"Invalid data found when processing input", Path::new(PATH))
            .unwrap_err();
        assert!(matches!(err, MediaError::ProbeOutput(_)));
    }

    #[test]
    fn args_end_with_path() {
        let args = probe_args(Path::new(PATH));
        assert_eq!(args.first().map(|a| a.as_os_str()), Some(OsStr::new("-v")));
        assert_eq!(args.last().map(|a| a.as_os_str()), Some(Path::new(PATH).as_os_str()));
        assert!(args.iter().any(|a| a == "-show_streams"));
    }
}
