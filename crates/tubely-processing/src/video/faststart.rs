//! Fast-start remux contract.
//!
//! Stream copy into a new MP4 with the `moov` atom moved to the front. No
//! re-encode, so running it on its own output leaves every stream unchanged.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const OUTPUT_SUFFIX: &str = ".processing";

/// `<input>.processing`, next to the input.
pub fn output_path(input: &Path) -> PathBuf {
    let mut path = input.as_os_str().to_owned();
    path.push(OUTPUT_SUFFIX);
    PathBuf::from(path)
}

/// `ffmpeg -i <input> -c copy -movflags faststart -f mp4 <output>`
pub fn remux_args(input: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-i".into(), input.as_os_str().to_owned()];
    args.extend(
        ["-c", "copy", "-movflags", "faststart", "-f", "mp4"]
            .iter()
            .map(OsString::from),
    );
    args.push(output.as_os_str().to_owned());
    args
}
