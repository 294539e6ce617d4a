//! Finding the line of the map file that describes a region.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::Error;

/// Return the first line of the file at `path` that contains `keyword` as a literal substring,
/// without its line terminator. `Ok(None)` means no line matched.
///
/// The file is read lazily and closed as soon as a match is found. Bytes that are not valid
/// UTF-8 are replaced, so a stray binary section in a map file does not end the search.
pub fn locate(path: &Path, keyword: &str) -> Result<Option<String>, Error> {
    let io_err = |cause| Error::Io {
        path: path.display().to_string(),
        cause,
    };

    let mut reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut buf = Vec::new();
    let mut lineno = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(io_err)? == 0 {
            debug!("{:?} not found in {}", keyword, path.display());
            return Ok(None);
        }
        lineno += 1;

        let line = String::from_utf8_lossy(&buf);
        if line.contains(keyword) {
            debug!("{:?} found at {}:{}", keyword, path.display(), lineno);
            return Ok(Some(
                line.trim_end_matches(|c| c == '\n' || c == '\r').to_owned(),
            ));
        }
    }
}
