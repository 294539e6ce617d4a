//! The different ways a report can go wrong.
//!
//! `Usage` and `Config` are fatal and end the run. Everything else is scoped to a single region:
//! it gets reported on the diagnostic stream and the driver moves on to the next region.

use std::fmt;
use std::path::PathBuf;

use failure::Fail;

#[derive(Debug)]
pub enum Error {
    /// Bad command line.
    Usage(String),

    /// The config file could not be read or is not valid JSON.
    Config { path: PathBuf, detail: String },

    /// The map file could not be opened or read.
    Io {
        path: String,
        cause: std::io::Error,
    },

    /// The config is valid JSON but its top level is not an object. Reported, then the run
    /// continues with no regions.
    InvalidRoot,

    /// No map file was named in the config or on the command line.
    NoMapFile(&'static str),

    /// No line of the map file mentions the region.
    RegionNotFound(String),

    /// A scan pattern did not produce a value.
    FieldParse { kind: &'static str, key: String },

    /// A scan pattern has neither a `%x` nor a `%d` placeholder.
    NoPlaceholder(String),

    /// The region has fewer than two string-valued attributes.
    TooFewValues { region: String, found: usize },

    /// The region's total is zero, so the usage ratio is undefined.
    ZeroTotal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Usage(msg) => write!(f, "{}", msg),
            Error::Config { path, detail } => {
                write!(f, "Failed to load config {}: {}", path.display(), detail)
            }
            Error::Io { path, cause } => write!(f, "Error opening {}: {}", path, cause),
            Error::InvalidRoot => write!(f, "Invalid JSON root structure"),
            Error::NoMapFile(key) => write!(
                f,
                "No map file configured (set \"{}\" or pass --map)",
                key
            ),
            Error::RegionNotFound(region) => {
                write!(f, "Region '{}' not found in map file", region)
            }
            Error::FieldParse { kind, key } => {
                write!(f, "Failed to parse {} value for key: {}", kind, key)
            }
            Error::NoPlaceholder(key) => {
                write!(f, "No %x or %d placeholder in pattern for key: {}", key)
            }
            Error::TooFewValues { region, found } => write!(
                f,
                "Region '{}' needs two attributes (used, total), found {}",
                region, found
            ),
            Error::ZeroTotal(region) => write!(f, "Region '{}' has a total of 0 bytes", region),
        }
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        match self {
            Error::Io { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

impl Error {
    /// Fatal errors stop the whole run; the rest only affect one region.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Usage(..) | Error::Config { .. } => true,
            _ => false,
        }
    }
}
