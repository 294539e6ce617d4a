//! Command line options.

use std::path::PathBuf;

use clap::clap_app;

/// Everything the binary needs from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// The JSON config describing the regions.
    pub config: PathBuf,
    /// Overrides the config's `"target file"`.
    pub map_file: Option<PathBuf>,
    /// Overrides the default bar width.
    pub width: Option<usize>,
}

pub fn cli_options() -> clap::App<'static, 'static> {
    fn is_width(s: String) -> Result<(), String> {
        match s.as_str().parse::<usize>() {
            Ok(0) => Err("the bar width must be at least 1".into()),
            Ok(_) => Ok(()),
            Err(e) => Err(format!("{:?}", e)),
        }
    }

    clap_app! { regionbar =>
        (about: "Print a usage bar for each memory region described in a JSON config, using the \
                 figures found in a linker map file.")
        (@setting ArgRequiredElseHelp)
        (@arg CONFIG: +required +takes_value
         "The JSON config file naming the map file and the regions to report")
        (@arg MAP: --map +takes_value
         "The map file to scan, instead of the config's \"target file\"")
        (@arg WIDTH: --width +takes_value {is_width}
         "The number of cells in each bar (default: 50)")
    }
}

impl Options {
    /// Parse the values added by `cli_options`.
    pub fn from_matches(matches: &clap::ArgMatches<'_>) -> Self {
        Options {
            config: matches
                .value_of_os("CONFIG")
                .map(PathBuf::from)
                .unwrap_or_default(),
            map_file: matches.value_of_os("MAP").map(PathBuf::from),
            width: matches
                .value_of("WIDTH")
                .and_then(|w| w.parse::<usize>().ok()),
        }
    }
}
