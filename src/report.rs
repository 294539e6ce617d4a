//! The report driver: load the config, then render every region in the order it was declared.

use std::io::Write;
use std::path::{Path, PathBuf};

use failure::ResultExt;

use log::{debug, info};

use serde_json::Value;

use crate::error::Error;
use crate::render::{render_region, BAR_WIDTH};

/// The top-level config key that names the map file.
pub const TARGET_FILE_KEY: &str = "target file";

/// One region to report on: its name (the keyword searched for in the map file) and its
/// string-valued attributes, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionSpec {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

/// A parsed config file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// The value of `"target file"`, if present and a string.
    pub map_file: Option<PathBuf>,
    pub regions: Vec<RegionSpec>,
}

impl Config {
    /// Build a config from an already parsed JSON document.
    ///
    /// Members of the top-level object that are not objects are skipped, as are non-string
    /// attributes inside a region.
    pub fn from_value(root: &Value) -> Result<Self, Error> {
        let root = root.as_object().ok_or(Error::InvalidRoot)?;

        let map_file = root
            .get(TARGET_FILE_KEY)
            .and_then(Value::as_str)
            .map(PathBuf::from);

        let regions = root
            .iter()
            .filter(|(name, _)| name.as_str() != TARGET_FILE_KEY)
            .filter_map(|(name, region)| {
                let attributes = region
                    .as_object()?
                    .iter()
                    .filter_map(|(key, pattern)| Some((key.clone(), pattern.as_str()?.to_owned())))
                    .collect();
                Some(RegionSpec {
                    name: name.clone(),
                    attributes,
                })
            })
            .collect();

        Ok(Config { map_file, regions })
    }

    /// Read and parse the config file at `path`.
    ///
    /// A file that is valid JSON but not an object yields `Error::InvalidRoot`, which unlike the
    /// other errors is not fatal.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let config_err = |detail: String| Error::Config {
            path: path.to_owned(),
            detail,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        let root: Value = serde_json::from_str(&contents)
            .map_err(|e| config_err(format!("Error parsing JSON: [{}]", e)))?;

        Config::from_value(&root)
    }
}

/// A report over one config, writing bars to `out` and diagnostics to `err`.
pub struct Report<'c, O: Write, E: Write> {
    config: &'c Config,
    map_file: Option<&'c Path>,
    width: usize,
    out: O,
    err: E,
}

impl<'c, O: Write, E: Write> Report<'c, O, E> {
    pub fn new(config: &'c Config, out: O, err: E) -> Self {
        Report {
            config,
            map_file: config.map_file.as_deref(),
            width: BAR_WIDTH,
            out,
            err,
        }
    }

    /// Scan `map_file` instead of the one named in the config.
    pub fn map_file(mut self, map_file: &'c Path) -> Self {
        self.map_file = Some(map_file);
        self
    }

    /// Use bars of `width` cells.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Render every region. Returns how many regions were printed.
    ///
    /// A region that cannot be rendered is reported on the diagnostic stream and skipped. Only a
    /// failure to write the output itself is returned as an error.
    pub fn run(&mut self) -> Result<usize, failure::Error> {
        let mut printed = 0;

        for region in self.config.regions.iter() {
            debug!("Rendering region {:?}", region.name);

            let err = &mut self.err;
            let mut warn_failed = None;
            let mut warn = |e: &Error| {
                if let Err(io) = writeln!(err, "{}", e) {
                    warn_failed.get_or_insert(io);
                }
            };

            let res = render_region(region, self.map_file, self.width, &mut self.out, &mut warn);

            if let Some(io) = warn_failed {
                return Err(io.into());
            }

            match res {
                Ok(()) => printed += 1,
                Err(e) => match e.downcast::<Error>() {
                    Ok(e) if !e.is_fatal() => writeln!(self.err, "{}", e)?,
                    Ok(e) => return Err(e.into()),
                    Err(e) => return Err(e),
                },
            }
        }

        self.out.flush()?;
        Ok(printed)
    }
}

/// Load the config at `config_path` and render all of its regions.
///
/// `map_file` and `width` override the config's map file and the default bar width.
pub fn run<O: Write, E: Write>(
    config_path: &Path,
    map_file: Option<&Path>,
    width: Option<usize>,
    out: O,
    mut err: E,
) -> Result<usize, failure::Error> {
    let config = match Config::load(config_path) {
        Ok(config) => config,
        Err(e @ Error::InvalidRoot) => {
            writeln!(err, "{}", e)?;
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };
    info!(
        "Loaded {} region(s) from {}",
        config.regions.len(),
        config_path.display()
    );

    let mut report = Report::new(&config, out, err);
    if let Some(map_file) = map_file {
        report = report.map_file(map_file);
    }
    if let Some(width) = width {
        report = report.width(width);
    }

    let printed = report
        .run()
        .with_context(|_| format!("writing report for {}", config_path.display()))?;

    Ok(printed)
}
