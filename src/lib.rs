//! Memory region usage bars from linker map files.
//!
//! A JSON config names a map file (`"target file"`) and a set of regions. Each region lists
//! attributes with `sscanf`-style patterns; the first two are read as (used, total) from the
//! first map-file line that mentions the region, and printed as a bar:
//!
//! ```text
//! ER_IROM1:
//!  64.00KB :|||||||||||||                                      |     23.52% ( 15.05KB /  64.00KB) [   15416B /    65536B]
//! ```

pub mod cli;
pub mod error;
pub mod locate;
pub mod render;
pub mod report;
pub mod scan;

pub use error::Error;
pub use locate::locate;
pub use render::{render_region, UsageBar, BAR_WIDTH};
pub use report::{run, Config, RegionSpec, Report, TARGET_FILE_KEY};
pub use scan::{extract, Conversion, ScanPattern};
