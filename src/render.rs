//! Turning one region's (used, total) pair into a usage bar.

use std::fmt;
use std::io::Write;
use std::path::Path;

use log::debug;

use serde::Serialize;

use crate::error::Error;
use crate::locate::locate;
use crate::report::RegionSpec;
use crate::scan::extract;

/// Default number of cells in a bar.
pub const BAR_WIDTH: usize = 50;

const FILLED: char = '|';
const EMPTY: char = ' ';

/// A computed usage bar for a single region.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UsageBar {
    pub used: u32,
    pub total: u32,
    /// `used / total`. Zero when `total` is zero.
    pub percent: f64,
    pub filled: usize,
    pub empty: usize,
}

impl UsageBar {
    /// Compute a bar of (nominally) `capacity` cells.
    ///
    /// The filled and empty widths are rounded independently, so they can add up to one more or
    /// one less than `capacity`. Neither exceeds `capacity`, even when `used > total`.
    pub fn new(used: u32, total: u32, capacity: usize) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            f64::from(used) / f64::from(total)
        };
        let capacity = capacity as f64;

        UsageBar {
            used,
            total,
            percent,
            filled: (capacity * percent).round().max(0.0).min(capacity) as usize,
            empty: (capacity * (1.0 - percent)).round().max(0.0).min(capacity) as usize,
        }
    }
}

impl fmt::Display for UsageBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:6.2}KB :{}", f64::from(self.total / 1024), FILLED)?;
        for _ in 0..self.filled {
            write!(f, "{}", FILLED)?;
        }
        for _ in 0..self.empty {
            write!(f, "{}", EMPTY)?;
        }
        write!(
            f,
            "{}    {:6.2}% ({:6.2}KB / {:6.2}KB) [{:8}B / {:8}B]",
            FILLED,
            100.0 * self.percent,
            f64::from(self.used) / 1024.0,
            f64::from(self.total) / 1024.0,
            self.used,
            self.total,
        )
    }
}

/// Render one region: find its line in the map file, extract (used, total) and print the bar to
/// `out`.
///
/// Problems specific to this region are returned as `Err` and nothing is written to `out`; the
/// caller decides how to report them. A zero total is the exception: the bar is still printed
/// (at 0%) and the problem is reported through `warn`.
pub fn render_region<W: Write>(
    region: &RegionSpec,
    map_file: Option<&Path>,
    capacity: usize,
    out: &mut W,
    warn: &mut dyn FnMut(&Error),
) -> Result<(), failure::Error> {
    let map_file = map_file.ok_or(Error::NoMapFile(crate::report::TARGET_FILE_KEY))?;

    let line = locate(map_file, &region.name)?
        .ok_or_else(|| Error::RegionNotFound(region.name.clone()))?;

    // Every attribute is scanned so bad patterns get reported, but only the first two count.
    let mut values = Vec::with_capacity(2);
    for (key, pattern) in region.attributes.iter() {
        let value = extract(&line, key, pattern).unwrap_or_else(|err| {
            warn(&err);
            0
        });
        if values.len() < 2 {
            values.push(value);
        }
    }

    let (used, total) = match values.as_slice() {
        [used, total] => (*used, *total),
        _ => {
            return Err(Error::TooFewValues {
                region: region.name.clone(),
                found: values.len(),
            }
            .into())
        }
    };

    if total == 0 {
        warn(&Error::ZeroTotal(region.name.clone()));
    }

    let bar = UsageBar::new(used, total, capacity);
    debug!("{}: {}", region.name, serde_json::to_string(&bar)?);

    writeln!(out, "{}:", region.name)?;
    writeln!(out, "{}", bar)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_full() {
        let bar = UsageBar::new(512, 2048, BAR_WIDTH);
        assert_eq!(bar.percent, 0.25);
        assert_eq!(bar.filled, 13);
        assert_eq!(bar.empty, 38);

        let text = bar.to_string();
        assert!(text.starts_with("  2.00KB :|"));
        assert!(text.contains(" 25.00% (  0.50KB /   2.00KB) [     512B /     2048B]"));
    }

    #[test]
    fn line_layout() {
        let bar = UsageBar::new(1, 2, 4);
        assert_eq!(
            bar.to_string(),
            "  0.00KB :|||  |     50.00% (  0.00KB /   0.00KB) [       1B /        2B]"
        );
    }

    #[test]
    fn total_kb_truncates() {
        let bar = UsageBar::new(0, 2047, BAR_WIDTH);
        assert!(bar.to_string().starts_with("  1.00KB :|"));
    }

    #[test]
    fn full_and_empty() {
        let full = UsageBar::new(100, 100, BAR_WIDTH);
        assert_eq!((full.filled, full.empty), (50, 0));

        let empty = UsageBar::new(0, 100, BAR_WIDTH);
        assert_eq!((empty.filled, empty.empty), (0, 50));
    }

    #[test]
    fn over_capacity_is_clamped() {
        let bar = UsageBar::new(300, 100, 10);
        assert_eq!((bar.filled, bar.empty), (10, 0));

        // `-1` scanned with `%d` is u32::MAX.
        let bar = UsageBar::new(u32::MAX, 1024, BAR_WIDTH);
        assert_eq!((bar.filled, bar.empty), (BAR_WIDTH, 0));
        assert_eq!(bar.to_string().matches('|').count(), BAR_WIDTH + 2);
    }

    #[test]
    fn zero_total_is_a_degenerate_bar() {
        let bar = UsageBar::new(10, 0, BAR_WIDTH);
        assert_eq!(bar.percent, 0.0);
        assert_eq!((bar.filled, bar.empty), (0, 50));
    }

    #[test]
    fn filled_is_monotonic() {
        let total = 1000;
        let mut last = 0;
        for used in 0..=total {
            let bar = UsageBar::new(used, total, BAR_WIDTH);
            assert!(bar.filled >= last, "used={}", used);
            last = bar.filled;
        }
    }
}
