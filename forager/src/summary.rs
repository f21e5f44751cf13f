//! Reads a statistics log back for a quick look at a finished run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::simulation::TickRecord;

/// Default cut-off clock, matching the usual plotting window.
pub const DEFAULT_UNTIL: u64 = 1800;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("failed to read log '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Aggregates over the records of one log.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub ticks: usize,
    pub last: Option<TickRecord>,
    pub mean_walking: f64,
    pub mean_resting: f64,
}

/// Parses one data line; `line` is 1-based and only used in errors.
pub fn parse_record(text: &str, line: usize) -> Result<TickRecord, SummaryError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(SummaryError::Malformed {
            line,
            reason: format!("expected 5 fields, found {}", fields.len()),
        });
    }

    fn field<T: std::str::FromStr>(
        value: &str,
        name: &str,
        line: usize,
    ) -> Result<T, SummaryError> {
        value.parse().map_err(|_| SummaryError::Malformed {
            line,
            reason: format!("invalid {} '{}'", name, value),
        })
    }

    Ok(TickRecord {
        clock: field(fields[0], "clock", line)?,
        walking: field(fields[1], "walking", line)?,
        resting: field(fields[2], "resting", line)?,
        collected_food: field(fields[3], "collected_food", line)?,
        energy: field(fields[4], "energy", line)?,
    })
}

/// Summarizes log text, skipping blank and `#` lines and stopping after `until`.
pub fn summarize_str(content: &str, until: u64) -> Result<Summary, SummaryError> {
    let mut ticks = 0usize;
    let mut last = None;
    let mut walking_sum = 0u64;
    let mut resting_sum = 0u64;

    for (i, text) in content.lines().enumerate() {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let record = parse_record(trimmed, i + 1)?;
        if record.clock > until {
            break;
        }
        ticks += 1;
        walking_sum += u64::from(record.walking);
        resting_sum += u64::from(record.resting);
        last = Some(record);
    }

    let mean = |sum: u64| {
        if ticks == 0 {
            0.0
        } else {
            sum as f64 / ticks as f64
        }
    };

    Ok(Summary {
        ticks,
        last,
        mean_walking: mean(walking_sum),
        mean_resting: mean(resting_sum),
    })
}

pub fn summarize_file(path: &Path, until: u64) -> Result<Summary, SummaryError> {
    let content = fs::read_to_string(path).map_err(|source| SummaryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    summarize_str(&content, until)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "# clock\twalking\tresting\tcollected_food\tenergy\n\
                       1\t4\t0\t0\t-4\n\
                       \n\
                       2\t2\t2\t1\t994\n\
                       3\t3\t1\t1\t991\n";

    #[test]
    fn test_summarize_whole_log() {
        let summary = summarize_str(LOG, DEFAULT_UNTIL).unwrap();
        assert_eq!(summary.ticks, 3);
        let last = summary.last.unwrap();
        assert_eq!(last.collected_food, 1);
        assert_eq!(last.energy, 991);
        assert!((summary.mean_walking - 3.0).abs() < 1e-9);
        assert!((summary.mean_resting - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_until_cuts_off() {
        let summary = summarize_str(LOG, 2).unwrap();
        assert_eq!(summary.ticks, 2);
        assert_eq!(summary.last.unwrap().clock, 2);
    }

    #[test]
    fn test_header_only_log() {
        let log = "# clock\twalking\tresting\tcollected_food\tenergy\n";
        let summary = summarize_str(log, 10).unwrap();
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.last, None);
        assert_eq!(summary.mean_walking, 0.0);
    }

    #[test]
    fn test_malformed_line_is_named() {
        let err = summarize_str("# header\n1\t2\t3\n", 10).unwrap_err();
        assert_eq!(err.to_string(), "line 2: expected 5 fields, found 3");

        let err = parse_record("1\t2\tx\t0\t0", 7).unwrap_err();
        assert_eq!(err.to_string(), "line 7: invalid resting 'x'");
    }
}
