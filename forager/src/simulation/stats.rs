use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const LOG_HEADER: &str = "# clock\twalking\tresting\tcollected_food\tenergy";

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to open statistics log '{}'", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write statistics log header to '{}'", path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One line of the statistics log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRecord {
    pub clock: u64,
    pub walking: u32,
    pub resting: u32,
    pub collected_food: u32,
    pub energy: i64,
}

impl fmt::Display for TickRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.clock, self.walking, self.resting, self.collected_food, self.energy
        )
    }
}

/// Append-only, tab-separated statistics log. Every line is flushed as it is written.
pub struct StatsLog {
    path: PathBuf,
    out: LineWriter<File>,
}

impl StatsLog {
    /// Creates or truncates `path` and writes the header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let path = path.as_ref().to_path_buf();
        let out = Self::truncate(&path)?;
        Ok(Self { path, out })
    }

    fn truncate(path: &Path) -> Result<LineWriter<File>, StatsError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|source| StatsError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        let mut out = LineWriter::new(file);
        writeln!(out, "{}", LOG_HEADER).map_err(|source| StatsError::Header {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(out)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, record: &TickRecord) -> io::Result<()> {
        writeln!(self.out, "{}", record)
    }

    /// Drops everything written so far and starts over with just the header.
    pub fn reset(&mut self) -> Result<(), StatsError> {
        // Flush before reopening so nothing buffered lands after the new header.
        let _ = self.out.flush();
        self.out = Self::truncate(&self.path)?;
        Ok(())
    }

    pub fn close(mut self) -> io::Result<()> {
        self.out.flush()
    }
}
