//! Append-only reading log.
//!
//! One line per cycle:
//!
//! ```text
//! Sun,Oct,18,14:03:05,2026, 21.6, 60.0,1001.3
//! ```
//!
//! The timestamp is the 24-character ctime layout (local time) with the
//! separators at positions 3, 7, 10 and 19 turned into commas, followed by
//! temperature `%5.1f`, humidity `%5.1f` and pressure `%6.1f`.  The file
//! is opened, appended to and closed on every call.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::app::ports::{DataLogPort, StorageError};
use crate::sensors::Reading;

/// ctime layout with commas in place of the field separators.
const LOG_TIME_FORMAT: &str = "%a,%b,%e,%H:%M:%S,%Y";

pub struct DataLogFile {
    path: PathBuf,
}

impl DataLogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataLogPort for DataLogFile {
    fn append(&mut self, reading: &Reading) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut line = format_record(reading);
        line.push('\n');
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Comma-separated ctime timestamp, e.g. `Fri,Apr, 2,08:15:00,2021`.
pub fn log_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format(LOG_TIME_FORMAT).to_string()
}

/// One log line, without the trailing newline.
pub fn format_record(reading: &Reading) -> String {
    format!(
        "{},{:5.1},{:5.1},{:6.1}",
        log_timestamp(&reading.timestamp),
        reading.temperature,
        reading.humidity,
        reading.pressure
    )
}
