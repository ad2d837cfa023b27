//! Device identity read from the board's CPU serial number.
//!
//! On a Raspberry Pi, `/proc/cpuinfo` ends with a line such as
//!
//! ```text
//! Serial		: 10000000abcdef01
//! ```
//!
//! The serial is returned as an opaque 16-digit lowercase hex string.
//! Hosts without such a line get an explicit error; no external commands
//! are run to guess an identifier.

use core::fmt;
use std::path::Path;

/// Default location of the CPU information table.
pub const CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Fixed-size serial string: 16 hex digits.
pub type SerialNumber = heapless::String<16>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityError {
    /// The cpuinfo file could not be read.
    Unavailable,
    /// No non-zero `Serial` line was present.
    NotFound,
    /// A `Serial` line was present but not hexadecimal.
    Malformed,
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "cpuinfo unavailable"),
            Self::NotFound => write!(f, "no serial number reported"),
            Self::Malformed => write!(f, "serial number malformed"),
        }
    }
}

impl std::error::Error for IdentityError {}

/// Read the serial number from a cpuinfo file.
pub fn read_serial(path: &Path) -> Result<SerialNumber, IdentityError> {
    let text = std::fs::read_to_string(path).map_err(|_| IdentityError::Unavailable)?;
    parse_serial(&text)
}

/// Extract the serial number from cpuinfo text.  The last `Serial` line
/// wins.
pub fn parse_serial(cpuinfo: &str) -> Result<SerialNumber, IdentityError> {
    let mut found = None;
    for line in cpuinfo.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key.trim().eq_ignore_ascii_case("serial") {
            let value = u64::from_str_radix(value.trim(), 16).map_err(|_| IdentityError::Malformed)?;
            found = Some(value);
        }
    }

    match found {
        Some(0) | None => Err(IdentityError::NotFound),
        Some(value) => {
            let mut serial = SerialNumber::new();
            use core::fmt::Write;
            let _ = write!(serial, "{:016x}", value);
            Ok(serial)
        }
    }
}
