//! Setpoint file adapter.
//!
//! Implements [`SetpointPort`] on a small binary file.
//!
//! # Record layout (version 1, 21 bytes)
//!
//! | offset | size | field                              |
//! |--------|------|------------------------------------|
//! | 0      | 4    | magic `b"GHSP"`                    |
//! | 4      | 1    | version, `1`                       |
//! | 5      | 8    | target temperature, f64 little-endian |
//! | 13     | 8    | target humidity, f64 little-endian |
//!
//! Bytes 5.. are the postcard encoding of [`Setpoints`]; postcard writes
//! an `f64` as its 8 little-endian IEEE-754 bytes, so the payload is two
//! plain doubles.
//!
//! A bare 16-byte file (two little-endian doubles, no header) is the
//! legacy struct dump and is still accepted on load.
//!
//! # Zero sentinel
//!
//! A stored target temperature of exactly `0.0` means "unset" and loads
//! as the defaults, so 0 °C cannot be configured.  Kept for compatibility
//! with existing setpoint files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{SetpointPort, StorageError};
use crate::control::Setpoints;

const MAGIC: &[u8; 4] = b"GHSP";
const VERSION: u8 = 1;
const HEADER_LEN: usize = MAGIC.len() + 1;
const PAYLOAD_LEN: usize = 16;

/// Size of a version-1 record on disk.
pub const RECORD_LEN: usize = HEADER_LEN + PAYLOAD_LEN;
/// Size of a legacy headerless record.
pub const LEGACY_RECORD_LEN: usize = PAYLOAD_LEN;

pub struct SetpointFile {
    path: PathBuf,
}

impl SetpointFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the stored record as-is, without the zero-sentinel fallback.
    pub fn read_stored(&self) -> Result<Setpoints, StorageError> {
        let bytes = std::fs::read(&self.path)?;
        decode_record(&bytes)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SetpointPort for SetpointFile {
    fn load(&self) -> Setpoints {
        match self.read_stored() {
            Ok(stored) if stored.temperature == 0.0 => {
                info!(
                    "SetpointFile: {} holds the unset marker, using defaults",
                    self.path.display()
                );
                Setpoints::default()
            }
            Ok(stored) => {
                info!("SetpointFile: loaded setpoints from {}", self.path.display());
                stored
            }
            Err(StorageError::NotFound) => {
                info!(
                    "SetpointFile: no stored setpoints at {}, using defaults",
                    self.path.display()
                );
                Setpoints::default()
            }
            Err(e) => {
                warn!(
                    "SetpointFile: {} unusable ({}), using defaults",
                    self.path.display(),
                    e
                );
                Setpoints::default()
            }
        }
    }

    fn save(&self, setpoints: &Setpoints) -> Result<(), StorageError> {
        let bytes = encode_record(setpoints)?;

        // Whole-record replace: write a sibling file, then rename over.
        let tmp = self.temp_path();
        let written = std::fs::write(&tmp, &bytes).and_then(|()| std::fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        info!(
            "SetpointFile: saved T={:.1} H={:.1} to {}",
            setpoints.temperature,
            setpoints.humidity,
            self.path.display()
        );
        Ok(())
    }
}

/// Encode a version-1 record.
pub fn encode_record(setpoints: &Setpoints) -> Result<Vec<u8>, StorageError> {
    if !setpoints.is_finite() {
        return Err(StorageError::Rejected("setpoints must be finite"));
    }
    let payload = postcard::to_allocvec(setpoints).map_err(|_| StorageError::Corrupted)?;
    let mut bytes = Vec::with_capacity(RECORD_LEN);
    bytes.extend_from_slice(MAGIC);
    bytes.push(VERSION);
    bytes.extend_from_slice(&payload);
    debug_assert_eq!(bytes.len(), RECORD_LEN);
    Ok(bytes)
}

/// Decode a version-1 or legacy record.
pub fn decode_record(bytes: &[u8]) -> Result<Setpoints, StorageError> {
    let setpoints = if bytes.len() == RECORD_LEN && bytes.starts_with(MAGIC) {
        if bytes[MAGIC.len()] != VERSION {
            return Err(StorageError::Corrupted);
        }
        postcard::from_bytes::<Setpoints>(&bytes[HEADER_LEN..])
            .map_err(|_| StorageError::Corrupted)?
    } else if bytes.len() == LEGACY_RECORD_LEN {
        let (temperature, humidity) = bytes.split_at(8);
        Setpoints::new(le_f64(temperature)?, le_f64(humidity)?)
    } else {
        return Err(StorageError::Corrupted);
    };

    if !setpoints.is_finite() {
        return Err(StorageError::Corrupted);
    }
    Ok(setpoints)
}

fn le_f64(bytes: &[u8]) -> Result<f64, StorageError> {
    let raw: [u8; 8] = bytes.try_into().map_err(|_| StorageError::Corrupted)?;
    Ok(f64::from_le_bytes(raw))
}
