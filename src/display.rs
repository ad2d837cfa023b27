//! 8×8 LED-matrix frame composition.
//!
//! Pure mapping from a reading and the setpoints onto the Sense HAT
//! matrix layout:
//!
//! | Column | Content                                  |
//! |--------|------------------------------------------|
//! | 7      | temperature bar, setpoint marker pixel   |
//! | 5      | humidity bar, setpoint marker pixel      |
//! | 3      | pressure bar                             |
//!
//! Bars grow upward from row 0.  The full scale of each bar is the
//! matching [`SimRange`] of the simulation bounds.  No framebuffer I/O
//! happens here; the console adapter draws the frame as ASCII.

use core::fmt;

use crate::config::{SimRange, SimulationBounds};
use crate::control::Setpoints;
use crate::sensors::Reading;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

pub const MATRIX_SIZE: usize = 8;

pub const TEMPERATURE_COLUMN: usize = 7;
pub const HUMIDITY_COLUMN: usize = 5;
pub const PRESSURE_COLUMN: usize = 3;

/// Reading bar colour.
pub const BAR_COLOUR: Rgb = (0x00, 0xFF, 0x00);
/// Setpoint marker colour.
pub const MARKER_COLOUR: Rgb = (0xF0, 0x0F, 0xF0);

/// Top lit row for `value` on a bar spanning `range`, or `None` when the
/// bar is empty.
///
/// `level = trunc(8 * ((value - low) / (high - low) + 0.05) - 1)`,
/// clamped to the top row.
pub fn bar_level(value: f64, range: SimRange) -> Option<u8> {
    let span = range.span() as f64;
    if span <= 0.0 || !value.is_finite() {
        return None;
    }
    let level = (8.0 * ((value - f64::from(range.low)) / span + 0.05) - 1.0).trunc();
    if level < 0.0 {
        return None;
    }
    // Non-negative and clamped to the top row.
    Some(level.min(7.0) as u8)
}

/// One composed frame.  Indexed `[column][row]`, row 0 at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixFrame {
    pixels: [[Option<Rgb>; MATRIX_SIZE]; MATRIX_SIZE],
}

impl Default for MatrixFrame {
    fn default() -> Self {
        Self {
            pixels: [[None; MATRIX_SIZE]; MATRIX_SIZE],
        }
    }
}

impl MatrixFrame {
    /// Blank frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose the bars and setpoint markers for one cycle.
    pub fn compose(reading: &Reading, setpoints: &Setpoints, bounds: &SimulationBounds) -> Self {
        let mut frame = Self::new();

        frame.set_bar(TEMPERATURE_COLUMN, bar_level(reading.temperature, bounds.temperature));
        frame.set_marker(TEMPERATURE_COLUMN, bar_level(setpoints.temperature, bounds.temperature));

        frame.set_bar(HUMIDITY_COLUMN, bar_level(reading.humidity, bounds.humidity));
        frame.set_marker(HUMIDITY_COLUMN, bar_level(setpoints.humidity, bounds.humidity));

        frame.set_bar(PRESSURE_COLUMN, bar_level(reading.pressure, bounds.pressure));

        frame
    }

    pub fn pixel(&self, column: usize, row: usize) -> Option<Rgb> {
        self.pixels
            .get(column)
            .and_then(|c| c.get(row))
            .copied()
            .flatten()
    }

    /// Height of the lit run starting at row 0 in `column`.
    pub fn bar_height(&self, column: usize) -> usize {
        self.pixels
            .get(column)
            .map_or(0, |c| c.iter().take_while(|p| p.is_some()).count())
    }

    fn set_bar(&mut self, column: usize, level: Option<u8>) {
        if let Some(top) = level {
            for row in 0..=usize::from(top) {
                self.pixels[column][row] = Some(BAR_COLOUR);
            }
        }
    }

    // The marker overwrites the bar pixel it lands on.
    fn set_marker(&mut self, column: usize, level: Option<u8>) {
        if let Some(row) = level {
            self.pixels[column][usize::from(row)] = Some(MARKER_COLOUR);
        }
    }
}

/// ASCII rendering, top row first: `#` bar, `*` marker, `.` off.
impl fmt::Display for MatrixFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..MATRIX_SIZE).rev() {
            for column in 0..MATRIX_SIZE {
                let c = match self.pixels[column][row] {
                    None => '.',
                    Some(MARKER_COLOUR) => '*',
                    Some(_) => '#',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
