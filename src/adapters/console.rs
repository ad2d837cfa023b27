//! Console presentation adapter.
//!
//! Implements [`DisplayPort`] on any [`Write`] (stdout in the binary).
//! Per cycle it prints:
//!
//! ```text
//! Sun Oct 18 14:03:05 2026
//! Readings	T: 21.6C	H: 60.0%	P: 1001.3mB
//! Targets		T:   25C	H:   55%
//! Controls	Heater: 1	Humidifier: 1
//! 			ALARMS
//! Low Humidity alarm on Sun Oct 18 14:03:05 2026
//! ```
//!
//! followed by the LED-matrix frame as ASCII when enabled.

use std::fmt::Write as _;
use std::io::Write;

use chrono::{DateTime, Local};
use log::warn;

use crate::app::events::CycleReport;
use crate::app::ports::DisplayPort;
use crate::config::SimulationBounds;
use crate::display::MatrixFrame;

/// 24-character ctime layout, e.g. `Sat Apr 10 08:15:03 2021`.
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

pub fn ctime(timestamp: &DateTime<Local>) -> String {
    timestamp.format(CTIME_FORMAT).to_string()
}

/// Title line printed once at startup.
pub fn header(operator: &str) -> String {
    format!("{operator}'s Greenhouse Controller")
}

/// Text block for one cycle, without the matrix.
pub fn format_report(report: &CycleReport) -> String {
    let mut out = String::new();
    let r = &report.reading;
    let s = &report.setpoints;
    let c = &report.controls;

    // Writing into a String cannot fail.
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", ctime(&r.timestamp));
    let _ = writeln!(
        out,
        "Readings\tT: {:4.1}C\tH: {:4.1}%\tP: {:6.1}mB",
        r.temperature, r.humidity, r.pressure
    );
    let _ = writeln!(out, "Targets\t\tT:{:5.0}C\tH:{:5.0}%", s.temperature, s.humidity);
    let _ = writeln!(
        out,
        "Controls\tHeater: {}\tHumidifier: {}",
        u8::from(c.heater),
        u8::from(c.humidifier)
    );
    let _ = writeln!(out, "\t\t\tALARMS");
    for alarm in report.alarms.active() {
        let _ = writeln!(out, "{} alarm on {}", alarm.kind, ctime(&alarm.timestamp));
    }
    out
}

pub struct ConsoleDisplay<W: Write> {
    out: W,
    bounds: SimulationBounds,
    render_matrix: bool,
}

impl<W: Write> ConsoleDisplay<W> {
    /// `bounds` are the full-scale ranges of the matrix bars.
    pub fn new(out: W, bounds: SimulationBounds, render_matrix: bool) -> Self {
        Self {
            out,
            bounds,
            render_matrix,
        }
    }

    pub fn render_header(&mut self, operator: &str) {
        self.write(&format!("{}\n", header(operator)));
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!("Console write failed: {e}");
        }
    }
}

impl<W: Write> DisplayPort for ConsoleDisplay<W> {
    fn render(&mut self, report: &CycleReport) {
        let mut text = format_report(report);
        if self.render_matrix {
            let frame = MatrixFrame::compose(&report.reading, &report.setpoints, &self.bounds);
            let _ = write!(text, "\n{frame}");
        }
        self.write(&text);
    }
}
