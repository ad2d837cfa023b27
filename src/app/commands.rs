//! Inbound commands from the command line.
//!
//! The binary parses its arguments into an [`AppCommand`] and acts on it:
//! run the control loop, or read / overwrite the stored setpoints and exit.

use core::fmt;

use crate::control::Setpoints;

/// What the process was asked to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppCommand {
    /// Run the control loop until SIGINT / SIGTERM.
    Run,

    /// Persist new setpoints and exit.
    SetTargets(Setpoints),

    /// Print the effective setpoints and exit.
    ShowTargets,
}

/// Why the arguments could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    UnknownCommand(String),
    MissingValue(&'static str),
    InvalidNumber(String),
    TrailingArguments,
    /// A target temperature of 0 is stored as the "unset" marker and
    /// would read back as the defaults.
    ZeroTemperature,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(cmd) => write!(f, "unknown command '{cmd}'"),
            Self::MissingValue(what) => write!(f, "missing {what}"),
            Self::InvalidNumber(text) => write!(f, "'{text}' is not a finite number"),
            Self::TrailingArguments => write!(f, "too many arguments"),
            Self::ZeroTemperature => write!(
                f,
                "a target temperature of 0 means \"unset\" and would load as the defaults"
            ),
        }
    }
}

impl std::error::Error for UsageError {}

pub const USAGE: &str = "usage: greenhouse [run | show-targets | set-targets <temperature> <humidity>]";

impl AppCommand {
    /// Parse the arguments after the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let command = match args.next() {
            None => return Ok(Self::Run),
            Some(arg) => arg.as_ref().to_owned(),
        };

        let parsed = match command.as_str() {
            "run" => Self::Run,
            "show-targets" => Self::ShowTargets,
            "set-targets" => {
                let temperature = number(args.next(), "temperature")?;
                if temperature == 0.0 {
                    return Err(UsageError::ZeroTemperature);
                }
                let humidity = number(args.next(), "humidity")?;
                Self::SetTargets(Setpoints::new(temperature, humidity))
            }
            _ => return Err(UsageError::UnknownCommand(command)),
        };

        if args.next().is_some() {
            return Err(UsageError::TrailingArguments);
        }
        Ok(parsed)
    }
}

fn number<S: AsRef<str>>(arg: Option<S>, what: &'static str) -> Result<f64, UsageError> {
    let text = arg.ok_or(UsageError::MissingValue(what))?;
    let text = text.as_ref();
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| UsageError::InvalidNumber(text.to_owned()))
}
