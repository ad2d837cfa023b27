//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements     | Connects to                  |
//! |-----------------|----------------|------------------------------|
//! | `actuators`     | ActuatorPort   | Heater / humidifier relays   |
//! | `clock`         | Clock          | Host local time              |
//! | `console`       | DisplayPort    | stdout (text + LED matrix)   |
//! | `data_log`      | DataLogPort    | Append-only text log         |
//! | `log_sink`      | EventSink      | `log` facade                 |
//! | `setpoint_file` | SetpointPort   | Binary setpoint record       |
//!
//! `device_id` is a plain helper: it reads the board serial number.

pub mod actuators;
pub mod clock;
pub mod console;
pub mod data_log;
pub mod device_id;
pub mod log_sink;
pub mod setpoint_file;
