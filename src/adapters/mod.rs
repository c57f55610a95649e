//! Adapters: concrete Linux implementations of the port traits.
//!
//! | Adapter    | Implements         | Connects to                      |
//! |------------|--------------------|----------------------------------|
//! | `host`     | TelemetrySource    | /proc/stat, sysinfo, `ip`, clock |
//! | `i2c`      | (driver factory)   | /dev/i2c-N accessory controller  |
//! | `log_sink` | EventSink          | `log` facade                     |
//! | `oled`     | DisplayConnector   | SSD1306 over /dev/i2c-N          |
//! |            | DisplayPort        |                                  |
//! | `time`     | Sleeper            | `std::thread::sleep`             |

pub mod host;
pub mod i2c;
pub mod log_sink;
pub mod oled;
pub mod time;
