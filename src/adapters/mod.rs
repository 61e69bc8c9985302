//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                      |
//! |------------|---------------|----------------------------------|
//! | `command`  | CommandRunner | child processes, with timeout    |
//! | `sysinfo`  | SensorPort    | `getsysinfo` temperature queries |
//! | `hal_fans` | ActuatorPort  | `getsysinfo` fan queries, `hal_app` |
//! | `log_sink` | EventSink     | `log` facade                     |

pub mod command;
pub mod hal_fans;
pub mod log_sink;
pub mod sysinfo;
