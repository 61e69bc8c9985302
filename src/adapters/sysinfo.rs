//! Temperature sensor adapter over the vendor `getsysinfo` utility.
//!
//! | Zone   | Command              | Typical output |
//! |--------|----------------------|----------------|
//! | system | `getsysinfo systmp`  | `27 C/81 F`    |
//! | cpu    | `getsysinfo cputmp`  | `54 C/129 F`   |

use log::debug;

use crate::app::ports::SensorPort;
use crate::error::SensorError;

use super::command::CommandRunner;

/// Default name of the system information utility.
pub const DEFAULT_SYSINFO_PROGRAM: &str = "getsysinfo";

/// [`SensorPort`] backed by `getsysinfo`.
pub struct SysinfoSensor<R: CommandRunner> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> SysinfoSensor<R> {
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    fn read_zone(&self, zone: &'static str, query: &str) -> Result<i32, SensorError> {
        debug!("Getting {} temperature", zone);
        let raw = self
            .runner
            .run(&self.program, &[query.to_string()])
            .map_err(|source| SensorError::Unavailable { zone, source })?;
        parse_celsius(&raw).ok_or(SensorError::Unparsable { zone, raw })
    }
}

impl<R: CommandRunner> SensorPort for SysinfoSensor<R> {
    fn read_system_temp(&mut self) -> Result<i32, SensorError> {
        self.read_zone("system", "systmp")
    }

    fn read_cpu_temp(&mut self) -> Result<i32, SensorError> {
        self.read_zone("cpu", "cputmp")
    }
}

/// Parse `"<c> C/<f> F"` (or a bare integer) into whole degrees Celsius.
pub fn parse_celsius(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    let celsius = match raw.split_once("C/") {
        Some((c, f)) => {
            let f = f.trim().strip_suffix('F')?.trim();
            f.parse::<i32>().ok()?;
            c
        }
        None => raw,
    };
    celsius.trim().parse().ok()
}
