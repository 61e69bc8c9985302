//! Fan adapter over the vendor utilities.
//!
//! Queries go through `getsysinfo`, level changes through `hal_app`:
//!
//! | Operation          | Command                                                  |
//! |--------------------|----------------------------------------------------------|
//! | fan count          | `getsysinfo sysfannum`                                   |
//! | fan speed (fan n)  | `getsysinfo sysfan <n>`                                  |
//! | set level (fan n)  | `hal_app --se_sys_set_fan_mode obj_index=<n-1>,mode=<l>` |
//!
//! `getsysinfo` numbers fans from 1 like the rest of the crate, `hal_app`
//! addresses them from 0. [`set_level_args`] is the only place the index is
//! shifted.

use log::debug;

use crate::app::ports::ActuatorPort;
use crate::control::fans::FanIndex;
use crate::control::profile::ProfileLevel;
use crate::error::ActuatorError;

use super::command::CommandRunner;

/// Default name of the fan mode utility.
pub const DEFAULT_FAN_MODE_PROGRAM: &str = "hal_app";

/// [`ActuatorPort`] backed by `getsysinfo` + `hal_app`.
pub struct HalFanActuator<R: CommandRunner> {
    runner: R,
    sysinfo: String,
    fan_mode: String,
}

impl<R: CommandRunner> HalFanActuator<R> {
    pub fn new(runner: R, sysinfo: impl Into<String>, fan_mode: impl Into<String>) -> Self {
        Self {
            runner,
            sysinfo: sysinfo.into(),
            fan_mode: fan_mode.into(),
        }
    }
}

impl<R: CommandRunner> ActuatorPort for HalFanActuator<R> {
    fn fan_count(&mut self) -> Result<u32, ActuatorError> {
        debug!("Getting fan count");
        let raw = self
            .runner
            .run(&self.sysinfo, &["sysfannum".to_string()])
            .map_err(ActuatorError::FanCount)?;
        raw.trim().parse().map_err(|_| ActuatorError::Unparsable {
            query: "fan count",
            raw,
        })
    }

    fn set_fan_level(&mut self, fan: FanIndex, level: ProfileLevel) -> Result<(), ActuatorError> {
        debug!("Setting fan {} to profile {}", fan, level);
        self.runner
            .run(&self.fan_mode, &set_level_args(fan, level))
            .map(drop)
            .map_err(|source| ActuatorError::SetLevel {
                fan: fan.get(),
                level: level.get(),
                source,
            })
    }

    fn read_fan_rpm(&mut self, fan: FanIndex) -> Result<u32, ActuatorError> {
        debug!("Getting RPM of fan {}", fan);
        let raw = self
            .runner
            .run(&self.sysinfo, &["sysfan".to_string(), fan.get().to_string()])
            .map_err(|source| ActuatorError::ReadRpm {
                fan: fan.get(),
                source,
            })?;
        parse_rpm(&raw).ok_or(ActuatorError::Unparsable {
            query: "fan speed",
            raw,
        })
    }
}

/// `hal_app` arguments for one fan; translates to 0-based `obj_index`.
pub fn set_level_args(fan: FanIndex, level: ProfileLevel) -> Vec<String> {
    vec![
        "--se_sys_set_fan_mode".to_string(),
        format!("obj_index={},mode={}", fan.zero_based(), level),
    ]
}

/// Parse `"<n> RPM"` (or a bare integer).
pub fn parse_rpm(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    raw.strip_suffix("RPM").unwrap_or(raw).trim().parse().ok()
}
