//! Control cycle: one sample → decide → actuate round.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │       ControlCycle        │
//! ActuatorPort ◀──│  ProfileTable · FanBank   │
//!                 └──────────────────────────┘
//! ```
//!
//! A cycle is self-contained: nothing it learns is carried into the next
//! one, only the [`ProfileTable`] is shared. Any sensor or actuator error
//! switches the cycle onto the fail-safe branch, which forces every fan to
//! [`ProfileLevel::MAX`] once and then reports the original error. There are
//! no retries; the next scheduled cycle is the retry.

use log::{debug, warn};

use crate::control::fans::FanBank;
use crate::control::profile::{ProfileLevel, ProfileTable};
use crate::error::{ActuatorError, CycleError};

use super::events::{CycleEvent, Readings};
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// Outcome types
// ───────────────────────────────────────────────────────────────

/// Summary of a cycle whose computed level reached every fan.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub level: ProfileLevel,
    pub readings: Readings,
    /// Post-cycle fan speeds; `None` if the best-effort read failed.
    pub rpms: Option<Vec<u32>>,
}

/// What became of the maximum-cooling recovery.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackStatus {
    /// Every fan accepted [`ProfileLevel::MAX`].
    Applied,
    /// Recovery failed too; this is terminal for the cycle.
    Failed(ActuatorError),
}

/// A cycle that hit an error and went through the fail-safe branch.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleFailure {
    /// The error that triggered the fail-safe.
    pub error: CycleError,
    pub fallback: FallbackStatus,
}

impl CycleFailure {
    /// True when the fans could not even be forced to maximum.
    pub fn is_terminal(&self) -> bool {
        matches!(self.fallback, FallbackStatus::Failed(_))
    }
}

/// Result of [`ControlCycle::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Applied(CycleReport),
    Failed(CycleFailure),
}

impl CycleOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Level the fans were left at, if known.
    pub fn level(&self) -> Option<ProfileLevel> {
        match self {
            Self::Applied(report) => Some(report.level),
            Self::Failed(f) if !f.is_terminal() => Some(ProfileLevel::MAX),
            Self::Failed(_) => None,
        }
    }

    /// Process exit status: 0 applied, 1 failed with fans forced to
    /// maximum, 2 fail-safe failed as well.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Applied(_) => 0,
            Self::Failed(f) if f.is_terminal() => 2,
            Self::Failed(_) => 1,
        }
    }

    pub fn into_result(self) -> Result<CycleReport, CycleFailure> {
        match self {
            Self::Applied(report) => Ok(report),
            Self::Failed(failure) => Err(failure),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// ControlCycle
// ───────────────────────────────────────────────────────────────

/// Runs decision rounds against a fixed threshold ladder.
#[derive(Debug, Clone)]
pub struct ControlCycle {
    table: ProfileTable,
}

impl ControlCycle {
    pub fn new(table: ProfileTable) -> Self {
        Self { table }
    }

    /// Run one full cycle.
    ///
    /// Sensors and fans are separate parameters so that a test can fail one
    /// side while recording the other.
    pub fn run(
        &self,
        sensor: &mut impl SensorPort,
        actuator: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        match self.decide_and_apply(sensor, actuator) {
            Ok((level, readings)) => {
                sink.emit(&CycleEvent::ProfileApplied { readings, level });
                let rpms = Self::collect_rpms(actuator, sink);
                CycleOutcome::Applied(CycleReport {
                    level,
                    readings,
                    rpms,
                })
            }
            Err(error) => CycleOutcome::Failed(Self::fail_safe(error, actuator, sink)),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Steps 1–3: sample, look up, actuate. Any error short-circuits.
    fn decide_and_apply(
        &self,
        sensor: &mut impl SensorPort,
        actuator: &mut impl ActuatorPort,
    ) -> Result<(ProfileLevel, Readings), CycleError> {
        let system_c = sensor.read_system_temp()?;
        debug!("Current system temp is {}", system_c);
        let cpu_c = sensor.read_cpu_temp()?;
        debug!("Current CPU temp is {}", cpu_c);

        let level = self.table.level_for(system_c);
        debug!("Setting system fan profile to {}", level);
        FanBank::new(actuator).apply_all(level)?;

        Ok((level, Readings { cpu_c, system_c }))
    }

    /// Force maximum cooling after `error` and report both outcomes.
    fn fail_safe(
        error: CycleError,
        actuator: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> CycleFailure {
        sink.emit(&CycleEvent::FailSafeActivated {
            cause: error.clone(),
        });
        let fallback = match FanBank::new(actuator).apply_all(ProfileLevel::MAX) {
            Ok(()) => FallbackStatus::Applied,
            Err(recovery) => {
                sink.emit(&CycleEvent::FailSafeFailed {
                    cause: error.clone(),
                    error: recovery.clone(),
                });
                FallbackStatus::Failed(recovery)
            }
        };
        CycleFailure { error, fallback }
    }

    /// Best-effort telemetry; a failure here never invalidates the cycle.
    fn collect_rpms(actuator: &mut impl ActuatorPort, sink: &mut impl EventSink) -> Option<Vec<u32>> {
        match FanBank::new(actuator).read_all_rpm() {
            Ok(rpms) => {
                sink.emit(&CycleEvent::FanSpeeds(rpms.clone()));
                Some(rpms)
            }
            Err(e) => {
                warn!("Fan speed readout failed: {}", e);
                None
            }
        }
    }
}
