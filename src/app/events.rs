//! Outbound cycle events.
//!
//! The [`ControlCycle`](super::service::ControlCycle) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them; the binary writes them to the log.

use crate::control::profile::ProfileLevel;
use crate::error::{ActuatorError, CycleError};

/// Both zone temperatures sampled during one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readings {
    pub cpu_c: i32,
    pub system_c: i32,
}

/// Structured events emitted by the control loop.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleEvent {
    /// All fans accepted the computed level.
    ProfileApplied { readings: Readings, level: ProfileLevel },

    /// Post-cycle fan speeds, ascending fan index order.
    FanSpeeds(Vec<u32>),

    /// A cycle step failed; all fans are being forced to maximum.
    FailSafeActivated { cause: CycleError },

    /// Forcing maximum cooling failed as well. Nothing further is attempted.
    FailSafeFailed { cause: CycleError, error: ActuatorError },
}
