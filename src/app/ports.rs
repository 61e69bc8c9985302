//! Port traits: the hexagonal boundary between the control loop and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlCycle (domain)
//! ```
//!
//! Driven adapters (vendor utilities, test doubles, the logger) implement
//! these traits. [`ControlCycle`](super::service::ControlCycle) consumes them
//! via generics, so the decision logic never spawns a process itself.
//!
//! All port errors are typed; every failure in a cycle reaches the fail-safe
//! path as a value, never as a panic.

use crate::control::fans::FanIndex;
use crate::control::profile::ProfileLevel;
use crate::error::{ActuatorError, SensorError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: system → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: whole-degree Celsius readings of the two thermal zones.
pub trait SensorPort {
    /// Chassis/system zone. This is the control input.
    fn read_system_temp(&mut self) -> Result<i32, SensorError>;

    /// CPU zone. Reported only, never used for the decision.
    fn read_cpu_temp(&mut self) -> Result<i32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → fans)
// ───────────────────────────────────────────────────────────────

/// Fan-side port. Indices are always 1-based here; any translation to a
/// vendor numbering scheme is the adapter's business.
pub trait ActuatorPort {
    /// Live number of fans currently present.
    fn fan_count(&mut self) -> Result<u32, ActuatorError>;

    /// Put one fan into the given profile level.
    fn set_fan_level(&mut self, fan: FanIndex, level: ProfileLevel) -> Result<(), ActuatorError>;

    /// Current speed of one fan.
    fn read_fan_rpm(&mut self, fan: FanIndex) -> Result<u32, ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The control cycle emits structured [`CycleEvent`](super::events::CycleEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::CycleEvent);
}
