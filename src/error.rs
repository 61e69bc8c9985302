//! Unified error types for the fan controller.
//!
//! The taxonomy is deliberately small:
//!
//! - [`CommandError`]: one external command could not be run or answered badly.
//! - [`SensorError`] / [`ActuatorError`]: a port operation failed; these feed
//!   the fail-safe path of the control cycle.
//! - [`ConfigError`]: the threshold ladder or settings are malformed; fatal
//!   at startup, no cycle ever runs.
//! - [`CycleError`]: the original error a failed cycle reports.

use std::time::Duration;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Failure of a single external command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The program could not be started at all (missing binary, permissions).
    #[error("failed to spawn `{program}`: {reason}")]
    Spawn { program: String, reason: String },
    /// The program ran but exited unsuccessfully.
    #[error("`{program}` exited with {status}: {output}")]
    NonZeroExit {
        program: String,
        status: String,
        output: String,
    },
    /// The program did not finish within the configured timeout and was killed.
    #[error("`{program}` timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
    /// The program wrote something that is not UTF-8.
    #[error("`{program}` produced non UTF-8 output")]
    InvalidOutput { program: String },
    /// Waiting on or reading from the child process failed.
    #[error("I/O error while running `{program}`: {reason}")]
    Io { program: String, reason: String },
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    /// The query for `zone` could not be executed.
    #[error("{zone} temperature unavailable: {source}")]
    Unavailable {
        zone: &'static str,
        #[source]
        source: CommandError,
    },
    /// The query ran but its output is not a temperature.
    #[error("{zone} temperature unparsable: {raw:?}")]
    Unparsable { zone: &'static str, raw: String },
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActuatorError {
    /// The fan population could not be queried.
    #[error("fan count query failed: {0}")]
    FanCount(#[source] CommandError),
    /// Setting the level of one fan failed.
    #[error("setting fan {fan} to level {level} failed: {source}")]
    SetLevel {
        fan: u32,
        level: u8,
        #[source]
        source: CommandError,
    },
    /// Querying the speed of one fan failed.
    #[error("reading RPM of fan {fan} failed: {source}")]
    ReadRpm {
        fan: u32,
        #[source]
        source: CommandError,
    },
    /// A query answered with text that could not be understood.
    #[error("unexpected response to {query}: {raw:?}")]
    Unparsable { query: &'static str, raw: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for the expected schema.
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// Threshold `key` ("0".."7") is absent.
    #[error("profile threshold {0:?} is missing")]
    MissingThreshold(String),
    /// Threshold `key` exists but is not an integer.
    #[error("profile threshold {key:?} is not an integer: {value}")]
    InvalidThreshold { key: String, value: String },
    /// A key outside "0".."7" appeared in the profile table.
    #[error("unknown profile key {0:?} (expected \"0\"..\"7\")")]
    UnknownKey(String),
    /// The ladder does not hold exactly eight thresholds.
    #[error("profile table needs 8 thresholds, got {0}")]
    WrongLength(usize),
    /// Some other field failed range validation.
    #[error("validation failed: {0}")]
    ValidationFailed(&'static str),
}

// ---------------------------------------------------------------------------
// Cycle errors
// ---------------------------------------------------------------------------

/// The error that sent a control cycle down the fail-safe path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("sensor: {0}")]
    Sensor(#[from] SensorError),
    #[error("actuator: {0}")]
    Actuator(#[from] ActuatorError),
}
