//! Application core: the control loop, zero direct I/O.
//!
//! [`service::ControlCycle`] holds the decision rules and the fail-safe
//! branch. All interaction with sensors and fans goes through the **port
//! traits** in [`ports`], so the loop runs unchanged against vendor
//! utilities or test doubles.

pub mod events;
pub mod ports;
pub mod service;
