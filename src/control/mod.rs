//! Control primitives: the threshold ladder and the fan group.
//!
//! Neither module performs I/O on its own: [`profile`] is a pure lookup and
//! [`fans`] only talks to the world through an injected
//! [`ActuatorPort`](crate::app::ports::ActuatorPort).

pub mod fans;
pub mod profile;
