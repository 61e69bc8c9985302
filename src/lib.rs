//! Stepwise chassis fan controller.
//!
//! Samples the system temperature, maps it onto one of eight fan profile
//! levels through a configurable threshold ladder, and commands every fan to
//! that level. Any failure along the way forces all fans to maximum cooling.
//!
//! The decision logic ([`app`], [`control`]) only talks to the world through
//! port traits; [`adapters`] holds the concrete implementations that drive
//! the vendor utilities.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
