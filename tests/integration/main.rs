//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters. No vendor utility is ever spawned.

mod control_cycle_tests;
mod fan_bank_tests;
