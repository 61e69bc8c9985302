//! Fan bank: every addressable fan, driven as a group.
//!
//! The population is queried from the [`ActuatorPort`] on every call so a
//! fan that appears or disappears between cycles is picked up without a
//! restart. Fans are visited in ascending index order, starting at 1.

use core::fmt;
use core::num::NonZeroU32;

use log::debug;

use crate::app::ports::ActuatorPort;
use crate::control::profile::ProfileLevel;
use crate::error::ActuatorError;

/// 1-based fan index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FanIndex(NonZeroU32);

impl FanIndex {
    /// Returns `None` for 0.
    pub const fn new(index: u32) -> Option<Self> {
        match NonZeroU32::new(index) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The same fan in 0-based numbering.
    pub const fn zero_based(self) -> u32 {
        self.0.get() - 1
    }

    /// Indices `1..=count`.
    pub fn range(count: u32) -> impl Iterator<Item = FanIndex> {
        (1..=count).filter_map(FanIndex::new)
    }
}

impl fmt::Display for FanIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group operations over all fans reachable through one actuator port.
pub struct FanBank<'a, A: ActuatorPort> {
    port: &'a mut A,
}

impl<'a, A: ActuatorPort> FanBank<'a, A> {
    pub fn new(port: &'a mut A) -> Self {
        Self { port }
    }

    /// Live fan population.
    pub fn count(&mut self) -> Result<u32, ActuatorError> {
        self.port.fan_count()
    }

    /// Set every fan to `level`, fan 1 first.
    ///
    /// Stops at the first failing fan and returns its error. Fans already
    /// set keep their new level.
    pub fn apply_all(&mut self, level: ProfileLevel) -> Result<(), ActuatorError> {
        let count = self.count()?;
        debug!("Setting all {} fans to profile {}", count, level);
        for fan in FanIndex::range(count) {
            self.port.set_fan_level(fan, level)?;
        }
        Ok(())
    }

    /// Speed of every fan, fan 1 first.
    pub fn read_all_rpm(&mut self) -> Result<Vec<u32>, ActuatorError> {
        let count = self.count()?;
        debug!("Reading RPM of {} fans", count);
        FanIndex::range(count)
            .map(|fan| self.port.read_fan_rpm(fan))
            .collect()
    }
}
