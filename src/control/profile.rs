//! Threshold ladder: maps a temperature to a discrete fan profile level.
//!
//! Eight thresholds `t0..t7` are configured, one per level. The lookup is a
//! plain step function:
//!
//! ```text
//!   temp <= t0            -> 0
//!   t(i-1) < temp <= ti   -> i      (i = 1..6)
//!   temp > t6             -> 7      (t7 is never a boundary)
//! ```
//!
//! A threshold belongs to the band below it. Equal thresholds collapse
//! adjacent bands, which simply makes a level unreachable.

use core::fmt;

use log::{info, warn};

use crate::error::ConfigError;

/// Number of thresholds (and levels) in a ladder.
pub const LEVEL_COUNT: usize = 8;

// ───────────────────────────────────────────────────────────────
// ProfileLevel
// ───────────────────────────────────────────────────────────────

/// Fan profile level, 0 (quietest) to 7 (maximum cooling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProfileLevel(u8);

impl ProfileLevel {
    /// Quietest level.
    pub const MIN: Self = Self(0);
    /// Loudest level; also the fail-safe level.
    pub const MAX: Self = Self(7);

    /// Returns `None` for values above 7.
    pub const fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ProfileLevel {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(value)
    }
}

impl fmt::Display for ProfileLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ───────────────────────────────────────────────────────────────
// ProfileTable
// ───────────────────────────────────────────────────────────────

/// Immutable threshold ladder, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTable {
    thresholds: [i32; LEVEL_COUNT],
}

impl ProfileTable {
    /// Build a ladder from eight integer thresholds.
    ///
    /// Ordering is not enforced. A descending pair among `t0..t6` is logged
    /// because the lookup is only monotone for non-decreasing thresholds.
    pub fn new(thresholds: [i32; LEVEL_COUNT]) -> Self {
        info!(
            "Activated profile with thresholds: 0:{} 1:{} 2:{} 3:{} 4:{} 5:{} 6:{} 7:{}",
            thresholds[0],
            thresholds[1],
            thresholds[2],
            thresholds[3],
            thresholds[4],
            thresholds[5],
            thresholds[6],
            thresholds[7],
        );
        if let Some(i) = first_descent(&thresholds[..LEVEL_COUNT - 1]) {
            warn!(
                "Profile thresholds descend at {}:{} -> {}:{}; levels will not be monotone",
                i,
                thresholds[i],
                i + 1,
                thresholds[i + 1],
            );
        }
        Self { thresholds }
    }

    /// Build a ladder from textual values, as found in settings files.
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self, ConfigError> {
        parse_thresholds(values).map(Self::new)
    }

    /// Map `temp_c` to the profile level of the band it falls in.
    pub fn level_for(&self, temp_c: i32) -> ProfileLevel {
        let band = self.thresholds[..LEVEL_COUNT - 1]
            .iter()
            .position(|&t| temp_c <= t)
            .unwrap_or(LEVEL_COUNT - 1);
        ProfileLevel(band as u8)
    }

    pub fn thresholds(&self) -> &[i32; LEVEL_COUNT] {
        &self.thresholds
    }
}

/// Parse eight textual thresholds.
///
/// Every value must parse as an integer (surrounding whitespace is ignored)
/// and there must be exactly eight of them.
pub fn parse_thresholds<S: AsRef<str>>(values: &[S]) -> Result<[i32; LEVEL_COUNT], ConfigError> {
    if values.len() != LEVEL_COUNT {
        return Err(ConfigError::WrongLength(values.len()));
    }
    let mut thresholds = [0i32; LEVEL_COUNT];
    for (i, (slot, raw)) in thresholds.iter_mut().zip(values).enumerate() {
        let raw = raw.as_ref();
        *slot = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidThreshold {
                key: i.to_string(),
                value: raw.to_string(),
            })?;
    }
    Ok(thresholds)
}

/// Index `i` of the first pair with `t[i] > t[i+1]`.
fn first_descent(thresholds: &[i32]) -> Option<usize> {
    thresholds.windows(2).position(|w| w[0] > w[1])
}
