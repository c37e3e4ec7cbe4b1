//! Block time as unix seconds.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A point in block time, expressed as seconds since the unix epoch.
///
/// The execution environment supplies the current block time; the
/// registry threads it into every poke so time-dependent pool fields
/// (weight smoothing) are always current as of the read.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from raw unix seconds.
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the raw unix seconds.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since `earlier`, clamped at zero when `earlier`
    /// is in the future.
    #[must_use]
    pub const fn saturating_since(&self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// This timestamp shifted forward by `seconds`, saturating at the
    /// maximum representable time.
    pub const fn saturating_add(&self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
