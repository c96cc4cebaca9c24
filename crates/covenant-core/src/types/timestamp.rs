use derive_more::{Add, AddAssign, Display};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

///
/// Timestamp
/// Server-controlled audit instant, in seconds since the Unix epoch.
///

#[derive(
    Add,
    AddAssign,
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(u64::MIN);
    pub const MAX: Self = Self(u64::MAX);

    /// Construct from seconds.
    #[must_use]
    pub const fn from_seconds(secs: u64) -> Self {
        Self(secs)
    }

    /// The current wall-clock instant. Clamps to `EPOCH` if the system
    /// clock reads earlier than 1970.
    #[must_use]
    pub fn now() -> Self {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(Self::EPOCH, |d| Self(d.as_secs()))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// TESTS
///
