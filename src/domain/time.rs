use serde::{Deserialize, Serialize};
use std::ops::Sub;
use std::time::Duration;

pub const NANOS_PER_MILLI: i64 = 1_000_000;
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const NANOS_PER_DAY: i64 = 86_400 * NANOS_PER_SECOND;

/// An instant as integer nanoseconds since the Unix epoch.
///
/// This is the only unit that crosses the collaborator boundary. Anything
/// shown on a clock goes through [`Timestamp::as_millis`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self(i64::try_from(nanos).unwrap_or(i64::MAX))
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(NANOS_PER_MILLI))
    }

    pub fn as_millis(self) -> i64 {
        self.0.div_euclid(NANOS_PER_MILLI)
    }

    /// Midnight (UTC) of the day containing this instant.
    pub fn start_of_day(self) -> Self {
        Self(self.0 - self.0.rem_euclid(NANOS_PER_DAY))
    }

    /// Last nanosecond of the day containing this instant.
    pub fn end_of_day(self) -> Self {
        Self(self.start_of_day().0 + NANOS_PER_DAY - 1)
    }

    pub fn plus_days(self, days: i64) -> Self {
        Self(self.0.saturating_add(days.saturating_mul(NANOS_PER_DAY)))
    }

    pub fn plus(self, duration: Duration) -> Self {
        let nanos = i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX);
        Self(self.0.saturating_add(nanos))
    }
}

impl Sub for Timestamp {
    type Output = i64;

    /// Signed difference in nanoseconds.
    fn sub(self, rhs: Self) -> i64 {
        self.0.saturating_sub(rhs.0)
    }
}

/// Source of "now" for anything that stamps records.
pub type Clock = std::sync::Arc<dyn Fn() -> Timestamp + Send + Sync>;

pub fn system_clock() -> Clock {
    std::sync::Arc::new(Timestamp::now)
}
