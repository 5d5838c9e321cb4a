use std::{
    fmt::{Debug, Display},
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, SystemTime},
};

use chrono::{DateTime, TimeZone, Utc};

const LOCAL_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Milliseconds since the Unix epoch returned by `get_time` instead of the system clock.
/// Zero means "not mocked".
static MOCKED_TIME_MILLIS: AtomicU64 = AtomicU64::new(0);

/// Makes `get_time` return `now` until `clear_mocked_time` is called.
/// Tests that use this must run serially.
pub fn set_mocked_time(now: Duration) -> Result<(), std::num::TryFromIntError> {
    MOCKED_TIME_MILLIS.store(u64::try_from(now.as_millis())?, Ordering::SeqCst);
    Ok(())
}

pub fn clear_mocked_time() {
    MOCKED_TIME_MILLIS.store(0, Ordering::SeqCst);
}

fn mocked_time() -> Option<Time> {
    match MOCKED_TIME_MILLIS.load(Ordering::SeqCst) {
        0 => None,
        millis => Some(Time::from_duration_since_epoch(Duration::from_millis(millis))),
    }
}

/// The mocked time if set, otherwise the system clock. A clock set before the epoch reads
/// as the epoch.
#[must_use]
pub fn get_time() -> Time {
    mocked_time().unwrap_or_else(|| {
        Time::from_duration_since_epoch(
            SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .unwrap_or_default(),
        )
    })
}

/// A point in time, as a duration since the Unix epoch
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time {
    since_epoch: Duration,
}

impl Time {
    #[must_use]
    pub const fn from_duration_since_epoch(since_epoch: Duration) -> Self {
        Self { since_epoch }
    }

    #[must_use]
    pub const fn from_secs_since_epoch(secs: u64) -> Self {
        Self::from_duration_since_epoch(Duration::from_secs(secs))
    }

    #[must_use]
    pub const fn as_secs_since_epoch(&self) -> u64 {
        self.since_epoch.as_secs()
    }

    #[must_use]
    pub const fn as_millis_since_epoch(&self) -> u128 {
        self.since_epoch.as_millis()
    }

    #[must_use]
    pub const fn saturating_duration_add(&self, duration: Duration) -> Self {
        Self::from_duration_since_epoch(self.since_epoch.saturating_add(duration))
    }

    /// Time elapsed since `earlier`; zero if `earlier` is actually later
    #[must_use]
    pub const fn saturating_sub(&self, earlier: Self) -> Duration {
        self.since_epoch.saturating_sub(earlier.since_epoch)
    }

    fn as_utc(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.since_epoch.as_secs()).ok()?;
        Utc.timestamp_opt(secs, self.since_epoch.subsec_nanos())
            .single()
    }

    /// e.g. `2025-02-10T14:30:00+00:00`
    #[must_use]
    pub fn as_rfc3339_string(&self) -> String {
        self.as_utc()
            .map_or_else(|| self.to_string(), |utc| utc.to_rfc3339())
    }

    /// Local wall-clock rendering, e.g. `2025-02-10 14:30`
    #[must_use]
    pub fn as_local_display_string(&self) -> String {
        self.as_utc()
            .map(|utc| utc.with_timezone(&chrono::Local))
            .map_or_else(
                || self.to_string(),
                |local| local.format(LOCAL_DISPLAY_FORMAT).to_string(),
            )
    }
}

impl Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_utc() {
            Some(utc) => write!(f, "{utc:?}"),
            None => write!(f, "Time({:?})", self.since_epoch),
        }
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_utc() {
            Some(utc) => write!(f, "{utc}"),
            None => write!(f, "{:?} since Unix epoch", self.since_epoch),
        }
    }
}
