//! Cache refresh policy.

use std::time::Duration;

const SECONDS_PER_DAY: u64 = 86_400;

/// When a cached document may be served instead of fetching it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Refresh {
    /// Serve any cached copy; fetch only when nothing is cached.
    #[default]
    Cached,
    /// Always fetch and overwrite the cache.
    Always,
    /// Fetch when the cached copy is older than this.
    MaxAge(Duration),
}

impl Refresh {
    /// Refetch documents cached more than `days` days ago.
    #[must_use]
    pub const fn max_age_days(days: u64) -> Self {
        Self::MaxAge(Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY)))
    }

    /// Whether a cached entry should be consulted at all.
    #[must_use]
    pub const fn allows_cache(self) -> bool {
        !matches!(self, Self::Always)
    }

    /// Whether a cache entry of the given age must be refetched.
    #[must_use]
    pub fn is_stale(self, age: Duration) -> bool {
        match self {
            Self::Cached => false,
            Self::Always => true,
            Self::MaxAge(max_age) => age > max_age,
        }
    }
}

impl From<bool> for Refresh {
    fn from(refresh: bool) -> Self {
        if refresh { Self::Always } else { Self::Cached }
    }
}

/// A bare integer is a maximum age in days.
impl From<u32> for Refresh {
    fn from(days: u32) -> Self {
        Self::max_age_days(u64::from(days))
    }
}
