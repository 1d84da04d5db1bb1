//! Refresh cadence contract. The core owns no event loop; an external
//! timer is expected to call [`crate::App::tick`] at this interval.

use std::time::Duration;

/// Default refresh interval in milliseconds.
pub const REFRESH_INTERVAL_MS: u64 = 5000;

/// Interval the driving timer should fire at.
pub fn refresh_interval() -> Duration {
    Duration::from_millis(REFRESH_INTERVAL_MS)
}
