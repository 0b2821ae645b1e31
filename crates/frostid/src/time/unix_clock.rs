use crate::TimeSource;
use std::time::{SystemTime, UNIX_EPOCH};

/// The system wall clock.
///
/// Reads [`SystemTime::now`] on every call. Wall-clock adjustments (NTP
/// steps, manual changes) are visible through this source; see
/// [`SnowflakeMachine::try_next_id`] for how the generator behaves when the
/// clock moves backward.
///
/// [`SnowflakeMachine::try_next_id`]: crate::SnowflakeMachine::try_next_id
#[derive(Clone, Copy, Debug, Default)]
pub struct UnixClock;

impl TimeSource for UnixClock {
    fn unix_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH")
            .as_millis() as i64
    }
}
