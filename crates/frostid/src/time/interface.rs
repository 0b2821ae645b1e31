/// Default epoch: Wednesday, January 1, 2025 00:00:00 UTC
pub const DEFAULT_EPOCH: i64 = 1_735_689_600_000;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: i64 = 1_288_834_974_657;

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: i64 = 1_420_070_400_000;

/// A source of wall-clock time in milliseconds since the Unix epoch.
///
/// This abstraction lets you plug in the real system clock or a mocked time
/// source in tests. The machine computes epoch-relative timestamps itself,
/// so implementations must return *absolute* Unix milliseconds.
///
/// # Example
///
/// ```
/// use frostid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn unix_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.unix_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current wall-clock time in milliseconds since the Unix
    /// epoch.
    fn unix_millis(&self) -> i64;
}
