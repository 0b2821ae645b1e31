pub type Result<T> = core::result::Result<T, Error>;

/// All error variants that `frostid` can emit.
///
/// Construction errors are non-recoverable: the caller must supply a
/// corrected epoch or machine ID and build a new machine. Exhaustion is
/// recoverable: the machine's state stays consistent and the call can be
/// retried once the clock reaches the next millisecond.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The machine was configured with an epoch or machine ID outside the
    /// encodable range.
    #[error("invalid machine configuration: epoch={epoch}, machine_id={machine_id}")]
    InvalidConfiguration { epoch: i64, machine_id: i64 },

    /// More than `MAX_SEQUENCE + 1` IDs were requested within the same
    /// millisecond.
    #[error("snowflake sequence exhausted for the current millisecond")]
    SequenceExhausted,
}
