use crate::{Error, Result, SnowflakeId, TimeSource, UnixClock};
use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Mutable mint counters, guarded by the machine's mutex.
#[derive(Debug, Default)]
struct MachineState {
    /// Last observed wall-clock millisecond (absolute, not epoch-relative).
    cur_ms: i64,
    /// Next sequence value to assign within `cur_ms`.
    cur_seq: i64,
}

/// A stateful Snowflake ID generator bound to one epoch and one machine ID.
///
/// Every machine in a fleet whose IDs will be compared must share the same
/// epoch, and each must hold a fleet-unique machine ID obtained out of band;
/// this type only guarantees uniqueness and monotonic growth for IDs minted
/// by a single machine in a single process.
///
/// The mint counters live behind an exclusive lock, so one machine can be
/// shared freely across threads. Independent machines never interfere with
/// each other. Counters are not persisted: a process restart starts from
/// zero, which is safe as long as the clock has advanced past the previous
/// process's last mint millisecond (epochs are expected to sit far in the
/// past relative to any restart).
///
/// # Example
///
/// ```
/// use frostid::{SnowflakeMachine, TWITTER_EPOCH};
///
/// let machine = SnowflakeMachine::new(TWITTER_EPOCH, 123)?;
/// let id = machine.try_next_id()?;
/// assert!(machine.validate(id));
/// assert_eq!(id.machine_id(), 123);
/// # Ok::<(), frostid::Error>(())
/// ```
pub struct SnowflakeMachine<T = UnixClock> {
    epoch: i64,
    machine_id: i64,
    time: T,
    state: Mutex<MachineState>,
}

impl SnowflakeMachine<UnixClock> {
    /// Creates a machine backed by the system wall clock.
    ///
    /// `epoch` is the zero point (in Unix ms) for every timestamp this
    /// machine encodes; `machine_id` is stamped into every minted ID.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] when `epoch` is outside
    /// `[0, MAX_TIMESTAMP]` or `machine_id` is outside
    /// `[0, MAX_MACHINE_ID]`.
    pub fn new(epoch: i64, machine_id: i64) -> Result<Self> {
        Self::with_time_source(epoch, machine_id, UnixClock)
    }
}

impl<T: TimeSource> SnowflakeMachine<T> {
    /// Creates a machine with an injected [`TimeSource`].
    ///
    /// Useful for tests and benchmarks that need a deterministic clock. The
    /// validation rules are the same as [`SnowflakeMachine::new`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] when `epoch` or `machine_id`
    /// is out of range.
    pub fn with_time_source(epoch: i64, machine_id: i64, time: T) -> Result<Self> {
        if !SnowflakeId::is_epoch_valid(epoch) || !SnowflakeId::is_machine_id_valid(machine_id) {
            return Err(Error::InvalidConfiguration { epoch, machine_id });
        }
        Ok(Self {
            epoch,
            machine_id,
            time,
            state: Mutex::new(MachineState::default()),
        })
    }

    /// Mints the next ID.
    ///
    /// The whole operation — clock sample, counter update, field packing —
    /// runs under the machine's lock, so concurrent callers are fully
    /// serialized and no two IDs from the same machine are ever equal.
    /// Absent backward clock steps, every returned ID compares strictly
    /// greater than every ID returned before it.
    ///
    /// If the wall clock moves backward (e.g. an NTP step), the machine
    /// keeps counting against the last observed millisecond: it neither
    /// blocks nor fails, and the IDs minted until the clock catches up may
    /// carry a timestamp lower than previously issued ones. Uniqueness is
    /// still preserved as long as the stale millisecond's sequence is not
    /// exhausted.
    ///
    /// # Errors
    /// Returns [`Error::SequenceExhausted`] when more than
    /// `MAX_SEQUENCE + 1` IDs are requested within one millisecond. The
    /// counters stay consistent; retry once the clock advances.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_id(&self) -> Result<SnowflakeId> {
        let mut state = self.state.lock();
        let now = self.time.unix_millis();
        let timestamp = now - self.epoch;
        if now > state.cur_ms {
            state.cur_ms = now;
            state.cur_seq = 0;
        }
        if state.cur_seq > SnowflakeId::MAX_SEQUENCE {
            return Err(Error::SequenceExhausted);
        }
        let sequence = state.cur_seq;
        state.cur_seq += 1;
        Ok(SnowflakeId::from_parts(timestamp, self.machine_id, sequence))
    }

    /// Checks whether `id` could have been minted by this machine.
    ///
    /// Returns false when the sign bit is set or the machine ID field does
    /// not match this machine. The timestamp and sequence fields are not
    /// inspected: this is an ownership check, not a structural validator.
    /// Callers needing stricter checks can range-check the decoded fields
    /// themselves.
    pub fn validate(&self, id: SnowflakeId) -> bool {
        id.is_non_negative() && id.machine_id() == self.machine_id
    }

    /// Recovers the absolute mint time of `id` in Unix milliseconds, by
    /// adding this machine's epoch to the raw timestamp field.
    ///
    /// No validation is performed; for an ID of untrusted provenance,
    /// combine with [`SnowflakeMachine::validate`].
    pub fn parse_time(&self, id: SnowflakeId) -> i64 {
        id.timestamp() + self.epoch
    }

    /// The epoch (Unix ms) this machine encodes timestamps against.
    pub fn epoch(&self) -> i64 {
        self.epoch
    }

    /// The machine ID stamped into every minted ID.
    pub fn machine_id(&self) -> i64 {
        self.machine_id
    }
}
