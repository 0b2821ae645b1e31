use core::fmt;

/// A 64-bit Snowflake ID using the classic layout
///
/// - 1 bit reserved (the sign bit, always zero in minted IDs)
/// - 41 bits timestamp (ms since the minting machine's epoch)
/// - 10 bits machine ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21             12 11             0
///              +--------------+----------------+-----------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | machine ID (10) | sequence (12) |
///              +--------------+----------------+-----------------+---------------+
///              |<----------- MSB ---------- 64 bits ----------- LSB ------------>|
/// ```
///
/// The backing integer is signed so that a set sign bit doubles as a cheap
/// validity signal: no ID minted by [`SnowflakeMachine`] is ever negative.
/// Numeric order of the packed integer matches lexicographic order on
/// `(timestamp, machine_id, sequence)`.
///
/// [`SnowflakeMachine`]: crate::SnowflakeMachine
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: i64,
}

impl SnowflakeId {
    /// Width of the timestamp field in bits.
    pub const TIMESTAMP_BITS: u32 = 41;

    /// Width of the machine ID field in bits.
    pub const MACHINE_ID_BITS: u32 = 10;

    /// Width of the sequence field in bits.
    pub const SEQUENCE_BITS: u32 = 12;

    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 22
    /// through 62.
    pub const TIMESTAMP_MASK: i64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Bitmask for extracting the 10-bit machine ID field. Occupies bits 12
    /// through 21.
    pub const MACHINE_ID_MASK: i64 = (1 << Self::MACHINE_ID_BITS) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: i64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Number of bits to shift the timestamp to its position (bit 22).
    pub const TIMESTAMP_SHIFT: u32 = Self::MACHINE_ID_BITS + Self::SEQUENCE_BITS;

    /// Number of bits to shift the machine ID to its position (bit 12).
    pub const MACHINE_ID_SHIFT: u32 = Self::SEQUENCE_BITS;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u32 = 0;

    /// Largest encodable timestamp: `2^41 - 1` milliseconds (~69 years past
    /// the epoch).
    pub const MAX_TIMESTAMP: i64 = Self::TIMESTAMP_MASK;

    /// Largest encodable machine ID: `2^10 - 1`.
    pub const MAX_MACHINE_ID: i64 = Self::MACHINE_ID_MASK;

    /// Largest encodable sequence: `2^12 - 1`, i.e. 4096 IDs per machine per
    /// millisecond.
    pub const MAX_SEQUENCE: i64 = Self::SEQUENCE_MASK;

    /// Packs the three fields at their fixed bit offsets.
    ///
    /// No range validation is performed: each field is truncated to its bit
    /// width. [`SnowflakeMachine`] validates its configuration once at
    /// construction, so the mint path never re-checks bounds here.
    /// Out-of-range input produces a well-formed but wrong ID.
    ///
    /// [`SnowflakeMachine`]: crate::SnowflakeMachine
    pub const fn from_parts(timestamp: i64, machine_id: i64, sequence: i64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let machine_id = (machine_id & Self::MACHINE_ID_MASK) << Self::MACHINE_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | machine_id | sequence,
        }
    }

    /// Extracts the timestamp field (ms since the minting machine's epoch).
    ///
    /// Defined for any input, including IDs this crate never produced.
    pub const fn timestamp(&self) -> i64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the machine ID field.
    ///
    /// Defined for any input, including IDs this crate never produced.
    pub const fn machine_id(&self) -> i64 {
        (self.id >> Self::MACHINE_ID_SHIFT) & Self::MACHINE_ID_MASK
    }

    /// Extracts the sequence field.
    ///
    /// Defined for any input, including IDs this crate never produced.
    pub const fn sequence(&self) -> i64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns true when `epoch` fits the timestamp encoding domain
    /// (`0 <= epoch <= MAX_TIMESTAMP`).
    pub const fn is_epoch_valid(epoch: i64) -> bool {
        epoch >= 0 && epoch <= Self::MAX_TIMESTAMP
    }

    /// Returns true when `machine_id` fits its field
    /// (`0 <= machine_id <= MAX_MACHINE_ID`).
    pub const fn is_machine_id_valid(machine_id: i64) -> bool {
        machine_id >= 0 && machine_id <= Self::MAX_MACHINE_ID
    }

    /// Returns true when the reserved sign bit is clear.
    pub const fn is_non_negative(&self) -> bool {
        self.id >= 0
    }

    /// Converts this ID into its raw integer representation.
    pub const fn to_raw(&self) -> i64 {
        self.id
    }

    /// Converts a raw integer into an ID, without any validation.
    pub const fn from_raw(raw: i64) -> Self {
        Self { id: raw }
    }

    /// Returns the ID as a zero-padded 20-digit string.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &format_args!("{} (0x{:x})", self.id, self.id))
            .field("timestamp", &self.timestamp())
            .field("machine_id", &self.machine_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl From<SnowflakeId> for i64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl From<i64> for SnowflakeId {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_then_extract_is_identity() {
        let id = SnowflakeId::from_parts(123456789, 123, 10);
        assert_eq!(id.timestamp(), 123456789);
        assert_eq!(id.machine_id(), 123);
        assert_eq!(id.sequence(), 10);
    }

    #[test]
    fn fields_at_their_bounds() {
        let ts = SnowflakeId::MAX_TIMESTAMP;
        let mid = SnowflakeId::MAX_MACHINE_ID;
        let seq = SnowflakeId::MAX_SEQUENCE;

        let id = SnowflakeId::from_parts(ts, mid, seq);
        assert_eq!(id.timestamp(), ts);
        assert_eq!(id.machine_id(), mid);
        assert_eq!(id.sequence(), seq);
        assert!(id.is_non_negative());

        let id = SnowflakeId::from_parts(0, 0, 0);
        assert_eq!(id.to_raw(), 0);

        let id = SnowflakeId::from_parts(1, 1, 1);
        assert_eq!(id.timestamp(), 1);
        assert_eq!(id.machine_id(), 1);
        assert_eq!(id.sequence(), 1);
    }

    #[test]
    fn max_constants_match_bit_widths() {
        assert_eq!(
            SnowflakeId::MAX_TIMESTAMP,
            -1 ^ (-1 << SnowflakeId::TIMESTAMP_BITS)
        );
        assert_eq!(
            SnowflakeId::MAX_MACHINE_ID,
            -1 ^ (-1 << SnowflakeId::MACHINE_ID_BITS)
        );
        assert_eq!(
            SnowflakeId::MAX_SEQUENCE,
            -1 ^ (-1 << SnowflakeId::SEQUENCE_BITS)
        );
        // 1 reserved sign bit + the three fields cover the full word.
        assert_eq!(
            1 + SnowflakeId::TIMESTAMP_BITS
                + SnowflakeId::MACHINE_ID_BITS
                + SnowflakeId::SEQUENCE_BITS,
            i64::BITS
        );
    }

    #[test]
    fn extraction_is_total_over_foreign_input() {
        // A sign-bit-set value still decodes to in-range fields.
        let id = SnowflakeId::from_raw(-1);
        assert!(!id.is_non_negative());
        assert_eq!(id.timestamp(), SnowflakeId::MAX_TIMESTAMP);
        assert_eq!(id.machine_id(), SnowflakeId::MAX_MACHINE_ID);
        assert_eq!(id.sequence(), SnowflakeId::MAX_SEQUENCE);

        let id = SnowflakeId::from_raw(i64::MIN);
        assert_eq!(id.timestamp(), 0);
        assert_eq!(id.machine_id(), 0);
        assert_eq!(id.sequence(), 0);
    }

    #[test]
    fn packed_order_matches_field_order() {
        let a = SnowflakeId::from_parts(41, 5, SnowflakeId::MAX_SEQUENCE);
        let b = SnowflakeId::from_parts(42, 5, 0);
        let c = SnowflakeId::from_parts(42, 5, 1);
        assert!(a < b && b < c);
    }

    #[test]
    fn epoch_and_machine_id_validators() {
        assert!(SnowflakeId::is_epoch_valid(0));
        assert!(SnowflakeId::is_epoch_valid(SnowflakeId::MAX_TIMESTAMP));
        assert!(!SnowflakeId::is_epoch_valid(-1));
        assert!(!SnowflakeId::is_epoch_valid(SnowflakeId::MAX_TIMESTAMP + 1));

        assert!(SnowflakeId::is_machine_id_valid(0));
        assert!(SnowflakeId::is_machine_id_valid(SnowflakeId::MAX_MACHINE_ID));
        assert!(!SnowflakeId::is_machine_id_valid(-1));
        assert!(!SnowflakeId::is_machine_id_valid(
            SnowflakeId::MAX_MACHINE_ID + 1
        ));
    }

    #[test]
    fn display_and_padded_string() {
        let id = SnowflakeId::from_parts(123456789, 123, 10);
        assert_eq!(id.to_string(), id.to_raw().to_string());
        let padded = id.to_padded_string();
        assert_eq!(padded.len(), 20);
        assert_eq!(padded.trim_start_matches('0'), id.to_string());
    }

    #[test]
    fn raw_conversions_round_trip() {
        let id = SnowflakeId::from_parts(7, 3, 1);
        assert_eq!(SnowflakeId::from_raw(id.to_raw()), id);
        assert_eq!(i64::from(id), id.to_raw());
        assert_eq!(SnowflakeId::from(id.to_raw()), id);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let id = SnowflakeId::from_parts(123456789, 123, 10);
        let json = serde_json::to_string(&id).unwrap();
        let back: SnowflakeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
