//! Snapshot-to-record decoding.

use wiegand_core::{DecodedRecord, Error, FrameSnapshot, Result};
use wiegand_decode::{decode_fields, encode_chunks};

/// Decode one completed frame into an immutable record.
///
/// Runs the semantic field extraction and the chunk encoding over the same
/// snapshot and bundles the results with the raw binary string. Both
/// decoders degrade to zeros for lengths they do not know, so this always
/// produces a record: a bad read is still a record, and the raw bits are
/// preserved for the log either way.
///
/// # Errors
/// Returns `Error::UnsupportedBitLength` only for frames longer than 255
/// bits, which the bounded capture buffer cannot produce.
///
/// # Examples
///
/// ```
/// use wiegand_core::{BitFrame, FrameSnapshot, RawHolders};
/// use wiegand_pipeline::decode_snapshot;
///
/// let bits = "00000001100000010011101010";
/// let frame = BitFrame::from_binary_str(bits).unwrap();
/// let mut holders = RawHolders::new();
/// for c in bits.chars() {
///     holders.push(c == '1');
/// }
///
/// let record = decode_snapshot(&FrameSnapshot::new(frame, holders)).unwrap();
/// assert_eq!(record.facility_code(), 3);
/// assert_eq!(record.card_number(), 629);
/// assert_eq!(record.hex_value(), "2004604EA");
/// ```
pub fn decode_snapshot(snapshot: &FrameSnapshot) -> Result<DecodedRecord> {
    let frame = snapshot.frame();
    let bit_count = u8::try_from(frame.len())
        .map_err(|_| Error::UnsupportedBitLength(u8::MAX))?;

    let fields = decode_fields(frame);
    let chunks = encode_chunks(snapshot.holders(), bit_count).unwrap_or_default();

    DecodedRecord::new(
        bit_count,
        fields.facility_code,
        fields.card_number,
        chunks.chunk1,
        chunks.chunk2,
        frame.to_binary_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiegand_core::{BitFrame, RawHolders};

    fn snapshot_for(bits: &str) -> FrameSnapshot {
        let frame = BitFrame::from_binary_str(bits).unwrap();
        let mut holders = RawHolders::new();
        for c in bits.chars() {
            holders.push(c == '1');
        }
        FrameSnapshot::new(frame, holders)
    }

    #[test]
    fn test_good_read_record() {
        let record = decode_snapshot(&snapshot_for("00000001100000010011101010")).unwrap();
        assert_eq!(record.bit_count(), 26);
        assert_eq!(record.facility_code(), 3);
        assert_eq!(record.card_number(), 629);
        assert_eq!(record.hex_chunk1(), 0x2004);
        assert_eq!(record.hex_chunk2(), 0x604EA);
        assert!(record.is_good_read());
    }

    #[test]
    fn test_chunks_without_semantic_decode() {
        // 28 bits: chunk layout exists, semantic layout does not.
        let record = decode_snapshot(&snapshot_for(&"1".repeat(28))).unwrap();
        assert_eq!(record.facility_code(), 0);
        assert_eq!(record.card_number(), 0);
        assert!(!record.is_good_read());
        assert_eq!(record.hex_chunk1(), 0x201F);
        assert_eq!(record.hex_chunk2(), 0xFF_FFFF);
    }

    #[test]
    fn test_length_outside_chunk_table() {
        let record = decode_snapshot(&snapshot_for(&"1".repeat(44))).unwrap();
        assert_eq!(record.hex_chunk1(), 0);
        assert_eq!(record.hex_chunk2(), 0);
        assert!(!record.is_good_read());
    }

    #[test]
    fn test_raw_bits_preserve_leading_zeros_beyond_32_bits() {
        // A 37-bit frame with a zero MSB must render all 37 characters.
        let mut bits = String::from("0");
        bits.push_str(&"1".repeat(36));
        let record = decode_snapshot(&snapshot_for(&bits)).unwrap();
        assert_eq!(record.raw_bits().len(), 37);
        assert!(record.raw_bits().starts_with('0'));
    }
}
