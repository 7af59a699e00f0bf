//! Packed two-word hex encoding of raw card data.
//!
//! Readers present a card as a short hex string that is neither the facility
//! code nor the card number: it is the raw frame repacked into two words with
//! fixed "preamble" marker bits. This module rebuilds that representation
//! from the raw accumulators so logs stay byte-compatible with the reader's
//! own output, whether or not the semantic decode succeeded.
//!
//! Every supported length is a [`ChunkDescriptor`] row; the encoder itself is
//! a handful of shifts and masks with no per-length branching.
//!
//! # Layout
//!
//! ```text
//! chunk1 (20 or 36 bits)              chunk2 (24 or 32 bits)
//! ┌─ sentinels ─┬─ holder1 high ─┐    ┌─ holder1 low ─┬─ holder2 ─┐
//! │ set_bits    │ copy_bits from │    │ shifted left  │ low split │
//! │ (fixed 1s)  │ holder1>>shift │    │ by split      │ bits      │
//! └─────────────┴────────────────┘    └───────────────┴───────────┘
//! ```

use wiegand_core::RawHolders;

/// Chunk-encoding parameters for one frame length.
///
/// All positions are bit indices counted from the least-significant end of
/// the output word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkDescriptor {
    /// Frame length this layout applies to.
    pub bit_length: u8,

    /// Width of chunk 1 in bits (36 only for 36-bit frames).
    pub chunk1_bits: u8,

    /// Width of chunk 2 in bits.
    pub chunk2_bits: u8,

    /// Sentinel positions written as 1 in chunk 1.
    pub set_bits: &'static [u8],

    /// Positions forced to 0 in chunk 1 after the copy.
    pub clear_bits: &'static [u8],

    /// Number of low chunk-1 bits copied from holder 1.
    pub copy_bits: u8,

    /// Right shift applied to holder 1 for the chunk-1 copy.
    pub holder1_shift: u8,

    /// Number of low chunk-2 bits taken from holder 2; the remaining high
    /// bits come from the low end of holder 1.
    pub split: u8,
}

/// Chunk layouts for every encodable frame length.
///
/// This table is wider than the semantic format table: lengths 28, 30, 31,
/// 32 and 36 can be hex-encoded but have no facility/card layout. Readers
/// in the field hex-encode those lengths too, so the asymmetry is kept.
pub static CHUNK_LAYOUTS: [ChunkDescriptor; 12] = [
    ChunkDescriptor {
        bit_length: 26,
        chunk1_bits: 20,
        chunk2_bits: 24,
        set_bits: &[13, 2],
        clear_bits: &[],
        copy_bits: 2,
        holder1_shift: 20,
        split: 4,
    },
    ChunkDescriptor {
        bit_length: 27,
        chunk1_bits: 20,
        chunk2_bits: 24,
        set_bits: &[13, 3],
        clear_bits: &[],
        copy_bits: 3,
        holder1_shift: 19,
        split: 5,
    },
    ChunkDescriptor {
        bit_length: 28,
        chunk1_bits: 20,
        chunk2_bits: 24,
        set_bits: &[13, 4],
        clear_bits: &[],
        copy_bits: 4,
        holder1_shift: 18,
        split: 6,
    },
    ChunkDescriptor {
        bit_length: 29,
        chunk1_bits: 20,
        chunk2_bits: 24,
        set_bits: &[13, 5],
        clear_bits: &[],
        copy_bits: 5,
        holder1_shift: 17,
        split: 7,
    },
    ChunkDescriptor {
        bit_length: 30,
        chunk1_bits: 20,
        chunk2_bits: 24,
        set_bits: &[13, 6],
        clear_bits: &[],
        copy_bits: 6,
        holder1_shift: 16,
        split: 8,
    },
    ChunkDescriptor {
        bit_length: 31,
        chunk1_bits: 20,
        chunk2_bits: 24,
        set_bits: &[13, 7],
        clear_bits: &[],
        copy_bits: 7,
        holder1_shift: 15,
        split: 9,
    },
    ChunkDescriptor {
        bit_length: 32,
        chunk1_bits: 20,
        chunk2_bits: 24,
        set_bits: &[13, 8],
        clear_bits: &[],
        copy_bits: 8,
        holder1_shift: 14,
        split: 10,
    },
    ChunkDescriptor {
        bit_length: 33,
        chunk1_bits: 20,
        chunk2_bits: 32,
        set_bits: &[15, 11],
        clear_bits: &[],
        copy_bits: 11,
        holder1_shift: 17,
        split: 15,
    },
    ChunkDescriptor {
        bit_length: 34,
        chunk1_bits: 20,
        chunk2_bits: 24,
        set_bits: &[13, 10],
        clear_bits: &[],
        copy_bits: 10,
        holder1_shift: 12,
        split: 12,
    },
    ChunkDescriptor {
        bit_length: 35,
        chunk1_bits: 20,
        chunk2_bits: 24,
        set_bits: &[13, 11],
        clear_bits: &[],
        copy_bits: 11,
        holder1_shift: 11,
        split: 13,
    },
    ChunkDescriptor {
        bit_length: 36,
        chunk1_bits: 36,
        chunk2_bits: 32,
        set_bits: &[17, 16],
        clear_bits: &[],
        copy_bits: 16,
        holder1_shift: 14,
        split: 18,
    },
    // 37-bit frames carry no sentinel; bit 13 is forced to zero instead and
    // the copy spans the whole word.
    ChunkDescriptor {
        bit_length: 37,
        chunk1_bits: 20,
        chunk2_bits: 24,
        set_bits: &[],
        clear_bits: &[13],
        copy_bits: 20,
        holder1_shift: 9,
        split: 15,
    },
];

/// Look up the chunk layout for a frame length.
#[must_use]
pub fn chunk_layout_for(bit_length: u8) -> Option<&'static ChunkDescriptor> {
    CHUNK_LAYOUTS.iter().find(|d| d.bit_length == bit_length)
}

/// The two packed words forming the reader's hex identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexChunks {
    pub chunk1: u64,
    pub chunk2: u64,
}

fn low_mask(bits: u8) -> u64 {
    if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 }
}

/// Rebuild the packed hex words for a frame length.
///
/// Returns `None` for lengths without a chunk layout (outside 26..=37);
/// callers emit zero chunks in that case, matching the reader.
///
/// # Examples
///
/// ```
/// use wiegand_core::RawHolders;
/// use wiegand_decode::encode_chunks;
///
/// let mut holders = RawHolders::new();
/// for bit in "00000001100000010011101010".chars() {
///     holders.push(bit == '1');
/// }
/// let chunks = encode_chunks(&holders, 26).unwrap();
/// assert_eq!(chunks.chunk1, 0x2004);
/// assert_eq!(chunks.chunk2, 0x604EA);
/// ```
#[must_use]
pub fn encode_chunks(holders: &RawHolders, bit_length: u8) -> Option<HexChunks> {
    let d = chunk_layout_for(bit_length)?;

    let mut chunk1 = (holders.holder1() >> d.holder1_shift) & low_mask(d.copy_bits);
    for &bit in d.set_bits {
        chunk1 |= 1 << bit;
    }
    for &bit in d.clear_bits {
        chunk1 &= !(1 << bit);
    }

    let high_bits = d.chunk2_bits - d.split;
    let chunk2 = ((holders.holder1() & low_mask(high_bits)) << d.split)
        | (holders.holder2() & low_mask(d.split));

    Some(HexChunks { chunk1, chunk2 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn holders_for(bits: &str) -> RawHolders {
        let mut holders = RawHolders::new();
        for c in bits.chars() {
            holders.push(c == '1');
        }
        holders
    }

    fn ones_holders(len: usize) -> RawHolders {
        holders_for(&"1".repeat(len))
    }

    #[test]
    fn test_layout_lookup_covers_26_to_37() {
        for len in 26..=37u8 {
            assert!(chunk_layout_for(len).is_some(), "length {len}");
        }
        assert!(chunk_layout_for(25).is_none());
        assert!(chunk_layout_for(38).is_none());
    }

    #[test]
    fn test_unencodable_length_yields_none() {
        assert!(encode_chunks(&ones_holders(24), 24).is_none());
        assert!(encode_chunks(&ones_holders(40), 40).is_none());
    }

    // All-ones frames exercise every mask and shift in a layout; the
    // expected words were worked out by hand from the reader's packing.
    #[rstest]
    #[case(26, 0x2007, 0xFF_FFFF)]
    #[case(27, 0x200F, 0xFF_FFFF)]
    #[case(28, 0x201F, 0xFF_FFFF)]
    #[case(29, 0x203F, 0xFF_FFFF)]
    #[case(30, 0x207F, 0xFF_FFFF)]
    #[case(31, 0x20FF, 0xFF_FFFF)]
    #[case(32, 0x21FF, 0xFF_FFFF)]
    #[case(33, 0x881F, 0xFFFF_87FF)]
    #[case(34, 0x27FF, 0xFF_FFFF)]
    #[case(35, 0x2FFF, 0xFF_FFFF)]
    #[case(36, 0x3_00FF, 0xFFFC_3FFF)]
    #[case(37, 0x1FFF, 0xFF_FFFF)]
    fn test_encode_all_ones(#[case] len: u8, #[case] chunk1: u64, #[case] chunk2: u64) {
        let chunks = encode_chunks(&ones_holders(usize::from(len)), len).unwrap();
        assert_eq!(chunks.chunk1, chunk1, "chunk1 for {len}");
        assert_eq!(chunks.chunk2, chunk2, "chunk2 for {len}");
    }

    #[test]
    fn test_sentinels_present_on_all_zero_frame() {
        // Sentinel bits are fixed markers: they appear even when the card
        // data is all zeros.
        let chunks = encode_chunks(&holders_for(&"0".repeat(26)), 26).unwrap();
        assert_eq!(chunks.chunk1, (1 << 13) | (1 << 2));
        assert_eq!(chunks.chunk2, 0);
    }

    #[test]
    fn test_37_bit_clears_bit_13() {
        // Holder1 all ones puts a 1 at every copied position; bit 13 must
        // still come out clear.
        let chunks = encode_chunks(&ones_holders(37), 37).unwrap();
        assert_eq!(chunks.chunk1 & (1 << 13), 0);
    }

    #[test]
    fn test_26_bit_worked_example() {
        let holders = holders_for("00000001100000010011101010");
        let chunks = encode_chunks(&holders, 26).unwrap();
        // Sentinels at 13 and 2; the two leading frame bits are zero, so
        // chunk1 is exactly the marker word.
        assert_eq!(chunks.chunk1, 0x2004);
        assert_eq!(chunks.chunk2, 0x604EA);
    }

    #[test]
    fn test_chunk2_split_boundary() {
        // 26-bit layout: holder2 supplies exactly the low 4 bits.
        let mut bits = "0".repeat(22);
        bits.push_str("1111");
        let chunks = encode_chunks(&holders_for(&bits), 26).unwrap();
        assert_eq!(chunks.chunk2, 0xF);
    }
}
