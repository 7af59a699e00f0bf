use crate::{
    Result,
    constants::{HOLDER_SPLIT_COUNT, MAX_BITS},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Ordered sequence of captured Wiegand bits.
///
/// A frame is exclusively owned by the capture side while bits arrive and is
/// handed to the decoders frozen inside a [`FrameSnapshot`]. The buffer is
/// bounded at [`MAX_BITS`](crate::constants::MAX_BITS); `push` refuses edges
/// beyond that instead of growing or wrapping.
///
/// # Examples
///
/// ```
/// use wiegand_core::BitFrame;
///
/// let mut frame = BitFrame::new();
/// frame.push(true).unwrap();
/// frame.push(false).unwrap();
/// assert_eq!(frame.len(), 2);
/// assert_eq!(frame.to_binary_string(), "10");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitFrame {
    bits: Vec<bool>,
}

impl BitFrame {
    /// Create an empty frame with capacity for a full capture.
    #[must_use]
    pub fn new() -> Self {
        BitFrame {
            bits: Vec::with_capacity(MAX_BITS),
        }
    }

    /// Parse a frame from a string of '0'/'1' characters.
    ///
    /// Intended for scripted replay and tests.
    ///
    /// # Errors
    /// Returns `Error::InvalidBitChar` for any character other than '0' or
    /// '1', and `Error::FrameOverflow` if the string is longer than
    /// [`MAX_BITS`](crate::constants::MAX_BITS).
    ///
    /// # Examples
    ///
    /// ```
    /// use wiegand_core::BitFrame;
    ///
    /// let frame = BitFrame::from_binary_str("0110").unwrap();
    /// assert_eq!(frame.len(), 4);
    /// assert!(BitFrame::from_binary_str("01x0").is_err());
    /// ```
    pub fn from_binary_str(s: &str) -> Result<Self> {
        let mut frame = BitFrame::new();
        for (position, c) in s.chars().enumerate() {
            let bit = match c {
                '0' => false,
                '1' => true,
                found => return Err(Error::InvalidBitChar { found, position }),
            };
            frame.push(bit)?;
        }
        Ok(frame)
    }

    /// Append one bit to the frame.
    ///
    /// # Errors
    /// Returns `Error::FrameOverflow` once the frame holds
    /// [`MAX_BITS`](crate::constants::MAX_BITS) bits.
    pub fn push(&mut self, bit: bool) -> Result<()> {
        if self.bits.len() >= MAX_BITS {
            return Err(Error::FrameOverflow { max: MAX_BITS });
        }
        self.bits.push(bit);
        Ok(())
    }

    /// Number of captured bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when no bits have been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `index` counted from the start of the frame.
    #[must_use]
    pub fn bit(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Fold a bit range into an integer, most-significant bit first.
    ///
    /// Each bit is left-shifted into the accumulator in frame order, which is
    /// how both facility codes and card numbers are extracted. Returns `None`
    /// when the range falls outside the captured bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use wiegand_core::BitFrame;
    ///
    /// let frame = BitFrame::from_binary_str("01101").unwrap();
    /// assert_eq!(frame.fold_range(1..4), Some(0b110));
    /// assert_eq!(frame.fold_range(3..9), None);
    /// ```
    #[must_use]
    pub fn fold_range(&self, range: Range<usize>) -> Option<u64> {
        let slice = self.bits.get(range)?;
        Some(slice.iter().fold(0u64, |acc, &b| (acc << 1) | u64::from(b)))
    }

    /// Render the frame as a '0'/'1' string.
    ///
    /// The string length always equals the bit count; leading zero bits are
    /// preserved.
    #[must_use]
    pub fn to_binary_string(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    /// Reset the frame to empty, keeping the allocation.
    pub fn clear(&mut self) {
        self.bits.clear();
    }
}

impl fmt::Display for BitFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_binary_string())
    }
}

/// Raw bit accumulators feeding the chunk encoder.
///
/// Built bit-by-bit during capture: each incoming bit increments the running
/// count first, then shifts into holder 1 while the count is below
/// [`HOLDER_SPLIT_COUNT`](crate::constants::HOLDER_SPLIT_COUNT) and into
/// holder 2 afterwards. The post-increment comparison means holder 1 carries
/// the first 22 bits of the frame. These are not the semantic fields; they
/// exist solely so the packed hex layout can be reconstructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawHolders {
    holder1: u64,
    holder2: u64,
    count: u32,
}

impl RawHolders {
    /// Create a pair of empty accumulators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift one bit into the appropriate holder.
    pub fn push(&mut self, bit: bool) {
        self.count += 1;
        if self.count < HOLDER_SPLIT_COUNT {
            self.holder1 = (self.holder1 << 1) | u64::from(bit);
        } else {
            self.holder2 = (self.holder2 << 1) | u64::from(bit);
        }
    }

    /// Accumulator for the leading bits of the frame.
    #[must_use]
    pub fn holder1(&self) -> u64 {
        self.holder1
    }

    /// Accumulator for the trailing bits of the frame.
    #[must_use]
    pub fn holder2(&self) -> u64 {
        self.holder2
    }

    /// Total number of bits pushed.
    #[must_use]
    pub fn bit_count(&self) -> u32 {
        self.count
    }

    /// Reset both holders and the running count.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Immutable capture result handed from the assembler to the decoders.
///
/// Exactly one snapshot is produced per completed frame; taking it resets
/// the capture state, so a snapshot can never alias live capture buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSnapshot {
    frame: BitFrame,
    holders: RawHolders,
}

impl FrameSnapshot {
    /// Freeze a frame and its raw accumulators.
    #[must_use]
    pub fn new(frame: BitFrame, holders: RawHolders) -> Self {
        FrameSnapshot { frame, holders }
    }

    /// The captured bit sequence.
    #[must_use]
    pub fn frame(&self) -> &BitFrame {
        &self.frame
    }

    /// The raw accumulators for chunk encoding.
    #[must_use]
    pub fn holders(&self) -> &RawHolders {
        &self.holders
    }

    /// Number of bits in the captured frame.
    #[must_use]
    pub fn bit_count(&self) -> usize {
        self.frame.len()
    }
}

/// One fully decoded card read.
///
/// Produced at most once per completed frame and never mutated afterwards.
/// A record with facility code and card number both zero is a "bad read"
/// (no semantic decode for its bit length, or a mangled capture); it is
/// still logged so the raw data survives.
///
/// # Examples
///
/// ```
/// use wiegand_core::DecodedRecord;
///
/// let record = DecodedRecord::new(26, 3, 629, 0x2004, 0x604EA, "0".repeat(26)).unwrap();
/// assert!(record.is_good_read());
/// assert_eq!(record.hex_value(), "2004604EA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedRecord {
    bit_count: u8,
    facility_code: u64,
    card_number: u64,
    hex_chunk1: u64,
    hex_chunk2: u64,
    raw_bits: String,
}

impl DecodedRecord {
    /// Create a record, validating the raw-bits invariant.
    ///
    /// # Errors
    /// Returns `Error::RawLengthMismatch` if the raw bit string length does
    /// not equal `bit_count`.
    pub fn new(
        bit_count: u8,
        facility_code: u64,
        card_number: u64,
        hex_chunk1: u64,
        hex_chunk2: u64,
        raw_bits: String,
    ) -> Result<Self> {
        if raw_bits.len() != usize::from(bit_count) {
            return Err(Error::RawLengthMismatch {
                expected: bit_count,
                actual: raw_bits.len(),
            });
        }
        Ok(DecodedRecord {
            bit_count,
            facility_code,
            card_number,
            hex_chunk1,
            hex_chunk2,
            raw_bits,
        })
    }

    /// Frame length in bits.
    #[must_use]
    pub fn bit_count(&self) -> u8 {
        self.bit_count
    }

    /// Decoded facility code, 0 for unsupported formats.
    #[must_use]
    pub fn facility_code(&self) -> u64 {
        self.facility_code
    }

    /// Decoded card number, 0 for unsupported formats.
    #[must_use]
    pub fn card_number(&self) -> u64 {
        self.card_number
    }

    /// High word of the packed hex representation.
    #[must_use]
    pub fn hex_chunk1(&self) -> u64 {
        self.hex_chunk1
    }

    /// Low word of the packed hex representation.
    #[must_use]
    pub fn hex_chunk2(&self) -> u64 {
        self.hex_chunk2
    }

    /// Raw frame bits as a '0'/'1' string, leading zeros preserved.
    #[must_use]
    pub fn raw_bits(&self) -> &str {
        &self.raw_bits
    }

    /// Reader-native packed hex identifier.
    ///
    /// Uppercase concatenation of the two chunks with no zero padding,
    /// matching what the reader itself prints.
    #[must_use]
    pub fn hex_value(&self) -> String {
        format!("{:X}{:X}", self.hex_chunk1, self.hex_chunk2)
    }

    /// True when both semantic fields decoded to nonzero values.
    #[must_use]
    pub fn is_good_read(&self) -> bool {
        self.facility_code > 0 && self.card_number > 0
    }
}

impl fmt::Display for DecodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "bits={}, FC={}, CN={}, HEX={}",
            self.bit_count,
            self.facility_code,
            self.card_number,
            self.hex_value()
        )
    }
}
