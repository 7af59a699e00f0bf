//! Core constants for Wiegand frame capture and decoding.
//!
//! These values define the capture limits and timing behavior shared by the
//! assembler, the decoders, and the pipeline. They match the wire behavior of
//! the access-card readers this crate family targets; changing them will
//! change which frames are accepted and how they are packed.

// ============================================================================
// Capture Limits
// ============================================================================

/// Maximum number of bits a single frame may carry.
///
/// The capture buffer is bounded at this size. Edges arriving after a frame
/// has reached `MAX_BITS` are discarded without touching the buffer; the
/// frame keeps its first `MAX_BITS` bits and still terminates normally on
/// line silence.
///
/// # Examples
///
/// ```
/// use wiegand_core::BitFrame;
/// use wiegand_core::constants::MAX_BITS;
///
/// let mut frame = BitFrame::new();
/// for _ in 0..MAX_BITS {
///     frame.push(true).unwrap();
/// }
/// assert!(frame.push(true).is_err());
/// ```
pub const MAX_BITS: usize = 100;

/// Running bit-count threshold for the raw holder split.
///
/// The raw accumulators feed the chunk encoder: each captured bit first
/// increments the running count, then shifts into holder 1 while the count is
/// still below this threshold and into holder 2 afterwards. The comparison
/// happens *after* the increment, so holder 1 ends up with the first 22 bits
/// of the frame. This exact ordering is load-bearing for the packed hex
/// layout and must not be "fixed".
pub const HOLDER_SPLIT_COUNT: u32 = 23;

// ============================================================================
// Timing
// ============================================================================

/// Default inactivity window that terminates a frame, in microseconds.
///
/// Wiegand has no end-of-frame marker; a frame is complete once the lines
/// have been silent for this long with at least one bit captured. Pulses on
/// a real reader arrive roughly every millisecond, so 3000 µs of silence is
/// comfortably past the last pulse of a frame while still keeping distinct
/// card presentations apart.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wiegand_core::constants::DEFAULT_QUIET_WINDOW_US;
///
/// let window = Duration::from_micros(DEFAULT_QUIET_WINDOW_US);
/// assert_eq!(window.as_micros(), 3000);
/// ```
pub const DEFAULT_QUIET_WINDOW_US: u64 = 3000;

// ============================================================================
// Format Constraints
// ============================================================================

/// Shortest bit length with a chunk-encoding layout.
///
/// # Value: 26 bits (standard HID H10301)
pub const MIN_ENCODED_BITS: u8 = 26;

/// Longest bit length with a chunk-encoding layout.
///
/// # Value: 37 bits (HID H10304)
pub const MAX_ENCODED_BITS: u8 = 37;
