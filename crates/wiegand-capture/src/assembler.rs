//! Frame assembly state machine.
//!
//! Accumulates edge events into an ordered bit sequence and decides when a
//! frame is over. Wiegand frames have no terminator; a frame is complete
//! once the lines have been quiet for the configured window with at least
//! one bit captured.
//!
//! # States
//!
//! - `Idle`: no bits captured, no deadline armed
//! - `Capturing`: bits arriving; every accepted edge re-arms the deadline
//! - `Complete`: the deadline passed; the frame awaits [`take`]
//!
//! `Complete → Idle` happens only through [`take`], which moves the frame
//! and both raw accumulators out as one immutable snapshot and resets
//! everything in the same call. That take-and-reset is the critical section
//! of the whole capture path: because the snapshot leaves by value, no later
//! edge can touch it.
//!
//! [`take`]: FrameAssembler::take

use crate::source::EdgeEvent;
use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;
use wiegand_core::constants::MAX_BITS;
use wiegand_core::{BitFrame, FrameSnapshot, RawHolders};

/// Capture phase of the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    /// No bits captured since the last reset.
    Idle,

    /// Bits are arriving; the inactivity deadline is armed.
    Capturing,

    /// A completed frame is waiting to be consumed.
    Complete,
}

/// Accumulates edges into frames, delimited by line silence.
///
/// The assembler is deliberately synchronous and driven with explicit
/// instants, so timeout and boundary behavior can be tested without a
/// clock. [`CaptureTask`](crate::task::CaptureTask) supplies real time in
/// production.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tokio::time::Instant;
/// use wiegand_capture::{EdgeEvent, FrameAssembler};
///
/// let window = Duration::from_micros(3000);
/// let mut assembler = FrameAssembler::new(window);
/// let t0 = Instant::now();
///
/// assembler.on_edge(EdgeEvent::One, t0);
/// assembler.on_edge(EdgeEvent::Zero, t0);
/// assert!(!assembler.poll(t0));
/// assert!(assembler.poll(t0 + window));
///
/// let snapshot = assembler.take().unwrap();
/// assert_eq!(snapshot.frame().to_binary_string(), "10");
/// ```
#[derive(Debug)]
pub struct FrameAssembler {
    frame: BitFrame,
    holders: RawHolders,
    phase: CapturePhase,
    deadline: Option<Instant>,
    quiet_window: Duration,
    discarded: u32,
}

impl FrameAssembler {
    /// Create an idle assembler with the given inactivity window.
    #[must_use]
    pub fn new(quiet_window: Duration) -> Self {
        FrameAssembler {
            frame: BitFrame::new(),
            holders: RawHolders::new(),
            phase: CapturePhase::Idle,
            deadline: None,
            quiet_window,
            discarded: 0,
        }
    }

    /// Current capture phase.
    #[must_use]
    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    /// Bits captured in the in-flight frame.
    #[must_use]
    pub fn bit_count(&self) -> usize {
        self.frame.len()
    }

    /// Edges discarded since the last reset (overflow or late arrivals).
    #[must_use]
    pub fn discarded(&self) -> u32 {
        self.discarded
    }

    /// Deadline at which the in-flight frame completes, if one is armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Configured inactivity window.
    #[must_use]
    pub fn quiet_window(&self) -> Duration {
        self.quiet_window
    }

    /// Feed one edge observed at `now`. Returns whether it was accepted.
    ///
    /// Accepted edges append to the frame, shift into the raw accumulators,
    /// and re-arm the deadline. Two kinds of edge are discarded instead:
    ///
    /// - edges past [`MAX_BITS`]: the buffer is bounded; the deadline is
    ///   still re-armed so an overlong burst terminates as a single frame
    /// - edges while a completed frame awaits [`take`](Self::take): they
    ///   belong to no frame and must not bleed into the next one
    pub fn on_edge(&mut self, edge: EdgeEvent, now: Instant) -> bool {
        if self.phase == CapturePhase::Complete {
            self.discarded += 1;
            warn!(discarded = self.discarded, "edge while frame awaits consumption, dropped");
            return false;
        }
        if self.frame.len() >= MAX_BITS {
            self.discarded += 1;
            self.deadline = Some(now + self.quiet_window);
            warn!(
                max_bits = MAX_BITS,
                discarded = self.discarded,
                "capture full, edge dropped"
            );
            return false;
        }

        let bit = edge.bit();
        // Cannot fail: the length guard above mirrors the buffer bound.
        if self.frame.push(bit).is_err() {
            self.discarded += 1;
            return false;
        }
        self.holders.push(bit);
        self.phase = CapturePhase::Capturing;
        self.deadline = Some(now + self.quiet_window);
        true
    }

    /// Check the inactivity deadline. Returns whether a completed frame is
    /// ready to take.
    ///
    /// An empty frame never completes: with zero bits captured there is no
    /// deadline armed and the assembler stays `Idle`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.phase == CapturePhase::Capturing
            && !self.frame.is_empty()
            && self.deadline.is_some_and(|deadline| now >= deadline)
        {
            self.phase = CapturePhase::Complete;
        }
        self.phase == CapturePhase::Complete
    }

    /// Take the completed frame and reset to `Idle` in one step.
    ///
    /// Returns `None` unless a frame has completed. On success the frame
    /// and both raw accumulators leave by value, and every piece of capture
    /// state (buffer, holders, deadline, discard counter) is reset before
    /// the call returns, so the next edge starts a fresh frame.
    pub fn take(&mut self) -> Option<FrameSnapshot> {
        if self.phase != CapturePhase::Complete {
            return None;
        }
        let snapshot = FrameSnapshot::new(
            std::mem::take(&mut self.frame),
            std::mem::take(&mut self.holders),
        );
        self.phase = CapturePhase::Idle;
        self.deadline = None;
        self.discarded = 0;
        Some(snapshot)
    }
}
