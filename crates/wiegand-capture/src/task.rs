//! Async driver for the frame assembler.
//!
//! `CaptureTask` is the single owner of all capture state. It races the edge
//! stream against the frame inactivity deadline; when the deadline wins, the
//! completed frame is taken from the assembler and sent downstream as an
//! immutable [`FrameSnapshot`]. Because the snapshot leaves by value and the
//! assembler resets inside the same `take()`, there is no window in which an
//! incoming edge can corrupt a frame being consumed.

use crate::assembler::FrameAssembler;
use crate::source::EdgeSource;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, trace};
use wiegand_core::FrameSnapshot;

/// Drives an [`EdgeSource`] through a [`FrameAssembler`], emitting one
/// snapshot per completed frame.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tokio::sync::mpsc;
/// use wiegand_capture::{CaptureTask, MockWiegand};
///
/// #[tokio::main]
/// async fn main() {
///     let (reader, handle) = MockWiegand::new();
///     let window = Duration::from_micros(3000);
///     let (frames_tx, mut frames_rx) = mpsc::channel(8);
///
///     tokio::spawn(CaptureTask::new(reader, window, frames_tx).run());
///
///     handle.present_bits("0110").await.unwrap();
///     drop(handle); // line goes quiet for good
///
///     let snapshot = frames_rx.recv().await.unwrap();
///     assert_eq!(snapshot.frame().to_binary_string(), "0110");
/// }
/// ```
#[derive(Debug)]
pub struct CaptureTask<S: EdgeSource> {
    source: S,
    assembler: FrameAssembler,
    frames_tx: mpsc::Sender<FrameSnapshot>,
}

impl<S: EdgeSource> CaptureTask<S> {
    /// Create a capture task with the given inactivity window.
    pub fn new(source: S, quiet_window: Duration, frames_tx: mpsc::Sender<FrameSnapshot>) -> Self {
        CaptureTask {
            source,
            assembler: FrameAssembler::new(quiet_window),
            frames_tx,
        }
    }

    /// Run until the edge source disconnects or the frame receiver drops.
    ///
    /// A frame still in flight when the source disconnects is allowed to
    /// finish: the task waits out the remaining quiet window and emits it
    /// before returning.
    pub async fn run(mut self) {
        loop {
            let edge = match self.assembler.deadline() {
                // Idle: nothing to time out, park on the edge stream.
                None => self.source.next_edge().await,
                Some(deadline) => {
                    tokio::select! {
                        edge = self.source.next_edge() => edge,
                        () = time::sleep_until(deadline) => {
                            if !self.emit_if_complete().await {
                                return;
                            }
                            continue;
                        }
                    }
                }
            };

            match edge {
                Some(edge) => {
                    // An edge can arrive after the deadline passed but before
                    // the timer branch fired; close out the finished frame so
                    // the edge starts a fresh one instead of merging.
                    if !self.emit_if_complete().await {
                        return;
                    }
                    if self.assembler.on_edge(edge, Instant::now()) {
                        trace!(?edge, bits = self.assembler.bit_count(), "edge captured");
                    }
                }
                None => {
                    debug!("edge source disconnected");
                    if let Some(deadline) = self.assembler.deadline() {
                        time::sleep_until(deadline).await;
                        self.emit_if_complete().await;
                    }
                    return;
                }
            }
        }
    }

    /// Emit the completed frame, if any. Returns false once the receiver
    /// side of the frame channel is gone.
    async fn emit_if_complete(&mut self) -> bool {
        if !self.assembler.poll(Instant::now()) {
            return true;
        }
        let Some(snapshot) = self.assembler.take() else {
            return true;
        };
        trace!(bits = snapshot.bit_count(), "frame complete");
        if self.frames_tx.send(snapshot).await.is_err() {
            debug!("frame receiver dropped, stopping capture");
            return false;
        }
        true
    }
}
