//! The read pipeline: classify, log, notify.
//!
//! One `ReaderPipeline` consumes completed frames and fans the decoded
//! records out: every record goes to the sink, good reads additionally go to
//! the notifier when the toggle is on. Collaborator failures are logged and
//! the loop keeps running; a card reader that stops logging because one
//! email bounced would be worse than the bounce.

use crate::emitter::decode_snapshot;
use crate::notify::Notifier;
use crate::sink::RecordSink;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use wiegand_core::{DecodedRecord, FrameSnapshot, Result};

/// Decodes frames and hands records to the collaborators.
///
/// # Examples
///
/// ```
/// use wiegand_pipeline::{LogNotifier, MemorySink, ReaderPipeline};
///
/// let pipeline = ReaderPipeline::new(MemorySink::new(), LogNotifier, false);
/// assert!(!pipeline.notifications_enabled());
/// ```
#[derive(Debug)]
pub struct ReaderPipeline<S: RecordSink, N: Notifier> {
    sink: S,
    notifier: N,
    notifications: bool,
}

impl<S: RecordSink, N: Notifier> ReaderPipeline<S, N> {
    /// Create a pipeline with the given collaborators and notification
    /// toggle.
    pub fn new(sink: S, notifier: N, notifications: bool) -> Self {
        ReaderPipeline {
            sink,
            notifier,
            notifications,
        }
    }

    /// Whether good reads are forwarded to the notifier.
    #[must_use]
    pub fn notifications_enabled(&self) -> bool {
        self.notifications
    }

    /// The sink, for inspection after a run.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Process one completed frame.
    ///
    /// Decodes the snapshot, logs the read, appends the record to the sink
    /// (always; bad reads keep their raw data), and notifies on good reads
    /// when enabled. Sink and notifier failures are logged, not propagated.
    ///
    /// # Errors
    /// Only decoding itself can fail, and then only for frames the bounded
    /// capture buffer cannot actually produce.
    pub async fn handle_frame(&mut self, snapshot: FrameSnapshot) -> Result<DecodedRecord> {
        let record = decode_snapshot(&snapshot)?;

        if record.is_good_read() {
            info!(
                bits = record.bit_count(),
                facility = record.facility_code(),
                card = record.card_number(),
                hex = %record.hex_value(),
                "card read"
            );
        } else {
            warn!(
                bits = record.bit_count(),
                hex = %record.hex_value(),
                raw = %record.raw_bits(),
                "bad card read, raw data retained in log"
            );
        }

        if let Err(e) = self.sink.append(&record).await {
            error!(error = %e, "failed to append card record to log");
        }

        if self.notifications && record.is_good_read() {
            if let Err(e) = self.notifier.notify(&record).await {
                error!(error = %e, "failed to send card notification");
            }
        }

        Ok(record)
    }

    /// Consume frames until the capture side closes the channel.
    ///
    /// # Errors
    /// Propagates only decoding failures from [`handle_frame`](Self::handle_frame).
    pub async fn run(mut self, mut frames: mpsc::Receiver<FrameSnapshot>) -> Result<Self> {
        while let Some(snapshot) = frames.recv().await {
            self.handle_frame(snapshot).await?;
        }
        Ok(self)
    }
}
