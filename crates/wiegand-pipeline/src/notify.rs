//! Notification collaborators.
//!
//! Good reads can be forwarded to a notifier, typically a short email per
//! card. Delivery transport is an external concern; this module defines the
//! seam, the message body, and two implementations: one that logs, and one
//! that hands bodies to a channel for tests.

use tokio::sync::mpsc;
use tracing::info;
use wiegand_core::{DecodedRecord, Error, Result};

/// Render the notification body for a record.
///
/// # Examples
///
/// ```
/// use wiegand_core::DecodedRecord;
/// use wiegand_pipeline::notification_body;
///
/// let record = DecodedRecord::new(4, 3, 629, 0, 0, "1010".into()).unwrap();
/// assert_eq!(notification_body(&record), "BL: 4\nFC: 3\nCN: 629");
/// ```
#[must_use]
pub fn notification_body(record: &DecodedRecord) -> String {
    format!(
        "BL: {}\nFC: {}\nCN: {}",
        record.bit_count(),
        record.facility_code(),
        record.card_number()
    )
}

/// Outbound notification channel for good card reads.
pub trait Notifier {
    /// Deliver a notification for one record.
    async fn notify(&mut self, record: &DecodedRecord) -> Result<()>;
}

/// Notifier that emits the message through the log.
///
/// Stands in for a real delivery transport when none is configured.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn notify(&mut self, record: &DecodedRecord) -> Result<()> {
        info!(
            bits = record.bit_count(),
            facility = record.facility_code(),
            card = record.card_number(),
            "card read notification"
        );
        Ok(())
    }
}

/// Notifier that forwards rendered bodies to an mpsc channel.
///
/// Lets tests assert exactly which reads triggered a notification.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    body_tx: mpsc::Sender<String>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiver observing its messages.
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<String>) {
        let (body_tx, body_rx) = mpsc::channel(32);
        (ChannelNotifier { body_tx }, body_rx)
    }
}

impl Notifier for ChannelNotifier {
    async fn notify(&mut self, record: &DecodedRecord) -> Result<()> {
        self.body_tx
            .send(notification_body(record))
            .await
            .map_err(|_| Error::Notification("notification receiver dropped".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> DecodedRecord {
        DecodedRecord::new(26, 3, 629, 0x2004, 0x604EA, "0".repeat(26)).unwrap()
    }

    #[test]
    fn test_body_layout() {
        assert_eq!(notification_body(&sample_record()), "BL: 26\nFC: 3\nCN: 629");
    }

    #[tokio::test]
    async fn test_channel_notifier_delivers_body() {
        let (mut notifier, mut bodies) = ChannelNotifier::new();
        notifier.notify(&sample_record()).await.unwrap();
        assert_eq!(bodies.recv().await.unwrap(), "BL: 26\nFC: 3\nCN: 629");
    }

    #[tokio::test]
    async fn test_channel_notifier_errors_when_receiver_gone() {
        let (mut notifier, bodies) = ChannelNotifier::new();
        drop(bodies);
        let err = notifier.notify(&sample_record()).await.unwrap_err();
        assert!(matches!(err, Error::Notification(_)));
    }

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        let mut notifier = LogNotifier;
        notifier.notify(&sample_record()).await.unwrap();
    }
}
