//! Scripted edge source for testing and replay.
//!
//! This module provides a simulated card reader that can be driven
//! programmatically, exercising timeout and boundary behavior without
//! physical hardware.

use crate::source::{EdgeEvent, EdgeSource};
use std::time::Duration;
use tokio::sync::mpsc;
use wiegand_core::{BitFrame, Error, Result};

/// Scripted Wiegand reader.
///
/// Edges sent through the [`MockWiegandHandle`] appear on this source in
/// order; dropping the handle disconnects the reader. Frame boundaries are
/// produced the same way real hardware produces them, by going quiet, so
/// the full capture path, inactivity window included, is exercised.
///
/// # Examples
///
/// ```
/// use wiegand_capture::{EdgeSource, MockWiegand};
///
/// #[tokio::main]
/// async fn main() -> wiegand_core::Result<()> {
///     let (mut reader, handle) = MockWiegand::new();
///
///     handle.present_bits("10").await?;
///     drop(handle);
///
///     assert_eq!(reader.next_edge().await, Some(wiegand_capture::EdgeEvent::One));
///     assert_eq!(reader.next_edge().await, Some(wiegand_capture::EdgeEvent::Zero));
///     assert_eq!(reader.next_edge().await, None);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockWiegand {
    edge_rx: mpsc::Receiver<EdgeEvent>,
}

impl MockWiegand {
    /// Create a scripted reader and its driving handle.
    #[must_use]
    pub fn new() -> (Self, MockWiegandHandle) {
        let (edge_tx, edge_rx) = mpsc::channel(128);
        (MockWiegand { edge_rx }, MockWiegandHandle { edge_tx })
    }
}

impl EdgeSource for MockWiegand {
    async fn next_edge(&mut self) -> Option<EdgeEvent> {
        self.edge_rx.recv().await
    }
}

/// Handle for driving a [`MockWiegand`] source.
#[derive(Debug, Clone)]
pub struct MockWiegandHandle {
    edge_tx: mpsc::Sender<EdgeEvent>,
}

impl MockWiegandHandle {
    /// Emit a single edge.
    ///
    /// # Errors
    /// Returns `Error::ChannelClosed` if the reader has been dropped.
    pub async fn pulse(&self, edge: EdgeEvent) -> Result<()> {
        self.edge_tx
            .send(edge)
            .await
            .map_err(|_| Error::ChannelClosed)
    }

    /// Emit the edges for a whole frame given as a '0'/'1' string.
    ///
    /// # Errors
    /// Returns `Error::InvalidBitChar` for characters other than '0'/'1'
    /// and `Error::ChannelClosed` if the reader has been dropped.
    pub async fn present_bits(&self, bits: &str) -> Result<()> {
        for (position, c) in bits.chars().enumerate() {
            let edge = match c {
                '0' => EdgeEvent::Zero,
                '1' => EdgeEvent::One,
                found => return Err(Error::InvalidBitChar { found, position }),
            };
            self.pulse(edge).await?;
        }
        Ok(())
    }

    /// Emit the edges for an already-parsed frame.
    ///
    /// # Errors
    /// Returns `Error::ChannelClosed` if the reader has been dropped.
    pub async fn present_frame(&self, frame: &BitFrame) -> Result<()> {
        for index in 0..frame.len() {
            if let Some(bit) = frame.bit(index) {
                self.pulse(EdgeEvent::from_bit(bit)).await?;
            }
        }
        Ok(())
    }

    /// Let the lines go quiet for `window`, ending any in-flight frame.
    pub async fn silence(&self, window: Duration) {
        tokio::time::sleep(window).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pulse_order_preserved() {
        let (mut reader, handle) = MockWiegand::new();
        handle.pulse(EdgeEvent::One).await.unwrap();
        handle.pulse(EdgeEvent::Zero).await.unwrap();
        handle.pulse(EdgeEvent::One).await.unwrap();
        drop(handle);

        let mut bits = Vec::new();
        while let Some(edge) = reader.next_edge().await {
            bits.push(edge.bit());
        }
        assert_eq!(bits, vec![true, false, true]);
    }

    #[tokio::test]
    async fn test_present_bits_rejects_garbage() {
        let (_reader, handle) = MockWiegand::new();
        let err = handle.present_bits("01a").await.unwrap_err();
        assert!(matches!(err, Error::InvalidBitChar { found: 'a', position: 2 }));
    }

    #[tokio::test]
    async fn test_present_frame_matches_bits() {
        let (mut reader, handle) = MockWiegand::new();
        let frame = BitFrame::from_binary_str("0110").unwrap();
        handle.present_frame(&frame).await.unwrap();
        drop(handle);

        let mut rendered = String::new();
        while let Some(edge) = reader.next_edge().await {
            rendered.push(if edge.bit() { '1' } else { '0' });
        }
        assert_eq!(rendered, "0110");
    }

    #[tokio::test]
    async fn test_dropped_reader_closes_channel() {
        let (reader, handle) = MockWiegand::new();
        drop(reader);
        let err = handle.pulse(EdgeEvent::Zero).await.unwrap_err();
        assert!(matches!(err, Error::ChannelClosed));
    }
}
