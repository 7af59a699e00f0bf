//! Edge-triggered event source abstraction.
//!
//! Wiegand encodes bit values in line identity, not signal level: a falling
//! edge on the DATA0 line is a zero bit, a falling edge on DATA1 is a one
//! bit. The events carry no payload and must be cheap to produce, because on
//! real hardware they originate in interrupt context.

/// One falling edge on a Wiegand data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeEvent {
    /// Falling edge on DATA0: a zero bit.
    Zero,

    /// Falling edge on DATA1: a one bit.
    One,
}

impl EdgeEvent {
    /// The bit value this edge encodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use wiegand_capture::EdgeEvent;
    ///
    /// assert!(!EdgeEvent::Zero.bit());
    /// assert!(EdgeEvent::One.bit());
    /// ```
    #[must_use]
    pub fn bit(self) -> bool {
        matches!(self, EdgeEvent::One)
    }

    /// The edge encoding a given bit value.
    #[must_use]
    pub fn from_bit(bit: bool) -> Self {
        if bit { EdgeEvent::One } else { EdgeEvent::Zero }
    }
}

/// Stream of edge events from a pair of Wiegand data lines.
///
/// `next_edge` resolves with the next falling edge, or `None` once the
/// source is disconnected. Implementations must be cancel-safe: the capture
/// task races `next_edge` against the frame inactivity deadline, and a
/// cancelled call must not lose an edge.
pub trait EdgeSource {
    /// Wait for the next edge, `None` when the source has shut down.
    async fn next_edge(&mut self) -> Option<EdgeEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_bit_mapping() {
        assert_eq!(EdgeEvent::from_bit(true), EdgeEvent::One);
        assert_eq!(EdgeEvent::from_bit(false), EdgeEvent::Zero);
        assert!(EdgeEvent::from_bit(true).bit());
        assert!(!EdgeEvent::from_bit(false).bit());
    }
}
