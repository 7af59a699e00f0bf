use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Capture errors
    #[error("Frame overflow: capture already holds {max} bits")]
    FrameOverflow { max: usize },

    #[error("Invalid bit character {found:?} at position {position}")]
    InvalidBitChar { found: char, position: usize },

    #[error("Edge channel closed")]
    ChannelClosed,

    // Record errors
    #[error("Raw bit string length {actual} does not match bit count {expected}")]
    RawLengthMismatch { expected: u8, actual: usize },

    #[error("Unsupported bit length: {0}")]
    UnsupportedBitLength(u8),

    // Collaborator errors
    #[error("Log sink error: {0}")]
    LogSink(String),

    #[error("Notification error: {0}")]
    Notification(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
