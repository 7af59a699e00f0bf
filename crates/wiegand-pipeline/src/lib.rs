//! Record emission and fan-out to external collaborators.
//!
//! This crate turns a completed [`FrameSnapshot`](wiegand_core::FrameSnapshot)
//! into an immutable [`DecodedRecord`](wiegand_core::DecodedRecord) and hands
//! it to the collaborators: every record goes to the persistent log sink,
//! good reads additionally go to the notifier when notifications are enabled.
//! Nothing here is fatal: an unsupported format degrades to a bad-read
//! record, and failing collaborators are logged and skipped.

#![allow(async_fn_in_trait)]

pub mod config;
pub mod emitter;
pub mod notify;
pub mod reader;
pub mod sink;

pub use config::{ReaderConfig, SmtpConfig};
pub use emitter::decode_snapshot;
pub use notify::{ChannelNotifier, LogNotifier, Notifier, notification_body};
pub use reader::ReaderPipeline;
pub use sink::{CsvLogSink, MemorySink, RecordSink};
