//! Timing-delimited Wiegand bit capture.
//!
//! The capture path has three layers:
//!
//! - [`source`]: the edge abstraction. Two falling-edge lines become
//!   [`EdgeEvent::Zero`](source::EdgeEvent::Zero) and
//!   [`EdgeEvent::One`](source::EdgeEvent::One) events with no payload.
//!   Production implementations bind GPIO interrupts; tests and replay use
//!   the scripted [`mock`] source.
//! - [`assembler`]: a synchronous state machine that accumulates edges into
//!   a bounded frame and detects completion by line silence, since Wiegand
//!   has no end-of-frame marker.
//! - [`task`]: the async driver that owns the assembler, races incoming
//!   edges against the inactivity deadline, and hands each completed frame
//!   off as an immutable snapshot.
//!
//! All capture state is owned by a single task and frames leave it by value,
//! so an edge can never interleave with the reset-and-consume sequence.

#![allow(async_fn_in_trait)]

pub mod assembler;
pub mod mock;
pub mod source;
pub mod task;

pub use assembler::{CapturePhase, FrameAssembler};
pub use mock::{MockWiegand, MockWiegandHandle};
pub use source::{EdgeEvent, EdgeSource};
pub use task::CaptureTask;
