//! Bit-field extraction for captured Wiegand frames.
//!
//! Two independent per-length tables drive everything here:
//!
//! - [`format`] maps a frame's bit length to the facility-code and
//!   card-number bit ranges and folds them out of the frame.
//! - [`chunk`] maps a bit length to the shift/sentinel parameters that
//!   reconstruct the reader's packed two-word hex identifier from the raw
//!   accumulators.
//!
//! The two tables deliberately cover different length sets: every length
//! from 26 to 37 has a chunk layout, but only seven of them have a semantic
//! field layout. A frame whose length is chunk-encodable but not
//! field-decodable still gets its hex identifier; its facility code and card
//! number stay zero and the read is classified as bad downstream.

pub mod chunk;
pub mod format;

pub use chunk::{CHUNK_LAYOUTS, ChunkDescriptor, HexChunks, chunk_layout_for, encode_chunks};
pub use format::{CardFields, FORMATS, FormatDescriptor, decode_fields, format_for};
