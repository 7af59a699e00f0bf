//! Persistent log collaborators.
//!
//! Every decoded record, good or bad, is appended to a sink, so raw data
//! from unrecognized cards is never lost. The CSV line layout matches the
//! reader's own log file byte for byte.

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use std::path::{Path, PathBuf};
use wiegand_core::{DecodedRecord, Result};

/// Destination for decoded records.
pub trait RecordSink {
    /// Append one record.
    async fn append(&mut self, record: &DecodedRecord) -> Result<()>;
}

/// Append-only CSV log file.
///
/// Lines look like:
///
/// ```text
/// Bit_Length: 26, Hex_Value: 2004604EA, Facility_Code: 3, Card_Number: 629, BIN: 00000001100000010011101010
/// ```
#[derive(Debug, Clone)]
pub struct CsvLogSink {
    path: PathBuf,
}

impl CsvLogSink {
    /// Create a sink appending to `path`. The file is created on first
    /// write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvLogSink { path: path.into() }
    }

    /// The log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the log line for one record, without the trailing newline.
    #[must_use]
    pub fn csv_line(record: &DecodedRecord) -> String {
        format!(
            "Bit_Length: {}, Hex_Value: {}, Facility_Code: {}, Card_Number: {}, BIN: {}",
            record.bit_count(),
            record.hex_value(),
            record.facility_code(),
            record.card_number(),
            record.raw_bits(),
        )
    }
}

impl RecordSink for CsvLogSink {
    async fn append(&mut self, record: &DecodedRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        let mut line = Self::csv_line(record);
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

/// In-memory sink for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<DecodedRecord>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records appended so far, in order.
    #[must_use]
    pub fn records(&self) -> &[DecodedRecord] {
        &self.records
    }
}

impl RecordSink for MemorySink {
    async fn append(&mut self, record: &DecodedRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
