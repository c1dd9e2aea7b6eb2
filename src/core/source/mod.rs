//! Record sources
//!
//! A record source produces the raw `(identifier, price text)` rows of one
//! run. The pipeline only needs the rows materialized in input order.

mod csv;

pub use self::csv::CsvRecordSource;

use crate::utils::error::Result;

/// One input row before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Item identifier or reference code, depending on the pricing mode
    pub reference_code: String,
    /// Price exactly as it appears in the input
    pub price_text: String,
}

impl RawRecord {
    pub fn new(reference_code: impl Into<String>, price_text: impl Into<String>) -> Self {
        Self {
            reference_code: reference_code.into(),
            price_text: price_text.into(),
        }
    }
}

/// Producer of raw input rows
pub trait RecordSource: Send + Sync {
    /// Human-readable name used in logs
    fn describe(&self) -> String;

    /// Fail early when the source cannot be read at all
    fn check_available(&self) -> Result<()>;

    /// Read every row, in input order
    fn read_records(&self) -> Result<Vec<RawRecord>>;
}

/// Rows held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<RawRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<RawRecord> for InMemorySource {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl RecordSource for InMemorySource {
    fn describe(&self) -> String {
        format!("in-memory source ({} rows)", self.records.len())
    }

    fn check_available(&self) -> Result<()> {
        Ok(())
    }

    fn read_records(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
}
