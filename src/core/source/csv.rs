//! Delimited text input
//!
//! Exports from the back office do not agree on header spelling
//! (`Parte`, ` Precio Base.`, `basePrice`, ...), so columns are located by a
//! normalized header name rather than by position.

use super::{RawRecord, RecordSource};
use crate::utils::error::{Result, SyncError};
use ::csv::ReaderBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Accepted spellings of the identifier column, normalized
const IDENTIFIER_HEADERS: &[&str] = &[
    "parte",
    "itemid",
    "item",
    "sku",
    "skuid",
    "refid",
    "reference",
    "referencecode",
];

/// Accepted spellings of the price column, normalized
const PRICE_HEADERS: &[&str] = &["preciobase", "baseprice", "precio", "price"];

/// CSV file with a header row
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    path: PathBuf,
}

impl CsvRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvRecordSource {
    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }

    fn check_available(&self) -> Result<()> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(SyncError::source(format!(
                "CSV file not found: {}",
                self.path.display()
            )))
        }
    }

    fn read_records(&self) -> Result<Vec<RawRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let id_column = find_column(headers.iter(), IDENTIFIER_HEADERS).ok_or_else(|| {
            SyncError::source(format!(
                "No item identifier column in {} (headers: {:?})",
                self.path.display(),
                headers.iter().collect::<Vec<_>>()
            ))
        })?;
        let price_column = find_column(headers.iter(), PRICE_HEADERS).ok_or_else(|| {
            SyncError::source(format!(
                "No base price column in {} (headers: {:?})",
                self.path.display(),
                headers.iter().collect::<Vec<_>>()
            ))
        })?;
        debug!(id_column, price_column, "Resolved CSV columns");

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(RawRecord::new(
                row.get(id_column).unwrap_or_default(),
                row.get(price_column).unwrap_or_default(),
            ));
        }

        info!("Read {} rows from {}", records.len(), self.path.display());
        Ok(records)
    }
}

/// Header name with case, whitespace, separators and trailing dots removed
fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .trim_end_matches('.')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn find_column<'a>(headers: impl Iterator<Item = &'a str>, accepted: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.map(normalize_header).collect();
    accepted
        .iter()
        .find_map(|candidate| normalized.iter().position(|h| h == candidate))
}
