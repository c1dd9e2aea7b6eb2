//! Test fixtures and data factories
//!
//! Provides factory methods for creating input files with sensible defaults.
//! All fixtures are real files on disk, removed when dropped.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Header row used by the spreadsheet export
pub const EXPORT_HEADER: &str = "Parte,Precio Base";

/// Temporary CSV input file
pub struct CsvFixture {
    file: NamedTempFile,
}

impl CsvFixture {
    /// File with the given raw content
    pub fn raw(content: &str) -> Self {
        let mut file = NamedTempFile::new().expect("create temp csv");
        file.write_all(content.as_bytes()).expect("write temp csv");
        file.flush().expect("flush temp csv");
        Self { file }
    }

    /// Export-style file with one row per `(identifier, price)` pair
    pub fn prices(rows: &[(&str, &str)]) -> Self {
        Self::with_header(EXPORT_HEADER, rows)
    }

    pub fn with_header(header: &str, rows: &[(&str, &str)]) -> Self {
        let mut content = format!("{}\n", header);
        for (identifier, price) in rows {
            content.push_str(&format!("{},\"{}\"\n", identifier, price));
        }
        Self::raw(&content)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
