//! Price text normalization
//!
//! Spreadsheet exports carry prices as free text (`"$1,299.90"`, `" 15 "`,
//! `"R$ 7.5"`). This module turns that text into an exact integer amount of
//! minor units, or nothing when the text is not a price.

mod parser;

pub use parser::{format_minor_units, parse_price};
