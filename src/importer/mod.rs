//! Statement normalization: delimited bank exports in, canonical transactions out.

pub mod amount;
pub mod delimiter;
pub mod fields;
pub mod normalize;
pub mod row;
pub mod table;

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{MonthcloseError, Result};
use crate::models::CanonicalTransaction;

pub use delimiter::detect_delimiter;
pub use row::normalize_row;
pub use table::parse_records;

/// Soft problems an operator should see before saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportWarning {
    NoUsableRows,
    AllAmountsZero,
}

impl ImportWarning {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoUsableRows => "No usable rows found. Export as CSV/TSV from Excel and try again.",
            Self::AllAmountsZero => {
                "Imported rows but amounts look zero. This export may use different debit/credit columns."
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatementImport {
    pub delimiter: u8,
    pub transactions: Vec<CanonicalTransaction>,
    /// Records discarded for lacking a date or description.
    pub dropped: usize,
    pub warning: Option<ImportWarning>,
}

impl StatementImport {
    /// Rows that survived normalization with a zero amount.
    pub fn suspicious(&self) -> impl Iterator<Item = &CanonicalTransaction> {
        self.transactions.iter().filter(|t| t.amount == 0.0)
    }

    pub fn delimiter_name(&self) -> &'static str {
        match self.delimiter {
            b'\t' => "tab",
            b';' => "semicolon",
            _ => "comma",
        }
    }
}

/// Run the whole normalization pipeline over one file's text.
pub fn parse_statement(text: &str) -> StatementImport {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let delimiter = detect_delimiter(text);
    let records = parse_records(text, delimiter);
    tracing::debug!(
        delimiter = %char::from(delimiter).escape_default(),
        records = records.len(),
        "parsed statement table"
    );

    let transactions: Vec<CanonicalTransaction> = records.iter().filter_map(normalize_row).collect();
    let dropped = records.len() - transactions.len();
    if dropped > 0 {
        tracing::debug!(dropped, "discarded rows without a date or description");
    }

    let warning = if transactions.is_empty() {
        Some(ImportWarning::NoUsableRows)
    } else if transactions.iter().all(|t| t.amount == 0.0) {
        Some(ImportWarning::AllAmountsZero)
    } else {
        None
    };

    StatementImport {
        delimiter,
        transactions,
        dropped,
        warning,
    }
}

/// Contents of a statement file plus its SHA-256 checksum.
pub fn read_statement(file_path: &Path) -> Result<(String, String)> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    let checksum = hex::encode(hasher.finalize());
    let text = String::from_utf8(data)
        .map_err(|_| MonthcloseError::NotText(file_path.display().to_string()))?;
    Ok((text, checksum))
}
