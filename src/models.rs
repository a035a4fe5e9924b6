use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Longest description kept for a transaction, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// One data row of a delimited export, keyed by trimmed header.
pub type RawRecord = HashMap<String, String>;

/// A normalized statement line. Positive amounts are revenue, negative are expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTransaction {
    pub date: String,
    pub description: String,
    pub amount: f64,
}

impl CanonicalTransaction {
    pub fn new(date: impl Into<String>, description: &str, amount: f64) -> Self {
        let mut date = date.into();
        if let Some((idx, _)) = date.char_indices().nth(10) {
            date.truncate(idx);
        }
        Self {
            date,
            description: description.chars().take(MAX_DESCRIPTION_CHARS).collect(),
            amount,
        }
    }
}

/// Figures for one calendar month (or the `Unknown` bucket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub month: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
    pub margin: f64,
    pub count: usize,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct ImportBatch {
    pub id: i64,
    pub user_id: i64,
    pub source: String,
    pub file_name: Option<String>,
    pub checksum: Option<String>,
    pub record_count: i64,
    pub created_at: String,
}
