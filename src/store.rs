use rusqlite::{params, Connection};

use crate::error::{MonthcloseError, Result};
use crate::models::{CanonicalTransaction, ImportBatch};
use crate::reports::month_bounds;

/// Rows written per insert chunk unless settings say otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 500;

pub struct ImportReceipt {
    pub import_id: Option<i64>,
    pub inserted: usize,
    pub duplicate_file: bool,
}

/// Id of the user registered under `email`, creating it on first sight.
pub fn ensure_user(conn: &Connection, email: &str) -> Result<i64> {
    conn.execute("INSERT OR IGNORE INTO users (email) VALUES (?1)", [email])?;
    let id = conn.query_row("SELECT id FROM users WHERE email = ?1", [email], |r| r.get(0))?;
    Ok(id)
}

pub fn find_user(conn: &Connection, email: &str) -> Result<Option<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM users WHERE email = ?1")?;
    let mut rows = stmt.query_map([email], |r| r.get(0))?;
    Ok(rows.next().transpose()?)
}

// ---------------------------------------------------------------------------
// Imports
// ---------------------------------------------------------------------------

/// Record an import batch and its transactions in one SQLite transaction,
/// `batch_size` rows per savepoint. Any failure rolls the whole batch back.
/// A file whose checksum was already imported by the same user is reported as
/// a duplicate and nothing is written.
pub fn save_import(
    conn: &Connection,
    user_id: i64,
    source: &str,
    file_name: Option<&str>,
    checksum: Option<&str>,
    rows: &[CanonicalTransaction],
    batch_size: usize,
) -> Result<ImportReceipt> {
    if rows.is_empty() {
        return Err(MonthcloseError::NoRows);
    }

    if let Some(sum) = checksum {
        let mut stmt = conn.prepare("SELECT 1 FROM imports WHERE checksum = ?1 AND user_id = ?2")?;
        if stmt.exists(params![sum, user_id])? {
            tracing::warn!(checksum = sum, "statement already imported");
            return Ok(ImportReceipt {
                import_id: None,
                inserted: 0,
                duplicate_file: true,
            });
        }
    }

    let mut tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO imports (user_id, source, file_name, checksum, record_count) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, source, file_name, checksum, rows.len() as i64],
    )?;
    let import_id = tx.last_insert_rowid();

    let mut inserted = 0usize;
    for chunk in rows.chunks(batch_size.max(1)) {
        let sp = tx.savepoint()?;
        {
            let mut stmt = sp.prepare_cached(
                "INSERT INTO transactions (user_id, import_id, date, description, amount) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in chunk {
                let row = CanonicalTransaction::new(row.date.as_str(), &row.description, row.amount);
                stmt.execute(params![user_id, import_id, row.date, row.description, row.amount])?;
            }
        }
        sp.commit()?;
        inserted += chunk.len();
        tracing::debug!(import_id, chunk = chunk.len(), inserted, "stored transaction chunk");
    }
    tx.commit()?;
    tracing::info!(import_id, inserted, "import saved");

    Ok(ImportReceipt {
        import_id: Some(import_id),
        inserted,
        duplicate_file: false,
    })
}

pub fn list_imports(conn: &Connection, user_id: i64) -> Result<Vec<ImportBatch>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, source, file_name, checksum, record_count, created_at \
         FROM imports WHERE user_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map([user_id], |row| {
        Ok(ImportBatch {
            id: row.get(0)?,
            user_id: row.get(1)?,
            source: row.get(2)?,
            file_name: row.get(3)?,
            checksum: row.get(4)?,
            record_count: row.get(5)?,
            created_at: row.get(6)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// A user's stored transactions, optionally limited to one `YYYY-MM` month.
pub fn fetch_transactions(
    conn: &Connection,
    user_id: i64,
    month: Option<&str>,
) -> Result<Vec<CanonicalTransaction>> {
    let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<CanonicalTransaction> {
        Ok(CanonicalTransaction {
            date: row.get(0)?,
            description: row.get(1)?,
            amount: row.get(2)?,
        })
    };
    let rows = match month {
        Some(m) => {
            let (from, to) = month_bounds(m)?;
            let mut stmt = conn.prepare(
                "SELECT date, description, amount FROM transactions \
                 WHERE user_id = ?1 AND date >= ?2 AND date < ?3 ORDER BY date, id",
            )?;
            let rows = stmt.query_map(params![user_id, from, to], map_row)?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT date, description, amount FROM transactions \
                 WHERE user_id = ?1 ORDER BY date, id",
            )?;
            let rows = stmt.query_map([user_id], map_row)?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(rows)
}
