pub mod check;
#[cfg(feature = "pdf")]
pub mod export;
pub mod history;
pub mod import;
pub mod init;
pub mod summary;
pub mod unlock;

use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::db::{get_connection, init_db};
use crate::error::{MonthcloseError, Result};
use crate::settings::{load_settings, Settings};
use crate::store::ensure_user;

#[derive(Parser)]
#[command(name = "monthclose", about = "Turn bank-statement exports into monthly profit summaries.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up monthclose: choose a data directory and register your email.
    Init {
        /// Path for monthclose data (default: ~/Documents/monthclose)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Email that owns imported transactions
        #[arg(long)]
        email: String,
        /// Name printed on reports
        #[arg(long)]
        name: Option<String>,
        /// Business name printed as the report title
        #[arg(long)]
        business: Option<String>,
    },
    /// Parse a CSV/TSV export and show the monthly check without saving.
    Check {
        /// Path to the CSV/TSV export
        file: String,
        /// Also show key figures for one month: YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },
    /// Run the monthly check on a bundled Banco General sample.
    Demo,
    /// Import a CSV/TSV export into your account.
    Import {
        /// Path to the CSV/TSV export
        file: String,
        /// Where the export came from
        #[arg(long, default_value = "Banco General (Excel export)")]
        source: String,
    },
    /// Show stored figures for one month, or a row per month.
    Summary {
        /// Month: YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },
    /// List previous imports.
    History,
    /// Export the one-page monthly report to PDF.
    #[cfg(feature = "pdf")]
    Export {
        /// Month: YYYY-MM
        #[arg(long)]
        month: String,
        /// Output path (default: <data_dir>/exports/Monthly-Report-<month>.pdf)
        #[arg(long)]
        output: Option<String>,
    },
    /// Verify a licence key and unlock saving and exports.
    Unlock {
        /// Licence key from your purchase receipt
        licence_key: String,
    },
    /// Apply a seller sale/refund notification saved as a JSON object of fields.
    SaleEvent {
        /// Path to the JSON payload
        payload: String,
        /// Shared webhook token
        #[arg(long)]
        token: Option<String>,
    },
}

/// Database handle and owning user for one command invocation.
pub struct Session {
    pub conn: Connection,
    pub user_id: i64,
    pub settings: Settings,
}

impl Session {
    pub fn open() -> Result<Self> {
        let settings = load_settings();
        let email = settings.user_email.trim().to_string();
        let db_path = settings.db_path();
        if email.is_empty() || !db_path.exists() {
            return Err(MonthcloseError::NotInitialized);
        }
        let conn = get_connection(&db_path)?;
        init_db(&conn)?;
        let user_id = ensure_user(&conn, &email)?;
        tracing::debug!(user_id, db = %db_path.display(), "session opened");
        Ok(Self {
            conn,
            user_id,
            settings,
        })
    }
}
