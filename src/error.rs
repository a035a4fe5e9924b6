use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonthcloseError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not set up yet. Run `monthclose init --email <you@example.com>` first.")]
    NotInitialized,

    #[error("Invalid month: {0} (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("{0} is not a text file (expected UTF-8 CSV/TSV)")]
    NotText(String),

    #[error("No rows to save")]
    NoRows,

    #[error("Locked. Verify your licence key with `monthclose unlock <key>` first.")]
    Locked,

    #[error("Missing licence key")]
    MissingLicenceKey,

    #[error("Invalid licence key")]
    InvalidLicence,

    #[error("Forbidden")]
    Forbidden,

    #[allow(dead_code)]
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MonthcloseError>;
