use std::path::PathBuf;

use crate::access::require_access;
use crate::cli::Session;
use crate::error::Result;
use crate::pdf::render_monthly_report;
use crate::reports::get_month_summary;

fn default_path(session: &Session, month: &str) -> PathBuf {
    PathBuf::from(&session.settings.data_dir)
        .join("exports")
        .join(format!("Monthly-Report-{month}.pdf"))
}

pub fn run(session: &Session, month: &str, output: Option<String>) -> Result<()> {
    require_access(&session.conn, session.user_id)?;

    let bucket = get_month_summary(&session.conn, session.user_id, month)?;
    let bytes = render_monthly_report(
        &bucket,
        &session.settings.user_name,
        &session.settings.business_name,
    )?;

    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path(session, month));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, bytes)?;
    println!("Wrote {}", path.display());
    Ok(())
}
