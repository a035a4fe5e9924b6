use std::path::PathBuf;

use crate::access::require_access;
use crate::cli::check::print_statement;
use crate::cli::Session;
use crate::error::Result;
use crate::importer::{parse_statement, read_statement};
use crate::store::save_import;

pub fn run(session: &Session, file: &str, source: &str) -> Result<()> {
    require_access(&session.conn, session.user_id)?;

    let file_path = PathBuf::from(file);
    let (text, checksum) = read_statement(&file_path)?;
    let import = parse_statement(&text);
    print_statement(&import);

    let file_name = file_path.file_name().and_then(|n| n.to_str());
    let receipt = save_import(
        &session.conn,
        session.user_id,
        source,
        file_name,
        Some(checksum.as_str()),
        &import.transactions,
        session.settings.batch_size,
    )?;

    if receipt.duplicate_file {
        println!("This file has already been imported (duplicate checksum).");
        return Ok(());
    }
    println!("Saved {} transactions. Your history is now stored.", receipt.inserted);
    Ok(())
}
