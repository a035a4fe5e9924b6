use comfy_table::{Cell, Table};

use crate::cli::Session;
use crate::error::Result;
use crate::store::list_imports;

pub fn run(session: &Session) -> Result<()> {
    let batches = list_imports(&session.conn, session.user_id)?;
    if batches.is_empty() {
        println!("No imports yet.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["ID", "Imported", "Source", "File", "Rows"]);
    for b in &batches {
        table.add_row(vec![
            Cell::new(b.id),
            Cell::new(&b.created_at),
            Cell::new(&b.source),
            Cell::new(b.file_name.as_deref().unwrap_or("")),
            Cell::new(b.record_count),
        ]);
    }
    println!("{table}");
    Ok(())
}
