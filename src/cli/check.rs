use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::summary::print_month;
use crate::error::Result;
use crate::fmt::amount;
use crate::importer::{parse_statement, read_statement, StatementImport};
use crate::models::MonthlyBucket;
use crate::reports::{month_bounds, monthly_breakdown, summarize_month};

const SAMPLE_NAME: &str = "sample-banco-general.tsv";
const SAMPLE: &str = include_str!("../../demos/sample-banco-general.tsv");

pub fn run(file: &str, month: Option<&str>) -> Result<()> {
    let (text, _) = read_statement(Path::new(file))?;
    let import = parse_statement(&text);
    print_statement(&import);
    if let Some(month) = month {
        month_bounds(month)?;
        println!();
        print_month(&summarize_month(&import.transactions, month));
    }
    Ok(())
}

pub fn demo() -> Result<()> {
    let import = parse_statement(SAMPLE);
    println!("Loaded sample file {SAMPLE_NAME}");
    print_statement(&import);
    Ok(())
}

/// Month-by-month check table plus any soft warnings.
pub(crate) fn print_statement(import: &StatementImport) {
    if let Some(warning) = import.warning {
        tracing::warn!(?warning, "statement needs attention");
    }
    if !import.transactions.is_empty() {
        println!(
            "Parsed {} transactions ({}-delimited, {} rows skipped)",
            import.transactions.len(),
            import.delimiter_name(),
            import.dropped
        );
        println!("{}", month_table(&monthly_breakdown(&import.transactions)));
        let suspicious = import.suspicious().count();
        if suspicious > 0 && import.warning.is_none() {
            println!("{}", format!("{suspicious} rows have a zero amount.").yellow());
        }
    }
    if let Some(warning) = import.warning {
        println!("{}", warning.message().red());
    }
}

pub(crate) fn month_table(buckets: &[MonthlyBucket]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Month", "Revenue", "Expenses", "Profit", "Count"]);
    for b in buckets {
        let profit = if b.profit >= 0.0 {
            amount(b.profit).green()
        } else {
            amount(b.profit).red()
        };
        table.add_row(vec![
            Cell::new(&b.month),
            Cell::new(amount(b.revenue)),
            Cell::new(amount(b.expenses)),
            Cell::new(profit),
            Cell::new(b.count),
        ]);
    }
    table
}
