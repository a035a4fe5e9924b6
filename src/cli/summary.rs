use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::check::month_table;
use crate::cli::Session;
use crate::error::Result;
use crate::fmt::{amount, percent};
use crate::models::MonthlyBucket;
use crate::reports::{get_month_summary, get_monthly_breakdown, highlights};

pub fn run(session: &Session, month: Option<String>) -> Result<()> {
    let Some(month) = month else {
        let months = get_monthly_breakdown(&session.conn, session.user_id)?;
        if months.is_empty() {
            println!("No transactions stored yet. Run `monthclose import <file>` first.");
        } else {
            println!("Monthly check\n{}", month_table(&months));
        }
        return Ok(());
    };

    let bucket = get_month_summary(&session.conn, session.user_id, &month)?;
    print_month(&bucket);
    Ok(())
}

/// Key figures and highlights for one month.
pub(crate) fn print_month(bucket: &MonthlyBucket) {
    let mut table = Table::new();
    table.set_header(vec!["Figure", "Value"]);
    table.add_row(vec![Cell::new("Revenue"), Cell::new(amount(bucket.revenue))]);
    table.add_row(vec![Cell::new("Expenses"), Cell::new(amount(bucket.expenses))]);
    let profit_label = if bucket.profit >= 0.0 {
        "Profit".green().bold()
    } else {
        "Profit".red().bold()
    };
    table.add_row(vec![Cell::new(profit_label), Cell::new(amount(bucket.profit))]);
    table.add_row(vec![Cell::new("Margin"), Cell::new(percent(bucket.margin))]);
    table.add_row(vec![Cell::new("Transactions"), Cell::new(bucket.count)]);

    println!("{}\n{table}", bucket.month.bold());
    for line in highlights(bucket) {
        println!("  - {line}");
    }
}
