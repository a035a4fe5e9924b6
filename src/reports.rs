use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;

use crate::error::{MonthcloseError, Result};
use crate::models::{CanonicalTransaction, MonthlyBucket};
use crate::store::fetch_transactions;

pub const UNKNOWN_MONTH: &str = "Unknown";

// ---------------------------------------------------------------------------
// Month keys
// ---------------------------------------------------------------------------

/// `YYYY-MM` bucket key of a transaction date, or [`UNKNOWN_MONTH`].
pub fn month_key(date: &str) -> String {
    let prefix: String = date.chars().take(7).collect();
    let b = prefix.as_bytes();
    let well_formed = b.len() == 7
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..].iter().all(u8::is_ascii_digit);
    if well_formed {
        prefix
    } else {
        UNKNOWN_MONTH.to_string()
    }
}

/// Half-open date range `[first day, first day of next month)` for `YYYY-MM`.
pub fn month_bounds(month: &str) -> Result<(String, String)> {
    let invalid = || MonthcloseError::InvalidMonth(month.to_string());
    if month.len() != 7 {
        return Err(invalid());
    }
    let from = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").map_err(|_| invalid())?;
    let to = if from.month() == 12 {
        NaiveDate::from_ymd_opt(from.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(from.year(), from.month() + 1, 1)
    }
    .ok_or_else(invalid)?;
    Ok((
        from.format("%Y-%m-%d").to_string(),
        to.format("%Y-%m-%d").to_string(),
    ))
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    revenue: f64,
    expenses: f64,
    count: usize,
}

impl Totals {
    fn add(&mut self, amount: f64) {
        self.count += 1;
        if amount > 0.0 {
            self.revenue += amount;
        } else if amount < 0.0 {
            self.expenses += amount.abs();
        }
    }

    fn into_bucket(self, month: String) -> MonthlyBucket {
        let profit = self.revenue - self.expenses;
        let margin = if self.revenue != 0.0 {
            profit / self.revenue * 100.0
        } else {
            0.0
        };
        MonthlyBucket {
            month,
            revenue: self.revenue,
            expenses: self.expenses,
            profit,
            margin,
            count: self.count,
        }
    }
}

/// Figures over every transaction given, labelled `month`. Callers pre-filter.
pub fn summarize<'a, I>(month: &str, transactions: I) -> MonthlyBucket
where
    I: IntoIterator<Item = &'a CanonicalTransaction>,
{
    let mut totals = Totals::default();
    for t in transactions {
        totals.add(t.amount);
    }
    totals.into_bucket(month.to_string())
}

/// Figures for the transactions whose date falls in `month` (`YYYY-MM`).
pub fn summarize_month(transactions: &[CanonicalTransaction], month: &str) -> MonthlyBucket {
    summarize(month, transactions.iter().filter(|t| month_key(&t.date) == month))
}

/// One bucket per month key, ascending. Malformed dates land in `Unknown`.
pub fn monthly_breakdown(transactions: &[CanonicalTransaction]) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<String, Totals> = BTreeMap::new();
    for t in transactions {
        buckets.entry(month_key(&t.date)).or_default().add(t.amount);
    }
    buckets
        .into_iter()
        .map(|(month, totals)| totals.into_bucket(month))
        .collect()
}

// ---------------------------------------------------------------------------
// Stored data
// ---------------------------------------------------------------------------

pub fn get_month_summary(conn: &Connection, user_id: i64, month: &str) -> Result<MonthlyBucket> {
    let rows = fetch_transactions(conn, user_id, Some(month))?;
    Ok(summarize(month, &rows))
}

pub fn get_monthly_breakdown(conn: &Connection, user_id: i64) -> Result<Vec<MonthlyBucket>> {
    let rows = fetch_transactions(conn, user_id, None)?;
    Ok(monthly_breakdown(&rows))
}

// ---------------------------------------------------------------------------
// Highlights
// ---------------------------------------------------------------------------

/// The three plain-language lines printed under the key figures.
pub fn highlights(bucket: &MonthlyBucket) -> [String; 3] {
    let profit = if bucket.profit >= 0.0 {
        format!("You closed the month profitable at {:.2}.", bucket.profit)
    } else {
        format!("You closed the month at a loss of {:.2}.", bucket.profit.abs())
    };
    let margin = if bucket.revenue != 0.0 {
        format!("Profit margin was {:.1}%.", bucket.profit / bucket.revenue * 100.0)
    } else {
        "No revenue recorded for this month.".to_string()
    };
    let expenses = if bucket.expenses != 0.0 {
        format!("Total expenses were {:.2}.", bucket.expenses)
    } else {
        "No expenses recorded for this month.".to_string()
    };
    [profit, margin, expenses]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};
    use crate::store::{ensure_user, save_import};

    fn tx(date: &str, amount: f64) -> CanonicalTransaction {
        CanonicalTransaction::new(date, "test", amount)
    }

    fn sample() -> Vec<CanonicalTransaction> {
        vec![
            tx("2024-03-01", 50.0),
            tx("2024-03-02", -300.0),
            tx("2024-01-15", 1000.0),
            tx("2024-01-20", -50.0),
            tx("2024-01-21", 0.0),
            tx("March 3", -7.5),
            tx("2023-12-31", 20.0),
        ]
    }

    #[test]
    fn test_month_key() {
        assert_eq!(month_key("2024-03-25"), "2024-03");
        assert_eq!(month_key("2024-03"), "2024-03");
        assert_eq!(month_key(""), UNKNOWN_MONTH);
        assert_eq!(month_key("March 3"), UNKNOWN_MONTH);
        assert_eq!(month_key("25/03/2024"), UNKNOWN_MONTH);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds("2024-03").unwrap(),
            ("2024-03-01".to_string(), "2024-04-01".to_string())
        );
        assert_eq!(
            month_bounds("2024-12").unwrap(),
            ("2024-12-01".to_string(), "2025-01-01".to_string())
        );
    }

    #[test]
    fn test_month_bounds_rejects_garbage() {
        for bad in ["2024-13", "2024-3", "March", "", "2024-03-01"] {
            assert!(
                matches!(month_bounds(bad), Err(MonthcloseError::InvalidMonth(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_single_month_summary() {
        let s = summarize_month(&sample(), "2024-03");
        assert_eq!(s.month, "2024-03");
        assert_eq!(s.revenue, 50.0);
        assert_eq!(s.expenses, 300.0);
        assert_eq!(s.profit, -250.0);
        assert_eq!(s.margin, -500.0);
        assert_eq!(s.count, 2);
    }

    #[test]
    fn test_zero_amounts_count_but_do_not_move_totals() {
        let s = summarize_month(&sample(), "2024-01");
        assert_eq!(s.count, 3);
        assert_eq!(s.revenue, 1000.0);
        assert_eq!(s.expenses, 50.0);
        assert_eq!(s.margin, 95.0);
    }

    #[test]
    fn test_margin_is_zero_without_revenue() {
        let s = summarize("2024-05", &[tx("2024-05-01", -10.0)]);
        assert_eq!(s.margin, 0.0);
        assert!(s.margin.is_finite());
        let empty = summarize_month(&[], "2024-05");
        assert_eq!(empty.count, 0);
        assert_eq!(empty.margin, 0.0);
    }

    #[test]
    fn test_breakdown_is_sorted_with_unknown_bucket() {
        let months: Vec<String> = monthly_breakdown(&sample()).into_iter().map(|b| b.month).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-03", UNKNOWN_MONTH]);
    }

    #[test]
    fn test_breakdown_profit_sums_to_net_amount() {
        let txns = sample();
        let buckets = monthly_breakdown(&txns);
        let profit: f64 = buckets.iter().map(|b| b.profit).sum();
        let net: f64 = txns.iter().map(|t| t.amount).sum();
        assert!((profit - net).abs() < 1e-9);
        for b in &buckets {
            assert_eq!(b.profit, b.revenue - b.expenses);
            assert!(b.revenue >= 0.0 && b.expenses >= 0.0);
        }
        let count: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(count, txns.len());
    }

    #[test]
    fn test_highlights() {
        let loss = summarize_month(&sample(), "2024-03");
        assert_eq!(
            highlights(&loss),
            [
                "You closed the month at a loss of 250.00.".to_string(),
                "Profit margin was -500.0%.".to_string(),
                "Total expenses were 300.00.".to_string(),
            ]
        );
        let quiet = summarize("2024-06", &Vec::<CanonicalTransaction>::new());
        let lines = highlights(&quiet);
        assert_eq!(lines[0], "You closed the month profitable at 0.00.");
        assert_eq!(lines[1], "No revenue recorded for this month.");
        assert_eq!(lines[2], "No expenses recorded for this month.");

        let big = summarize_month(&[CanonicalTransaction::new("2024-04-02", "Invoice", 12345.6)], "2024-04");
        assert_eq!(highlights(&big)[0], "You closed the month profitable at 12345.60.");
    }

    #[test]
    fn test_stored_summary_matches_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        let user = ensure_user(&conn, "owner@example.com").unwrap();
        let txns = sample();
        save_import(&conn, user, "Test", None, None, &txns, 2).unwrap();

        let stored = get_month_summary(&conn, user, "2024-03").unwrap();
        assert_eq!(stored, summarize_month(&txns, "2024-03"));

        let months = get_monthly_breakdown(&conn, user).unwrap();
        assert_eq!(months, monthly_breakdown(&txns));
    }
}
