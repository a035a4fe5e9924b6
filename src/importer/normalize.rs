use std::sync::LazyLock;

use regex::Regex;

static ISO_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("valid regex"));
static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})[/-]([0-9]{1,2})[/-]([0-9]{2,4})").expect("valid regex")
});

/// Parse a locale-ambiguous amount such as `"1.234,56"`, `"$ -45.00"` or `"12,5"`.
///
/// When both separators appear, `.` groups thousands and `,` is the decimal
/// mark. A lone `,` is always read as the decimal mark, so `"1,234"` becomes
/// `1.234`. Anything unparseable is `0.0`.
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    let kept: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    let has_comma = kept.contains(',');
    let has_dot = kept.contains('.');
    let normalized = if has_comma && has_dot {
        kept.replace('.', "").replacen(',', ".", 1)
    } else if has_comma {
        kept.replacen(',', ".", 1)
    } else {
        kept
    };
    normalized
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Normalize a statement date to `YYYY-MM-DD`.
///
/// ISO-prefixed input keeps its first 10 characters. `D/M/Y` and `D-M-Y` with
/// 1-2 digit day/month and 2-4 digit year are reassembled; two-digit years land
/// in the 2000s. Anything else comes back trimmed but otherwise untouched.
pub fn normalize_date(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }
    if ISO_PREFIX.is_match(s) {
        return s[..10].to_string();
    }
    if let Some(caps) = DAY_MONTH_YEAR.captures(s) {
        let day: u32 = caps[1].parse().unwrap_or(0);
        let month: u32 = caps[2].parse().unwrap_or(0);
        let mut year: u32 = caps[3].parse().unwrap_or(0);
        if year < 100 {
            year += 2000;
        }
        return format!("{year}-{month:02}-{day:02}");
    }
    s.to_string()
}
