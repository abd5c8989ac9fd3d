//! Client-facing number and date formatting
//!
//! Statements are pasted into chat apps by admins, so the text has to match
//! what clients already receive: whole rupees with Indian digit grouping and
//! upper-case `DD MON YYYY` dates.

use chrono::{Datelike, NaiveDate};

pub const RUPEE: &str = "₹";

/// en-GB short month names, upper-cased (September is `SEPT`)
const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEPT", "OCT", "NOV", "DEC",
];

/// Group digits the en-IN way: last three, then pairs (`12,34,567`)
pub fn group_en_in(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let sign = if value < 0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{}{}", sign, digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{}{},{}", sign, groups.join(","), tail)
}

/// Floor to whole units and group (`1234567.89` -> `12,34,567`)
pub fn format_amount(value: f64) -> String {
    let floored = if value.is_finite() { value.floor() as i64 } else { 0 };
    group_en_in(floored)
}

/// Amount with the rupee glyph
pub fn format_rupees(value: f64) -> String {
    format!("{}{}", RUPEE, format_amount(value))
}

/// `01 JAN 2026`, `30 SEPT 2025`
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02} {} {:04}", date.day(), MONTHS[date.month0() as usize], date.year())
}
