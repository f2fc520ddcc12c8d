//! Due-date display helpers.

use chrono::{Datelike, NaiveDate};

/// Signed whole days from `today` until `due` (negative when past).
pub fn days_until_due(due: NaiveDate, today: NaiveDate) -> i64 {
    due.signed_duration_since(today).num_days()
}

/// Short human label for a due date relative to `today`.
pub fn due_label(due: NaiveDate, today: NaiveDate) -> String {
    let days = days_until_due(due, today);
    match days {
        d if d < 0 => {
            let late = d.unsigned_abs();
            format!("{late} day{} overdue", if late == 1 { "" } else { "s" })
        }
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        2..=7 => format!("Due in {days} days"),
        _ => short_date(due),
    }
}

/// `M/D/YYYY` without zero padding.
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
