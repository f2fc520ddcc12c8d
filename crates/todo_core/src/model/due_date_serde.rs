//! Serde adapter for optional calendar due dates.
//!
//! Writes `YYYY-MM-DD`. Reads either that form or a full RFC 3339
//! timestamp (older snapshots stored due dates as instants), truncating
//! the timestamp to its local calendar day.

use chrono::{DateTime, Local, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.as_deref().map(parse_due_date).transpose().map_err(D::Error::custom)
}

pub(crate) fn parse_due_date(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|instant| instant.with_timezone(&Local).date_naive())
        .map_err(|err| format!("invalid due date `{trimmed}`: {err}"))
}

#[cfg(test)]
mod tests {
    use super::parse_due_date;
    use chrono::NaiveDate;

    #[test]
    fn parses_plain_calendar_date() {
        assert_eq!(
            parse_due_date("2026-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
    }

    #[test]
    fn parses_legacy_midday_timestamp() {
        // Noon UTC lands on the same calendar day for every offset within ±11h.
        assert_eq!(
            parse_due_date("2026-03-01T12:00:00.000Z").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_due_date("next tuesday").unwrap_err();
        assert!(err.contains("invalid due date"));
    }
}
