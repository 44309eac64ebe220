use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

const DAY_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date {0:?}, expected YYYY-MM-DD")]
pub struct InvalidDate(pub String);

/// Parses a `YYYY-MM-DD` calendar day.
pub fn parse_day(raw: &str) -> Result<Date, InvalidDate> {
    Date::parse(raw.trim(), DAY_FORMAT).map_err(|_| InvalidDate(raw.to_string()))
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_iso_days() {
        assert_eq!(parse_day("2025-03-14"), Ok(date!(2025 - 03 - 14)));
        assert_eq!(parse_day(" 2024-02-29 "), Ok(date!(2024 - 02 - 29)));
    }

    #[test]
    fn rejects_malformed_days() {
        assert!(parse_day("2025-02-30").is_err());
        assert!(parse_day("14/03/2025").is_err());
        assert_eq!(parse_day(""), Err(InvalidDate(String::new())));
    }
}
