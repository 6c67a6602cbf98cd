use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The Monday on or before the given date. Plans and shopping lists are
/// keyed by this date.
pub fn week_start_of(date: Date) -> Date {
    date - Duration::days(i64::from(date.weekday().number_days_from_monday()))
}

/// Week start for "now", preferring server-local time like the UI the data
/// feeds; falls back to UTC when the local offset cannot be determined.
pub fn current_week_start() -> Date {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    week_start_of(now.date())
}

pub fn previous_week(week_start: Date) -> Date {
    week_start - Duration::days(7)
}

pub fn parse_date(s: &str) -> anyhow::Result<Date> {
    Date::parse(s.trim(), DATE_FORMAT).map_err(|e| anyhow::anyhow!("invalid date {s:?}: {e}"))
}

pub fn format_date(date: Date) -> String {
    // The format description only contains infallible components.
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn week_start_is_most_recent_monday() {
        assert_eq!(week_start_of(date!(2024 - 01 - 10)), date!(2024 - 01 - 08));
        assert_eq!(week_start_of(date!(2024 - 01 - 13)), date!(2024 - 01 - 08));
        // Sunday belongs to the week that started six days earlier.
        assert_eq!(week_start_of(date!(2024 - 01 - 14)), date!(2024 - 01 - 08));
    }

    #[test]
    fn mondays_map_to_themselves() {
        assert_eq!(week_start_of(date!(2024 - 01 - 08)), date!(2024 - 01 - 08));
    }

    #[test]
    fn previous_week_is_seven_days_back() {
        assert_eq!(previous_week(date!(2024 - 01 - 08)), date!(2024 - 01 - 01));
    }

    #[test]
    fn date_parse_and_format_round_trip() {
        let parsed = parse_date("2024-01-08").unwrap();
        assert_eq!(parsed, date!(2024 - 01 - 08));
        assert_eq!(format_date(parsed), "2024-01-08");
    }

    #[test]
    fn date_parse_rejects_garbage() {
        assert!(parse_date("08/01/2024").is_err());
        assert!(parse_date("next monday").is_err());
    }
}
