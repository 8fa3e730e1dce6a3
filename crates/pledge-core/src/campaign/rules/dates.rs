//! Date-time parsing for campaign launch and close dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::patterns::{ORDINAL_DAY, ZONE_SUFFIX};

/// Date-time shapes seen on campaign pages, most specific first.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%B %d, %Y %I:%M:%S %p",
    "%B %d, %Y %I:%M %p",
    "%B %d, %Y %H:%M",
    "%a, %B %d, %Y %I:%M %p",
    "%d %B %Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M",
];

/// Date-only shapes; these resolve to midnight.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%a, %B %d, %Y",
    "%A, %B %d, %Y",
    "%d %B %Y",
    "%m/%d/%Y",
];

/// Parse a calendar date-time as printed on a campaign page.
///
/// Offsets in RFC 3339 input are applied (the result is UTC); trailing
/// zone abbreviations such as `EST` are dropped, not converted.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_utc());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn normalize(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut s = ORDINAL_DAY.replace_all(&collapsed, "$1").into_owned();

    if let Some(m) = ZONE_SUFFIX.find(&s) {
        let zone = m.as_str().trim();
        if zone != "AM" && zone != "PM" {
            s.truncate(m.start());
        }
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_date_only_is_midnight() {
        assert_eq!(parse_timestamp("Jan 15, 2013"), Some(at(2013, 1, 15, 0, 0)));
        assert_eq!(parse_timestamp("January 15, 2013"), Some(at(2013, 1, 15, 0, 0)));
        assert_eq!(parse_timestamp("2013-01-15"), Some(at(2013, 1, 15, 0, 0)));
    }

    #[test]
    fn test_twelve_hour_clock_with_zone() {
        assert_eq!(
            parse_timestamp("Feb 14, 2013 8:59 PM EST"),
            Some(at(2013, 2, 14, 20, 59))
        );
        assert_eq!(
            parse_timestamp("Thu, Feb 14, 2013 8:59 PM"),
            Some(at(2013, 2, 14, 20, 59))
        );
    }

    #[test]
    fn test_twelve_hour_clock_after_iso_date() {
        assert_eq!(
            parse_timestamp("2013-04-03 11:00 PM"),
            Some(at(2013, 4, 3, 23, 0))
        );
        assert_eq!(
            parse_timestamp("2013-04-03 11:00:00 PM EDT"),
            Some(at(2013, 4, 3, 23, 0))
        );
        assert_eq!(
            parse_timestamp("2013-04-03 23:00"),
            Some(at(2013, 4, 3, 23, 0))
        );
    }

    #[test]
    fn test_twelve_hour_clock_with_seconds() {
        assert_eq!(
            parse_timestamp("Apr 3, 2013 11:00:00 PM"),
            Some(at(2013, 4, 3, 23, 0))
        );
        assert_eq!(
            parse_timestamp("April 3, 2013 9:15:00 AM"),
            Some(at(2013, 4, 3, 9, 15))
        );
    }

    #[test]
    fn test_rfc3339_is_converted_to_utc() {
        assert_eq!(
            parse_timestamp("2013-02-14T20:59:00-05:00"),
            Some(at(2013, 2, 15, 1, 59))
        );
    }

    #[test]
    fn test_iso_without_offset() {
        assert_eq!(
            parse_timestamp("2013-02-14T20:59:00"),
            Some(at(2013, 2, 14, 20, 59))
        );
    }

    #[test]
    fn test_whitespace_and_ordinals() {
        assert_eq!(
            parse_timestamp("  15th   January\t2013 "),
            Some(at(2013, 1, 15, 0, 0))
        );
    }

    #[test]
    fn test_unparsable() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("sometime soon"), None);
        assert_eq!(parse_timestamp("Feb 30, 2013"), None);
    }
}
