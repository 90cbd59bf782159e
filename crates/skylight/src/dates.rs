//! Natural date and time phrase resolution.
//!
//! All relative resolution is anchored to the current instant converted into
//! the configured time zone, never to the UTC calendar date, so "today" does
//! not drift across midnight boundaries.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::SkylightError;

/// Today's date in the given zone.
#[must_use]
pub fn today(tz: Tz) -> NaiveDate {
    today_at(tz, Utc::now())
}

/// Today's date in the given zone, offset by a number of days.
#[must_use]
pub fn offset(days: i64, tz: Tz) -> NaiveDate {
    offset_at(days, tz, Utc::now())
}

/// Resolve a date phrase: an explicit `YYYY-MM-DD`, `today`, `tomorrow`, or
/// a weekday name (full or three-letter).
///
/// A weekday resolves to its next occurrence at or after the current date:
/// if today is Friday and the phrase is "Friday", the result is today, not
/// next week.
///
/// # Errors
/// Returns [`SkylightError::InvalidDate`] for anything else; callers should
/// surface it as a user-correctable input error.
pub fn resolve(phrase: &str, tz: Tz) -> Result<NaiveDate, SkylightError> {
    resolve_at(phrase, tz, Utc::now())
}

/// Resolve a time phrase, accepting 12-hour (`10:00 AM`) and 24-hour
/// (`14:30`) forms. Returns `None` when the phrase parses as neither;
/// times are optional everywhere they appear.
#[must_use]
pub fn resolve_time(phrase: &str) -> Option<NaiveTime> {
    let normalized = phrase.trim().to_ascii_uppercase();
    for format in ["%H:%M", "%I:%M %p", "%I:%M%p", "%I %p"] {
        if let Ok(time) = NaiveTime::parse_from_str(&normalized, format) {
            return Some(time);
        }
    }
    None
}

/// Canonical 24-hour `HH:MM` form of a resolved time.
#[must_use]
pub fn canonical_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn today_at(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

fn offset_at(days: i64, tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    let today = today_at(tz, now);
    if days >= 0 {
        today + Days::new(days.unsigned_abs())
    } else {
        today - Days::new(days.unsigned_abs())
    }
}

fn resolve_at(phrase: &str, tz: Tz, now: DateTime<Utc>) -> Result<NaiveDate, SkylightError> {
    let trimmed = phrase.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    let today = today_at(tz, now);
    match trimmed.to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => Ok(today + Days::new(1)),
        other => {
            if let Ok(weekday) = other.parse::<Weekday>() {
                let ahead = (weekday.num_days_from_monday() + 7
                    - today.weekday().num_days_from_monday())
                    % 7;
                Ok(today + Days::new(u64::from(ahead)))
            } else {
                Err(SkylightError::InvalidDate(phrase.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    /// 2024-03-15 23:30 in New York; UTC has already rolled over to the 16th.
    fn late_evening() -> DateTime<Utc> {
        "2024-03-16T03:30:00Z".parse().unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_today_anchored_to_configured_zone_not_utc() {
        assert_eq!(today_at(New_York, late_evening()), date("2024-03-15"));
        assert_eq!(today_at(chrono_tz::UTC, late_evening()), date("2024-03-16"));
    }

    #[test]
    fn test_resolve_today_and_tomorrow() {
        assert_eq!(
            resolve_at("today", New_York, late_evening()).unwrap(),
            date("2024-03-15")
        );
        assert_eq!(
            resolve_at("Tomorrow", New_York, late_evening()).unwrap(),
            date("2024-03-16")
        );
    }

    #[test]
    fn test_resolve_explicit_iso_date() {
        assert_eq!(
            resolve_at("2024-12-25", New_York, late_evening()).unwrap(),
            date("2024-12-25")
        );
    }

    #[test]
    fn test_weekday_same_day_resolves_to_today() {
        // 2024-03-15 is a Friday.
        assert_eq!(
            resolve_at("friday", New_York, late_evening()).unwrap(),
            date("2024-03-15")
        );
        assert_eq!(
            resolve_at("Fri", New_York, late_evening()).unwrap(),
            date("2024-03-15")
        );
    }

    #[test]
    fn test_weekday_resolves_forward_never_backward() {
        // Thursday already passed this week; next Thursday is the 21st.
        assert_eq!(
            resolve_at("thursday", New_York, late_evening()).unwrap(),
            date("2024-03-21")
        );
        assert_eq!(
            resolve_at("saturday", New_York, late_evening()).unwrap(),
            date("2024-03-16")
        );
    }

    #[test]
    fn test_unrecognized_phrase_is_invalid_date() {
        let err = resolve_at("next blursday", New_York, late_evening()).unwrap_err();
        assert!(matches!(err, SkylightError::InvalidDate(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_offset_in_zone() {
        assert_eq!(offset_at(7, New_York, late_evening()), date("2024-03-22"));
        assert_eq!(offset_at(-1, New_York, late_evening()), date("2024-03-14"));
    }

    #[test]
    fn test_time_parsing_normalizes_to_24h() {
        let ten_am = resolve_time("10:00 AM").unwrap();
        assert_eq!(canonical_time(ten_am), "10:00");

        let half_past_two = resolve_time("2:30 pm").unwrap();
        assert_eq!(canonical_time(half_past_two), "14:30");

        let military = resolve_time("14:30").unwrap();
        assert_eq!(canonical_time(military), "14:30");

        let bare_hour = resolve_time("7 PM").unwrap();
        assert_eq!(canonical_time(bare_hour), "19:00");
    }

    #[test]
    fn test_unparseable_time_is_none() {
        assert!(resolve_time("half past never").is_none());
        assert!(resolve_time("25:99").is_none());
    }
}
