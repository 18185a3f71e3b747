//! Free-form date label parsing.
//!
//! Turns the labels shown next to posts (`"Tuesday, March 5, 2024 at 10:30 AM"`,
//! `"March 5 at 10:30 AM"`, `"Yesterday at 4:15 PM"`, `"3 hrs"`) into epoch
//! milliseconds. Values without an explicit zone are taken as UTC. Parsing
//! never fails loudly: anything unrecognized is `None`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::debug;

use crate::patterns::{AT_CLOCK, DAY_RELATIVE, RELATIVE_AGE, WHITESPACE_NORMALIZE};

/// Naive date-time layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
    "%m/%d/%y, %I:%M %p",
    "%m/%d/%Y %I:%M %p",
];

/// Date-only layouts, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%A, %B %d, %Y", // Tuesday, March 5, 2024
    "%A %B %d, %Y",
    "%B %d, %Y",     // March 5, 2024
    "%B %d %Y",
    "%d %B %Y",      // 5 March 2024
    "%A, %d %B %Y",
];

/// Layouts for feed labels that omit the year; the current year is appended
/// before parsing.
const YEARLESS_DATE_FORMATS: &[&str] = &["%B %d %Y", "%d %B %Y", "%A, %B %d %Y"];

/// Clock layouts for the part after `at`.
const CLOCK_FORMATS: &[&str] = &["%I:%M %p", "%I:%M:%S %p", "%H:%M", "%H:%M:%S"];

/// Parse a date label into epoch milliseconds, resolving relative phrasing
/// against the current time.
///
/// # Example
///
/// ```rust
/// use fb_post_scraper::date::parse_to_epoch_millis;
///
/// assert_eq!(parse_to_epoch_millis("2023-11-14T22:13:20Z"), Some(1_700_000_000_000));
/// assert_eq!(parse_to_epoch_millis("Sponsored"), None);
/// ```
#[must_use]
pub fn parse_to_epoch_millis(text: &str) -> Option<i64> {
    parse_to_epoch_millis_at(text, Utc::now())
}

/// Same as [`parse_to_epoch_millis`] with an explicit reference time for
/// relative labels.
#[must_use]
pub fn parse_to_epoch_millis_at(text: &str, now: DateTime<Utc>) -> Option<i64> {
    let parsed = parse_datetime(text, now).map(|dt| dt.timestamp_millis());
    if parsed.is_none() {
        debug!(label = text, "date label not recognized");
    }
    parsed
}

/// Parse a date label into a UTC date-time.
#[must_use]
pub fn parse_datetime(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = WHITESPACE_NORMALIZE.replace_all(text.trim(), " ");
    if text.is_empty() {
        return None;
    }

    parse_zoned(&text)
        .or_else(|| parse_naive_datetime(&text))
        .or_else(|| parse_date(&text, now.year()).map(midnight))
        .or_else(|| parse_relative_age(&text, now))
        .or_else(|| parse_day_relative(&text, now))
        .or_else(|| parse_at_clock(&text, now.year()))
}

fn parse_zoned(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_naive_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = normalize_meridiem(text);
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&text, fmt).ok())
        .map(|dt| dt.and_utc())
}

fn parse_date(text: &str, current_year: i32) -> Option<NaiveDate> {
    let text = text.trim_end_matches(['.', ',']);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            let with_year = format!("{} {current_year}", text.trim_end_matches(','));
            YEARLESS_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(&with_year, fmt).ok())
        })
}

fn parse_clock(text: &str) -> Option<NaiveTime> {
    let text = normalize_meridiem(text);
    CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&text, fmt).ok())
}

/// `"5 mins"`, `"2 hrs"`, `"3d"`, `"1 week ago"`, `"Just now"`.
fn parse_relative_age(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let lower = text.to_ascii_lowercase();
    if lower == "just now" || lower == "now" {
        return Some(now);
    }

    let caps = RELATIVE_AGE.captures(&lower)?;
    let amount: i64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str();

    let age = match unit.chars().next()? {
        's' => Duration::try_seconds(amount)?,
        'm' => Duration::try_minutes(amount)?,
        'h' => Duration::try_hours(amount)?,
        'd' => Duration::try_days(amount)?,
        'w' => Duration::try_weeks(amount)?,
        'y' => Duration::try_days(amount.checked_mul(365)?)?,
        _ => return None,
    };
    now.checked_sub_signed(age)
}

/// `"Yesterday at 4:15 PM"`, `"Today"`.
fn parse_day_relative(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let caps = DAY_RELATIVE.captures(text)?;
    let day = if caps.get(1)?.as_str().eq_ignore_ascii_case("yesterday") {
        now.date_naive().pred_opt()?
    } else {
        now.date_naive()
    };

    let clock = match caps.get(2) {
        Some(m) => parse_clock(m.as_str())?,
        None => NaiveTime::MIN,
    };
    Some(day.and_time(clock).and_utc())
}

/// `"Tuesday, March 5, 2024 at 10:30 AM"`, `"March 5 at 10:30 AM"`.
fn parse_at_clock(text: &str, current_year: i32) -> Option<DateTime<Utc>> {
    let caps = AT_CLOCK.captures(text)?;
    let date = parse_date(caps.get(1)?.as_str(), current_year)?;
    let clock = parse_clock(caps.get(2)?.as_str())?;
    Some(date.and_time(clock).and_utc())
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// `"4:15pm"` / `"4:15 p.m."` → `"4:15 PM"`.
fn normalize_meridiem(text: &str) -> String {
    let upper = text.to_ascii_uppercase().replace('.', "");
    let trimmed = upper.trim_end();
    for suffix in ["AM", "PM"] {
        if let Some(head) = trimmed.strip_suffix(suffix) {
            let head = head.trim_end();
            if head.ends_with(|c: char| c.is_ascii_digit()) {
                return format!("{head} {suffix}");
            }
        }
    }
    text.to_string()
}
