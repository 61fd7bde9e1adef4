//! Display formatting shared by the page view models.
//!
//! Dates follow the US long/short forms used across the app
//! (`June 15, 2024`, `Jun 15`), money is rendered with a leading `$`.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// `leaf_removal` -> `leaf removal`
pub fn humanize(slug: &str) -> String {
    slug.replace('_', " ")
}

/// `leaf_removal` -> `Leaf Removal`
pub fn title_case(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut at_word_start = true;
    for ch in slug.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphanumeric() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Whole dollars, e.g. `$1235`.
pub fn currency_whole(amount: f64) -> String {
    format!("${:.0}", amount)
}

/// Dollars and cents, e.g. `$12.50`.
pub fn currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Calendar title, e.g. `June 2024`.
pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Chart axis label, e.g. `Jun 2024`.
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month:02}"))
}

/// `June 15, 2024 at 3:04 PM`, in whatever zone `ts` carries.
pub fn timestamp<Tz: TimeZone>(ts: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.format("%B %-d, %Y at %-I:%M %p").to_string()
}

/// A backend timestamp shown in the server's local zone.
pub fn local_timestamp(ts: DateTime<Utc>) -> String {
    timestamp(ts.with_timezone(&chrono::Local))
}

/// `Today`, `Tomorrow`, otherwise the short date.
pub fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.succ_opt() == Some(date) {
        "Tomorrow".to_string()
    } else {
        short_date(date)
    }
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
