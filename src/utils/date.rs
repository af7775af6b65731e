//! Date utilities: loose entry-date parsing, weekend/holiday detection,
//! period expansion for list/export filters.

use chrono::{Datelike, NaiveDate, Weekday};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Accepted spellings for entry dates, tried in order.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Parse a loosely formatted entry date. Returns None instead of failing:
/// checks that need a calendar date are skipped for unparseable entries.
pub fn parse_entry_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn is_weekend(d: NaiveDate) -> bool {
    matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
    NaiveDate::from_ymd_opt(year, month, 1 + offset + (n - 1) * 7)
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_month.pred_opt()?;
    let offset = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last.checked_sub_days(chrono::Days::new(offset as u64))
}

/// US federal holiday lookup (observed-on-actual-date only).
pub fn us_federal_holiday(d: NaiveDate) -> Option<&'static str> {
    match (d.month(), d.day()) {
        (1, 1) => return Some("New Year's Day"),
        (6, 19) => return Some("Juneteenth"),
        (7, 4) => return Some("Independence Day"),
        (11, 11) => return Some("Veterans Day"),
        (12, 25) => return Some("Christmas Day"),
        _ => {}
    }

    let y = d.year();
    let floating = [
        (nth_weekday_of_month(y, 1, Weekday::Mon, 3), "Martin Luther King Jr. Day"),
        (nth_weekday_of_month(y, 2, Weekday::Mon, 3), "Presidents' Day"),
        (last_weekday_of_month(y, 5, Weekday::Mon), "Memorial Day"),
        (nth_weekday_of_month(y, 9, Weekday::Mon, 1), "Labor Day"),
        (nth_weekday_of_month(y, 10, Weekday::Mon, 2), "Columbus Day"),
        (nth_weekday_of_month(y, 11, Weekday::Thu, 4), "Thanksgiving Day"),
    ];

    floating
        .iter()
        .find(|(day, _)| *day == Some(d))
        .map(|(_, name)| *name)
}
