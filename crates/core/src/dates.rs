//! Local calendar-date helpers shared by the grid builder and the resolver.
//!
//! Every date in the journal is a `NaiveDate`: a local calendar day with no
//! time-of-day and no offset. Keys are always produced from the calendar
//! fields, never from a UTC-normalized instant, so a workout logged late in
//! the evening never drifts onto the neighbouring day.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, SecondsFormat, Utc, Weekday};
use serde::{Deserialize, Serialize};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

// One year of margin on each side so leading and trailing grid days stay representable.
fn min_year() -> i32 {
    NaiveDate::MIN.year() + 1
}

fn max_year() -> i32 {
    NaiveDate::MAX.year() - 1
}

/// A `(year, month)` cursor with a zero-based month.
///
/// Construction normalizes out-of-range months into the adjacent year, so
/// `YearMonth::new(2024, -1)` is December 2023 and `YearMonth::new(2023, 12)`
/// is January 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: i32) -> Self {
        let total = i64::from(year) * 12 + i64::from(month);
        let year = total.div_euclid(12);
        let month = total.rem_euclid(12) as u32;

        if year < i64::from(min_year()) {
            Self { year: min_year(), month: 0 }
        } else if year > i64::from(max_year()) {
            Self { year: max_year(), month: 11 }
        } else {
            Self { year: year as i32, month }
        }
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0() as i32)
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::containing(local_today())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month, 0 = January.
    pub fn month0(&self) -> u32 {
        self.month
    }

    pub fn prev(self) -> Self {
        Self::new(self.year, self.month as i32 - 1)
    }

    pub fn next(self) -> Self {
        Self::new(self.year, self.month as i32 + 1)
    }

    pub fn first_day(&self) -> NaiveDate {
        // year is clamped into the representable range in `new`
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        (28..=31)
            .rev()
            .find(|day| NaiveDate::from_ymd_opt(self.year, self.month + 1, *day).is_some())
            .unwrap_or(28)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    /// Heading for the month view, e.g. "March 2024".
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

/// The weekday a calendar row starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Column headers in display order.
    pub fn header(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(format!("unknown week start '{}', expected sunday or monday", other)),
        }
    }
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Formats a date as its `YYYY-MM-DD` storage key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` key. Surrounding whitespace is ignored.
pub fn parse_date_key(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_KEY_FORMAT).ok()
}

/// Creation timestamp in the stored form, e.g. `2024-03-15T08:31:40.000Z`.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Human-readable label used by the day detail view.
pub fn human_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_rolls_months_into_adjacent_years() {
        assert_eq!(YearMonth::new(2024, -1), YearMonth::new(2023, 11));
        assert_eq!(YearMonth::new(2023, 12), YearMonth::new(2024, 0));
        assert_eq!(YearMonth::new(2024, -13), YearMonth::new(2022, 11));
        assert_eq!(YearMonth::new(2024, 25).year(), 2026);
        assert_eq!(YearMonth::new(2024, 25).month0(), 1);
    }

    #[test]
    fn prev_and_next_cross_year_boundaries() {
        let january = YearMonth::new(2024, 0);
        assert_eq!(january.prev(), YearMonth::new(2023, 11));
        assert_eq!(january.prev().next(), january);
        assert_eq!(YearMonth::new(2024, 11).next(), YearMonth::new(2025, 0));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(YearMonth::new(2024, 1).days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 1).days_in_month(), 28);
        assert_eq!(YearMonth::new(1900, 1).days_in_month(), 28);
        assert_eq!(YearMonth::new(2000, 1).days_in_month(), 29);
        assert_eq!(YearMonth::new(2024, 3).days_in_month(), 30);
        assert_eq!(YearMonth::new(2024, 11).days_in_month(), 31);
    }

    #[test]
    fn extreme_years_are_clamped() {
        let low = YearMonth::new(i32::MIN, 0);
        let high = YearMonth::new(i32::MAX, 11);
        assert!(low.first_day() > NaiveDate::MIN);
        assert!(high.first_day() < NaiveDate::MAX);
    }

    #[test]
    fn date_keys_use_calendar_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(date_key(date), "2024-03-05");
        assert_eq!(parse_date_key(" 2024-03-05 "), Some(date));
        assert_eq!(parse_date_key("2024-02-30"), None);
        assert_eq!(parse_date_key(""), None);
    }

    #[test]
    fn titles_and_labels() {
        assert_eq!(YearMonth::new(2024, 2).title(), "March 2024");
        assert_eq!(YearMonth::new(2024, 2).to_string(), "2024-03");
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(human_date(date), "Friday, March 15, 2024");
    }

    #[test]
    fn timestamps_keep_milliseconds_and_zulu_suffix() {
        use chrono::TimeZone;
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 8, 31, 40).unwrap();
        assert_eq!(timestamp(at), "2024-03-15T08:31:40.000Z");
    }

    #[test]
    fn week_start_parses_case_insensitively() {
        assert_eq!("Monday".parse::<WeekStart>(), Ok(WeekStart::Monday));
        assert_eq!("sun".parse::<WeekStart>(), Ok(WeekStart::Sunday));
        assert!("friday".parse::<WeekStart>().is_err());
    }
}
