//! Analytics windows
//!
//! Every window ends on `today`, so future-dated transactions never show up
//! in the current period. The previous period is the comparable block just
//! before it: the prior 7 days, or the whole prior calendar month or year.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::models::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ReportWindow {
    Week,
    #[default]
    Month,
    Year,
}

impl ReportWindow {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" | "w" => Some(Self::Week),
            "month" | "m" => Some(Self::Month),
            "year" | "y" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn current(&self, today: NaiveDate) -> DateRange {
        match self {
            Self::Week => DateRange::trailing_days(today, 7),
            Self::Month => DateRange::new(DateRange::month_of(today).start, today),
            Self::Year => DateRange::new(DateRange::year_of(today).start, today),
        }
    }

    pub fn previous(&self, today: NaiveDate) -> DateRange {
        match self {
            Self::Week => DateRange::trailing_days(today - Duration::days(7), 7),
            Self::Month => DateRange::month_of(DateRange::month_of(today).start - Duration::days(1)),
            Self::Year => DateRange::year_of(
                NaiveDate::from_ymd_opt(today.year() - 1, 6, 30).unwrap_or(today),
            ),
        }
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Week => write!(f, "Week"),
            Self::Month => write!(f, "Month"),
            Self::Year => write!(f, "Year"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_windows() {
        let today = date(2024, 3, 14);
        let current = ReportWindow::Week.current(today);
        assert_eq!(current, DateRange::new(date(2024, 3, 8), today));

        let previous = ReportWindow::Week.previous(today);
        assert_eq!(previous, DateRange::new(date(2024, 3, 1), date(2024, 3, 7)));
    }

    #[test]
    fn test_month_windows() {
        let today = date(2024, 3, 14);
        assert_eq!(
            ReportWindow::Month.current(today),
            DateRange::new(date(2024, 3, 1), today)
        );
        assert_eq!(
            ReportWindow::Month.previous(today),
            DateRange::new(date(2024, 2, 1), date(2024, 2, 29))
        );

        // January compares against the previous December
        let previous = ReportWindow::Month.previous(date(2024, 1, 5));
        assert_eq!(previous, DateRange::new(date(2023, 12, 1), date(2023, 12, 31)));
    }

    #[test]
    fn test_year_windows() {
        let today = date(2024, 3, 14);
        assert_eq!(
            ReportWindow::Year.current(today),
            DateRange::new(date(2024, 1, 1), today)
        );
        assert_eq!(
            ReportWindow::Year.previous(today),
            DateRange::new(date(2023, 1, 1), date(2023, 12, 31))
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(ReportWindow::parse("WEEK"), Some(ReportWindow::Week));
        assert_eq!(ReportWindow::parse("y"), Some(ReportWindow::Year));
        assert_eq!(ReportWindow::parse("decade"), None);
    }
}
