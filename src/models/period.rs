//! Reporting periods and date windows
//!
//! A report period resolves to an inclusive calendar window around a given
//! day: the whole month or the whole year that contains it.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinanceError;

/// Reporting window granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Month,
    Year,
}

impl ReportPeriod {
    /// Resolve the window containing `today`
    pub fn window(&self, today: NaiveDate) -> DateWindow {
        match self {
            Self::Month => DateWindow::month_of(today),
            Self::Year => DateWindow::year_of(today),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(FinanceError::UnsupportedPeriod(other.to_string())),
        }
    }
}

/// An inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateWindow {
    /// First through last day of the month containing `day`
    pub fn month_of(day: NaiveDate) -> Self {
        let start_date = day.with_day(1).unwrap_or(day);
        let next_month = if day.month() == 12 {
            NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)
        };
        let end_date = next_month
            .map(|d| d - Duration::days(1))
            .unwrap_or(day);
        Self {
            start_date,
            end_date,
        }
    }

    /// January 1 through December 31 of the year containing `day`
    pub fn year_of(day: NaiveDate) -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(day.year(), 1, 1).unwrap_or(day),
            end_date: NaiveDate::from_ymd_opt(day.year(), 12, 31).unwrap_or(day),
        }
    }

    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_date, self.end_date)
    }
}
