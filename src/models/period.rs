//! Reporting periods
//!
//! A `ReportPeriod` names a window of dates relative to "today" (this month,
//! last week, ...) or an absolute one (a calendar month, a custom range).
//! Resolving it yields an inclusive `DateRange`, or `None` for all time.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive range of dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range; `start` must not be after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodParseError> {
        if start > end {
            return Err(PeriodParseError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// `None` when the month is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.first_day(),
            end: self.last_day(),
        }
    }

    pub fn next(&self) -> Self {
        Self(self.0.checked_add_months(Months::new(1)).unwrap_or(self.0))
    }

    pub fn prev(&self) -> Self {
        Self(self.0.checked_sub_months(Months::new(1)).unwrap_or(self.0))
    }

    /// Short chart label, e.g. "Mar 25"
    pub fn short_label(&self) -> String {
        self.0.format("%b %y").to_string()
    }

    /// Parse "YYYY-MM"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        Self::new(year, month).ok_or(PeriodParseError::InvalidMonth(month))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        YearMonth::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A named reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReportPeriod {
    #[default]
    ThisMonth,
    LastMonth,
    /// Monday of the current week through today
    ThisWeek,
    /// Monday through Sunday of the previous week
    LastWeek,
    AllTime,
    Month(YearMonth),
    Custom(DateRange),
}

impl ReportPeriod {
    /// The relative periods, in the order they are offered to the user
    pub fn named() -> [ReportPeriod; 5] {
        [
            Self::ThisMonth,
            Self::LastMonth,
            Self::ThisWeek,
            Self::LastWeek,
            Self::AllTime,
        ]
    }

    /// Resolve against `today`. `None` means no date filter.
    pub fn date_range(&self, today: NaiveDate) -> Option<DateRange> {
        match self {
            Self::ThisMonth => Some(YearMonth::containing(today).range()),
            Self::LastMonth => Some(YearMonth::containing(today).prev().range()),
            Self::ThisWeek => Some(DateRange {
                start: week_start(today),
                end: today,
            }),
            Self::LastWeek => {
                let this_monday = week_start(today);
                Some(DateRange {
                    start: this_monday - Duration::days(7),
                    end: this_monday - Duration::days(1),
                })
            }
            Self::AllTime => None,
            Self::Month(month) => Some(month.range()),
            Self::Custom(range) => Some(*range),
        }
    }

    /// Machine-readable form accepted by `parse`
    pub fn key(&self) -> String {
        match self {
            Self::ThisMonth => "this-month".into(),
            Self::LastMonth => "last-month".into(),
            Self::ThisWeek => "this-week".into(),
            Self::LastWeek => "last-week".into(),
            Self::AllTime => "all".into(),
            Self::Month(month) => month.to_string(),
            Self::Custom(range) => range.to_string(),
        }
    }

    /// Parse a period
    ///
    /// Formats:
    /// - Relative: "this-month", "last-month", "this-week", "last-week", "all"
    /// - Monthly: "2025-01"
    /// - Custom: "2025-01-01..2025-01-15"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let normalized = s.to_ascii_lowercase().replace([' ', '_'], "-");

        match normalized.as_str() {
            "this-month" | "month" => return Ok(Self::ThisMonth),
            "last-month" => return Ok(Self::LastMonth),
            "this-week" | "week" => return Ok(Self::ThisWeek),
            "last-week" => return Ok(Self::LastWeek),
            "all" | "all-time" => return Ok(Self::AllTime),
            _ => {}
        }

        if let Some((start, end)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            return DateRange::new(start, end).map(Self::Custom);
        }

        YearMonth::parse(s).map(Self::Month)
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThisMonth => write!(f, "This Month"),
            Self::LastMonth => write!(f, "Last Month"),
            Self::ThisWeek => write!(f, "This Week"),
            Self::LastWeek => write!(f, "Last Week"),
            Self::AllTime => write!(f, "All Time"),
            Self::Month(month) => write!(f, "{}", month.first_day().format("%B %Y")),
            Self::Custom(range) => write!(f, "{}", range),
        }
    }
}

impl TryFrom<String> for ReportPeriod {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReportPeriod> for String {
    fn from(period: ReportPeriod) -> Self {
        period.key()
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::InvertedRange { start, end } => {
                write!(f, "Range start {} is after its end {}", start, end)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}
