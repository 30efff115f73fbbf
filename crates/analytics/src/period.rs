use chrono::{Datelike, Duration, Months, NaiveDate};

/// Caller-selected reporting window. Distinct from a budget's renewal
/// cadence; the two must never be conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportingPeriod {
    Week,
    Month,
    Quarter,
    Year,
}

/// Half-open date interval: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

impl ReportingPeriod {
    /// Unknown names fall back to `Month`, mirroring the dashboard's
    /// default selection. Not an error.
    pub fn parse(s: &str) -> Self {
        match s {
            "week" => ReportingPeriod::Week,
            "month" => ReportingPeriod::Month,
            "quarter" => ReportingPeriod::Quarter,
            "year" => ReportingPeriod::Year,
            _ => ReportingPeriod::Month,
        }
    }

    /// Resolve to the calendar interval containing `today`.
    ///
    /// Weeks start on Monday; quarters on the civil quarter months
    /// (Jan, Apr, Jul, Oct).
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match self {
            ReportingPeriod::Week => {
                let start =
                    today - Duration::days(today.weekday().num_days_from_monday() as i64);
                DateRange { start, end: start + Duration::days(7) }
            }
            ReportingPeriod::Month => {
                // Day 1 always exists.
                let start = today.with_day(1).unwrap();
                DateRange { start, end: start + Months::new(1) }
            }
            ReportingPeriod::Quarter => {
                let quarter_month = (today.month0() / 3) * 3 + 1;
                let start = NaiveDate::from_ymd_opt(today.year(), quarter_month, 1).unwrap();
                DateRange { start, end: start + Months::new(3) }
            }
            ReportingPeriod::Year => {
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap();
                DateRange { start, end: start + Months::new(12) }
            }
        }
    }
}
