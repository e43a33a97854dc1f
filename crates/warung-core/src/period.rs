//! # Report Periods
//!
//! Date windows for reports and the journal list. "Today" is always a
//! parameter, never read from the clock here.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Report period relative to a given day.
///
/// ```text
/// today = 2024-05-17
///
/// All        → no bound
/// ThisMonth  → 2024-05-01 ..= 2024-05-31
/// LastMonth  → 2024-04-01 ..= 2024-04-30
/// Quarter    → 2024-04-01 ..= 2024-06-30
/// ThisYear   → 2024-01-01 ..= 2024-12-31
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum ReportPeriod {
    #[default]
    All,
    ThisMonth,
    LastMonth,
    Quarter,
    ThisYear,
}

impl ReportPeriod {
    /// Inclusive `(start, end)` bounds, or `None` for [`ReportPeriod::All`].
    pub fn range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let year = today.year();
        match self {
            ReportPeriod::All => None,
            ReportPeriod::ThisMonth => month_range(year, today.month()),
            ReportPeriod::LastMonth => {
                let first = NaiveDate::from_ymd_opt(year, today.month(), 1)?;
                let previous = first.checked_sub_months(Months::new(1))?;
                month_range(previous.year(), previous.month())
            }
            ReportPeriod::Quarter => {
                let first_month = (today.month0() / 3) * 3 + 1;
                let start = NaiveDate::from_ymd_opt(year, first_month, 1)?;
                let end = start.checked_add_months(Months::new(3))?.pred_opt()?;
                Some((start, end))
            }
            ReportPeriod::ThisYear => Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            )),
        }
    }

    /// First day of the period, used for opening balances.
    pub fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.range(today).map(|(start, _)| start)
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self.range(today) {
            Some((start, end)) => start <= date && date <= end,
            None => true,
        }
    }

    /// Name used on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            ReportPeriod::All => "semua",
            ReportPeriod::ThisMonth => "bulan-ini",
            ReportPeriod::LastMonth => "bulan-lalu",
            ReportPeriod::Quarter => "triwulan",
            ReportPeriod::ThisYear => "tahun-ini",
        }
    }

    /// Heading shown above a report.
    pub const fn label(&self) -> &'static str {
        match self {
            ReportPeriod::All => "Semua Periode",
            ReportPeriod::ThisMonth => "Bulan Ini",
            ReportPeriod::LastMonth => "Bulan Lalu",
            ReportPeriod::Quarter => "Triwulan Ini",
            ReportPeriod::ThisYear => "Tahun Ini",
        }
    }
}

fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((start, end))
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "semua" | "all" => Ok(ReportPeriod::All),
            "bulan-ini" | "this-month" => Ok(ReportPeriod::ThisMonth),
            "bulan-lalu" | "last-month" => Ok(ReportPeriod::LastMonth),
            "triwulan" | "quarter" => Ok(ReportPeriod::Quarter),
            "tahun-ini" | "this-year" => Ok(ReportPeriod::ThisYear),
            _ => Err(ValidationError::NotAllowed {
                field: "period".to_string(),
                allowed: ["semua", "bulan-ini", "bulan-lalu", "triwulan", "tahun-ini"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_ranges() {
        let today = d(2024, 5, 17);

        assert_eq!(ReportPeriod::All.range(today), None);
        assert_eq!(
            ReportPeriod::ThisMonth.range(today),
            Some((d(2024, 5, 1), d(2024, 5, 31)))
        );
        assert_eq!(
            ReportPeriod::LastMonth.range(today),
            Some((d(2024, 4, 1), d(2024, 4, 30)))
        );
        assert_eq!(
            ReportPeriod::Quarter.range(today),
            Some((d(2024, 4, 1), d(2024, 6, 30)))
        );
        assert_eq!(
            ReportPeriod::ThisYear.range(today),
            Some((d(2024, 1, 1), d(2024, 12, 31)))
        );
    }

    #[test]
    fn test_last_month_crosses_year() {
        assert_eq!(
            ReportPeriod::LastMonth.range(d(2024, 1, 10)),
            Some((d(2023, 12, 1), d(2023, 12, 31)))
        );
    }

    #[test]
    fn test_leap_february() {
        assert_eq!(
            ReportPeriod::ThisMonth.range(d(2024, 2, 10)),
            Some((d(2024, 2, 1), d(2024, 2, 29)))
        );
    }

    #[test]
    fn test_contains() {
        let today = d(2024, 5, 17);
        assert!(ReportPeriod::ThisMonth.contains(d(2024, 5, 31), today));
        assert!(!ReportPeriod::ThisMonth.contains(d(2024, 6, 1), today));
        assert!(ReportPeriod::All.contains(d(1999, 1, 1), today));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("bulan-ini".parse::<ReportPeriod>().unwrap(), ReportPeriod::ThisMonth);
        assert_eq!("TRIWULAN".parse::<ReportPeriod>().unwrap(), ReportPeriod::Quarter);
        assert_eq!("semua".parse::<ReportPeriod>().unwrap(), ReportPeriod::All);
        assert!("minggu-ini".parse::<ReportPeriod>().is_err());
        assert_eq!(ReportPeriod::LastMonth.name(), "bulan-lalu");
    }
}
