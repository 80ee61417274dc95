use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::AnalyticsError;

/// A target calendar month for projection queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Period {
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, AnalyticsError> {
        if !(1..=12).contains(&month) {
            return Err(AnalyticsError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let day = days_in_month(self.year, self.month);
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    /// The previous month, wrapping across year boundaries.
    pub fn prev(&self) -> Period {
        if self.month == 1 {
            Period {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Period {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The next month, wrapping across year boundaries.
    pub fn next(&self) -> Period {
        if self.month == 12 {
            Period {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Period {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap_or(NaiveDate::MIN));
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

/// Shifts `date` forward by whole months, pinning the day to `anchor_day`
/// clamped to the target month's length.
pub(crate) fn shift_months(date: NaiveDate, months: i32, anchor_day: u32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = anchor_day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_month() {
        assert!(Period::new(2024, 0).is_err());
        assert!(Period::new(2024, 13).is_err());
        assert!(Period::new(2024, 12).is_ok());
    }

    #[test]
    fn month_bounds() {
        let feb = Period::new(2024, 2).unwrap();
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(feb.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!feb.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn from_date_extracts_the_month() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 17).unwrap();
        assert_eq!(Period::from_date(date), Period::new(2024, 11).unwrap());
    }

    #[test]
    fn navigation_wraps_year_boundaries() {
        let jan = Period::new(2024, 1).unwrap();
        assert_eq!(jan.prev(), Period::new(2023, 12).unwrap());
        let dec = Period::new(2024, 12).unwrap();
        assert_eq!(dec.next(), Period::new(2025, 1).unwrap());
    }

    #[test]
    fn shift_months_clamps_to_short_months() {
        let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            shift_months(jan31, 1, 31),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        let feb29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            shift_months(feb29, 1, 31),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
    }
}
