use thiserror::Error;

/// Error type that captures invalid analytics inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("invalid period: month {month} of year {year} is out of range")]
    InvalidPeriod { year: i32, month: u32 },
    #[error("{0}")]
    InvalidInput(String),
}
