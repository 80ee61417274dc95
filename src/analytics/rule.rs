use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategorySnapshot;
use super::period::shift_months;
use crate::errors::AnalyticsError;

/// Direction of money movement for a rule occurrence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

/// Supported recurrence frequencies. Unknown wire values are rejected at
/// deserialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Next candidate date after `from`. `anchor_day` pins monthly rules to
    /// their nominal day-of-month so a rule anchored on the 31st recovers
    /// to month-end after passing through shorter months.
    pub fn next_date(&self, from: NaiveDate, anchor_day: u32) -> NaiveDate {
        match self {
            Frequency::Daily => from + Duration::days(1),
            Frequency::Weekly => from + Duration::days(7),
            Frequency::Monthly => shift_months(from, 1, anchor_day),
            Frequency::Yearly => {
                NaiveDate::from_ymd_opt(from.year() + 1, from.month(), from.day())
                    .unwrap_or_else(|| shift_months(from, 12, from.day()))
            }
        }
    }
}

/// A recurring payment rule as supplied by the rules-management surface.
/// Read-only to this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringRule {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Amount in minor currency units (satang/cents).
    pub amount: i64,
    pub freq: Frequency,
    pub start_date: NaiveDate,
    /// Absent means the rule never expires.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// 1-31, anchors monthly rules.
    #[serde(default)]
    pub day_of_month: Option<u32>,
    /// 0=Monday..6=Sunday. Part of the wire shape; unused by projection.
    #[serde(default)]
    pub day_of_week: Option<u32>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub category: Option<CategorySnapshot>,
    #[serde(default)]
    pub note: Option<String>,
}

impl RecurringRule {
    pub fn new(kind: EntryKind, amount: i64, freq: Frequency, start_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            freq,
            start_date,
            end_date: None,
            day_of_month: None,
            day_of_week: None,
            category_id: None,
            category: None,
            note: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_day_of_month(mut self, day: u32) -> Self {
        self.day_of_month = Some(day);
        self
    }

    pub fn with_category(mut self, category_id: Uuid, snapshot: CategorySnapshot) -> Self {
        self.category_id = Some(category_id);
        self.category = Some(snapshot);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Checks the value-level invariants the type system cannot enforce.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.amount <= 0 {
            return Err(AnalyticsError::InvalidInput(format!(
                "rule {}: amount must be positive",
                self.id
            )));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(AnalyticsError::InvalidInput(format!(
                    "rule {}: end date precedes start date",
                    self.id
                )));
            }
        }
        if let Some(day) = self.day_of_month {
            if !(1..=31).contains(&day) {
                return Err(AnalyticsError::InvalidInput(format!(
                    "rule {}: day_of_month {day} out of range",
                    self.id
                )));
            }
        }
        if let Some(weekday) = self.day_of_week {
            if weekday > 6 {
                return Err(AnalyticsError::InvalidInput(format!(
                    "rule {}: day_of_week {weekday} out of range",
                    self.id
                )));
            }
        }
        Ok(())
    }

    /// Day-of-month anchor for monthly stepping: the explicit `day_of_month`
    /// when set, otherwise the start date's day.
    pub(crate) fn anchor_day(&self) -> u32 {
        self.day_of_month.unwrap_or_else(|| self.start_date.day())
    }

    /// Display name for occurrences: the rule's note, else its category
    /// name, else the fallback bucket name.
    pub fn display_name(&self) -> String {
        if let Some(note) = &self.note {
            return note.clone();
        }
        self.category
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| CategorySnapshot::fallback().name)
    }

    /// Next scheduled occurrence strictly after `from`.
    pub fn next_run_after(&self, from: NaiveDate) -> NaiveDate {
        self.freq.next_date(from, self.anchor_day())
    }

    pub(crate) fn snapshot(&self) -> CategorySnapshot {
        self.category
            .clone()
            .unwrap_or_else(CategorySnapshot::fallback)
    }
}
