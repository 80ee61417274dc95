use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::installments::MonthlyLoanResult;
use super::recurring::MonthlyRecurringResult;

/// Server-reported actual-transaction summary for the target month,
/// already aggregated, minor currency units.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActualSummary {
    pub income: i64,
    pub expense: i64,
}

/// Server-reported per-category actuals for the target month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActualCategory {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub icon: String,
    pub color: String,
    /// Minor currency units.
    pub amount: i64,
    pub count: u32,
}

/// Combined month totals across actuals, recurring projections, and loan
/// installments, minor currency units.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CombinedTotals {
    pub total_income: i64,
    pub total_expense: i64,
    pub net_balance: i64,
}

/// Unified per-category view of regular and recurring spending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombinedCategory {
    /// `Uuid::nil()` is the unspecified bucket.
    pub category_id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
    /// Actual spending, minor units.
    pub regular: i64,
    /// Projected recurring spending, minor units.
    pub recurring: i64,
    pub total: i64,
    /// Share of the combined expense total, one decimal place.
    pub percentage: f64,
}

/// Merges actual and projected figures into combined month totals.
pub fn combine_totals(
    actual: ActualSummary,
    recurring: &MonthlyRecurringResult,
    loans: &MonthlyLoanResult,
) -> CombinedTotals {
    let total_income = actual.income + recurring.income;
    let total_expense = actual.expense + recurring.expense + loans.total_payment;
    CombinedTotals {
        total_income,
        total_expense,
        net_balance: total_income - total_expense,
    }
}

/// Merges actual and recurring category breakdowns into one view, sorted
/// descending by combined total (ties broken by name).
pub fn merge_categories(
    actual: &[ActualCategory],
    recurring: &MonthlyRecurringResult,
) -> Vec<CombinedCategory> {
    let mut merged: BTreeMap<Uuid, CombinedCategory> = BTreeMap::new();

    for category in actual {
        let key = category.category_id.unwrap_or_else(Uuid::nil);
        let entry = merged.entry(key).or_insert_with(|| CombinedCategory {
            category_id: key,
            name: category.name.clone(),
            icon: category.icon.clone(),
            color: category.color.clone(),
            regular: 0,
            recurring: 0,
            total: 0,
            percentage: 0.0,
        });
        entry.regular += category.amount;
    }

    for (key, total) in &recurring.expense_by_category {
        let entry = merged.entry(*key).or_insert_with(|| CombinedCategory {
            category_id: *key,
            name: total.name.clone(),
            icon: total.icon.clone(),
            color: total.color.clone(),
            regular: 0,
            recurring: 0,
            total: 0,
            percentage: 0.0,
        });
        entry.recurring += total.amount;
    }

    let mut categories: Vec<CombinedCategory> = merged.into_values().collect();
    for category in &mut categories {
        category.total = category.regular + category.recurring;
    }
    let grand_total: i64 = categories.iter().map(|category| category.total).sum();
    for category in &mut categories {
        category.percentage = percent_of(category.total, grand_total);
    }
    categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    categories
}

/// Converts minor currency units to major units. The single point where
/// integer money becomes a display value.
pub fn major_units(minor: i64) -> f64 {
    minor as f64 / 100.0
}

fn percent_of(part: i64, grand_total: i64) -> f64 {
    if grand_total == 0 {
        return 0.0;
    }
    (part as f64 / grand_total as f64 * 1000.0).round() / 10.0
}
