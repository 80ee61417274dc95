use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategorySnapshot;
use super::period::Period;
use super::rule::{EntryKind, RecurringRule};

/// Hard per-rule limit on recorded occurrences within one projection call.
/// A rule that would need more is a data error, not a workload.
const MAX_OCCURRENCES_PER_RULE: usize = 100;

/// A single concrete instance of a recurring rule on a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringOccurrence {
    pub rule_id: Uuid,
    pub name: String,
    /// Minor currency units.
    pub amount: i64,
    pub date: NaiveDate,
    pub category_id: Option<Uuid>,
    pub category: CategorySnapshot,
    /// Always false from the projector; the caller that owns actual
    /// transactions flips it when an occurrence is matched.
    pub paid: bool,
}

/// Per-category expense aggregate, minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTotal {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub amount: i64,
    pub count: u32,
}

/// Projection of all recurring rules into one target month.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyRecurringResult {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
    /// Keyed by category id; `Uuid::nil()` is the unspecified bucket.
    pub expense_by_category: HashMap<Uuid, CategoryTotal>,
    /// Individual expense occurrences, ordered by date.
    pub expense_payments: Vec<RecurringOccurrence>,
    /// Diagnostics for skipped rules and truncated projections.
    pub warnings: Vec<String>,
}

/// Expands `rules` into concrete occurrences inside `period` and aggregates
/// them. Pure function: identical inputs yield identical outputs.
///
/// Each rule is replayed from its original start date rather than from a
/// cached cursor, keeping the projection reproducible per call.
pub fn project_month(rules: &[RecurringRule], period: Period) -> MonthlyRecurringResult {
    let month_start = period.first_day();
    let month_end = period.last_day();
    let mut result = MonthlyRecurringResult::default();

    for rule in rules {
        if let Err(err) = rule.validate() {
            tracing::warn!(rule = %rule.id, error = %err, "skipping invalid recurring rule");
            result.warnings.push(format!("skipped rule {}: {err}", rule.id));
            continue;
        }
        // Not started yet, or already expired before this month.
        if rule.start_date > month_end {
            continue;
        }
        if let Some(end) = rule.end_date {
            if end < month_start {
                continue;
            }
        }
        let boundary = rule.end_date.map_or(month_end, |end| end.min(month_end));
        project_rule(rule, month_start, boundary, &mut result);
    }

    result.balance = result.income - result.expense;
    result
        .expense_payments
        .sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
    result
}

fn project_rule(
    rule: &RecurringRule,
    month_start: NaiveDate,
    boundary: NaiveDate,
    result: &mut MonthlyRecurringResult,
) {
    let anchor_day = rule.anchor_day();
    let mut cursor = rule.start_date;
    let mut recorded = 0usize;

    while cursor <= boundary {
        if cursor >= month_start {
            record_occurrence(rule, cursor, result);
            recorded += 1;
            if recorded >= MAX_OCCURRENCES_PER_RULE {
                tracing::warn!(
                    rule = %rule.id,
                    limit = MAX_OCCURRENCES_PER_RULE,
                    "occurrence cap hit; projection truncated"
                );
                result.warnings.push(format!(
                    "rule {}: occurrence cap of {MAX_OCCURRENCES_PER_RULE} hit, projection truncated",
                    rule.id
                ));
                break;
            }
        }
        let next = rule.freq.next_date(cursor, anchor_day);
        if next <= cursor {
            tracing::warn!(rule = %rule.id, date = %cursor, "schedule failed to advance");
            result
                .warnings
                .push(format!("rule {}: schedule failed to advance past {cursor}", rule.id));
            break;
        }
        cursor = next;
    }
}

fn record_occurrence(rule: &RecurringRule, date: NaiveDate, result: &mut MonthlyRecurringResult) {
    match rule.kind {
        EntryKind::Income => {
            // Income feeds the total only; no per-category tracking.
            result.income += rule.amount;
        }
        EntryKind::Expense => {
            result.expense += rule.amount;
            let snapshot = rule.snapshot();
            let key = rule.category_id.unwrap_or_else(Uuid::nil);
            let entry = result
                .expense_by_category
                .entry(key)
                .or_insert_with(|| CategoryTotal {
                    name: snapshot.name.clone(),
                    icon: snapshot.icon.clone(),
                    color: snapshot.color.clone(),
                    amount: 0,
                    count: 0,
                });
            entry.amount += rule.amount;
            entry.count += 1;
            result.expense_payments.push(RecurringOccurrence {
                rule_id: rule.id,
                name: rule.display_name(),
                amount: rule.amount,
                date,
                category_id: rule.category_id,
                category: snapshot,
                paid: false,
            });
        }
    }
}
