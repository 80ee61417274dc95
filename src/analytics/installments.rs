use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::loan::Loan;
use super::period::{days_in_month, Period};

/// A loan installment falling due in the queried month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoanPaymentDue {
    pub loan_id: Uuid,
    pub name: String,
    /// Monthly payment in minor currency units.
    pub amount: i64,
    pub due_date: NaiveDate,
    /// 1-indexed installment number; the start month is installment 1.
    pub installment: u32,
    pub is_paid: bool,
}

/// Projection of all loans into one target month.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyLoanResult {
    /// Sum of payments due this month, minor units.
    pub total_payment: i64,
    /// Number of loans with an installment due this month.
    pub loan_count: u32,
    /// Lifetime installment count across all active loans, not month-scoped.
    pub total_installments: u32,
    /// Lifetime settled installments across all active loans.
    pub paid_installments: u32,
    pub payments: Vec<LoanPaymentDue>,
}

/// Determines which installment of each active loan falls due in `period`.
///
/// Paid status derives purely from the lifetime counter: every installment
/// index up to `paid_installments` reads as settled in whichever month it
/// is queried. There is no per-installment ledger behind it.
pub fn project_month(loans: &[Loan], period: Period) -> MonthlyLoanResult {
    let mut result = MonthlyLoanResult::default();

    for loan in loans.iter().filter(|loan| loan.is_active) {
        result.total_installments += loan.term_months;
        result.paid_installments += loan.paid_installments;

        let months_diff = (period.year - loan.start_date.year()) * 12
            + (period.month as i32 - loan.start_date.month() as i32);
        let installment = months_diff + 1;
        if installment < 1 || installment > loan.term_months as i32 {
            continue;
        }
        let installment = installment as u32;

        let due_day = loan
            .start_date
            .day()
            .min(days_in_month(period.year, period.month));
        let due_date = NaiveDate::from_ymd_opt(period.year, period.month, due_day)
            .unwrap_or_else(|| period.first_day());

        result.total_payment += loan.monthly_payment;
        result.loan_count += 1;
        result.payments.push(LoanPaymentDue {
            loan_id: loan.id,
            name: loan.name.clone(),
            amount: loan.monthly_payment,
            due_date,
            installment,
            is_paid: installment <= loan.paid_installments,
        });
    }

    result
        .payments
        .sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.name.cmp(&b.name)));
    result
}
