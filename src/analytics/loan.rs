use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::shift_months;

/// How interest accrues over the loan term.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InterestKind {
    /// Reducing balance: interest charged on the outstanding principal.
    #[default]
    Reducing,
    /// Flat rate: interest charged on the full principal for the whole term.
    Flat,
}

/// An installment loan as managed elsewhere. Read-only to this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Loan {
    pub id: Uuid,
    pub name: String,
    /// Principal in minor currency units.
    pub principal: i64,
    /// Annual interest rate in percent. A rate, not a currency amount.
    pub interest_rate: f64,
    #[serde(default)]
    pub interest_kind: InterestKind,
    pub term_months: u32,
    pub start_date: NaiveDate,
    /// Fixed monthly payment in minor units, derived at creation.
    pub monthly_payment: i64,
    /// Total interest over the whole term, in minor units.
    pub total_interest: i64,
    /// Lifetime counter of settled installments, 1-indexed coverage.
    #[serde(default)]
    pub paid_installments: u32,
    #[serde(default)]
    pub paid_principal: i64,
    #[serde(default)]
    pub paid_interest: i64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default = "Loan::default_active")]
    pub is_active: bool,
}

/// One row of an amortization schedule, in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallmentLine {
    /// 1-indexed installment number.
    pub installment: u32,
    pub due_date: NaiveDate,
    pub principal: i64,
    pub interest: i64,
    pub total: i64,
    pub remaining_balance: i64,
    pub is_paid: bool,
}

impl Loan {
    pub fn new(
        name: impl Into<String>,
        principal: i64,
        interest_rate: f64,
        term_months: u32,
        start_date: NaiveDate,
        interest_kind: InterestKind,
    ) -> Self {
        let (monthly_payment, total_interest) =
            Self::payment_for(principal, interest_rate, term_months, interest_kind);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            principal,
            interest_rate,
            interest_kind,
            term_months,
            start_date,
            monthly_payment,
            total_interest,
            paid_installments: 0,
            paid_principal: 0,
            paid_interest: 0,
            note: None,
            is_active: true,
        }
    }

    pub fn default_active() -> bool {
        true
    }

    /// Derives `(monthly_payment, total_interest)` in minor units. Float
    /// math is confined to the rate factor; results truncate to integers.
    pub fn payment_for(
        principal: i64,
        annual_rate: f64,
        term_months: u32,
        kind: InterestKind,
    ) -> (i64, i64) {
        if term_months == 0 {
            return (0, 0);
        }
        let term = i64::from(term_months);
        match kind {
            InterestKind::Flat => {
                let total_interest = (principal as f64 * (annual_rate / 100.0)
                    * (f64::from(term_months) / 12.0)) as i64;
                let monthly_payment = (principal + total_interest) / term;
                (monthly_payment, total_interest)
            }
            InterestKind::Reducing => {
                let monthly_rate = annual_rate / 100.0 / 12.0;
                if monthly_rate == 0.0 {
                    return (principal / term, 0);
                }
                // PMT = P * r(1+r)^n / ((1+r)^n - 1)
                let rate_factor = (1.0 + monthly_rate).powi(term_months as i32);
                let monthly_payment =
                    (principal as f64 * monthly_rate * rate_factor / (rate_factor - 1.0)) as i64;
                let total_interest = monthly_payment * term - principal;
                (monthly_payment, total_interest)
            }
        }
    }

    pub fn remaining_balance(&self) -> i64 {
        self.principal - self.paid_principal
    }

    pub fn remaining_installments(&self) -> u32 {
        self.term_months.saturating_sub(self.paid_installments)
    }

    /// Share of installments settled, one decimal place.
    pub fn progress_percentage(&self) -> f64 {
        if self.term_months == 0 {
            return 0.0;
        }
        let ratio = f64::from(self.paid_installments) / f64::from(self.term_months);
        (ratio * 1000.0).round() / 10.0
    }

    pub fn is_completed(&self) -> bool {
        self.paid_installments >= self.term_months
    }

    pub fn next_installment_number(&self) -> Option<u32> {
        if self.is_completed() {
            None
        } else {
            Some(self.paid_installments + 1)
        }
    }

    pub fn next_payment_date(&self) -> Option<NaiveDate> {
        self.next_installment_number()
            .map(|installment| self.due_date(installment))
    }

    /// Due date of a 1-indexed installment: the start date's day-of-month,
    /// clamped to shorter months.
    pub fn due_date(&self, installment: u32) -> NaiveDate {
        let offset = installment.saturating_sub(1) as i32;
        shift_months(self.start_date, offset, self.start_date.day())
    }

    /// Full amortization schedule. The last installment absorbs rounding so
    /// the balance reaches exactly zero.
    pub fn amortization_schedule(&self) -> Vec<InstallmentLine> {
        let mut schedule = Vec::with_capacity(self.term_months as usize);
        let mut balance = self.principal;
        let monthly_rate = self.interest_rate / 100.0 / 12.0;
        let term = i64::from(self.term_months.max(1));

        for installment in 1..=self.term_months {
            let (interest, mut principal_part) = match self.interest_kind {
                InterestKind::Flat => (self.total_interest / term, self.principal / term),
                InterestKind::Reducing => {
                    let interest = (balance as f64 * monthly_rate) as i64;
                    (interest, self.monthly_payment - interest)
                }
            };
            if installment == self.term_months {
                principal_part = balance;
            }
            balance = (balance - principal_part).max(0);
            schedule.push(InstallmentLine {
                installment,
                due_date: self.due_date(installment),
                principal: principal_part,
                interest,
                total: principal_part + interest,
                remaining_balance: balance,
                is_paid: installment <= self.paid_installments,
            });
        }
        schedule
    }
}
