//! Recurring-rule and loan-installment projection plus month aggregation.

pub mod aggregate;
pub mod category;
pub mod installments;
pub mod loan;
pub mod period;
pub mod recurring;
pub mod rule;

pub use aggregate::{
    ActualCategory, ActualSummary, CombinedCategory, CombinedTotals,
};
pub use category::CategorySnapshot;
pub use installments::{LoanPaymentDue, MonthlyLoanResult};
pub use loan::{InstallmentLine, InterestKind, Loan};
pub use period::Period;
pub use recurring::{CategoryTotal, MonthlyRecurringResult, RecurringOccurrence};
pub use rule::{EntryKind, Frequency, RecurringRule};
