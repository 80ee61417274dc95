#![doc(test(attr(deny(warnings))))]

//! Analytics Core projects recurring payment rules and loan installment
//! schedules into arbitrary target months and merges the results with
//! server-reported actuals for dashboard consumption.

pub mod analytics;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Analytics Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
