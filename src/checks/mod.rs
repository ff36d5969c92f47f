//! Compliance checks for the staff roster.
//!
//! This module contains the grace period evaluation, the exception registry
//! builder, the rule engine that flags accounts still active after an
//! employee has left, and the report emitter.

mod engine;
mod exceptions;
mod grace;
mod report;

pub use engine::{
    CheckOutcome, RowOutcome, evaluate, evaluate_check, evaluate_row, evaluate_with_registry,
    run_checks,
};
pub use exceptions::{build_exception_registry, waiver_tokens};
pub use grace::{DEFAULT_GRACE_PERIOD_DAYS, GracePeriod, is_within_grace};
pub use report::emit_report;
