pub mod exec;
pub mod types;

pub use exec::run_checks;
pub use types::{
    Action, Check, CheckOutcome, CheckResult, FailureKind, RunReport, Verification, WaitConfig,
};
