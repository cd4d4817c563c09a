//! planner-smoke - browser smoke checks for the Smart Study Planner page.
//!
//! This crate provides:
//! - A sequential check runner with per-check failure isolation
//! - A WebDriver-backed page session (plus an in-memory mock for tests)
//! - Bounded polling waits for element/text appearance
//! - Screenshot artifacts named by check identity
//!
//! # Example
//!
//! ```rust,no_run
//! use planner_smoke::{checks::planner_checks, config::Config, session::Session};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env();
//! let session = Session::open(&config).await?;
//! let report = session.run(&planner_checks()).await;
//! assert!(report.all_green());
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod browser;
pub mod checks;
pub mod config;
pub mod runner;
pub mod session;

// Re-export runner types
pub use runner::{
    Action, Check, CheckOutcome, CheckResult, FailureKind, RunReport, Verification, WaitConfig,
    run_checks,
};

// Re-export browser seam
pub use browser::{
    BackendError, Locator, MockEffect, MockElement, MockPage, PageBackend, SessionError,
    SpecialKey, WebDriverPage,
};

// Re-export session and artifacts
pub use artifacts::ArtifactStore;
pub use session::Session;

// Re-export the concrete check list
pub use checks::planner_checks;
