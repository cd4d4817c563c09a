//! Check definitions and run result types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::browser::types::{Locator, SpecialKey};
use crate::config::WaitSettings;

/// An interaction performed during a check's act phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Action {
    /// Type text into the element matching the locator
    Type { target: Locator, text: String },

    /// Click the element matching the locator
    Click { target: Locator },

    /// Send a special key to the element matching the locator
    Press { target: Locator, key: SpecialKey },
}

/// A post-condition asserted during a check's verify phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Verification {
    /// The page title contains the given substring
    TitleContains(String),

    /// The given text is visible somewhere on the page
    TextPresent(String),

    /// An element matching the locator is present
    ElementPresent(Locator),
}

/// One independent UI check: locate required elements, optionally interact,
/// then assert an expected post-condition.
///
/// A check with no verifications passes as soon as locate and act succeed
/// (a pure "these elements exist" check).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    /// Name identifying the check (also used for artifact filenames)
    pub name: String,

    /// Human-readable description of what the check covers
    pub description: String,

    /// Best-effort checks are Skipped rather than Failed when their
    /// required elements never appear
    pub optional: bool,

    /// Elements that must exist before the act phase runs
    pub locate: Vec<Locator>,

    /// Interactions performed once locate succeeds
    pub actions: Vec<Action>,

    /// Post-conditions asserted after the act phase
    pub verify: Vec<Verification>,

    /// Whether to capture a screenshot artifact for this check
    pub capture: bool,
}

impl Check {
    /// Create a check with the given name and description
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            optional: false,
            locate: Vec::new(),
            actions: Vec::new(),
            verify: Vec::new(),
            capture: false,
        }
    }

    /// Tag the check as best-effort
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Require an element to exist during the locate phase
    pub fn locate(mut self, locator: Locator) -> Self {
        self.locate.push(locator);
        self
    }

    /// Add an act-phase interaction
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Add a verify-phase assertion
    pub fn verify(mut self, verification: Verification) -> Self {
        self.verify.push(verification);
        self
    }

    /// Opt into screenshot capture
    pub fn capture(mut self) -> Self {
        self.capture = true;
        self
    }
}

/// Terminal classification of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckOutcome {
    Passed,
    Failed,
    Skipped,
}

/// Which phase produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// A required element never appeared within the wait bound
    ElementNotFound,

    /// An act-phase interaction failed (stale, not interactable, driver error)
    Interaction,

    /// A verify-phase condition was still false at the wait bound
    Assertion,
}

/// Result of running a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Name of the check that produced this result
    pub name: String,

    /// Terminal classification
    pub outcome: CheckOutcome,

    /// Failure classification (None for Passed/Skipped)
    pub failure: Option<FailureKind>,

    /// Human-readable detail (error text, skip reason)
    pub detail: Option<String>,

    /// Path to the captured screenshot, if any
    pub artifact: Option<PathBuf>,

    /// Wall-clock duration of the check
    pub duration_ms: u64,
}

/// Bounded-wait parameters for locate/verify polling
#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    /// Maximum time to wait for a condition
    pub timeout: Duration,
    /// Delay between condition probes
    pub poll_interval: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::from(&WaitSettings::defaults())
    }
}

impl From<&WaitSettings> for WaitConfig {
    fn from(settings: &WaitSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            poll_interval: settings.poll_interval(),
        }
    }
}

/// Result of a complete run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// When the run started
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// Per-check results, in run order
    pub results: Vec<CheckResult>,

    /// Count of Passed checks
    pub passed: usize,

    /// Count of Failed checks
    pub failed: usize,

    /// Count of Skipped checks
    pub skipped: usize,

    /// Total wall-clock duration of the run
    pub duration_ms: u64,
}

impl RunReport {
    /// Build a report from ordered check results
    pub fn new(
        started_at: chrono::DateTime<chrono::Utc>,
        results: Vec<CheckResult>,
        duration_ms: u64,
    ) -> Self {
        let passed = results.iter().filter(|r| r.outcome == CheckOutcome::Passed).count();
        let failed = results.iter().filter(|r| r.outcome == CheckOutcome::Failed).count();
        let skipped = results.iter().filter(|r| r.outcome == CheckOutcome::Skipped).count();
        Self {
            started_at,
            results,
            passed,
            failed,
            skipped,
            duration_ms,
        }
    }

    /// Whether the run as a whole succeeded.
    /// Skipped checks do not fail a run; any Failed check does.
    pub fn all_green(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, outcome: CheckOutcome) -> CheckResult {
        CheckResult {
            name: name.to_string(),
            outcome,
            failure: None,
            detail: None,
            artifact: None,
            duration_ms: 0,
        }
    }

    #[test]
    fn test_check_builder() {
        let check = Check::new("login-form", "login fields exist")
            .locate(Locator::id("email"))
            .locate(Locator::id("password"))
            .capture();

        assert_eq!(check.name, "login-form");
        assert_eq!(check.locate.len(), 2);
        assert!(check.capture);
        assert!(!check.optional);
    }

    #[test]
    fn test_report_counts() {
        let report = RunReport::new(
            chrono::Utc::now(),
            vec![
                result("a", CheckOutcome::Passed),
                result("b", CheckOutcome::Failed),
                result("c", CheckOutcome::Skipped),
                result("d", CheckOutcome::Passed),
            ],
            1234,
        );

        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert!(!report.all_green());
    }

    #[test]
    fn test_skipped_does_not_fail_run() {
        let report = RunReport::new(
            chrono::Utc::now(),
            vec![
                result("a", CheckOutcome::Passed),
                result("b", CheckOutcome::Skipped),
            ],
            10,
        );
        assert!(report.all_green());
    }
}
