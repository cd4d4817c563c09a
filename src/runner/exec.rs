//! Sequential check execution with per-check failure isolation.
//!
//! Each check walks `Locating -> Acting -> Verifying`; any phase failure
//! short-circuits to `Failed` (or `Skipped` when an optional check's locate
//! phase fails). One check's failure never prevents the next from running.
//! Locate and verify both poll with a bounded timeout rather than sleeping a
//! fixed duration.

use std::path::PathBuf;
use std::time::Instant;

use crate::artifacts::ArtifactStore;
use crate::browser::backend::PageBackend;
use crate::browser::types::{BackendResult, Locator};
use crate::runner::types::{
    Action, Check, CheckOutcome, CheckResult, FailureKind, Verification, WaitConfig,
};

/// Run every check in order against one live page, producing exactly one
/// result per check. Never returns early; per-check failures are captured as
/// results, and each outcome is logged before the next check starts.
pub async fn run_checks(
    page: &mut dyn PageBackend,
    artifacts: Option<&ArtifactStore>,
    wait: &WaitConfig,
    checks: &[Check],
) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(checks.len());

    for check in checks {
        let started = Instant::now();
        tracing::debug!(check = %check.name, "starting check");

        let (outcome, failure, detail) = run_one(page, wait, check).await;

        // Artifact capture happens after the outcome is determined and can
        // never overwrite it.
        let artifact = match (check.capture, artifacts) {
            (true, Some(store)) => capture_artifact(page, store, &check.name).await,
            _ => None,
        };

        let result = CheckResult {
            name: check.name.clone(),
            outcome,
            failure,
            detail,
            artifact,
            duration_ms: started.elapsed().as_millis() as u64,
        };

        match result.outcome {
            CheckOutcome::Passed => {
                tracing::info!(check = %result.name, duration_ms = result.duration_ms, "check passed");
            }
            CheckOutcome::Failed => {
                tracing::warn!(
                    check = %result.name,
                    detail = result.detail.as_deref().unwrap_or(""),
                    "check failed"
                );
            }
            CheckOutcome::Skipped => {
                tracing::info!(
                    check = %result.name,
                    detail = result.detail.as_deref().unwrap_or(""),
                    "check skipped"
                );
            }
        }

        results.push(result);
    }

    results
}

async fn run_one(
    page: &mut dyn PageBackend,
    wait: &WaitConfig,
    check: &Check,
) -> (CheckOutcome, Option<FailureKind>, Option<String>) {
    // Locate phase: every required element must appear within the bound.
    for locator in &check.locate {
        let found = match wait_for_element(page, wait, locator).await {
            Ok(found) => found,
            Err(e) => {
                let detail = format!("locate {}: {}", locator, e);
                return locate_failure(check, detail);
            }
        };
        if !found {
            let detail = format!(
                "element not found within {:.1}s: {}",
                wait.timeout.as_secs_f64(),
                locator
            );
            return locate_failure(check, detail);
        }
    }

    // Act phase: interactions run once, no retries.
    for action in &check.actions {
        if let Err(e) = perform(page, action).await {
            return (
                CheckOutcome::Failed,
                Some(FailureKind::Interaction),
                Some(e.to_string()),
            );
        }
    }

    // Verify phase: every post-condition must hold within the bound.
    for verification in &check.verify {
        let met = match wait_for_condition(page, wait, verification).await {
            Ok(met) => met,
            Err(e) => {
                return (
                    CheckOutcome::Failed,
                    Some(FailureKind::Assertion),
                    Some(format!("verify: {}", e)),
                );
            }
        };
        if !met {
            return (
                CheckOutcome::Failed,
                Some(FailureKind::Assertion),
                Some(format!(
                    "{} still unmet after {:.1}s",
                    describe(verification),
                    wait.timeout.as_secs_f64()
                )),
            );
        }
    }

    (CheckOutcome::Passed, None, None)
}

/// An optional check whose locate phase fails is Skipped, never Failed
fn locate_failure(
    check: &Check,
    detail: String,
) -> (CheckOutcome, Option<FailureKind>, Option<String>) {
    if check.optional {
        (CheckOutcome::Skipped, None, Some(detail))
    } else {
        (
            CheckOutcome::Failed,
            Some(FailureKind::ElementNotFound),
            Some(detail),
        )
    }
}

async fn perform(page: &mut dyn PageBackend, action: &Action) -> BackendResult<()> {
    match action {
        Action::Type { target, text } => page.type_text(target, text).await,
        Action::Click { target } => page.click(target).await,
        Action::Press { target, key } => page.press_key(target, *key).await,
    }
}

/// Poll until an element matching the locator exists or the timeout elapses
async fn wait_for_element(
    page: &mut dyn PageBackend,
    wait: &WaitConfig,
    locator: &Locator,
) -> BackendResult<bool> {
    let deadline = Instant::now() + wait.timeout;
    loop {
        if page.element_exists(locator).await? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(wait.poll_interval).await;
    }
}

/// Poll until a verification holds or the timeout elapses
async fn wait_for_condition(
    page: &mut dyn PageBackend,
    wait: &WaitConfig,
    verification: &Verification,
) -> BackendResult<bool> {
    let deadline = Instant::now() + wait.timeout;
    loop {
        if probe(page, verification).await? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(wait.poll_interval).await;
    }
}

async fn probe(page: &mut dyn PageBackend, verification: &Verification) -> BackendResult<bool> {
    match verification {
        Verification::TitleContains(needle) => Ok(page.title().await?.contains(needle)),
        Verification::TextPresent(needle) => page.text_present(needle).await,
        Verification::ElementPresent(locator) => page.element_exists(locator).await,
    }
}

fn describe(verification: &Verification) -> String {
    match verification {
        Verification::TitleContains(needle) => format!("title containing {:?}", needle),
        Verification::TextPresent(needle) => format!("text {:?}", needle),
        Verification::ElementPresent(locator) => format!("element {}", locator),
    }
}

/// Best-effort screenshot; failures are logged and never mask the result
async fn capture_artifact(
    page: &mut dyn PageBackend,
    store: &ArtifactStore,
    check_name: &str,
) -> Option<PathBuf> {
    let bytes = match page.screenshot_png().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(check = check_name, error = %e, "screenshot capture failed");
            return None;
        }
    };
    match store.write(check_name, &bytes) {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(check = check_name, error = %e, "could not write artifact");
            None
        }
    }
}
