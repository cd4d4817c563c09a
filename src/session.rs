//! Browser session lifecycle.
//!
//! A [`Session`] exclusively owns one live page backend for the duration of a
//! run. `open` connects and navigates (the only fatal failures); `run`
//! consumes the session and releases the browser on every path, so a browser
//! process is never leaked even when individual checks fail.

use chrono::Utc;
use std::time::Instant;

use crate::artifacts::ArtifactStore;
use crate::browser::backend::PageBackend;
use crate::browser::types::{SessionError, SessionResult};
use crate::browser::webdriver::WebDriverPage;
use crate::config::Config;
use crate::runner::exec::run_checks;
use crate::runner::types::{Check, RunReport, WaitConfig};

/// One live browser session, navigated to the target page
pub struct Session {
    backend: Box<dyn PageBackend>,
    artifacts: Option<ArtifactStore>,
    wait: WaitConfig,
}

impl Session {
    /// Start a browser session and navigate to the configured page.
    ///
    /// Connection or navigation failure is fatal to the whole run; no check
    /// can proceed without a live, navigated session.
    pub async fn open(config: &Config) -> SessionResult<Self> {
        let base_url = url::Url::parse(&config.target.base_url).map_err(|e| {
            SessionError::Navigation(format!(
                "invalid base URL {:?}: {}",
                config.target.base_url, e
            ))
        })?;

        let mut backend =
            WebDriverPage::connect(&config.target.webdriver_url, config.target.headless).await?;

        tracing::info!(url = %base_url, "navigating to target page");
        if let Err(e) = backend.navigate(base_url.as_str()).await {
            // Release the browser before bailing out.
            if let Err(close_err) = backend.close().await {
                tracing::warn!(error = %close_err, "could not close session after failed navigation");
            }
            return Err(SessionError::Navigation(e.to_string()));
        }

        Ok(Self {
            backend: Box::new(backend),
            artifacts: None,
            wait: WaitConfig::from(&config.wait),
        })
    }

    /// Build a session over an already-navigated backend (used by tests with
    /// the mock page)
    pub fn with_backend(backend: Box<dyn PageBackend>, wait: WaitConfig) -> Self {
        Self {
            backend,
            artifacts: None,
            wait,
        }
    }

    /// Attach an artifact store for checks that opt into screenshot capture
    pub fn artifacts(mut self, store: ArtifactStore) -> Self {
        self.artifacts = Some(store);
        self
    }

    /// Run every check in order, then release the browser.
    ///
    /// Per-check failures never escape; the session is closed exactly once on
    /// every path. A close failure is logged, not surfaced, since the results
    /// are already determined.
    pub async fn run(mut self, checks: &[Check]) -> RunReport {
        let started_at = Utc::now();
        let started = Instant::now();

        let results = run_checks(
            self.backend.as_mut(),
            self.artifacts.as_ref(),
            &self.wait,
            checks,
        )
        .await;

        if let Err(e) = self.backend.close().await {
            tracing::warn!(error = %e, "could not close browser session");
        }

        RunReport::new(started_at, results, started.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::backend::{MockElement, MockPage};
    use crate::browser::types::Locator;
    use crate::runner::types::{CheckOutcome, Verification};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn fast_wait() -> WaitConfig {
        WaitConfig {
            timeout: Duration::from_millis(50),
            poll_interval: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn test_run_produces_report_and_closes_once() {
        let page = MockPage::new("Smart Study Planner")
            .element(Locator::id("email"), MockElement::new(""));
        let counter = page.close_counter();

        let checks = vec![
            Check::new("title", "title check")
                .verify(Verification::TitleContains("Smart Study Planner".to_string())),
            Check::new("missing", "absent element").locate(Locator::id("nope")),
        ];

        let session = Session::with_backend(Box::new(page), fast_wait());
        let report = session.run(&checks).await;

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].outcome, CheckOutcome::Passed);
        assert_eq!(report.results[1].outcome, CheckOutcome::Failed);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
