//! Integration tests for the check runner against the in-memory mock page.

use std::sync::atomic::Ordering;
use std::time::Duration;

use pretty_assertions::assert_eq;

use planner_smoke::artifacts::ArtifactStore;
use planner_smoke::browser::backend::{MockEffect, MockElement, MockPage};
use planner_smoke::browser::types::{Locator, SessionError};
use planner_smoke::config::Config;
use planner_smoke::runner::types::{
    Action, Check, CheckOutcome, FailureKind, Verification, WaitConfig,
};
use planner_smoke::session::Session;

fn fast_wait() -> WaitConfig {
    WaitConfig {
        timeout: Duration::from_millis(50),
        poll_interval: Duration::from_millis(10),
    }
}

fn planner_page() -> MockPage {
    let email = Locator::id("email");
    let password = Locator::id("password");
    let login = Locator::xpath("//button[contains(text(),'Log In')]");
    MockPage::new("Smart Study Planner")
        .element(email, MockElement::new(""))
        .element(password, MockElement::new(""))
        .element(
            login,
            MockElement::new("Log In")
                .on_click(MockEffect::AppendText("Email or password incorrect".to_string())),
        )
}

#[tokio::test]
async fn test_title_check_passes_on_planner_page() {
    let check = Check::new("homepage-title", "title loads")
        .verify(Verification::TitleContains("Smart Study Planner".to_string()));

    let session = Session::with_backend(Box::new(planner_page()), fast_wait());
    let report = session.run(&[check]).await;

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].outcome, CheckOutcome::Passed);
    assert!(report.all_green());
}

#[tokio::test]
async fn test_missing_required_element_fails_with_not_found() {
    let check = Check::new("email-field", "email input exists")
        .locate(Locator::css("input[type='email']"));

    // Page has nothing matching the CSS locator.
    let session = Session::with_backend(Box::new(MockPage::new("Smart Study Planner")), fast_wait());
    let report = session.run(&[check]).await;

    let result = &report.results[0];
    assert_eq!(result.outcome, CheckOutcome::Failed);
    assert_eq!(result.failure, Some(FailureKind::ElementNotFound));
    assert!(result.detail.as_deref().unwrap().contains("input[type='email']"));
}

#[tokio::test]
async fn test_missing_optional_element_is_skipped() {
    let check = Check::new("theme-toggle", "theme toggle may not exist")
        .optional()
        .locate(Locator::xpath("//*[contains(text(),'Dark')]"));

    let session = Session::with_backend(Box::new(planner_page()), fast_wait());
    let report = session.run(&[check]).await;

    let result = &report.results[0];
    assert_eq!(result.outcome, CheckOutcome::Skipped);
    assert_eq!(result.failure, None);
    assert_eq!(report.skipped, 1);
    assert!(report.all_green());
}

#[tokio::test]
async fn test_task_creation_verifies_saved_text() {
    let subject = Locator::id("subject");
    let save = Locator::xpath("//button[contains(text(),'Add Task')]");
    let page = MockPage::new("Smart Study Planner")
        .element(subject.clone(), MockElement::new(""))
        .element(
            save.clone(),
            MockElement::new("Add Task").on_click(MockEffect::AppendValueOf(subject.clone())),
        );

    let check = Check::new("task-creation", "task appears after save")
        .locate(subject.clone())
        .locate(save.clone())
        .action(Action::Type {
            target: subject,
            text: "Database Assignment".to_string(),
        })
        .action(Action::Click { target: save })
        .verify(Verification::TextPresent("Database Assignment".to_string()));

    let session = Session::with_backend(Box::new(page), fast_wait());
    let report = session.run(&[check]).await;
    assert_eq!(report.results[0].outcome, CheckOutcome::Passed);
}

#[tokio::test]
async fn test_task_creation_fails_when_text_never_appears() {
    let subject = Locator::id("subject");
    let save = Locator::xpath("//button[contains(text(),'Add Task')]");
    // Save button does nothing, so the verify phase times out.
    let page = MockPage::new("Smart Study Planner")
        .element(subject.clone(), MockElement::new(""))
        .element(save.clone(), MockElement::new("Add Task"));

    let check = Check::new("task-creation", "task appears after save")
        .locate(subject.clone())
        .action(Action::Type {
            target: subject,
            text: "Database Assignment".to_string(),
        })
        .action(Action::Click { target: save })
        .verify(Verification::TextPresent("Database Assignment".to_string()));

    let session = Session::with_backend(Box::new(page), fast_wait());
    let report = session.run(&[check]).await;

    let result = &report.results[0];
    assert_eq!(result.outcome, CheckOutcome::Failed);
    assert_eq!(result.failure, Some(FailureKind::Assertion));
}

#[tokio::test]
async fn test_failed_check_does_not_stop_the_run() {
    let checks = vec![
        Check::new("first", "missing element").locate(Locator::id("nope")),
        Check::new("second", "title still checked")
            .verify(Verification::TitleContains("Smart Study Planner".to_string())),
        Check::new("third", "another missing element").locate(Locator::id("also-nope")),
    ];

    let session = Session::with_backend(Box::new(planner_page()), fast_wait());
    let report = session.run(&checks).await;

    // Exactly one result per check, in order, no early termination.
    let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    assert_eq!(report.results[1].outcome, CheckOutcome::Passed);
    assert_eq!(report.failed, 2);
}

#[tokio::test]
async fn test_interaction_error_is_isolated_and_session_still_closes() {
    let broken = Locator::id("broken");
    let page = MockPage::new("Smart Study Planner").element(
        broken.clone(),
        MockElement::new("Broken").on_click(MockEffect::Fail("element went stale".to_string())),
    );
    let counter = page.close_counter();

    let checks = vec![
        Check::new("broken-click", "click fails mid-check")
            .locate(broken.clone())
            .action(Action::Click { target: broken }),
        Check::new("title-after-failure", "run continues")
            .verify(Verification::TitleContains("Smart Study Planner".to_string())),
    ];

    let session = Session::with_backend(Box::new(page), fast_wait());
    let report = session.run(&checks).await;

    assert_eq!(report.results[0].outcome, CheckOutcome::Failed);
    assert_eq!(report.results[0].failure, Some(FailureKind::Interaction));
    assert!(
        report.results[0]
            .detail
            .as_deref()
            .unwrap()
            .contains("element went stale")
    );
    assert_eq!(report.results[1].outcome, CheckOutcome::Passed);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_same_check_twice_yields_same_classification() {
    let check = Check::new("login-form", "fields exist")
        .locate(Locator::id("email"))
        .locate(Locator::id("password"));

    let checks = vec![check.clone(), check];
    let session = Session::with_backend(Box::new(planner_page()), fast_wait());
    let report = session.run(&checks).await;

    assert_eq!(report.results[0].outcome, report.results[1].outcome);
    assert_eq!(report.results[0].outcome, CheckOutcome::Passed);
}

#[tokio::test]
async fn test_artifact_is_written_and_named_by_check() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(tmp.path()).unwrap();

    let check = Check::new("homepage-title", "title loads")
        .verify(Verification::TitleContains("Smart Study Planner".to_string()))
        .capture();

    let session = Session::with_backend(Box::new(planner_page()), fast_wait()).artifacts(store);
    let report = session.run(&[check]).await;

    let artifact = report.results[0].artifact.as_ref().expect("artifact path");
    assert!(artifact.ends_with("homepage-title.png"));
    assert!(artifact.exists());
}

#[tokio::test]
async fn test_artifact_failure_does_not_mask_the_result() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(tmp.path()).unwrap();

    let check = Check::new("homepage-title", "title loads")
        .verify(Verification::TitleContains("Smart Study Planner".to_string()))
        .capture();

    let page = planner_page().fail_screenshots();
    let session = Session::with_backend(Box::new(page), fast_wait()).artifacts(store);
    let report = session.run(&[check]).await;

    let result = &report.results[0];
    assert_eq!(result.outcome, CheckOutcome::Passed);
    assert_eq!(result.artifact, None);
}

#[tokio::test]
async fn test_invalid_login_scenario_end_to_end() {
    let email = Locator::id("email");
    let password = Locator::id("password");
    let login = Locator::xpath("//button[contains(text(),'Log In')]");

    let check = Check::new("invalid-login", "bad credentials show an error")
        .locate(email.clone())
        .locate(password.clone())
        .locate(login.clone())
        .action(Action::Type {
            target: email,
            text: "fakeuser@gmail.com".to_string(),
        })
        .action(Action::Type {
            target: password,
            text: "wrongpassword".to_string(),
        })
        .action(Action::Click { target: login })
        .verify(Verification::TextPresent("incorrect".to_string()));

    let session = Session::with_backend(Box::new(planner_page()), fast_wait());
    let report = session.run(&[check]).await;
    assert_eq!(report.results[0].outcome, CheckOutcome::Passed);
}

#[tokio::test]
async fn test_invalid_base_url_aborts_before_any_check() {
    let mut config = Config::defaults();
    config.target.base_url = "not a url".to_string();

    // Session acquisition fails fatally; no check runs and no report exists.
    let err = Session::open(&config).await.err().expect("open must fail");
    assert!(matches!(err, SessionError::Navigation(_)));
    assert!(err.to_string().contains("invalid base URL"));
}
