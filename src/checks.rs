//! The Smart Study Planner check list.
//!
//! Selectors follow the planner's markup: the login form exposes `#email`
//! and `#password`, the task form `#title`/`#subject`, and the remaining
//! affordances are reached through their visible text.

use crate::browser::types::Locator;
use crate::runner::types::{Action, Check, Verification};

/// Ordered smoke checks for the planner page
pub fn planner_checks() -> Vec<Check> {
    let email = Locator::id("email");
    let password = Locator::id("password");
    let login_button = Locator::xpath("//button[contains(text(),'Log In')]");
    let subject = Locator::id("subject");
    let add_task_button = Locator::xpath("//button[contains(text(),'Add Task')]");

    vec![
        Check::new("homepage-title", "the planner homepage loads")
            .verify(Verification::TitleContains("Smart Study Planner".to_string()))
            .capture(),
        Check::new("login-form-fields", "login fields and button are present")
            .locate(email.clone())
            .locate(password.clone())
            .locate(login_button.clone()),
        Check::new("invalid-login", "invalid credentials are rejected with an error")
            .locate(email.clone())
            .locate(password.clone())
            .locate(login_button.clone())
            .action(Action::Type {
                target: email,
                text: "fakeuser@gmail.com".to_string(),
            })
            .action(Action::Type {
                target: password,
                text: "wrongpassword".to_string(),
            })
            .action(Action::Click {
                target: login_button,
            })
            .verify(Verification::TextPresent("incorrect".to_string()))
            .capture(),
        Check::new("task-creation", "a new task shows up after saving")
            .locate(Locator::id("title"))
            .locate(subject.clone())
            .locate(add_task_button.clone())
            .action(Action::Type {
                target: subject,
                text: "Database Assignment".to_string(),
            })
            .action(Action::Click {
                target: add_task_button,
            })
            .verify(Verification::TextPresent("Database Assignment".to_string()))
            .capture(),
        Check::new("theme-toggle", "the dark/light toggle switches themes")
            .optional()
            .locate(Locator::xpath(
                "//*[contains(text(),'Dark') or contains(text(),'Light')]",
            ))
            .action(Action::Click {
                target: Locator::xpath(
                    "//*[contains(text(),'Dark') or contains(text(),'Light')]",
                ),
            })
            .capture(),
        Check::new("help-section", "the quick-start help opens")
            .locate(Locator::xpath(
                "//*[contains(text(),'Having trouble') or contains(text(),'Help')]",
            ))
            .action(Action::Click {
                target: Locator::xpath(
                    "//*[contains(text(),'Having trouble') or contains(text(),'Help')]",
                ),
            })
            .verify(Verification::TextPresent("Quick Start".to_string()))
            .capture(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_names_are_unique() {
        let checks = planner_checks();
        let mut names: Vec<&str> = checks.iter().map(|c| c.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), checks.len());
    }

    #[test]
    fn test_only_theme_toggle_is_optional() {
        let optional: Vec<String> = planner_checks()
            .into_iter()
            .filter(|c| c.optional)
            .map(|c| c.name)
            .collect();
        assert_eq!(optional, vec!["theme-toggle".to_string()]);
    }

    #[test]
    fn test_verify_never_without_locate_or_title() {
        // Checks that interact must declare locate targets; title-only checks
        // may have an empty locate phase.
        for check in planner_checks() {
            if !check.actions.is_empty() {
                assert!(
                    !check.locate.is_empty(),
                    "check {} interacts without locating",
                    check.name
                );
            }
        }
    }
}
