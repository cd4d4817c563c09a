// Core types for the browser backend seam

use serde::{Deserialize, Serialize};
use std::fmt;

/// A locator expression identifying a DOM element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locator {
    /// Element id attribute
    Id(String),
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
    /// Exact link text
    LinkText(String),
}

impl Locator {
    /// Locator by element id
    pub fn id(value: impl Into<String>) -> Self {
        Locator::Id(value.into())
    }

    /// Locator by CSS selector
    pub fn css(value: impl Into<String>) -> Self {
        Locator::Css(value.into())
    }

    /// Locator by XPath expression
    pub fn xpath(value: impl Into<String>) -> Self {
        Locator::XPath(value.into())
    }

    /// Locator by exact link text
    pub fn link_text(value: impl Into<String>) -> Self {
        Locator::LinkText(value.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(v) => write!(f, "id={}", v),
            Locator::Css(v) => write!(f, "css={}", v),
            Locator::XPath(v) => write!(f, "xpath={}", v),
            Locator::LinkText(v) => write!(f, "link={}", v),
        }
    }
}

/// Special keys sent to an element during the act phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialKey {
    Enter,
    Tab,
    Escape,
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug)]
pub enum BackendError {
    /// No element matched the locator
    NotFound(Locator),

    /// An element was found but could not be interacted with
    /// (stale reference, not interactable, obscured)
    Interaction(String),

    /// Any other driver-level failure (transport, protocol, browser crash)
    Driver(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::NotFound(locator) => write!(f, "element not found: {}", locator),
            BackendError::Interaction(msg) => write!(f, "interaction error: {}", msg),
            BackendError::Driver(msg) => write!(f, "driver error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Fatal errors that abort a whole run before any check executes
#[derive(Debug)]
pub enum SessionError {
    /// The browser session could not be created
    Connect(String),

    /// The target page could not be loaded
    Navigation(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Connect(msg) => write!(f, "session error: could not connect: {}", msg),
            SessionError::Navigation(msg) => {
                write!(f, "session error: navigation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_display() {
        assert_eq!(Locator::id("email").to_string(), "id=email");
        assert_eq!(
            Locator::css("input[type='email']").to_string(),
            "css=input[type='email']"
        );
        assert_eq!(Locator::link_text("Log In").to_string(), "link=Log In");
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::NotFound(Locator::id("password"));
        assert_eq!(err.to_string(), "element not found: id=password");
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::Connect("connection refused".to_string());
        assert!(err.to_string().contains("could not connect"));
    }
}
