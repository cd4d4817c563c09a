//! Page backend abstraction.
//!
//! `PageBackend` is the seam between the check runner and the browser
//! automation library. The production implementation drives a real browser
//! over WebDriver (see [`crate::browser::webdriver`]); `MockPage` is an
//! in-memory implementation used to test runner semantics without a browser.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::browser::types::{BackendError, BackendResult, Locator, SpecialKey};

/// Primitive page operations required by the check runner.
///
/// Locate/verify polling lives in the runner, on top of `element_exists` and
/// `text_present`; implementations only answer single probes.
#[async_trait]
pub trait PageBackend: Send {
    /// Load the given URL
    async fn navigate(&mut self, url: &str) -> BackendResult<()>;

    /// Current page title
    async fn title(&mut self) -> BackendResult<String>;

    /// Whether any element currently matches the locator
    async fn element_exists(&mut self, locator: &Locator) -> BackendResult<bool>;

    /// Type text into the element matching the locator
    async fn type_text(&mut self, locator: &Locator, text: &str) -> BackendResult<()>;

    /// Click the element matching the locator
    async fn click(&mut self, locator: &Locator) -> BackendResult<()>;

    /// Send a special key to the element matching the locator
    async fn press_key(&mut self, locator: &Locator, key: SpecialKey) -> BackendResult<()>;

    /// Whether the given text is currently visible anywhere on the page
    async fn text_present(&mut self, needle: &str) -> BackendResult<bool>;

    /// Capture the rendered page as PNG bytes
    async fn screenshot_png(&mut self) -> BackendResult<Vec<u8>>;

    /// Release the underlying browser session
    async fn close(&mut self) -> BackendResult<()>;
}

// ============================================================================
// Mock implementation for tests
// ============================================================================

/// Side effect applied when a mock element is clicked
#[derive(Debug, Clone)]
pub enum MockEffect {
    /// Append literal text to the page
    AppendText(String),

    /// Append whatever was typed into the given input to the page
    /// (models a form submit rendering the entered value)
    AppendValueOf(Locator),

    /// Make a new element appear on the page
    AddElement(Locator, Box<MockElement>),

    /// Fail the interaction with the given message
    Fail(String),
}

/// An element on a [`MockPage`]
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Visible text of the element
    pub text: String,
    /// Effect triggered by clicking this element
    pub on_click: Option<MockEffect>,
    /// Whether interactions succeed
    pub interactable: bool,
}

impl MockElement {
    /// A plain element with the given visible text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            on_click: None,
            interactable: true,
        }
    }

    /// Attach a click effect
    pub fn on_click(mut self, effect: MockEffect) -> Self {
        self.on_click = Some(effect);
        self
    }

    /// Mark the element as not interactable
    pub fn not_interactable(mut self) -> Self {
        self.interactable = false;
        self
    }
}

/// Minimal valid PNG (1x1 transparent pixel) returned by mock screenshots
const MOCK_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x62, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// In-memory page for exercising the runner in tests
#[derive(Debug)]
pub struct MockPage {
    title: String,
    page_text: String,
    elements: HashMap<Locator, MockElement>,
    typed: HashMap<Locator, String>,
    fail_screenshots: bool,
    closed: Arc<AtomicUsize>,
}

impl MockPage {
    /// Create an empty page with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            page_text: String::new(),
            elements: HashMap::new(),
            typed: HashMap::new(),
            fail_screenshots: false,
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Add an element reachable by the given locator
    pub fn element(mut self, locator: Locator, element: MockElement) -> Self {
        self.elements.insert(locator, element);
        self
    }

    /// Add static page text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.page_text.push_str(&text.into());
        self
    }

    /// Make screenshot capture fail
    pub fn fail_screenshots(mut self) -> Self {
        self.fail_screenshots = true;
        self
    }

    /// Handle observing how many times `close` was called
    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closed)
    }

    fn require_element(&self, locator: &Locator) -> BackendResult<&MockElement> {
        self.elements
            .get(locator)
            .ok_or_else(|| BackendError::NotFound(locator.clone()))
    }

    fn apply_effect(&mut self, effect: MockEffect) -> BackendResult<()> {
        match effect {
            MockEffect::AppendText(text) => {
                self.page_text.push_str(&text);
                Ok(())
            }
            MockEffect::AppendValueOf(locator) => {
                if let Some(value) = self.typed.get(&locator) {
                    let value = value.clone();
                    self.page_text.push_str(&value);
                }
                Ok(())
            }
            MockEffect::AddElement(locator, element) => {
                self.elements.insert(locator, *element);
                Ok(())
            }
            MockEffect::Fail(msg) => Err(BackendError::Interaction(msg)),
        }
    }
}

#[async_trait]
impl PageBackend for MockPage {
    async fn navigate(&mut self, _url: &str) -> BackendResult<()> {
        Ok(())
    }

    async fn title(&mut self) -> BackendResult<String> {
        Ok(self.title.clone())
    }

    async fn element_exists(&mut self, locator: &Locator) -> BackendResult<bool> {
        Ok(self.elements.contains_key(locator))
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> BackendResult<()> {
        let element = self.require_element(locator)?;
        if !element.interactable {
            return Err(BackendError::Interaction(format!(
                "element not interactable: {}",
                locator
            )));
        }
        self.typed.insert(locator.clone(), text.to_string());
        Ok(())
    }

    async fn click(&mut self, locator: &Locator) -> BackendResult<()> {
        let element = self.require_element(locator)?;
        if !element.interactable {
            return Err(BackendError::Interaction(format!(
                "element not interactable: {}",
                locator
            )));
        }
        let effect = element.on_click.clone();
        if let Some(effect) = effect {
            self.apply_effect(effect)?;
        }
        Ok(())
    }

    async fn press_key(&mut self, locator: &Locator, _key: SpecialKey) -> BackendResult<()> {
        self.require_element(locator)?;
        Ok(())
    }

    async fn text_present(&mut self, needle: &str) -> BackendResult<bool> {
        if self.page_text.contains(needle) {
            return Ok(true);
        }
        Ok(self.elements.values().any(|e| e.text.contains(needle)))
    }

    async fn screenshot_png(&mut self) -> BackendResult<Vec<u8>> {
        if self.fail_screenshots {
            return Err(BackendError::Driver("screenshot capture failed".to_string()));
        }
        Ok(MOCK_PNG.to_vec())
    }

    async fn close(&mut self) -> BackendResult<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_element_lookup() {
        let mut page = MockPage::new("Test Page")
            .element(Locator::id("email"), MockElement::new(""));

        assert!(page.element_exists(&Locator::id("email")).await.unwrap());
        assert!(!page.element_exists(&Locator::id("missing")).await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_click_appends_typed_value() {
        let subject = Locator::id("subject");
        let save = Locator::xpath("//button[contains(text(),'Add Task')]");
        let mut page = MockPage::new("Planner")
            .element(subject.clone(), MockElement::new(""))
            .element(
                save.clone(),
                MockElement::new("Add Task").on_click(MockEffect::AppendValueOf(subject.clone())),
            );

        page.type_text(&subject, "Database Assignment").await.unwrap();
        page.click(&save).await.unwrap();
        assert!(page.text_present("Database Assignment").await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_click_failure() {
        let button = Locator::id("broken");
        let mut page = MockPage::new("Planner").element(
            button.clone(),
            MockElement::new("Broken").on_click(MockEffect::Fail("stale element".to_string())),
        );

        let err = page.click(&button).await.unwrap_err();
        assert!(matches!(err, BackendError::Interaction(_)));
    }

    #[tokio::test]
    async fn test_mock_close_counter() {
        let mut page = MockPage::new("Planner");
        let counter = page.close_counter();
        page.close().await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
