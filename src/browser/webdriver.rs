//! WebDriver-backed page implementation.
//!
//! Drives a real browser through a WebDriver server (chromedriver by
//! default). Probes are single-shot; bounded-wait polling is layered on top
//! by the runner.

use async_trait::async_trait;
use thirtyfour::error::{WebDriverError, WebDriverErrorInner};
use thirtyfour::prelude::*;
use thirtyfour::Key;

use crate::browser::backend::PageBackend;
use crate::browser::types::{
    BackendError, BackendResult, Locator, SessionError, SessionResult, SpecialKey,
};

/// A live browser session speaking the WebDriver protocol
pub struct WebDriverPage {
    // Emptied on close; WebDriver::quit consumes the handle.
    driver: Option<WebDriver>,
}

impl WebDriverPage {
    /// Start a new browser session against the given WebDriver endpoint
    pub async fn connect(webdriver_url: &str, headless: bool) -> SessionResult<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if headless {
            caps.set_headless()
                .map_err(|e| SessionError::Connect(e.to_string()))?;
        }

        tracing::info!(endpoint = webdriver_url, headless, "starting browser session");
        let driver = WebDriver::new(webdriver_url, caps)
            .await
            .map_err(|e| SessionError::Connect(e.to_string()))?;

        if let Err(e) = driver.maximize_window().await {
            tracing::debug!(error = %e, "could not maximize window");
        }

        Ok(Self {
            driver: Some(driver),
        })
    }

    fn driver(&self) -> BackendResult<&WebDriver> {
        self.driver
            .as_ref()
            .ok_or_else(|| BackendError::Driver("session already closed".to_string()))
    }

    async fn find(&self, locator: &Locator) -> BackendResult<WebElement> {
        self.driver()?
            .find(to_by(locator))
            .await
            .map_err(|e| classify(locator, e))
    }
}

#[async_trait]
impl PageBackend for WebDriverPage {
    async fn navigate(&mut self, url: &str) -> BackendResult<()> {
        self.driver()?
            .goto(url)
            .await
            .map_err(|e| BackendError::Driver(e.to_string()))
    }

    async fn title(&mut self) -> BackendResult<String> {
        self.driver()?
            .title()
            .await
            .map_err(|e| BackendError::Driver(e.to_string()))
    }

    async fn element_exists(&mut self, locator: &Locator) -> BackendResult<bool> {
        match self.driver()?.find(to_by(locator)).await {
            Ok(_) => Ok(true),
            Err(e) => match &*e {
                WebDriverErrorInner::NoSuchElement(_) => Ok(false),
                _ => Err(BackendError::Driver(e.to_string())),
            },
        }
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> BackendResult<()> {
        let element = self.find(locator).await?;
        element.send_keys(text).await.map_err(|e| classify(locator, e))
    }

    async fn click(&mut self, locator: &Locator) -> BackendResult<()> {
        let element = self.find(locator).await?;
        element.click().await.map_err(|e| classify(locator, e))
    }

    async fn press_key(&mut self, locator: &Locator, key: SpecialKey) -> BackendResult<()> {
        let element = self.find(locator).await?;
        element
            .send_keys(to_key(key))
            .await
            .map_err(|e| classify(locator, e))
    }

    async fn text_present(&mut self, needle: &str) -> BackendResult<bool> {
        let query = text_query(needle);
        match self.driver()?.find(By::XPath(&query)).await {
            Ok(_) => Ok(true),
            Err(e) => match &*e {
                WebDriverErrorInner::NoSuchElement(_) => Ok(false),
                _ => Err(BackendError::Driver(e.to_string())),
            },
        }
    }

    async fn screenshot_png(&mut self) -> BackendResult<Vec<u8>> {
        self.driver()?
            .screenshot_as_png()
            .await
            .map_err(|e| BackendError::Driver(e.to_string()))
    }

    async fn close(&mut self) -> BackendResult<()> {
        if let Some(driver) = self.driver.take() {
            driver
                .quit()
                .await
                .map_err(|e| BackendError::Driver(e.to_string()))?;
        }
        Ok(())
    }
}

/// Translate a [`Locator`] into a thirtyfour selector
fn to_by(locator: &Locator) -> By {
    match locator {
        Locator::Id(v) => By::Id(v.as_str()),
        Locator::Css(v) => By::Css(v.as_str()),
        Locator::XPath(v) => By::XPath(v.as_str()),
        Locator::LinkText(v) => By::LinkText(v.as_str()),
    }
}

/// Map a WebDriver failure onto the backend error taxonomy
fn classify(locator: &Locator, err: WebDriverError) -> BackendError {
    match &*err {
        WebDriverErrorInner::NoSuchElement(_) => BackendError::NotFound(locator.clone()),
        WebDriverErrorInner::StaleElementReference(_)
        | WebDriverErrorInner::ElementNotInteractable(_)
        | WebDriverErrorInner::ElementClickIntercepted(_) => {
            BackendError::Interaction(err.to_string())
        }
        _ => BackendError::Driver(err.to_string()),
    }
}

fn to_key(key: SpecialKey) -> Key {
    match key {
        SpecialKey::Enter => Key::Enter,
        SpecialKey::Tab => Key::Tab,
        SpecialKey::Escape => Key::Escape,
    }
}

/// XPath query matching any element whose text contains `needle`
pub(crate) fn text_query(needle: &str) -> String {
    format!("//*[contains(text(),{})]", xpath_literal(needle))
}

/// Quote a string as an XPath literal, including strings containing quotes
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{}'", text);
    }
    if !text.contains('"') {
        return format!("\"{}\"", text);
    }
    // Mixed quotes require concat() of alternating-quoted pieces.
    let pieces: Vec<String> = text
        .split('\'')
        .map(|piece| format!("'{}'", piece))
        .collect();
    format!("concat({})", pieces.join(", \"'\", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xpath_literal_plain() {
        assert_eq!(xpath_literal("incorrect"), "'incorrect'");
    }

    #[test]
    fn test_xpath_literal_single_quote() {
        assert_eq!(xpath_literal("it's done"), "\"it's done\"");
    }

    #[test]
    fn test_xpath_literal_mixed_quotes() {
        assert_eq!(
            xpath_literal("a'b\"c"),
            "concat('a', \"'\", 'b\"c')"
        );
    }

    #[test]
    fn test_text_query() {
        assert_eq!(
            text_query("Database Assignment"),
            "//*[contains(text(),'Database Assignment')]"
        );
    }
}
