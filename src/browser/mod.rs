pub mod backend;
pub mod types;
pub mod webdriver;

pub use backend::{MockEffect, MockElement, MockPage, PageBackend};
pub use types::{BackendError, BackendResult, Locator, SessionError, SessionResult, SpecialKey};
pub use webdriver::WebDriverPage;
