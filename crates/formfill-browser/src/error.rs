use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("chromium error: {0}")]
    ChromiumError(String),

    #[error("navigation failed: {0}")]
    NavigationError(String),

    #[error("Could not find element with {locator}")]
    ElementNotFound { locator: String },

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("browser session closed: {0}")]
    SessionClosed(String),

    #[error("script error: {0}")]
    ScriptError(String),
}

impl BrowserError {
    /// Short category name used in per-row failure reasons.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::ChromiumError(_) => "ChromiumError",
            Self::NavigationError(_) => "NavigationError",
            Self::ElementNotFound { .. } => "ElementNotFound",
            Self::Timeout(_) => "Timeout",
            Self::SessionClosed(_) => "SessionClosed",
            Self::ScriptError(_) => "ScriptError",
        }
    }

    #[must_use]
    pub fn is_element_not_found(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. })
    }
}
