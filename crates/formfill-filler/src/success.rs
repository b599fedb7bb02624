//! Post-submission success detection.

use async_trait::async_trait;
use formfill_browser::{BrowserActions, BrowserError, Result};
use formfill_core::SuccessIndicator;

/// Decides whether the page reached after submitting counts as success.
///
/// An `Err` means the browser could not be queried at all, which the filler
/// reports as a crashed session.
#[async_trait]
pub trait SuccessCheck: Send + Sync {
    async fn check(&self, browser: &dyn BrowserActions) -> Result<bool>;
}

#[async_trait]
impl SuccessCheck for SuccessIndicator {
    async fn check(&self, browser: &dyn BrowserActions) -> Result<bool> {
        match self {
            Self::UrlContains { url_contains } => {
                let url = browser.current_url().await?;
                tracing::debug!(%url, expected = %url_contains, "checking post-submit URL");
                Ok(url.contains(url_contains.as_str()))
            }
            Self::SelectorPresent {
                selector,
                timeout_ms,
            } => match browser.wait_for_selector(selector, *timeout_ms).await {
                Ok(()) => Ok(true),
                Err(BrowserError::Timeout(_)) => Ok(false),
                Err(e) => Err(e),
            },
        }
    }
}
