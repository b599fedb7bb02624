use crate::control::FormControl;
use crate::error::{BrowserError, Result};
use crate::locator::Locator;
use std::path::Path;

/// Browser actions for automation
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL and wait for the load to finish
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Locate an element and report what kind of form control it is
    async fn inspect(&self, locator: &Locator) -> Result<FormControl>;

    /// Clear a text field and type a value into it
    async fn fill_field(&self, locator: &Locator, value: &str) -> Result<()>;

    /// Choose the `<option>` of a select whose value matches
    async fn select_option(&self, locator: &Locator, value: &str) -> Result<()>;

    /// Click an element
    async fn click(&self, locator: &Locator) -> Result<()>;

    /// URL of the current page
    async fn current_url(&self) -> Result<String>;

    /// Wait for a selector to appear
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()>;

    /// Release the browser session; later calls are no-ops
    async fn shutdown(&mut self) -> Result<()>;
}

/// Turn a form location from a mapping config into something navigable.
///
/// Values with a URL scheme are used as-is. Anything else is a filesystem
/// path, made absolute against the current directory.
pub fn resolve_form_url(form_url: &str) -> Result<String> {
    if let Ok(url) = url::Url::parse(form_url) {
        // A single-letter scheme is a Windows drive (`C:\forms\a.html`)
        if url.scheme().len() > 1 {
            return Ok(url.into());
        }
    }

    let path = Path::new(form_url);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| BrowserError::NavigationError(format!("Invalid form path: {e}")))?
            .join(path)
    };

    url::Url::from_file_path(&absolute)
        .map(Into::into)
        .map_err(|()| {
            BrowserError::NavigationError(format!(
                "Invalid form path: {}",
                absolute.display()
            ))
        })
}
