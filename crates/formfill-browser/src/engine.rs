use crate::actions::BrowserActions;
use crate::control::FormControl;
use crate::error::{BrowserError, Result};
use crate::locator::Locator;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use formfill_core::BrowserSettings;
use futures_util::stream::StreamExt;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Tag and attributes read from an element in one round trip
#[derive(Debug, Deserialize)]
struct ControlProbe {
    tag: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    name: Option<String>,
}

const PROBE_JS: &str = "function() { return JSON.stringify({ \
    tag: this.tagName.toLowerCase(), \
    type: this.getAttribute('type'), \
    name: this.getAttribute('name') }); }";

const CLEAR_JS: &str = "function() { \
    this.focus(); \
    this.value = ''; \
    this.dispatchEvent(new Event('input', { bubbles: true })); }";

/// Browser automation engine.
///
/// Owns one Chromium process and one page for the lifetime of a run. The
/// process is closed by [`BrowserActions::shutdown`], or killed when the
/// engine is dropped.
pub struct BrowserEngine {
    browser: Option<Browser>,
    page: Page,
    handler: JoinHandle<()>,
    element_wait: Duration,
}

impl BrowserEngine {
    /// Launch Chromium with the given settings and open a blank page.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(settings.window_width, settings.window_height)
            .request_timeout(Duration::from_secs(settings.request_timeout_secs));

        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &settings.chrome_executable {
            builder = builder.chrome_executable(executable);
        }

        let config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Spawn browser handler
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                // Handle events if needed
                let _ = event;
            }
            debug!("CDP handler loop ended");
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        info!(headless = settings.headless, "browser session started");

        Ok(Self {
            browser: Some(browser),
            page,
            handler,
            element_wait: Duration::from_millis(settings.element_wait_ms),
        })
    }

    /// Poll for an element until the element-wait timeout expires.
    async fn find(&self, locator: &Locator) -> Result<Element> {
        let selector = locator.to_css();
        let deadline = Instant::now() + self.element_wait;

        loop {
            match self.page.find_element(selector.as_str()).await {
                Ok(element) => return Ok(element),
                Err(e) if is_session_error(&e) => {
                    return Err(BrowserError::SessionClosed(e.to_string()))
                }
                Err(_) if Instant::now() < deadline => tokio::time::sleep(POLL_INTERVAL).await,
                Err(_) => {
                    return Err(BrowserError::ElementNotFound {
                        locator: locator.to_string(),
                    })
                }
            }
        }
    }

    async fn call_js(element: &Element, function: impl Into<String>) -> Result<serde_json::Value> {
        let returns = element
            .call_js_fn(function, false)
            .await
            .map_err(|e| classify(e, BrowserError::ScriptError))?;
        Ok(returns.result.value.unwrap_or(serde_json::Value::Null))
    }
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.page
            .goto(url)
            .await
            .map_err(|e| classify(e, BrowserError::NavigationError))?;
        Ok(())
    }

    async fn inspect(&self, locator: &Locator) -> Result<FormControl> {
        let element = self.find(locator).await?;
        let raw = Self::call_js(&element, PROBE_JS).await?;
        let probe: ControlProbe = raw
            .as_str()
            .and_then(|json| serde_json::from_str(json).ok())
            .ok_or_else(|| {
                BrowserError::ScriptError(format!("unexpected probe result for {locator}: {raw}"))
            })?;

        Ok(FormControl::classify(
            &probe.tag,
            probe.kind.as_deref(),
            probe.name.as_deref(),
        ))
    }

    async fn fill_field(&self, locator: &Locator, value: &str) -> Result<()> {
        let element = self.find(locator).await?;
        Self::call_js(&element, CLEAR_JS).await?;
        element
            .type_str(value)
            .await
            .map_err(|e| classify(e, BrowserError::ChromiumError))?;
        Ok(())
    }

    async fn select_option(&self, locator: &Locator, value: &str) -> Result<()> {
        let element = self.find(locator).await?;
        let literal = serde_json::to_string(value)
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?;
        let script = format!(
            "function() {{ \
                const v = {literal}; \
                if (!Array.from(this.options).some(o => o.value === v)) return false; \
                this.value = v; \
                this.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                this.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                return true; }}"
        );

        match Self::call_js(&element, script).await? {
            serde_json::Value::Bool(true) => Ok(()),
            _ => Err(BrowserError::ElementNotFound {
                locator: format!("{locator} option value='{value}'"),
            }),
        }
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let element = self.find(locator).await?;
        element
            .click()
            .await
            .map_err(|e| classify(e, BrowserError::ChromiumError))?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| classify(e, BrowserError::ChromiumError))?;
        Ok(url.unwrap_or_default())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            match self.page.find_element(selector).await {
                Ok(_) => return Ok(()),
                Err(e) if is_session_error(&e) => {
                    return Err(BrowserError::SessionClosed(e.to_string()))
                }
                Err(_) if Instant::now() < deadline => tokio::time::sleep(POLL_INTERVAL).await,
                Err(_) => {
                    return Err(BrowserError::Timeout(format!(
                        "selector '{selector}' not found after {timeout_ms}ms"
                    )))
                }
            }
        }
    }

    async fn shutdown(&mut self) -> Result<()> {
        let Some(mut browser) = self.browser.take() else {
            return Ok(());
        };

        let closed = browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::ChromiumError(e.to_string()));
        if let Err(e) = browser.wait().await {
            warn!("failed to reap browser process: {}", e);
        }
        self.handler.abort();
        info!("browser session closed");
        closed
    }
}

impl Drop for BrowserEngine {
    fn drop(&mut self) {
        // Browser's own Drop kills the child process
        self.handler.abort();
    }
}

fn is_session_error(err: &CdpError) -> bool {
    matches!(
        err,
        CdpError::Ws(_) | CdpError::ChannelSendError(_) | CdpError::NoResponse
    )
}

fn classify(err: CdpError, fallback: fn(String) -> BrowserError) -> BrowserError {
    match err {
        CdpError::Timeout => BrowserError::Timeout(err.to_string()),
        CdpError::JavascriptException(_) => BrowserError::ScriptError(err.to_string()),
        ref e if is_session_error(e) => BrowserError::SessionClosed(err.to_string()),
        other => fallback(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_timeout() {
        let err = classify(CdpError::Timeout, BrowserError::NavigationError);
        assert_eq!(err.category(), "Timeout");
    }

    #[test]
    fn test_classify_session_loss() {
        let err = classify(CdpError::NoResponse, BrowserError::NavigationError);
        assert_eq!(err.category(), "SessionClosed");
    }

    #[test]
    fn test_classify_fallback() {
        let err = classify(CdpError::NotFound, BrowserError::NavigationError);
        assert_eq!(err.category(), "NavigationError");
    }

    #[test]
    fn test_probe_parses() {
        let probe: ControlProbe =
            serde_json::from_str(r#"{"tag":"input","type":"radio","name":"plan"}"#)
                .expect("parse probe");
        assert_eq!(probe.tag, "input");
        assert_eq!(probe.kind.as_deref(), Some("radio"));
        assert_eq!(probe.name.as_deref(), Some("plan"));
    }
}
