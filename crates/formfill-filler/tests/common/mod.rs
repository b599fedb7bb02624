use async_trait::async_trait;
use formfill_browser::{BrowserActions, BrowserError, FormControl, Locator, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A recorded browser call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    Fill(String, String),
    Select(String, String),
    Click(String),
    Shutdown,
}

/// In-memory browser: a fixed set of named controls and a URL that changes
/// when the submit locator is clicked.
#[derive(Default)]
pub struct MockBrowser {
    pub controls: HashMap<String, FormControl>,
    pub submit: String,
    pub url_after_submit: String,
    pub crash_after_submit: bool,
    pub navigate_error: Option<fn() -> BrowserError>,
    url: Mutex<String>,
    actions: Arc<Mutex<Vec<Action>>>,
}

impl MockBrowser {
    pub fn new(fields: &[(&str, FormControl)], submit: &str) -> Self {
        Self {
            controls: fields
                .iter()
                .map(|(name, control)| ((*name).to_string(), control.clone()))
                .collect(),
            submit: submit.to_string(),
            url_after_submit: "file:///forms/success.html".to_string(),
            ..Self::default()
        }
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    /// Shared handle to the action log, readable after the mock is moved.
    pub fn journal(&self) -> Arc<Mutex<Vec<Action>>> {
        Arc::clone(&self.actions)
    }

    fn record(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }

    fn lookup(&self, locator: &Locator) -> Result<FormControl> {
        let found = match locator {
            Locator::Name(name) => self.controls.get(name).cloned(),
            Locator::Css(css) if css.starts_with("input[type=\"radio\"]") => {
                Some(FormControl::Radio { name: String::new() })
            }
            other => (other.to_string() == self.submit).then_some(FormControl::Unsupported {
                tag: "button".to_string(),
                kind: Some("submit".to_string()),
            }),
        };
        found.ok_or_else(|| BrowserError::ElementNotFound {
            locator: locator.to_string(),
        })
    }
}

#[async_trait]
impl BrowserActions for MockBrowser {
    async fn navigate(&self, url: &str) -> Result<()> {
        if let Some(make) = self.navigate_error {
            return Err(make());
        }
        self.record(Action::Navigate(url.to_string()));
        *self.url.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn inspect(&self, locator: &Locator) -> Result<FormControl> {
        self.lookup(locator)
    }

    async fn fill_field(&self, locator: &Locator, value: &str) -> Result<()> {
        self.lookup(locator)?;
        self.record(Action::Fill(locator.to_string(), value.to_string()));
        Ok(())
    }

    async fn select_option(&self, locator: &Locator, value: &str) -> Result<()> {
        self.lookup(locator)?;
        self.record(Action::Select(locator.to_string(), value.to_string()));
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        self.lookup(locator)?;
        self.record(Action::Click(locator.to_string()));
        if locator.to_string() == self.submit {
            *self.url.lock().unwrap() = self.url_after_submit.clone();
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        if self.crash_after_submit {
            return Err(BrowserError::SessionClosed("target closed".to_string()));
        }
        Ok(self.url.lock().unwrap().clone())
    }

    async fn wait_for_selector(&self, selector: &str, _timeout_ms: u64) -> Result<()> {
        let url = self.url.lock().unwrap().clone();
        if url == self.url_after_submit && selector == "#thanks" {
            Ok(())
        } else {
            Err(BrowserError::Timeout(format!("selector '{selector}'")))
        }
    }

    async fn shutdown(&mut self) -> Result<()> {
        self.record(Action::Shutdown);
        Ok(())
    }
}
