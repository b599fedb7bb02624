//! Element locators and their CSS rendering.

use formfill_core::{SubmitButton, SubmitKind};
use std::fmt;

/// How an element is found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Element id
    Id(String),
    /// `name` attribute
    Name(String),
    /// Raw CSS selector
    Css(String),
}

impl Locator {
    /// Render as a CSS selector.
    ///
    /// Ids and names go through attribute selectors so values that are not
    /// valid CSS identifiers (`user.email`, `2nd-line`) still match.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Id(id) => format!("[id=\"{}\"]", escape_css_string(id)),
            Self::Name(name) => format!("[name=\"{}\"]", escape_css_string(name)),
            Self::Css(selector) => selector.clone(),
        }
    }

    /// The radio input in group `name` whose value is `value`.
    #[must_use]
    pub fn radio_option(name: &str, value: &str) -> Self {
        Self::Css(format!(
            "input[type=\"radio\"][name=\"{}\"][value=\"{}\"]",
            escape_css_string(name),
            escape_css_string(value)
        ))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id='{id}'"),
            Self::Name(name) => write!(f, "name='{name}'"),
            Self::Css(selector) => write!(f, "css='{selector}'"),
        }
    }
}

impl From<&SubmitButton> for Locator {
    fn from(button: &SubmitButton) -> Self {
        match button.kind {
            SubmitKind::Id => Self::Id(button.value.clone()),
            SubmitKind::Name => Self::Name(button.value.clone()),
            SubmitKind::CssSelector => Self::Css(button.value.clone()),
        }
    }
}

fn escape_css_string(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\a "),
            _ => escaped.push(c),
        }
    }
    escaped
}
