//! Form control classification.

/// The kind of form control a mapped field resolves to.
///
/// Each variant has its own fill strategy; `Unsupported` is reported by the
/// filler instead of being silently skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormControl {
    /// `<select>`, set by option value
    Select,
    /// Radio group; the option is picked by name and value
    Radio { name: String },
    /// Checkbox, ticked when the value is truthy
    Checkbox,
    /// Text-like `<input>` or `<textarea>`
    Text,
    /// Anything else (buttons, file inputs, custom elements...)
    Unsupported { tag: String, kind: Option<String> },
}

impl FormControl {
    /// Classify from the element's tag, `type` and `name` attributes.
    #[must_use]
    pub fn classify(tag: &str, type_attr: Option<&str>, name_attr: Option<&str>) -> Self {
        let tag = tag.to_ascii_lowercase();
        let kind = type_attr.map(str::to_ascii_lowercase);

        if tag == "select" {
            return Self::Select;
        }

        let unsupported = || Self::Unsupported {
            tag: tag.clone(),
            kind: kind.clone(),
        };

        match kind.as_deref() {
            Some("radio") => Self::Radio {
                name: name_attr.unwrap_or_default().to_string(),
            },
            Some("checkbox") => Self::Checkbox,
            _ if tag == "textarea" => Self::Text,
            Some("submit" | "button" | "reset" | "image" | "file") => unsupported(),
            _ if tag == "input" => Self::Text,
            _ => unsupported(),
        }
    }
}
