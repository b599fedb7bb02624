//! Mapping config: the JSON document linking data columns to form fields.
//!
//! ```json
//! {
//!   "form_url": "forms/contact.html",
//!   "field_mappings": { "full_name": "fullName" },
//!   "submit_button": { "type": "id", "value": "go" }
//! }
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::types::SuccessIndicator;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;

/// Declarative link between a data file and one HTML form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Path or URL of the form
    pub form_url: String,
    /// Column name to form field `name`, in fill order
    pub field_mappings: FieldMappings,
    /// How to find the submit control
    pub submit_button: SubmitButton,
    /// Overrides the success indicator from the application settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_indicator: Option<SuccessIndicator>,
}

impl MappingConfig {
    /// Load a mapping config from a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] if the file does not exist, or
    /// [`ConfigError::Json`] if it is not a mapping config.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading mapping config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Write the config as indented JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, contents)?;
        Ok(())
    }
}

/// Locator strategy for the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitKind {
    /// Element id
    Id,
    /// Element `name` attribute
    Name,
    /// Arbitrary CSS selector
    CssSelector,
}

/// The submit control as stored in the mapping config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitButton {
    /// Lookup strategy
    #[serde(rename = "type")]
    pub kind: SubmitKind,
    /// Id, name or selector, depending on `kind`
    pub value: String,
}

impl SubmitButton {
    /// Submit control located by element id.
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self {
            kind: SubmitKind::Id,
            value: value.into(),
        }
    }

    /// Submit control located by `name` attribute.
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self {
            kind: SubmitKind::Name,
            value: value.into(),
        }
    }

    /// Submit control located by CSS selector.
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self {
            kind: SubmitKind::CssSelector,
            value: value.into(),
        }
    }
}

/// Ordered column-to-field pairs.
///
/// JSON objects are read in document order so fields are filled in the
/// order the config lists them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldMappings(Vec<(String, String)>);

impl FieldMappings {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `column` to `field`, replacing any previous target for that column.
    pub fn insert(&mut self, column: impl Into<String>, field: impl Into<String>) {
        let column = column.into();
        let field = field.into();
        match self.0.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = field,
            None => self.0.push((column, field)),
        }
    }

    /// Target field for a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, f)| f.as_str())
    }

    /// Iterate `(column, field)` pairs in fill order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(c, f)| (c.as_str(), f.as_str()))
    }

    /// Number of mapped columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<C: Into<String>, F: Into<String>> FromIterator<(C, F)> for FieldMappings {
    fn from_iter<I: IntoIterator<Item = (C, F)>>(iter: I) -> Self {
        let mut mappings = Self::new();
        for (column, field) in iter {
            mappings.insert(column, field);
        }
        mappings
    }
}

impl Serialize for FieldMappings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, field) in &self.0 {
            map.serialize_entry(column, field)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMappings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingsVisitor;

        impl<'de> Visitor<'de> for MappingsVisitor {
            type Value = FieldMappings;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of column name to form field name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut mappings = FieldMappings::new();
                while let Some((column, field)) = access.next_entry::<String, String>()? {
                    mappings.insert(column, field);
                }
                Ok(mappings)
            }
        }

        deserializer.deserialize_map(MappingsVisitor)
    }
}
