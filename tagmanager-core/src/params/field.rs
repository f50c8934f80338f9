//! Field descriptors that providers use to declare their parameter schema.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ParamError, ParamResult};

/// Field names must be usable as JSON keys and form input names
static FIELD_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Field name regex is valid")
});

/// A selectable value in a dropdown field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// Stored value
    pub value: String,
    /// Label shown to the editor
    pub label: String,
}

impl DropdownOption {
    /// Creates a new option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The editing control and value type of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line text
    TextArea,
    /// Numeric input
    Number,
    /// Boolean toggle
    Checkbox,
    /// Choice from a fixed list of values
    Dropdown {
        /// Available options in display order
        options: Vec<DropdownOption>,
    },
}

impl FieldKind {
    /// Value used when a field has neither a stored value nor a default
    #[must_use]
    pub fn empty_value(&self) -> Value {
        match self {
            Self::Text | Self::TextArea => Value::String(String::new()),
            Self::Checkbox => Value::Bool(false),
            Self::Number | Self::Dropdown { .. } => Value::Null,
        }
    }

    /// Coerces a stored or submitted value into this kind
    ///
    /// Canonical values (string, number, boolean, option string) pass
    /// through unchanged. Loose form input is normalized to the canonical
    /// form. Returns `None` when the value cannot represent this kind, in
    /// which case callers fall back to the descriptor default.
    #[must_use]
    pub fn coerce(&self, value: &Value) -> Option<Value> {
        match self {
            Self::Text | Self::TextArea => match value {
                Value::String(_) => Some(value.clone()),
                Value::Number(n) => Some(Value::String(n.to_string())),
                Value::Bool(b) => Some(Value::String(b.to_string())),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            },
            Self::Number => match value {
                Value::Number(_) => Some(value.clone()),
                Value::String(s) => parse_number(s.trim()),
                _ => None,
            },
            Self::Checkbox => match value {
                Value::Bool(_) => Some(value.clone()),
                Value::Number(n) => match n.as_i64() {
                    Some(0) => Some(Value::Bool(false)),
                    Some(1) => Some(Value::Bool(true)),
                    _ => None,
                },
                Value::String(s) => match s.trim().to_lowercase().as_str() {
                    "1" | "true" | "on" | "yes" => Some(Value::Bool(true)),
                    "0" | "false" | "off" | "no" | "" => Some(Value::Bool(false)),
                    _ => None,
                },
                _ => None,
            },
            Self::Dropdown { options } => {
                let candidate = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return None,
                };
                options
                    .iter()
                    .any(|o| o.value == candidate)
                    .then_some(Value::String(candidate))
            }
        }
    }
}

fn parse_number(s: &str) -> Option<Value> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::from(i));
    }
    s.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

/// A provider-declared parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Key under which the value is stored
    pub name: String,
    /// Label shown in the edit form
    pub title: String,
    /// Control and value type
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Value used when nothing valid is stored
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub default: Value,
    /// Whether the editor must fill this field in
    #[serde(default)]
    pub required: bool,
    /// Optional help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDescriptor {
    /// Creates a descriptor of the given kind with no default
    pub fn new(name: impl Into<String>, title: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            kind,
            default: Value::Null,
            required: false,
            description: None,
        }
    }

    /// Creates a single-line text descriptor
    pub fn text(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(name, title, FieldKind::Text)
    }

    /// Creates a multi-line text descriptor
    pub fn text_area(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(name, title, FieldKind::TextArea)
    }

    /// Creates a numeric descriptor
    pub fn number(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(name, title, FieldKind::Number)
    }

    /// Creates a checkbox descriptor
    pub fn checkbox(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(name, title, FieldKind::Checkbox)
    }

    /// Creates a dropdown descriptor
    pub fn dropdown(
        name: impl Into<String>,
        title: impl Into<String>,
        options: Vec<DropdownOption>,
    ) -> Self {
        Self::new(name, title, FieldKind::Dropdown { options })
    }

    /// Sets the default value
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    /// Marks the field as required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the help text
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the default coerced into this field's kind
    ///
    /// Falls back to the kind's empty value when no usable default is declared.
    #[must_use]
    pub fn default_value(&self) -> Value {
        self.kind
            .coerce(&self.default)
            .unwrap_or_else(|| self.kind.empty_value())
    }

    /// Resolves the value to edit from an optional stored value
    #[must_use]
    pub fn resolve(&self, stored: Option<&Value>) -> Value {
        match stored {
            Some(value) => self.kind.coerce(value).unwrap_or_else(|| {
                tracing::debug!(
                    field = %self.name,
                    "Stored value {value} does not fit field kind, using default"
                );
                self.default_value()
            }),
            None => self.default_value(),
        }
    }
}

/// Checks a provider's schema for unusable names and defaults
///
/// # Errors
///
/// Returns the first problem found: an invalid or duplicated field name, or a
/// dropdown default that is not one of its options.
pub fn validate_schema(fields: &[FieldDescriptor]) -> ParamResult<()> {
    let mut seen = HashSet::new();

    for field in fields {
        if !FIELD_NAME_RE.is_match(&field.name) {
            return Err(ParamError::InvalidName(field.name.clone()));
        }

        if !seen.insert(field.name.as_str()) {
            return Err(ParamError::DuplicateName(field.name.clone()));
        }

        if matches!(field.kind, FieldKind::Dropdown { .. })
            && !field.default.is_null()
            && field.kind.coerce(&field.default).is_none()
        {
            return Err(ParamError::DefaultNotInOptions {
                field: field.name.clone(),
            });
        }
    }

    Ok(())
}
