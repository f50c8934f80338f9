//! Edit form descriptors
//!
//! The admin UI renders forms from these descriptors and posts the edited
//! values back as a [`FormSubmission`]. This crate only adds, removes and
//! reads descriptors; it never renders them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::params::{DropdownOption, EditableField, FieldKind, ParamMap};

/// Where a form field's value is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "binding", rename_all = "snake_case")]
pub enum FieldBinding {
    /// A column on the record itself
    Record,
    /// A key inside a serialized parameter blob column
    Param {
        /// Name of the blob column
        blob: String,
    },
}

/// A single control on an edit form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Field name, unique per binding
    pub name: String,
    /// Label shown to the editor
    pub title: String,
    /// Control and value type
    pub kind: FieldKind,
    /// Current value
    pub value: Value,
    /// Where the value is written back to
    pub binding: FieldBinding,
    /// Placeholder option for an unset dropdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_string: Option<String>,
    /// Whether the editor must fill this field in
    #[serde(default)]
    pub required: bool,
    /// Optional help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormField {
    /// Creates a record-bound field
    pub fn record(name: impl Into<String>, title: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            value: kind.empty_value(),
            kind,
            binding: FieldBinding::Record,
            empty_string: None,
            required: false,
            description: None,
        }
    }

    /// Creates a field bound to a key of a parameter blob
    pub fn param(blob: impl Into<String>, field: EditableField) -> Self {
        Self {
            name: field.name,
            title: field.title,
            kind: field.kind,
            value: field.value,
            binding: FieldBinding::Param { blob: blob.into() },
            empty_string: None,
            required: field.required,
            description: field.description,
        }
    }

    /// Sets the current value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the placeholder option shown when nothing is selected
    #[must_use]
    pub fn with_empty_string(mut self, empty_string: impl Into<String>) -> Self {
        self.empty_string = Some(empty_string.into());
        self
    }

    /// Replaces the option list of a dropdown, turning the field into one if needed
    pub fn set_source(&mut self, options: Vec<DropdownOption>) {
        self.kind = FieldKind::Dropdown { options };
    }

    /// Returns the dropdown options, if this is a dropdown
    #[must_use]
    pub fn options(&self) -> Option<&[DropdownOption]> {
        match &self.kind {
            FieldKind::Dropdown { options } => Some(options),
            _ => None,
        }
    }

    /// Returns true if this field is stored in the named blob
    #[must_use]
    pub fn is_param_of(&self, blob: &str) -> bool {
        matches!(&self.binding, FieldBinding::Param { blob: b } if b == blob)
    }
}

/// A named tab holding fields in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormTab {
    /// Tab path, e.g. `Root.Main`
    pub name: String,
    /// Fields in display order
    pub fields: Vec<FormField>,
}

/// A complete edit form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDescriptor {
    /// Tabs in display order
    pub tabs: Vec<FormTab>,
    /// Names of record fields that must be non-empty on save
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_fields: Vec<String>,
}

impl FormDescriptor {
    /// Creates an empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field to a tab, creating the tab if needed
    ///
    /// A field with the same name and binding is removed first, so adding a
    /// field replaces any scaffolded one.
    pub fn add_field_to_tab(&mut self, tab: &str, field: FormField) {
        for existing in &mut self.tabs {
            existing
                .fields
                .retain(|f| !(f.name == field.name && f.binding == field.binding));
        }

        if let Some(existing) = self.tabs.iter_mut().find(|t| t.name == tab) {
            existing.fields.push(field);
        } else {
            self.tabs.push(FormTab {
                name: tab.to_string(),
                fields: vec![field],
            });
        }
    }

    /// Removes a record-bound field by name
    pub fn remove_by_name(&mut self, name: &str) -> Option<FormField> {
        for tab in &mut self.tabs {
            if let Some(pos) = tab
                .fields
                .iter()
                .position(|f| f.name == name && f.binding == FieldBinding::Record)
            {
                return Some(tab.fields.remove(pos));
            }
        }
        None
    }

    /// Gets a record-bound field by name
    #[must_use]
    pub fn data_field_by_name(&self, name: &str) -> Option<&FormField> {
        self.fields()
            .find(|f| f.name == name && f.binding == FieldBinding::Record)
    }

    /// Gets a mutable record-bound field by name
    pub fn data_field_by_name_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.tabs
            .iter_mut()
            .flat_map(|t| t.fields.iter_mut())
            .find(|f| f.name == name && f.binding == FieldBinding::Record)
    }

    /// Gets a field bound to a key of the named blob
    #[must_use]
    pub fn param_field(&self, blob: &str, name: &str) -> Option<&FormField> {
        self.fields().find(|f| f.name == name && f.is_param_of(blob))
    }

    /// Returns all fields bound to the named blob, in display order
    #[must_use]
    pub fn param_fields(&self, blob: &str) -> Vec<&FormField> {
        self.fields().filter(|f| f.is_param_of(blob)).collect()
    }

    /// Gets a tab by name
    #[must_use]
    pub fn tab(&self, name: &str) -> Option<&FormTab> {
        self.tabs.iter().find(|t| t.name == name)
    }

    /// Iterates over all fields across tabs
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.tabs.iter().flat_map(|t| t.fields.iter())
    }

    /// Returns the total number of fields
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.tabs.iter().map(|t| t.fields.len()).sum()
    }

    /// Marks a record field as required
    pub fn require(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.required_fields.contains(&name) {
            self.required_fields.push(name);
        }
    }
}

/// Values posted back from an edit form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    /// Record field values by name
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
    /// Parameter values grouped by blob column
    #[serde(default)]
    pub params: BTreeMap<String, BTreeMap<String, Value>>,
}

impl FormSubmission {
    /// Creates an empty submission
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a submission holding every field's current value unchanged
    #[must_use]
    pub fn from_form(form: &FormDescriptor) -> Self {
        let mut submission = Self::new();
        for field in form.fields() {
            match &field.binding {
                FieldBinding::Record => {
                    submission.set(field.name.clone(), field.value.clone());
                }
                FieldBinding::Param { blob } => {
                    submission.set_param(blob.clone(), field.name.clone(), field.value.clone());
                }
            }
        }
        submission
    }

    /// Sets a record field value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Sets a parameter value inside a blob
    pub fn set_param(
        &mut self,
        blob: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) {
        self.params
            .entry(blob.into())
            .or_default()
            .insert(name.into(), value.into());
    }

    /// Gets a record field value
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Gets a record field value as text, treating null as absent
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        match self.values.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Returns true if the submission carries a parameter group for `blob`
    #[must_use]
    pub fn has_params(&self, blob: &str) -> bool {
        self.params.contains_key(blob)
    }

    /// Gets the submitted parameters of a blob
    #[must_use]
    pub fn params(&self, blob: &str) -> ParamMap {
        self.params
            .get(blob)
            .map(|values| ParamMap::from(values.clone()))
            .unwrap_or_default()
    }
}
