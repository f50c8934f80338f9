//! Expansion of stored parameter blobs into editable fields and back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::form::{FormDescriptor, FormField};

use super::{FieldDescriptor, FieldKind, ParamMap};

/// A schema field pre-populated with the value to edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableField {
    /// Parameter key
    pub name: String,
    /// Label shown to the editor
    pub title: String,
    /// Control and value type
    pub kind: FieldKind,
    /// Stored value, or the descriptor default
    pub value: Value,
    /// Whether the editor must fill this field in
    #[serde(default)]
    pub required: bool,
    /// Optional help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Expands raw stored parameters against a provider schema
///
/// Produces one field per descriptor in schema order. Missing keys and
/// values that do not fit the descriptor's kind take the descriptor
/// default. With no schema (no provider chosen yet) nothing is produced.
#[must_use]
pub fn expand(raw: &str, schema: Option<&[FieldDescriptor]>) -> Vec<EditableField> {
    let Some(schema) = schema else {
        return Vec::new();
    };

    let stored = ParamMap::decode(raw);
    schema
        .iter()
        .map(|descriptor| EditableField {
            name: descriptor.name.clone(),
            title: descriptor.title.clone(),
            kind: descriptor.kind.clone(),
            value: descriptor.resolve(stored.get(&descriptor.name)),
            required: descriptor.required,
            description: descriptor.description.clone(),
        })
        .collect()
}

/// Serializes submitted values keyed by descriptor name
///
/// Keys that are not in the schema are dropped, so renamed or removed
/// fields lose their stored data. Descriptors with no usable submitted value
/// keep their default; null defaults are left out.
#[must_use]
pub fn collapse(schema: &[FieldDescriptor], submitted: &ParamMap) -> String {
    collapse_map(schema, submitted).encode()
}

/// Same as [`collapse`], returning the decoded mapping
#[must_use]
pub fn collapse_map(schema: &[FieldDescriptor], submitted: &ParamMap) -> ParamMap {
    let mut values = BTreeMap::new();

    for descriptor in schema {
        let value = descriptor.resolve(submitted.get(&descriptor.name));
        if !value.is_null() {
            values.insert(descriptor.name.clone(), value);
        }
    }

    let dropped = submitted
        .iter()
        .filter(|(key, _)| !schema.iter().any(|d| &d.name == *key))
        .count();
    if dropped > 0 {
        tracing::debug!("Dropped {dropped} parameter(s) not declared by the schema");
    }

    ParamMap::from(values)
}

/// Replaces a blob column on a form with its expanded parameter fields
///
/// Removes the raw `blob_field` control and appends one control per schema
/// descriptor into `tab`, each bound to `blob_field`. Returns the number of
/// fields added.
pub fn expand_into(
    form: &mut FormDescriptor,
    blob_field: &str,
    tab: &str,
    raw: &str,
    schema: Option<&[FieldDescriptor]>,
) -> usize {
    form.remove_by_name(blob_field);

    let fields = expand(raw, schema);
    let count = fields.len();
    for field in fields {
        form.add_field_to_tab(tab, FormField::param(blob_field, field));
    }
    count
}
