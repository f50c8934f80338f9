//! Property-based tests for the parameter expander
//!
//! Expanding stored parameters against a schema and collapsing the submitted
//! fields back must agree with each other for any input.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use tagmanager_core::params::{collapse, expand, DropdownOption, FieldDescriptor, ParamMap};
use tagmanager_core::provider::SnippetProvider;

use crate::fixtures::{MapTag, WeatherTag};

fn arb_city() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z -]{0,24}"
}

fn arb_style() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("road"), Just("satellite")]
}

fn arb_extra_key() -> impl Strategy<Value = String> {
    "x_[a-z]{1,8}"
}

fn arb_json_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z0-9 ]{0,12}".prop_map(Value::from),
    ]
}

/// Arbitrary stored blobs: valid objects with mixed values or plain garbage
fn arb_raw_params() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::btree_map("[a-z]{1,6}", arb_json_scalar(), 0..6)
            .prop_map(|map| serde_json::to_string(&map).unwrap()),
        ".{0,40}",
    ]
}

/// A schema covering every field kind
fn mixed_schema() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("title", "Title").with_default("untitled"),
        FieldDescriptor::text_area("body", "Body"),
        FieldDescriptor::number("limit", "Limit").with_default(10),
        FieldDescriptor::checkbox("enabled", "Enabled"),
        FieldDescriptor::dropdown(
            "theme",
            "Theme",
            vec![
                DropdownOption::new("light", "Light"),
                DropdownOption::new("dark", "Dark"),
            ],
        )
        .with_default("light"),
    ]
}

/// Stored blobs with a canonical value for every key of `mixed_schema`
/// plus keys the schema does not declare
fn arb_canonical_raw() -> impl Strategy<Value = (BTreeMap<String, Value>, String)> {
    (
        "[ -~]{0,20}",
        "[ -~\n]{0,40}",
        any::<i64>(),
        any::<bool>(),
        prop_oneof![Just("light"), Just("dark")],
        prop::collection::btree_map(arb_extra_key(), arb_json_scalar(), 0..4),
    )
        .prop_map(|(title, body, limit, enabled, theme, extras)| {
            let mut declared = BTreeMap::new();
            declared.insert("title".to_string(), json!(title));
            declared.insert("body".to_string(), json!(body));
            declared.insert("limit".to_string(), json!(limit));
            declared.insert("enabled".to_string(), json!(enabled));
            declared.insert("theme".to_string(), json!(theme));

            let mut stored = declared.clone();
            stored.extend(extras);
            let raw = serde_json::to_string(&stored).unwrap();
            (declared, raw)
        })
}

fn submitted_from(fields: &[tagmanager_core::params::EditableField]) -> ParamMap {
    fields
        .iter()
        .map(|f| (f.name.clone(), f.value.clone()))
        .collect()
}

fn schema_names(schema: &[FieldDescriptor]) -> Vec<&str> {
    schema.iter().map(|d| d.name.as_str()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Values saved through the form come back unchanged when it is rebuilt
    #[test]
    fn collapse_then_expand_preserves_values(city in arb_city(), days in 0i64..365) {
        let schema = WeatherTag.param_fields();
        let submitted = ParamMap::new().with("city", city.clone()).with("days", days);

        let stored = collapse(&schema, &submitted);
        let fields = expand(&stored, Some(&schema));

        prop_assert_eq!(fields.len(), 2);
        prop_assert_eq!(&fields[0].value, &json!(city));
        prop_assert_eq!(&fields[1].value, &json!(days));
    }

    /// Saving an unedited form reproduces every declared stored value
    #[test]
    fn expand_then_collapse_reproduces_stored_values((declared, raw) in arb_canonical_raw()) {
        let schema = mixed_schema();

        let fields = expand(&raw, Some(&schema));
        let stored = ParamMap::decode(&collapse(&schema, &submitted_from(&fields)));

        prop_assert_eq!(stored, ParamMap::from(declared));
    }

    /// Saving an unedited form does not change what it shows
    #[test]
    fn expand_collapse_is_idempotent(raw in arb_raw_params()) {
        let schema = MapTag.param_fields();

        let first = expand(&raw, Some(&schema));
        let stored = collapse(&schema, &submitted_from(&first));
        let second = expand(&stored, Some(&schema));

        prop_assert_eq!(first, second);
    }

    /// Expansion yields exactly one field per declared parameter, in order
    #[test]
    fn expand_follows_schema_order(raw in arb_raw_params()) {
        let schema = MapTag.param_fields();
        let fields = expand(&raw, Some(&schema));

        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        prop_assert_eq!(names, schema_names(&schema));
    }

    /// Without a schema nothing is expanded, whatever is stored
    #[test]
    fn expand_without_schema_is_empty(raw in arb_raw_params()) {
        prop_assert!(expand(&raw, None).is_empty());
    }

    /// Keys the schema does not declare never reach storage
    #[test]
    fn collapse_drops_undeclared_keys(
        style in arb_style(),
        extras in prop::collection::vec((arb_extra_key(), "[a-z]{0,8}"), 0..5),
    ) {
        let schema = MapTag.param_fields();
        let mut submitted = ParamMap::new().with("style", style);
        for (key, value) in extras {
            submitted.insert(key, value);
        }

        let stored = ParamMap::decode(&collapse(&schema, &submitted));
        let declared = schema_names(&schema);

        prop_assert!(stored.iter().all(|(key, _)| declared.contains(&key.as_str())));
        prop_assert_eq!(stored.get_str("style"), Some(style));
    }

    /// Dropdown values outside the options fall back to the default
    #[test]
    fn unknown_dropdown_value_uses_default(style in "[a-z]{1,10}") {
        prop_assume!(style != "road" && style != "satellite");
        let schema = MapTag.param_fields();

        let stored = collapse(&schema, &ParamMap::new().with("style", style));
        let fields = expand(&stored, Some(&schema));

        prop_assert_eq!(&fields[0].value, &json!("road"));
    }

    /// Checkbox values submitted as text are stored as booleans
    #[test]
    fn checkbox_text_is_coerced(on in any::<bool>()) {
        let schema = MapTag.param_fields();
        let text = if on { "on" } else { "off" };

        let stored = ParamMap::decode(&collapse(&schema, &ParamMap::new().with("zoom", text)));

        prop_assert_eq!(stored.get("zoom"), Some(&json!(on)));
    }
}
