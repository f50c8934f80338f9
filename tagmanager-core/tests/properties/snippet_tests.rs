//! Property-based tests for snippet records and page associations
//!
//! Covers the unconfigured sentinel, tolerance of malformed stored
//! parameters, status labels and page override precedence.

use proptest::prelude::*;
use serde_json::{json, Value};
use tagmanager_core::config::{AppSettings, LabelSettings};
use tagmanager_core::form::FormSubmission;
use tagmanager_core::models::{
    Snippet, SnippetPage, SnippetStatus, PARAMS_FIELD, PROVIDER_FIELD, UNCONFIGURED_TITLE,
};
use tagmanager_core::params::ParamMap;
use tagmanager_core::provider::SnippetPosition;
use uuid::Uuid;

use crate::fixtures::{registry_with_broken, sample_registry};

fn arb_unknown_provider() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[A-Z][a-z]{2,10}Gone".prop_map(Some),
    ]
}

fn arb_status() -> impl Strategy<Value = SnippetStatus> {
    prop_oneof![
        Just(SnippetStatus::On),
        Just(SnippetStatus::Off),
        Just(SnippetStatus::Partial),
    ]
}

fn arb_label() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,20}"
}

fn arb_override() -> impl Strategy<Value = ParamMap> {
    prop::collection::btree_map("[a-z]{1,6}", "[a-z]{1,8}", 1..5)
        .prop_map(|map| map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Snippets without a resolvable provider show the sentinel and render nothing
    #[test]
    fn unconfigured_snippets_use_sentinel(provider in arb_unknown_provider()) {
        let registry = sample_registry();
        let mut snippet = Snippet::new();
        snippet.provider_id = provider;

        prop_assert_eq!(snippet.title(&registry).unwrap(), UNCONFIGURED_TITLE);
        prop_assert_eq!(snippet.summary(&registry).unwrap(), UNCONFIGURED_TITLE);
        prop_assert!(snippet.snippets(&registry).unwrap().is_none());
    }

    /// Stored parameter text never makes rendering fail
    #[test]
    fn malformed_params_render_with_defaults(raw in ".{0,40}") {
        let registry = sample_registry();
        let mut snippet = Snippet::new().with_provider("WeatherTag");
        snippet.params = raw;

        let output = snippet.snippets(&registry).unwrap();
        prop_assert!(output.is_some());
        prop_assert!(snippet.summary(&registry).is_ok());
    }

    /// Every stored status maps to its configured label
    #[test]
    fn status_labels_follow_settings(
        status in arb_status(),
        enabled in arb_label(),
        disabled in arb_label(),
        partial in arb_label(),
    ) {
        let labels = LabelSettings {
            enabled: enabled.clone(),
            disabled: disabled.clone(),
            partial: partial.clone(),
        };
        let snippet = Snippet::new().with_status(status);

        let expected = match status {
            SnippetStatus::On => enabled,
            SnippetStatus::Off => disabled,
            SnippetStatus::Partial => partial,
        };
        prop_assert_eq!(snippet.active_label(&labels).unwrap(), expected);
    }

    /// Status codes outside the enumeration fail lookup
    #[test]
    fn unknown_status_codes_fail(code in "[a-z]{1,10}") {
        prop_assume!(!["on", "off", "partial"].contains(&code.as_str()));
        let mut snippet = Snippet::new();
        snippet.active = code;

        prop_assert!(snippet.active_label(&LabelSettings::default()).is_err());
    }

    /// A non-empty page override replaces the snippet parameters entirely
    #[test]
    fn page_override_is_exclusive(
        base in arb_override(),
        overrides in arb_override(),
    ) {
        let snippet = Snippet::new().with_provider("WeatherTag").with_params(&base);
        let page = SnippetPage::new(snippet.id, Uuid::new_v4()).with_params(&overrides);

        prop_assert_eq!(page.effective_params(&snippet), overrides);
    }

    /// Without an override the snippet parameters are used as stored
    #[test]
    fn missing_override_uses_snippet_params(base in arb_override()) {
        let snippet = Snippet::new().with_provider("WeatherTag").with_params(&base);
        let page = SnippetPage::new(snippet.id, Uuid::new_v4());

        prop_assert_eq!(page.effective_params(&snippet), base);
    }
}

#[test]
fn weather_widget_scenario() {
    let registry = sample_registry();
    let settings = AppSettings::default();

    let mut snippet = Snippet::new();
    let mut submission = FormSubmission::new();
    submission.set(PROVIDER_FIELD, "WeatherTag");
    submission.set_param(PARAMS_FIELD, "city", "Lyon");
    submission.set_param(PARAMS_FIELD, "days", "5");
    snippet.apply_form(&submission, &registry).unwrap();

    assert_eq!(snippet.params, r#"{"city":"Lyon","days":5}"#);
    assert_eq!(snippet.summary(&registry).unwrap(), "Weather for Lyon");

    let form = snippet.build_edit_form(&registry, &settings);
    assert_eq!(
        form.param_field(PARAMS_FIELD, "city").unwrap().value,
        json!("Lyon")
    );

    let page = SnippetPage::new(snippet.id, Uuid::new_v4())
        .with_params(&ParamMap::new().with("city", "Paris"));
    let output = page.snippets(&snippet, &registry).unwrap().unwrap();
    assert_eq!(
        output.get(SnippetPosition::EndBody),
        Some("<div class=\"weather\" data-city=\"Paris\"></div>")
    );
    assert!(output.get(SnippetPosition::EndHead).is_some());
    assert!(output.get(SnippetPosition::StartHead).is_none());
}

#[test]
fn failing_provider_errors_reach_caller() {
    let registry = registry_with_broken();
    let snippet = Snippet::new().with_provider("BrokenTag");

    assert!(snippet.title(&registry).is_err());
    assert!(snippet.snippets(&registry).is_err());
    assert!(snippet
        .summary_row(&registry, &LabelSettings::default())
        .is_err());
}

#[test]
fn apply_form_without_provider_is_rejected() {
    let registry = sample_registry();
    let mut snippet = Snippet::new();
    let before = snippet.clone();

    let mut submission = FormSubmission::new();
    submission.set(PROVIDER_FIELD, "");
    assert!(snippet.apply_form(&submission, &registry).is_err());
    assert_eq!(snippet, before);
}
