//! Property-based tests for configuration persistence

use proptest::prelude::*;
use tagmanager_core::config::{AppSettings, ConfigManager};
use tagmanager_core::models::{Snippet, SnippetStatus};
use tagmanager_core::params::ParamMap;
use tempfile::TempDir;

fn arb_status() -> impl Strategy<Value = SnippetStatus> {
    prop_oneof![
        Just(SnippetStatus::On),
        Just(SnippetStatus::Off),
        Just(SnippetStatus::Partial),
    ]
}

fn arb_snippet() -> impl Strategy<Value = Snippet> {
    (
        "[A-Z][A-Za-z]{2,12}",
        prop::collection::btree_map("[a-z]{1,6}", "[ -~]{0,16}", 0..4),
        arb_status(),
    )
        .prop_map(|(provider, params, status)| {
            let params: ParamMap = params
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::from(v)))
                .collect();
            Snippet::new()
                .with_provider(provider)
                .with_params(&params)
                .with_status(status)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Stored snippets load back identical, including parameter text
    #[test]
    fn snippets_survive_save_and_load(snippets in prop::collection::vec(arb_snippet(), 0..5)) {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_config_dir(temp_dir.path().to_path_buf());

        manager.save_snippets(&snippets).unwrap();
        let loaded = manager.load_snippets().unwrap();

        prop_assert_eq!(loaded, snippets);
    }
}

#[test]
fn partial_settings_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("config.toml"),
        "[labels]\npartial = \"Some pages\"\n",
    )
    .unwrap();
    let manager = ConfigManager::with_config_dir(temp_dir.path().to_path_buf());

    let settings = manager.load_settings().unwrap();
    let defaults = AppSettings::default();

    assert_eq!(settings.labels.partial, "Some pages");
    assert_eq!(settings.labels.enabled, defaults.labels.enabled);
    assert_eq!(settings.form, defaults.form);
    assert_eq!(settings.logging, defaults.logging);
}
