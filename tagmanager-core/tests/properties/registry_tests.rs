//! Property-based tests for the provider registry

use std::sync::Arc;

use proptest::prelude::*;
use tagmanager_core::provider::{ProviderRegistry, SnippetProvider};

use crate::fixtures::{registry_with_broken, sample_registry, BrokenTag, MapTag, WeatherTag};

fn arb_unknown_id() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,16}".prop_filter("must not name a fixture provider", |id| {
        !["WeatherTag", "MapTag", "BrokenTag"].contains(&id.as_str())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Identifiers that were never registered resolve to nothing
    #[test]
    fn unknown_ids_do_not_resolve(id in arb_unknown_id()) {
        let registry = sample_registry();
        prop_assert!(registry.get(&id).is_none());
        prop_assert!(registry.resolve(Some(&id)).is_none());
    }

    /// Blank identifiers resolve to nothing
    #[test]
    fn blank_ids_do_not_resolve(id in "[ \t]{0,5}") {
        prop_assert!(sample_registry().resolve(Some(&id)).is_none());
    }
}

#[test]
fn registered_ids_resolve() {
    let registry = sample_registry();

    let weather = registry.resolve(Some("WeatherTag")).unwrap();
    assert_eq!(weather.provider_id(), "WeatherTag");
    assert!(registry.resolve(None).is_none());
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = sample_registry();
    assert!(registry.register(Arc::new(WeatherTag)).is_err());
    assert_eq!(registry.len(), 2);
}

#[test]
fn listing_skips_failing_providers() {
    let registry = registry_with_broken();
    assert_eq!(registry.len(), 3);

    let ids: Vec<String> = registry
        .list_providers()
        .into_iter()
        .map(|info| info.id)
        .collect();
    assert_eq!(ids, vec!["MapTag".to_string(), "WeatherTag".to_string()]);
}

#[test]
fn listing_uses_provider_titles() {
    let registry = ProviderRegistry::new()
        .with_provider(Arc::new(MapTag))
        .unwrap()
        .with_provider(Arc::new(BrokenTag))
        .unwrap();

    let infos = registry.list_providers();
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].title, "Map");
}
