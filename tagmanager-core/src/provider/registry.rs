//! Provider registry for looking up snippet providers by ID

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};
use crate::params::validate_schema;

use super::SnippetProvider;

/// A provider as shown in the tag type dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider identifier
    pub id: String,
    /// Human-readable title
    pub title: String,
}

/// Registry for snippet providers
///
/// The `ProviderRegistry` is filled once at startup with every available
/// provider and then passed to snippet operations. Lookups and listings are
/// ordered by provider identifier.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn SnippetProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::AlreadyRegistered` if the identifier is taken,
    /// or `ProviderError::InvalidSchema` if the provider's parameter schema is
    /// unusable.
    pub fn register(&mut self, provider: Arc<dyn SnippetProvider>) -> ProviderResult<()> {
        let id = provider.provider_id().to_string();
        if self.providers.contains_key(&id) {
            return Err(ProviderError::AlreadyRegistered(id));
        }

        validate_schema(&provider.param_fields()).map_err(|source| {
            ProviderError::InvalidSchema {
                provider: id.clone(),
                source,
            }
        })?;

        tracing::debug!(provider = %id, "Registered snippet provider");
        self.providers.insert(id, provider);
        Ok(())
    }

    /// Registers a provider and returns the registry
    ///
    /// # Errors
    ///
    /// Same as [`ProviderRegistry::register`].
    pub fn with_provider(mut self, provider: Arc<dyn SnippetProvider>) -> ProviderResult<Self> {
        self.register(provider)?;
        Ok(self)
    }

    /// Gets a provider by its identifier
    ///
    /// # Returns
    /// The provider if found, or `None` if not registered
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn SnippetProvider>> {
        self.providers.get(id).cloned()
    }

    /// Resolves the provider referenced by a stored identifier
    ///
    /// Empty identifiers resolve to nothing. Identifiers that no longer
    /// match a registered provider also resolve to nothing, with a warning.
    #[must_use]
    pub fn resolve(&self, id: Option<&str>) -> Option<Arc<dyn SnippetProvider>> {
        let id = id.map(str::trim).filter(|id| !id.is_empty())?;
        let provider = self.get(id);
        if provider.is_none() {
            tracing::warn!(provider = %id, "Snippet references an unregistered provider");
        }
        provider
    }

    /// Lists every provider with its title
    ///
    /// Providers whose title cannot be computed are left out and logged, so
    /// one broken provider does not make the edit form unusable.
    #[must_use]
    pub fn list_providers(&self) -> Vec<ProviderInfo> {
        self.providers
            .iter()
            .filter_map(|(id, provider)| match provider.title() {
                Ok(title) => Some(ProviderInfo {
                    id: id.clone(),
                    title,
                }),
                Err(e) => {
                    tracing::warn!(provider = %id, "Excluding provider from listing: {e}");
                    None
                }
            })
            .collect()
    }

    /// Returns all registered provider IDs
    #[must_use]
    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    /// Returns the number of registered providers
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no providers are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.provider_ids())
            .finish()
    }
}
