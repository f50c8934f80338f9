//! Association between a snippet and a content page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppSettings;
use crate::error::{ConfigError, ConfigResult, ProviderResult};
use crate::form::{FormDescriptor, FormSubmission};
use crate::params::{self, ParamMap};
use crate::provider::{ProviderOutput, ProviderRegistry};

use super::snippet::{render_with, Snippet, PARAMS_FIELD, PROVIDER_FIELD};

/// Attaches a snippet to one page, optionally with page-specific parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetPage {
    /// Unique identifier for the association
    pub id: Uuid,
    /// The attached snippet
    pub snippet_id: Uuid,
    /// The content page
    pub page_id: Uuid,
    /// Override parameters as JSON text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    /// Timestamp when the association was created
    pub created_at: DateTime<Utc>,
}

impl SnippetPage {
    /// Creates an association without overrides
    #[must_use]
    pub fn new(snippet_id: Uuid, page_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            snippet_id,
            page_id,
            params: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the override parameters
    #[must_use]
    pub fn with_params(mut self, params: &ParamMap) -> Self {
        self.set_params(Some(params));
        self
    }

    /// Replaces or clears the override parameters
    pub fn set_params(&mut self, params: Option<&ParamMap>) {
        self.params = params.map(ParamMap::encode);
    }

    /// Returns the decoded override, if present and non-empty
    #[must_use]
    pub fn override_params(&self) -> Option<ParamMap> {
        self.params
            .as_deref()
            .map(ParamMap::decode)
            .filter(|params| !params.is_empty())
    }

    /// Returns the parameters used when rendering `snippet` on this page
    ///
    /// A non-empty override replaces the snippet's parameters entirely;
    /// otherwise the snippet's own parameters are used as stored.
    #[must_use]
    pub fn effective_params(&self, snippet: &Snippet) -> ParamMap {
        if snippet.id != self.snippet_id {
            tracing::warn!(
                association = %self.id,
                snippet = %snippet.id,
                "Resolving parameters against a snippet this association does not reference"
            );
        }
        self.override_params()
            .unwrap_or_else(|| snippet.param_map())
    }

    /// Returns the markup for `snippet` on this page
    ///
    /// `None` means the snippet has no provider and nothing is rendered.
    ///
    /// # Errors
    ///
    /// Propagates the provider's failure to produce output.
    pub fn snippets(
        &self,
        snippet: &Snippet,
        registry: &ProviderRegistry,
    ) -> ProviderResult<Option<ProviderOutput>> {
        render_with(snippet.provider(registry), &self.effective_params(snippet))
    }

    /// Builds the form editing this page's override parameters
    ///
    /// Fields are pre-filled from the override, falling back to the
    /// provider defaults rather than the snippet's own values.
    #[must_use]
    pub fn build_edit_form(
        &self,
        snippet: &Snippet,
        registry: &ProviderRegistry,
        settings: &AppSettings,
    ) -> FormDescriptor {
        let mut form = FormDescriptor::new();
        let schema = snippet.provider(registry).map(|p| p.param_fields());
        params::expand_into(
            &mut form,
            PARAMS_FIELD,
            &settings.form.main_tab,
            self.params.as_deref().unwrap_or_default(),
            schema.as_deref(),
        );
        form
    }

    /// Writes a submitted override form back into this association
    ///
    /// An empty submission clears the override.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the snippet has no usable
    /// provider. The override is left unchanged in that case.
    pub fn apply_form(
        &mut self,
        submission: &FormSubmission,
        snippet: &Snippet,
        registry: &ProviderRegistry,
    ) -> ConfigResult<()> {
        let Some(provider) = snippet.provider(registry) else {
            return Err(ConfigError::Validation {
                field: PROVIDER_FIELD.to_string(),
                reason: format!("Snippet {} has no usable tag type", snippet.id),
            });
        };

        let submitted = submission.params(PARAMS_FIELD);
        if submitted.is_empty() {
            self.params = None;
            return Ok(());
        }

        let collapsed = params::collapse_map(&provider.param_fields(), &submitted);
        self.set_params(Some(&collapsed));
        Ok(())
    }
}
