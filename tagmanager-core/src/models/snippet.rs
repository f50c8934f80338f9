//! Snippet model: one configured tag bound to a provider.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{AppSettings, LabelSettings};
use crate::error::{ConfigError, ConfigResult, LabelError, ProviderResult, TagManagerError};
use crate::form::{FormDescriptor, FormField, FormSubmission};
use crate::params::{self, DropdownOption, FieldKind, ParamMap};
use crate::provider::{ProviderOutput, ProviderRegistry, SnippetProvider};

use super::SnippetStatus;

/// Title and summary shown for a snippet without a usable provider
pub const UNCONFIGURED_TITLE: &str = "(Unconfigured tag)";

/// Form field holding the provider identifier
pub const PROVIDER_FIELD: &str = "SnippetClass";
/// Form field holding the serialized parameters
pub const PARAMS_FIELD: &str = "SnippetParams";
/// Form field holding the status code
pub const ACTIVE_FIELD: &str = "Active";
/// Form field holding the sort order
pub const SORT_FIELD: &str = "Sort";

fn default_active() -> String {
    SnippetStatus::On.as_code().to_string()
}

/// A tag added to the site, with its provider parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Unique identifier for the snippet
    pub id: Uuid,
    /// Identifier of the provider supplying this snippet's behavior
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// Provider parameters as JSON text
    #[serde(default)]
    pub params: String,
    /// Stored status code (`on`, `off` or `partial`)
    #[serde(default = "default_active")]
    pub active: String,
    /// Sort order among sibling snippets (lower values appear first)
    #[serde(default)]
    pub sort_order: i32,
    /// Timestamp when the snippet was created
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last modification
    pub updated_at: DateTime<Utc>,
}

/// One row of the admin snippet listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetSummaryRow {
    /// Snippet identifier
    pub id: Uuid,
    /// "Tag" column: the provider summary
    pub tag: String,
    /// "Active" column: the status label
    pub active: String,
}

impl Snippet {
    /// Creates a new unconfigured snippet
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            provider_id: None,
            params: String::new(),
            active: default_active(),
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the provider for this snippet
    #[must_use]
    pub fn with_provider(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = Some(provider_id.into());
        self
    }

    /// Sets the parameters for this snippet
    #[must_use]
    pub fn with_params(mut self, params: &ParamMap) -> Self {
        self.params = params.encode();
        self
    }

    /// Sets the status for this snippet
    #[must_use]
    pub fn with_status(mut self, status: SnippetStatus) -> Self {
        self.active = status.as_code().to_string();
        self
    }

    /// Changes the provider
    pub fn set_provider(&mut self, provider_id: Option<String>) {
        self.provider_id = provider_id;
        self.touch();
    }

    /// Replaces the stored parameters
    pub fn set_params(&mut self, params: &ParamMap) {
        self.params = params.encode();
        self.touch();
    }

    /// Changes the status
    pub fn set_status(&mut self, status: SnippetStatus) {
        self.active = status.as_code().to_string();
        self.touch();
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Returns the decoded parameters
    ///
    /// Malformed stored text decodes to an empty mapping.
    #[must_use]
    pub fn param_map(&self) -> ParamMap {
        ParamMap::decode(&self.params)
    }

    /// Returns true if a provider identifier is set
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }

    /// Resolves the provider attached to this record
    #[must_use]
    pub fn provider(&self, registry: &ProviderRegistry) -> Option<Arc<dyn SnippetProvider>> {
        registry.resolve(self.provider_id.as_deref())
    }

    /// Returns the provider's title, or the unconfigured sentinel
    ///
    /// # Errors
    ///
    /// Propagates the provider's failure to compute its title.
    pub fn title(&self, registry: &ProviderRegistry) -> ProviderResult<String> {
        match self.provider(registry) {
            Some(provider) => provider.title(),
            None => Ok(UNCONFIGURED_TITLE.to_string()),
        }
    }

    /// Returns the provider's summary of this snippet's parameters
    ///
    /// Returns the unconfigured sentinel when no provider resolves.
    ///
    /// # Errors
    ///
    /// Propagates the provider's failure to summarize.
    pub fn summary(&self, registry: &ProviderRegistry) -> ProviderResult<String> {
        match self.provider(registry) {
            Some(provider) => provider.summary(&self.param_map()),
            None => Ok(UNCONFIGURED_TITLE.to_string()),
        }
    }

    /// Returns the markup produced by the provider
    ///
    /// `None` means "render nothing": no provider is configured.
    ///
    /// # Errors
    ///
    /// Propagates the provider's failure to produce output.
    pub fn snippets(&self, registry: &ProviderRegistry) -> ProviderResult<Option<ProviderOutput>> {
        render_with(self.provider(registry), &self.param_map())
    }

    /// Parses the stored status code
    ///
    /// # Errors
    ///
    /// Returns `LabelError::UnknownStatus` for codes outside `on`/`off`/`partial`.
    pub fn status(&self) -> Result<SnippetStatus, LabelError> {
        self.active.parse()
    }

    /// Returns the display label of the stored status
    ///
    /// # Errors
    ///
    /// Returns `LabelError::UnknownStatus` for codes outside `on`/`off`/`partial`.
    pub fn active_label(&self, labels: &LabelSettings) -> Result<String, LabelError> {
        let status = self.status()?;
        Ok(labels.label_for(status).to_string())
    }

    /// Returns the admin listing row for this snippet
    ///
    /// # Errors
    ///
    /// Fails if the provider cannot summarize or the status code is unknown.
    pub fn summary_row(
        &self,
        registry: &ProviderRegistry,
        labels: &LabelSettings,
    ) -> Result<SnippetSummaryRow, TagManagerError> {
        Ok(SnippetSummaryRow {
            id: self.id,
            tag: self.summary(registry)?,
            active: self.active_label(labels)?,
        })
    }

    /// Builds the form scaffolded from this record's columns
    #[must_use]
    pub fn scaffold_form(&self, settings: &AppSettings) -> FormDescriptor {
        let tab = settings.form.main_tab.as_str();
        let mut form = FormDescriptor::new();

        form.add_field_to_tab(
            tab,
            FormField::record(PROVIDER_FIELD, "Snippet class", FieldKind::Text)
                .with_value(self.provider_id.clone().unwrap_or_default()),
        );
        form.add_field_to_tab(
            tab,
            FormField::record(PARAMS_FIELD, "Snippet params", FieldKind::TextArea)
                .with_value(self.params.clone()),
        );
        let codes = SnippetStatus::all()
            .iter()
            .map(|s| DropdownOption::new(s.as_code(), s.as_code()))
            .collect();
        form.add_field_to_tab(
            tab,
            FormField::record(ACTIVE_FIELD, "Active", FieldKind::Dropdown { options: codes })
                .with_value(self.active.clone()),
        );
        form.add_field_to_tab(
            tab,
            FormField::record(SORT_FIELD, "Sort", FieldKind::Number).with_value(self.sort_order),
        );

        form
    }

    /// Builds the admin edit form
    ///
    /// Starts from the scaffolded form, swaps in a tag type dropdown, labels
    /// the status codes, hides the machine-managed sort order and expands
    /// the current provider's parameters.
    #[must_use]
    pub fn build_edit_form(
        &self,
        registry: &ProviderRegistry,
        settings: &AppSettings,
    ) -> FormDescriptor {
        let tab = settings.form.main_tab.as_str();
        let mut form = self.scaffold_form(settings);

        let types = registry
            .list_providers()
            .into_iter()
            .map(|info| DropdownOption::new(info.id, info.title))
            .collect();
        form.add_field_to_tab(
            tab,
            FormField::record(PROVIDER_FIELD, "Tag type", FieldKind::Dropdown { options: types })
                .with_value(self.provider_id.clone().unwrap_or_default())
                .with_empty_string(settings.form.provider_empty_string.clone()),
        );

        if let Some(active) = form.data_field_by_name_mut(ACTIVE_FIELD) {
            active.set_source(settings.labels.source());
        }

        form.remove_by_name(SORT_FIELD);

        let schema = self.provider(registry).map(|p| p.param_fields());
        params::expand_into(&mut form, PARAMS_FIELD, tab, &self.params, schema.as_deref());

        form.require(PROVIDER_FIELD);
        form
    }

    /// Writes a submitted edit form back into this record
    ///
    /// Parameters are collapsed against the schema of the submitted
    /// provider when the submission carries them; otherwise the stored
    /// parameters are kept. The record is left untouched if validation fails.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no provider is chosen or the
    /// status code is unknown.
    pub fn apply_form(
        &mut self,
        submission: &FormSubmission,
        registry: &ProviderRegistry,
    ) -> ConfigResult<()> {
        let mut updated = self.clone();

        if submission.value(PROVIDER_FIELD).is_some() {
            updated.provider_id = submission
                .text(PROVIDER_FIELD)
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty());
        }

        if let Some(code) = submission.text(ACTIVE_FIELD) {
            code.parse::<SnippetStatus>()
                .map_err(|e| ConfigError::Validation {
                    field: ACTIVE_FIELD.to_string(),
                    reason: e.to_string(),
                })?;
            updated.active = code;
        }

        if submission.has_params(PARAMS_FIELD) {
            if let Some(provider) = updated.provider(registry) {
                let submitted = submission.params(PARAMS_FIELD);
                updated.params = params::collapse(&provider.param_fields(), &submitted);
            }
        }

        updated.validate()?;
        updated.touch();
        *self = updated;
        Ok(())
    }

    /// Validates the record for saving
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no provider is set.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.is_configured() {
            return Err(ConfigError::Validation {
                field: PROVIDER_FIELD.to_string(),
                reason: "Tag type is required".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Snippet {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces provider output for a parameter set, or nothing without a provider
pub(crate) fn render_with(
    provider: Option<Arc<dyn SnippetProvider>>,
    params: &ParamMap,
) -> ProviderResult<Option<ProviderOutput>> {
    match provider {
        Some(provider) => provider.snippets(params).map(Some),
        None => Ok(None),
    }
}
