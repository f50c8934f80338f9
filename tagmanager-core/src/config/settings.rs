//! Application settings model
//!
//! This module defines the application-wide settings stored in config.toml.

use serde::{Deserialize, Serialize};

use crate::models::SnippetStatus;
use crate::params::DropdownOption;

/// Application-wide settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Display labels for snippet statuses
    #[serde(default)]
    pub labels: LabelSettings,
    /// Edit form settings
    #[serde(default)]
    pub form: FormSettings,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Display labels for the stored status codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSettings {
    /// Label for `on`
    #[serde(default = "default_enabled_label")]
    pub enabled: String,
    /// Label for `off`
    #[serde(default = "default_disabled_label")]
    pub disabled: String,
    /// Label for `partial`
    #[serde(default = "default_partial_label")]
    pub partial: String,
}

fn default_enabled_label() -> String {
    "Enabled".to_string()
}

fn default_disabled_label() -> String {
    "Disabled".to_string()
}

fn default_partial_label() -> String {
    "Partially enabled".to_string()
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled_label(),
            disabled: default_disabled_label(),
            partial: default_partial_label(),
        }
    }
}

impl LabelSettings {
    /// Returns the label for a status
    #[must_use]
    pub fn label_for(&self, status: SnippetStatus) -> &str {
        match status {
            SnippetStatus::On => &self.enabled,
            SnippetStatus::Off => &self.disabled,
            SnippetStatus::Partial => &self.partial,
        }
    }

    /// Returns the status dropdown source: stored code to label
    #[must_use]
    pub fn source(&self) -> Vec<DropdownOption> {
        SnippetStatus::all()
            .iter()
            .map(|status| DropdownOption::new(status.as_code(), self.label_for(*status)))
            .collect()
    }
}

/// Edit form settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSettings {
    /// Tab receiving the provider selector and parameter fields
    #[serde(default = "default_main_tab")]
    pub main_tab: String,
    /// Placeholder option of the tag type dropdown
    #[serde(default = "default_provider_empty_string")]
    pub provider_empty_string: String,
}

fn default_main_tab() -> String {
    "Root.Main".to_string()
}

fn default_provider_empty_string() -> String {
    "(Choose tag type)".to_string()
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            main_tab: default_main_tab(),
            provider_empty_string: default_provider_empty_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Install a log subscriber at startup
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_filter")]
    pub filter: String,
}

const fn default_true() -> bool {
    true
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            filter: default_filter(),
        }
    }
}
