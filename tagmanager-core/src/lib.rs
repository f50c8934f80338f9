//! `TagManager` Core Library
//!
//! This crate provides the core functionality for the tag manager: a registry
//! of snippet providers, the parameter expander that turns a provider's schema
//! into editable form fields, snippet records with their page associations,
//! and TOML-backed persistence.

pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod models;
pub mod params;
pub mod provider;
pub mod snippet;

pub use config::{AppSettings, ConfigManager, FormSettings, LabelSettings, LoggingSettings};
pub use error::{
    ConfigError, ConfigResult, LabelError, ParamError, ParamResult, ProviderError, ProviderResult,
    TagManagerError,
};
pub use form::{FieldBinding, FormDescriptor, FormField, FormSubmission, FormTab};
pub use logging::init_logging;
pub use models::{Snippet, SnippetPage, SnippetStatus, SnippetSummaryRow, UNCONFIGURED_TITLE};
pub use params::{
    collapse, expand, DropdownOption, EditableField, FieldDescriptor, FieldKind, ParamMap,
};
pub use provider::{
    ProviderInfo, ProviderOutput, ProviderRegistry, SnippetPosition, SnippetProvider,
};
pub use snippet::SnippetManager;
