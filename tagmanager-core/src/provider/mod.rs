//! Snippet providers
//!
//! This module provides the `SnippetProvider` trait that pluggable tag types
//! implement, the [`ProviderOutput`] they render, and the registry that
//! makes them available by identifier.

mod output;
mod registry;

pub use output::{ProviderOutput, SnippetPosition};
pub use registry::{ProviderInfo, ProviderRegistry};

use crate::error::ProviderResult;
use crate::params::{FieldDescriptor, ParamMap};

/// Core trait for all snippet providers
///
/// A provider supplies the behavior of a snippet: its title, the parameters
/// an editor can configure, a one-line summary of a configuration and the
/// markup injected into pages.
pub trait SnippetProvider: Send + Sync {
    /// Returns the stable identifier stored on snippet records
    fn provider_id(&self) -> &str;

    /// Returns the human-readable tag type name
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the title cannot be computed
    fn title(&self) -> ProviderResult<String>;

    /// Returns the parameter schema shown in the edit form
    fn param_fields(&self) -> Vec<FieldDescriptor>;

    /// Returns a short description of a configuration for admin listings
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the summary cannot be computed
    fn summary(&self, params: &ParamMap) -> ProviderResult<String>;

    /// Produces the markup to inject for a configuration
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the output cannot be produced
    fn snippets(&self, params: &ParamMap) -> ProviderResult<ProviderOutput>;
}
