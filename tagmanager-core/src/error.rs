//! Error types for the tag manager
//!
//! This module defines the error types used throughout the crate: store and
//! configuration failures, provider failures, status label lookups and
//! parameter schema problems.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for tag manager operations
#[derive(Debug, Error)]
pub enum TagManagerError {
    /// Configuration or store errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised by a snippet provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Status label lookup errors
    #[error("Label error: {0}")]
    Label(#[from] LabelError),

    /// Parameter schema errors
    #[error("Parameter error: {0}")]
    Param(#[from] ParamError),
}

/// Errors related to configuration files and the record store
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Invalid value on a record or setting
    #[error("Invalid configuration value for {field}: {reason}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// The reason for validation failure
        reason: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to write configuration file
    #[error("Failed to write configuration: {0}")]
    Write(String),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// Failed to deserialize configuration
    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(String),
}

/// Errors raised by snippet providers or while registering them
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider failed while computing its title, summary or output
    #[error("Provider {provider} failed: {reason}")]
    Failed {
        /// Identifier of the failing provider
        provider: String,
        /// Description of the failure
        reason: String,
    },

    /// A provider with the same identifier is already registered
    #[error("Provider already registered: {0}")]
    AlreadyRegistered(String),

    /// The provider declares an unusable parameter schema
    #[error("Invalid parameter schema for {provider}: {source}")]
    InvalidSchema {
        /// Identifier of the offending provider
        provider: String,
        /// The schema problem
        #[source]
        source: ParamError,
    },
}

impl ProviderError {
    /// Convenience constructor for provider runtime failures
    pub fn failed(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while mapping a stored status code to its label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// The stored status code is not one of `on`, `off` or `partial`
    #[error("Unknown status code: {0:?}")]
    UnknownStatus(String),
}

/// Errors in a provider-declared parameter schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// Field name is not a valid identifier
    #[error("Invalid field name: {0:?}")]
    InvalidName(String),

    /// Two descriptors share a name
    #[error("Duplicate field name: {0}")]
    DuplicateName(String),

    /// Dropdown default is not one of its options
    #[error("Default for {field} is not one of its options")]
    DefaultNotInOptions {
        /// The dropdown field
        field: String,
    },
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for provider operations
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Result type alias for schema operations
pub type ParamResult<T> = std::result::Result<T, ParamError>;
