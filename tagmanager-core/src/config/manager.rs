//! Configuration manager for TOML file operations
//!
//! This module provides the `ConfigManager` which handles loading and saving
//! the snippet store, page associations and application settings.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::models::{Snippet, SnippetPage};

use super::settings::AppSettings;

/// File names for configuration files
const SNIPPETS_FILE: &str = "snippets.toml";
const SNIPPET_PAGES_FILE: &str = "snippet_pages.toml";
const CONFIG_FILE: &str = "config.toml";

/// Wrapper for serializing a list of snippets
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct SnippetsFile {
    #[serde(default)]
    snippets: Vec<Snippet>,
}

/// Wrapper for serializing a list of page associations
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct SnippetPagesFile {
    #[serde(default)]
    pages: Vec<SnippetPage>,
}

/// Configuration manager for the tag manager
///
/// Handles loading and saving configuration files in TOML format.
/// Configuration is stored in `~/.config/tagmanager/` by default.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Base directory for configuration files
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new `ConfigManager` with the default configuration directory
    ///
    /// The default directory is `~/.config/tagmanager/`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::from("~/.config")))?
            .join("tagmanager");
        Ok(Self { config_dir })
    }

    /// Creates a new `ConfigManager` with a custom configuration directory
    ///
    /// This is useful for testing or non-standard configurations.
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the configuration directory path
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Ensures the configuration directory exists
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_config_dir(&self) -> ConfigResult<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).map_err(|e| {
                ConfigError::Write(format!(
                    "Failed to create config directory {}: {}",
                    self.config_dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    // ========== Snippets ==========

    /// Loads snippets from the configuration file
    ///
    /// Returns an empty vector if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_snippets(&self) -> ConfigResult<Vec<Snippet>> {
        let path = self.config_dir.join(SNIPPETS_FILE);
        Self::load_toml_file::<SnippetsFile>(&path).map(|f| f.snippets)
    }

    /// Saves snippets to the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_snippets(&self, snippets: &[Snippet]) -> ConfigResult<()> {
        self.ensure_config_dir()?;
        let path = self.config_dir.join(SNIPPETS_FILE);
        let file = SnippetsFile {
            snippets: snippets.to_vec(),
        };
        Self::save_toml_file(&path, &file)
    }

    // ========== Page associations ==========

    /// Loads snippet-page associations from the configuration file
    ///
    /// Returns an empty vector if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_snippet_pages(&self) -> ConfigResult<Vec<SnippetPage>> {
        let path = self.config_dir.join(SNIPPET_PAGES_FILE);
        Self::load_toml_file::<SnippetPagesFile>(&path).map(|f| f.pages)
    }

    /// Saves snippet-page associations to the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_snippet_pages(&self, pages: &[SnippetPage]) -> ConfigResult<()> {
        self.ensure_config_dir()?;
        let path = self.config_dir.join(SNIPPET_PAGES_FILE);
        let file = SnippetPagesFile {
            pages: pages.to_vec(),
        };
        Self::save_toml_file(&path, &file)
    }

    // ========== Settings ==========

    /// Loads application settings from the configuration file
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_settings(&self) -> ConfigResult<AppSettings> {
        let path = self.config_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(AppSettings::default());
        }
        Self::load_toml_file(&path)
    }

    /// Saves application settings to the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_settings(&self, settings: &AppSettings) -> ConfigResult<()> {
        self.ensure_config_dir()?;
        let path = self.config_dir.join(CONFIG_FILE);
        Self::save_toml_file(&path, settings)
    }

    // ========== Generic TOML Operations ==========

    /// Loads and parses a TOML file
    ///
    /// Returns the default value if the file doesn't exist.
    fn load_toml_file<T>(path: &Path) -> ConfigResult<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        if !path.exists() {
            return Ok(T::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read {}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| {
            ConfigError::Deserialize(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Saves data to a TOML file
    fn save_toml_file<T>(path: &Path, data: &T) -> ConfigResult<()>
    where
        T: serde::Serialize,
    {
        let content = toml::to_string_pretty(data)
            .map_err(|e| ConfigError::Serialize(format!("Failed to serialize: {e}")))?;

        fs::write(path, content)
            .map_err(|e| ConfigError::Write(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }

    // ========== Validation ==========

    /// Validates a snippet before it is saved
    ///
    /// # Errors
    ///
    /// Returns an error if the snippet has no provider.
    pub fn validate_snippet(snippet: &Snippet) -> ConfigResult<()> {
        snippet.validate()
    }

    /// Validates a page association before it is saved
    ///
    /// # Errors
    ///
    /// Returns an error if either reference is nil.
    pub fn validate_snippet_page(page: &SnippetPage) -> ConfigResult<()> {
        if page.snippet_id.is_nil() {
            return Err(ConfigError::Validation {
                field: "snippet_id".to_string(),
                reason: "Association must reference a snippet".to_string(),
            });
        }

        if page.page_id.is_nil() {
            return Err(ConfigError::Validation {
                field: "page_id".to_string(),
                reason: "Association must reference a page".to_string(),
            });
        }

        Ok(())
    }

    /// Validates all snippets and returns errors for invalid ones
    #[must_use]
    pub fn validate_snippets(snippets: &[Snippet]) -> Vec<(usize, ConfigError)> {
        snippets
            .iter()
            .enumerate()
            .filter_map(|(i, snippet)| Self::validate_snippet(snippet).err().map(|e| (i, e)))
            .collect()
    }
}
