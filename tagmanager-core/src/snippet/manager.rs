//! Snippet manager for CRUD operations
//!
//! This module provides the `SnippetManager` which handles creating, reading,
//! updating, ordering and deleting snippets and their page associations, with
//! persistence through `ConfigManager`.

use std::collections::HashMap;

use uuid::Uuid;

use crate::config::ConfigManager;
use crate::error::{ConfigError, ConfigResult, ProviderResult};
use crate::models::{Snippet, SnippetPage};
use crate::params::ParamMap;
use crate::provider::{ProviderOutput, ProviderRegistry};

/// Manager for snippet and association CRUD operations
///
/// Provides in-memory storage with persistence through `ConfigManager`.
/// Listings are ordered by each snippet's sort order.
#[derive(Debug)]
pub struct SnippetManager {
    /// In-memory snippet storage indexed by ID
    snippets: HashMap<Uuid, Snippet>,
    /// In-memory association storage indexed by ID
    pages: HashMap<Uuid, SnippetPage>,
    /// Configuration manager for persistence
    config_manager: ConfigManager,
}

impl SnippetManager {
    /// Creates a new `SnippetManager` with the given `ConfigManager`
    ///
    /// Loads existing snippets and associations from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if loading from storage fails.
    pub fn new(config_manager: ConfigManager) -> ConfigResult<Self> {
        let snippets = config_manager
            .load_snippets()?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let pages = config_manager
            .load_snippet_pages()?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(Self {
            snippets,
            pages,
            config_manager,
        })
    }

    // ========== Snippet CRUD Operations ==========

    /// Stores a new snippet after the current last one and persists it
    ///
    /// # Returns
    ///
    /// The UUID of the stored snippet
    ///
    /// # Errors
    ///
    /// Returns an error if the snippet has no provider, its ID is already
    /// taken, or persistence fails.
    pub fn create_snippet(&mut self, mut snippet: Snippet) -> ConfigResult<Uuid> {
        ConfigManager::validate_snippet(&snippet)?;

        if self.snippets.contains_key(&snippet.id) {
            return Err(ConfigError::Validation {
                field: "id".to_string(),
                reason: format!("Snippet with ID {} already exists", snippet.id),
            });
        }

        snippet.sort_order = self.next_sort_order();
        let id = snippet.id;
        self.snippets.insert(id, snippet);
        self.persist_snippets()?;

        tracing::debug!(snippet = %id, "Created snippet");
        Ok(id)
    }

    /// Updates an existing snippet
    ///
    /// Preserves the original ID, creation time and sort order, and stamps
    /// the modification time.
    ///
    /// # Errors
    ///
    /// Returns an error if the snippet doesn't exist, validation fails,
    /// or persistence fails.
    pub fn update_snippet(&mut self, id: Uuid, mut updated: Snippet) -> ConfigResult<()> {
        let Some(existing) = self.snippets.get(&id) else {
            return Err(not_found("Snippet", id));
        };

        updated.id = id;
        updated.created_at = existing.created_at;
        updated.sort_order = existing.sort_order;
        ConfigManager::validate_snippet(&updated)?;
        updated.touch();

        self.snippets.insert(id, updated);
        self.persist_snippets()
    }

    /// Deletes a snippet and its page associations
    ///
    /// # Errors
    ///
    /// Returns an error if the snippet doesn't exist or persistence fails.
    pub fn delete_snippet(&mut self, id: Uuid) -> ConfigResult<()> {
        if self.snippets.remove(&id).is_none() {
            return Err(not_found("Snippet", id));
        }

        let before = self.pages.len();
        self.pages.retain(|_, page| page.snippet_id != id);
        let removed = before - self.pages.len();

        self.persist_snippets()?;
        if removed > 0 {
            self.persist_pages()?;
        }

        tracing::debug!(snippet = %id, associations = removed, "Deleted snippet");
        Ok(())
    }

    /// Gets a snippet by ID
    #[must_use]
    pub fn get_snippet(&self, id: Uuid) -> Option<&Snippet> {
        self.snippets.get(&id)
    }

    /// Lists all snippets ordered by sort order, then creation time
    #[must_use]
    pub fn list_snippets(&self) -> Vec<&Snippet> {
        let mut snippets: Vec<&Snippet> = self.snippets.values().collect();
        snippets.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        snippets
    }

    /// Returns the total number of snippets
    #[must_use]
    pub fn snippet_count(&self) -> usize {
        self.snippets.len()
    }

    /// Reassigns sort orders so snippets list in the given order
    ///
    /// Snippets not named in `ids` keep their relative order after the
    /// named ones.
    ///
    /// # Errors
    ///
    /// Returns an error if an ID is unknown or persistence fails.
    pub fn reorder(&mut self, ids: &[Uuid]) -> ConfigResult<()> {
        if let Some(missing) = ids.iter().find(|id| !self.snippets.contains_key(id)) {
            return Err(not_found("Snippet", *missing));
        }

        let rest: Vec<Uuid> = self
            .list_snippets()
            .into_iter()
            .map(|s| s.id)
            .filter(|id| !ids.contains(id))
            .collect();

        for (position, id) in ids.iter().chain(rest.iter()).enumerate() {
            let sort_order = i32::try_from(position + 1).unwrap_or(i32::MAX);
            if let Some(snippet) = self.snippets.get_mut(id) {
                if snippet.sort_order != sort_order {
                    snippet.sort_order = sort_order;
                    snippet.touch();
                }
            }
        }

        self.persist_snippets()
    }

    // ========== Page Associations ==========

    /// Attaches a snippet to a page
    ///
    /// # Returns
    ///
    /// The UUID of the new association
    ///
    /// # Errors
    ///
    /// Returns an error if the snippet doesn't exist, is already attached to
    /// the page, or persistence fails.
    pub fn attach_to_page(
        &mut self,
        snippet_id: Uuid,
        page_id: Uuid,
        params: Option<&ParamMap>,
    ) -> ConfigResult<Uuid> {
        if !self.snippets.contains_key(&snippet_id) {
            return Err(not_found("Snippet", snippet_id));
        }

        if self
            .pages
            .values()
            .any(|p| p.snippet_id == snippet_id && p.page_id == page_id)
        {
            return Err(ConfigError::Validation {
                field: "page_id".to_string(),
                reason: format!("Snippet {snippet_id} is already attached to page {page_id}"),
            });
        }

        let mut page = SnippetPage::new(snippet_id, page_id);
        page.set_params(params);
        ConfigManager::validate_snippet_page(&page)?;

        let id = page.id;
        self.pages.insert(id, page);
        self.persist_pages()?;
        Ok(id)
    }

    /// Replaces or clears an association's override parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the association doesn't exist or persistence fails.
    pub fn update_page_params(&mut self, id: Uuid, params: Option<&ParamMap>) -> ConfigResult<()> {
        let Some(page) = self.pages.get_mut(&id) else {
            return Err(not_found("Association", id));
        };

        page.set_params(params);
        self.persist_pages()
    }

    /// Removes an association
    ///
    /// # Errors
    ///
    /// Returns an error if the association doesn't exist or persistence fails.
    pub fn detach(&mut self, id: Uuid) -> ConfigResult<()> {
        if self.pages.remove(&id).is_none() {
            return Err(not_found("Association", id));
        }
        self.persist_pages()
    }

    /// Gets an association by ID
    #[must_use]
    pub fn get_page(&self, id: Uuid) -> Option<&SnippetPage> {
        self.pages.get(&id)
    }

    /// Lists the associations of a snippet
    #[must_use]
    pub fn pages_for_snippet(&self, snippet_id: Uuid) -> Vec<&SnippetPage> {
        let mut pages: Vec<&SnippetPage> = self
            .pages
            .values()
            .filter(|p| p.snippet_id == snippet_id)
            .collect();
        pages.sort_by_key(|p| p.created_at);
        pages
    }

    /// Lists the snippets attached to a page, in snippet sort order
    #[must_use]
    pub fn snippets_for_page(&self, page_id: Uuid) -> Vec<(&SnippetPage, &Snippet)> {
        self.list_snippets()
            .into_iter()
            .filter_map(|snippet| {
                self.pages
                    .values()
                    .find(|p| p.page_id == page_id && p.snippet_id == snippet.id)
                    .map(|page| (page, snippet))
            })
            .collect()
    }

    /// Renders every snippet attached to a page with its effective parameters
    ///
    /// Snippets without a provider are skipped.
    ///
    /// # Errors
    ///
    /// Propagates the first provider failure.
    pub fn page_output(
        &self,
        page_id: Uuid,
        registry: &ProviderRegistry,
    ) -> ProviderResult<Vec<(Uuid, ProviderOutput)>> {
        let mut outputs = Vec::new();
        for (page, snippet) in self.snippets_for_page(page_id) {
            if let Some(output) = page.snippets(snippet, registry)? {
                outputs.push((snippet.id, output));
            }
        }
        Ok(outputs)
    }

    // ========== Persistence ==========

    fn next_sort_order(&self) -> i32 {
        self.snippets
            .values()
            .map(|s| s.sort_order)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    fn persist_snippets(&self) -> ConfigResult<()> {
        let snippets: Vec<Snippet> = self.list_snippets().into_iter().cloned().collect();
        self.config_manager.save_snippets(&snippets)
    }

    fn persist_pages(&self) -> ConfigResult<()> {
        let mut pages: Vec<SnippetPage> = self.pages.values().cloned().collect();
        pages.sort_by_key(|p| (p.created_at, p.id));
        self.config_manager.save_snippet_pages(&pages)
    }
}

fn not_found(kind: &str, id: Uuid) -> ConfigError {
    ConfigError::Validation {
        field: "id".to_string(),
        reason: format!("{kind} with ID {id} not found"),
    }
}
