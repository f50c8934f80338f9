//! Core data models for the tag manager
//!
//! This module defines the persisted records: snippets, their page
//! associations and the stored activation status.

mod snippet;
mod snippet_page;
mod status;

pub use snippet::{
    Snippet, SnippetSummaryRow, ACTIVE_FIELD, PARAMS_FIELD, PROVIDER_FIELD, SORT_FIELD,
    UNCONFIGURED_TITLE,
};
pub use snippet_page::SnippetPage;
pub use status::SnippetStatus;
