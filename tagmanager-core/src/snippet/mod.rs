//! Snippet management module
//!
//! This module provides the `SnippetManager` for CRUD operations on snippets
//! and their page associations, with manual ordering.

mod manager;

pub use manager::SnippetManager;
