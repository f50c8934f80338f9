//! Markup produced by providers, keyed by injection position.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Where in a page a snippet is injected
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnippetPosition {
    /// Right after the opening `<head>` tag
    StartHead,
    /// Right before the closing `</head>` tag
    EndHead,
    /// Right after the opening `<body>` tag
    StartBody,
    /// Right before the closing `</body>` tag
    EndBody,
}

impl SnippetPosition {
    /// Returns all positions in document order
    pub fn all() -> &'static [Self] {
        &[Self::StartHead, Self::EndHead, Self::StartBody, Self::EndBody]
    }

    /// Returns the position key
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartHead => "start-head",
            Self::EndHead => "end-head",
            Self::StartBody => "start-body",
            Self::EndBody => "end-body",
        }
    }
}

impl fmt::Display for SnippetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SnippetPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start-head" => Ok(Self::StartHead),
            "end-head" => Ok(Self::EndHead),
            "start-body" => Ok(Self::StartBody),
            "end-body" => Ok(Self::EndBody),
            _ => Err(format!("Unknown snippet position: {s}")),
        }
    }
}

/// HTML fragments produced by a provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderOutput(BTreeMap<SnippetPosition, String>);

impl ProviderOutput {
    /// Creates empty output
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds a fragment at a position and returns the output
    #[must_use]
    pub fn with(mut self, position: SnippetPosition, html: impl Into<String>) -> Self {
        self.insert(position, html);
        self
    }

    /// Adds a fragment at a position, appending to any existing one
    pub fn insert(&mut self, position: SnippetPosition, html: impl Into<String>) {
        let html = html.into();
        self.0
            .entry(position)
            .and_modify(|existing| {
                existing.push('\n');
                existing.push_str(&html);
            })
            .or_insert(html);
    }

    /// Gets the fragment at a position
    #[must_use]
    pub fn get(&self, position: SnippetPosition) -> Option<&str> {
        self.0.get(&position).map(String::as_str)
    }

    /// Returns true if no fragments were produced
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over fragments in document order
    pub fn iter(&self) -> impl Iterator<Item = (SnippetPosition, &str)> {
        self.0.iter().map(|(p, html)| (*p, html.as_str()))
    }
}
