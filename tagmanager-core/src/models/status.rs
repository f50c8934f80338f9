//! Activation status stored on snippets.

use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// Activation status of a snippet
///
/// Records store the raw code (`on`, `off`, `partial`); this enum is the
/// parsed form. Interpreting the status while rendering is up to the page
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SnippetStatus {
    /// Enabled
    #[default]
    On,
    /// Disabled
    Off,
    /// Enabled in a restricted way
    Partial,
}

impl SnippetStatus {
    /// Returns all statuses in display order
    pub fn all() -> &'static [Self] {
        &[Self::On, Self::Off, Self::Partial]
    }

    /// Returns the stored code
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Partial => "partial",
        }
    }
}

impl std::fmt::Display for SnippetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

impl std::str::FromStr for SnippetStatus {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "partial" => Ok(Self::Partial),
            _ => Err(LabelError::UnknownStatus(s.to_string())),
        }
    }
}
