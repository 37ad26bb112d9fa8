use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Discriminant identifying which hosting provider a connector or
/// repository talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    GitHub,
    GitLab,
}

impl SourceKind {
    /// Every registered provider, in display order.
    pub const ALL: [SourceKind; 2] = [Self::GitHub, Self::GitLab];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
        }
    }

    /// Parse a configured source name. Matching is exact.
    pub fn parse(s: &str) -> Result<Self, FetchError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FetchError::Validation {
                name: s.to_owned(),
                allowed: Self::allowed_list(),
            })
    }

    fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|kind| format!("\"{}\"", kind.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
