//! Artifact set data structures

use serde::{Deserialize, Serialize};

/// An artifact set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSet {
    /// Catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
}

impl ArtifactSet {
    /// Create a new artifact set
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}
