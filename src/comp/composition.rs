//! Composition data structures
//!
//! A composition maps every team position to the build held there. The
//! key set is fixed when the composition is created: positions are never
//! added or removed afterwards, only their builds change.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::CompError;

/// Number of positions in a standard team
pub const TEAM_SIZE: usize = 4;

/// Key naming one team position
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionKey(String);

impl PositionKey {
    /// Create a position key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PositionKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Default position keys (`pos1` through `pos4`)
pub fn default_positions() -> Vec<PositionKey> {
    (1..=TEAM_SIZE)
        .map(|i| PositionKey::new(format!("pos{}", i)))
        .collect()
}

/// The character, weapon and artifact sets assigned to one position
///
/// Serialized with the compact keys `i`, `w` and `a`; an empty string
/// stands for "nothing assigned".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    /// Assigned character
    #[serde(rename = "i", default, with = "empty_as_none")]
    pub character_id: Option<String>,
    /// Equipped weapon
    #[serde(rename = "w", default, with = "empty_as_none")]
    pub weapon_id: Option<String>,
    /// Artifact sets in display order (duplicates allowed)
    #[serde(rename = "a", default)]
    pub artifact_ids: Vec<String>,
}

impl Build {
    /// Create an empty build
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a build holding only a character
    pub fn with_character(character_id: &str) -> Self {
        Self {
            character_id: Some(character_id.to_string()),
            ..Default::default()
        }
    }

    /// Check if nothing is assigned
    pub fn is_empty(&self) -> bool {
        self.character_id.is_none() && self.weapon_id.is_none() && self.artifact_ids.is_empty()
    }

    /// Check if a character occupies this build
    pub fn is_occupied(&self) -> bool {
        self.character_id.is_some()
    }

    /// Number of artifact sets assigned
    pub fn artifact_count(&self) -> usize {
        self.artifact_ids.len()
    }
}

mod empty_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.filter(|s| !s.is_empty()))
    }
}

/// Builds for every position of a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Composition {
    builds: BTreeMap<PositionKey, Build>,
}

impl Default for Composition {
    fn default() -> Self {
        Self::empty(default_positions())
    }
}

impl Composition {
    /// Create a composition with an empty build at every position
    pub fn empty(positions: impl IntoIterator<Item = PositionKey>) -> Self {
        Self {
            builds: positions
                .into_iter()
                .map(|key| (key, Build::empty()))
                .collect(),
        }
    }

    /// Restore a saved composition onto a fixed position set
    ///
    /// Positions missing from `saved` start empty. A saved position outside
    /// the set is rejected. Gear saved without a character is dropped, since
    /// docks only exist on occupied positions.
    pub fn hydrate(
        positions: impl IntoIterator<Item = PositionKey>,
        saved: Composition,
    ) -> Result<Self, CompError> {
        let mut composition = Self::empty(positions);

        for (key, build) in saved.builds {
            let Some(slot) = composition.builds.get_mut(&key) else {
                return Err(CompError::UnknownPosition(key));
            };

            if build.is_occupied() {
                *slot = build;
            } else if !build.is_empty() {
                log::warn!("Dropping gear saved at unoccupied position {}", key);
            }
        }

        Ok(composition)
    }

    /// Parse a saved composition from JSON and restore it onto `positions`
    pub fn from_json(
        positions: impl IntoIterator<Item = PositionKey>,
        json: &str,
    ) -> Result<Self, CompError> {
        let saved: Composition = serde_json::from_str(json)?;
        Self::hydrate(positions, saved)
    }

    /// Serialize to the compact JSON form
    pub fn to_json(&self) -> Result<String, CompError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Get the build at a position
    pub fn get(&self, position: &PositionKey) -> Option<&Build> {
        self.builds.get(position)
    }

    /// Check if the position belongs to this composition
    pub fn contains(&self, position: &PositionKey) -> bool {
        self.builds.contains_key(position)
    }

    /// Iterate over positions in key order
    pub fn positions(&self) -> impl Iterator<Item = &PositionKey> {
        self.builds.keys()
    }

    /// Iterate over all builds in key order
    pub fn builds(&self) -> impl Iterator<Item = (&PositionKey, &Build)> {
        self.builds.iter()
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.builds.len()
    }

    /// Check if there are no positions at all
    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }

    /// Number of artifact sets at a position (0 for unknown positions)
    pub fn artifact_count(&self, position: &PositionKey) -> usize {
        self.get(position).map_or(0, Build::artifact_count)
    }

    /// Character ids of occupied positions
    pub fn occupied_characters(&self) -> impl Iterator<Item = (&PositionKey, &str)> {
        self.builds
            .iter()
            .filter_map(|(key, build)| build.character_id.as_deref().map(|id| (key, id)))
    }

    /// Return a copy with the build at `position` replaced by `f(build)`
    ///
    /// Unknown positions leave the composition unchanged.
    pub fn update(&self, position: &PositionKey, f: impl FnOnce(&Build) -> Build) -> Self {
        let Some(current) = self.builds.get(position) else {
            log::warn!("Ignoring update for unknown position {}", position);
            return self.clone();
        };

        let mut next = self.clone();
        next.builds.insert(position.clone(), f(current));
        next
    }
}
