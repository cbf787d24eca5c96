//! Editor settings
//!
//! Defines the position layout and the editing policies a session runs with.

use serde::{Deserialize, Serialize};

use crate::comp::composition::{default_positions, PositionKey};

/// Artifact sets shown per position by default
pub const DEFAULT_MAX_ARTIFACTS: usize = 5;

/// Main settings structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed set of team positions
    pub positions: Vec<PositionKey>,
    /// Artifact sets accepted per position by drops (0 = unlimited)
    pub max_artifacts_per_slot: usize,
    /// What happens to gear when a seated character is replaced
    pub gear_on_swap: GearPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            positions: default_positions(),
            max_artifacts_per_slot: DEFAULT_MAX_ARTIFACTS,
            gear_on_swap: GearPolicy::Discard,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// No artifact cap and gear carried over on swaps
    pub fn sandbox() -> Self {
        Self {
            max_artifacts_per_slot: 0,
            gear_on_swap: GearPolicy::KeepMatching,
            ..Default::default()
        }
    }

    /// Two-position layout for co-op pairs
    pub fn duo() -> Self {
        Self {
            positions: default_positions().into_iter().take(2).collect(),
            ..Default::default()
        }
    }

    /// Artifact cap, if any
    pub fn artifact_limit(&self) -> Option<usize> {
        (self.max_artifacts_per_slot > 0).then_some(self.max_artifacts_per_slot)
    }
}

/// Gear handling when a different character is dropped on an occupied slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearPolicy {
    /// Start the new character with no weapon and no artifacts
    #[default]
    Discard,
    /// Keep artifacts, and the weapon if the new character can wield it
    KeepMatching,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.positions.len(), 4);
        assert_eq!(settings.artifact_limit(), Some(DEFAULT_MAX_ARTIFACTS));
        assert_eq!(settings.gear_on_swap, GearPolicy::Discard);
    }

    #[test]
    fn test_sandbox_preset() {
        let settings = Settings::sandbox();
        assert_eq!(settings.artifact_limit(), None);
        assert_eq!(settings.gear_on_swap, GearPolicy::KeepMatching);
    }

    #[test]
    fn test_duo_preset() {
        let settings = Settings::duo();
        assert_eq!(
            settings.positions,
            vec![PositionKey::from("pos1"), PositionKey::from("pos2")]
        );
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{"gear_on_swap":"keep_matching"}"#).unwrap();
        assert_eq!(settings.gear_on_swap, GearPolicy::KeepMatching);
        assert_eq!(settings.positions.len(), 4);
        assert_eq!(settings.max_artifacts_per_slot, DEFAULT_MAX_ARTIFACTS);
    }
}
