//! Reference catalogs module
//!
//! Read-only lookup tables for characters, weapons, artifact sets and
//! elemental resonances. Catalogs are supplied whole at startup and are
//! never mutated by the composition engine.

pub mod artifact;
pub mod character;
pub mod resonance;
pub mod weapon;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use artifact::ArtifactSet;
pub use character::{Character, Element};
pub use resonance::{builtin_resonances, ElementalResonance, ResonanceRule, WILDCARD_RESONANCE_ID};
pub use weapon::{Weapon, WeaponClass};

/// All reference data the engine reads from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalogs {
    /// Characters keyed by id
    #[serde(default)]
    pub characters: HashMap<String, Character>,
    /// Weapons keyed by id
    #[serde(default)]
    pub weapons: HashMap<String, Weapon>,
    /// Artifact sets keyed by id
    #[serde(default)]
    pub artifacts: HashMap<String, ArtifactSet>,
    /// Resonance definitions in display order
    #[serde(default = "default_resonances")]
    pub resonances: Vec<ElementalResonance>,
}

fn default_resonances() -> Vec<ElementalResonance> {
    builtin_resonances().to_vec()
}

impl Default for Catalogs {
    fn default() -> Self {
        Self {
            characters: HashMap::new(),
            weapons: HashMap::new(),
            artifacts: HashMap::new(),
            resonances: default_resonances(),
        }
    }
}

impl Catalogs {
    /// Create empty catalogs with the built-in resonance table
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a catalog document
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalogs: Catalogs = serde_json::from_str(json)?;
        catalogs.validate()?;

        log::info!(
            "Loaded catalogs: {} characters, {} weapons, {} artifact sets, {} resonances",
            catalogs.characters.len(),
            catalogs.weapons.len(),
            catalogs.artifacts.len(),
            catalogs.resonances.len()
        );

        Ok(catalogs)
    }

    /// Check that every record is stored under its own id
    pub fn validate(&self) -> Result<(), CatalogError> {
        check_keys("characters", &self.characters, |c| &c.id)?;
        check_keys("weapons", &self.weapons, |w| &w.id)?;
        check_keys("artifacts", &self.artifacts, |a| &a.id)?;
        Ok(())
    }

    /// Add a character
    pub fn with_character(mut self, character: Character) -> Self {
        self.characters.insert(character.id.clone(), character);
        self
    }

    /// Add a weapon
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.insert(weapon.id.clone(), weapon);
        self
    }

    /// Add an artifact set
    pub fn with_artifact(mut self, artifact: ArtifactSet) -> Self {
        self.artifacts.insert(artifact.id.clone(), artifact);
        self
    }

    /// Replace the resonance definitions
    pub fn with_resonances(mut self, resonances: Vec<ElementalResonance>) -> Self {
        self.resonances = resonances;
        self
    }

    /// Look up a character
    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.get(id)
    }

    /// Look up a weapon
    pub fn weapon(&self, id: &str) -> Option<&Weapon> {
        self.weapons.get(id)
    }

    /// Look up an artifact set
    pub fn artifact(&self, id: &str) -> Option<&ArtifactSet> {
        self.artifacts.get(id)
    }

    /// Look up a resonance definition
    pub fn resonance(&self, id: &str) -> Option<&ElementalResonance> {
        self.resonances.iter().find(|r| r.id == id)
    }
}

fn check_keys<T>(
    table: &'static str,
    entries: &HashMap<String, T>,
    id_of: impl Fn(&T) -> &String,
) -> Result<(), CatalogError> {
    for (key, entry) in entries {
        let id = id_of(entry);
        if key != id {
            return Err(CatalogError::IdMismatch {
                table,
                key: key.clone(),
                id: id.clone(),
            });
        }
    }
    Ok(())
}

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Entry {key:?} in {table} has id {id:?}")]
    IdMismatch {
        table: &'static str,
        key: String,
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "characters": {
            "1": {"id": "1", "name": "Amber", "weapon": "bow", "type": "pyro", "region": "mondstadt"}
        },
        "weapons": {
            "10": {"id": "10", "name": "Favonius Warbow", "weapon": "bow"}
        },
        "artifacts": {
            "20": {"id": "20", "name": "Noblesse Oblige"}
        }
    }"#;

    #[test]
    fn test_from_json_defaults_resonances() {
        let catalogs = Catalogs::from_json(SAMPLE).unwrap();
        assert_eq!(catalogs.character("1").unwrap().name, "Amber");
        assert_eq!(catalogs.weapon("10").unwrap().weapon, WeaponClass::Bow);
        assert!(catalogs.artifact("20").is_some());
        assert_eq!(catalogs.resonances.len(), builtin_resonances().len());
        assert!(catalogs.resonance(WILDCARD_RESONANCE_ID).is_some());
    }

    #[test]
    fn test_unknown_ids_are_none() {
        let catalogs = Catalogs::from_json(SAMPLE).unwrap();
        assert!(catalogs.character("404").is_none());
        assert!(catalogs.weapon("404").is_none());
    }

    #[test]
    fn test_id_mismatch_rejected() {
        let json = r#"{"weapons": {"10": {"id": "11", "name": "Rust", "weapon": "bow"}}}"#;
        let err = Catalogs::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::IdMismatch { table: "weapons", .. }
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Catalogs::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_builder_methods() {
        let catalogs = Catalogs::new()
            .with_character(Character::new("1", "Bennett", WeaponClass::Sword, Element::Pyro))
            .with_weapon(Weapon::new("2", "Aquila Favonia", WeaponClass::Sword))
            .with_artifact(ArtifactSet::new("3", "Emblem of Severed Fate"))
            .with_resonances(Vec::new());
        assert!(catalogs.character("1").is_some());
        assert!(catalogs.weapon("2").is_some());
        assert!(catalogs.artifact("3").is_some());
        assert!(catalogs.resonances.is_empty());
    }
}
