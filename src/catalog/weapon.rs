//! Weapon data structures

use serde::{Deserialize, Serialize};

/// Weapon categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponClass {
    Sword,
    Claymore,
    Polearm,
    Bow,
    Catalyst,
}

impl WeaponClass {
    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            WeaponClass::Sword => "Sword",
            WeaponClass::Claymore => "Claymore",
            WeaponClass::Polearm => "Polearm",
            WeaponClass::Bow => "Bow",
            WeaponClass::Catalyst => "Catalyst",
        }
    }
}

/// A weapon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Weapon class
    pub weapon: WeaponClass,
}

impl Weapon {
    /// Create a new weapon
    pub fn new(id: &str, name: &str, weapon: WeaponClass) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            weapon,
        }
    }
}
