//! Playable character data structures
//!
//! Characters are immutable reference entities: their element drives
//! elemental resonance and their weapon class gates the weapon dock.

use serde::{Deserialize, Serialize};

use super::weapon::WeaponClass;

/// Elemental types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Anemo,
    Cryo,
    Dendro,
    Electro,
    Geo,
    Hydro,
    Pyro,
}

impl Element {
    /// All elements in display order
    pub fn all() -> &'static [Element] {
        &[
            Element::Anemo,
            Element::Cryo,
            Element::Dendro,
            Element::Electro,
            Element::Geo,
            Element::Hydro,
            Element::Pyro,
        ]
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Element::Anemo => "Anemo",
            Element::Cryo => "Cryo",
            Element::Dendro => "Dendro",
            Element::Electro => "Electro",
            Element::Geo => "Geo",
            Element::Hydro => "Hydro",
            Element::Pyro => "Pyro",
        }
    }
}

/// A playable character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Weapon class this character can equip
    pub weapon: WeaponClass,
    /// Elemental type
    #[serde(rename = "type")]
    pub element: Element,
    /// Home region (cosmetic)
    #[serde(default)]
    pub region: String,
}

impl Character {
    /// Create a new character with no region
    pub fn new(id: &str, name: &str, weapon: WeaponClass, element: Element) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            weapon,
            element,
            region: String::new(),
        }
    }

    /// Check if this character can equip weapons of the given class
    pub fn can_wield(&self, class: WeaponClass) -> bool {
        self.weapon == class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_json_uses_type_key() {
        let json = r#"{"id":"1","name":"Amber","weapon":"bow","type":"pyro","region":"mondstadt"}"#;
        let character: Character = serde_json::from_str(json).unwrap();
        assert_eq!(character.element, Element::Pyro);
        assert_eq!(character.weapon, WeaponClass::Bow);
        assert_eq!(character.region, "mondstadt");
    }

    #[test]
    fn test_region_is_optional() {
        let json = r#"{"id":"2","name":"Xingqiu","weapon":"sword","type":"hydro"}"#;
        let character: Character = serde_json::from_str(json).unwrap();
        assert!(character.region.is_empty());
    }

    #[test]
    fn test_can_wield() {
        let diluc = Character::new("3", "Diluc", WeaponClass::Claymore, Element::Pyro);
        assert!(diluc.can_wield(WeaponClass::Claymore));
        assert!(!diluc.can_wield(WeaponClass::Sword));
    }
}
