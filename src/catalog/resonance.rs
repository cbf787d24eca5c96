//! Elemental resonance definitions
//!
//! A resonance is either typed (needs two characters of one of its
//! `primary` elements) or the wildcard, which needs two distinct elements.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::character::Element;

/// Sentinel id of the wildcard resonance
pub const WILDCARD_RESONANCE_ID: &str = "7";

/// How a resonance is activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResonanceRule<'a> {
    /// Active when two or more distinct elements are present
    Wildcard,
    /// Active when any of these elements is present at least twice
    Typed(&'a [Element]),
}

/// A team-wide elemental resonance bonus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementalResonance {
    /// Catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Effect description
    #[serde(default)]
    pub description: String,
    /// Qualifying elements (empty for the wildcard)
    #[serde(default)]
    pub primary: Vec<Element>,
}

impl ElementalResonance {
    /// Create a typed resonance
    pub fn typed(id: &str, name: &str, description: &str, element: Element) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            primary: vec![element],
        }
    }

    /// Create the wildcard resonance
    pub fn wildcard(name: &str, description: &str) -> Self {
        Self {
            id: WILDCARD_RESONANCE_ID.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            primary: Vec::new(),
        }
    }

    /// Get the activation rule
    pub fn rule(&self) -> ResonanceRule<'_> {
        if self.is_wildcard() {
            ResonanceRule::Wildcard
        } else {
            ResonanceRule::Typed(&self.primary)
        }
    }

    /// Check if this is the wildcard resonance
    pub fn is_wildcard(&self) -> bool {
        self.id == WILDCARD_RESONANCE_ID || self.primary.is_empty()
    }

    /// Check if the element qualifies for this resonance
    pub fn requires(&self, element: Element) -> bool {
        self.primary.contains(&element)
    }
}

static BUILTIN_RESONANCES: Lazy<Vec<ElementalResonance>> = Lazy::new(|| {
    vec![
        ElementalResonance::typed(
            "1",
            "Fervent Flames",
            "Affected by Cryo for 40% less time. Increases ATK by 25%.",
            Element::Pyro,
        ),
        ElementalResonance::typed(
            "2",
            "Soothing Water",
            "Affected by Pyro for 40% less time. Increases Max HP by 25%.",
            Element::Hydro,
        ),
        ElementalResonance::typed(
            "3",
            "Shattering Ice",
            "Affected by Electro for 40% less time. Increases CRIT Rate against enemies that are Frozen or affected by Cryo by 15%.",
            Element::Cryo,
        ),
        ElementalResonance::typed(
            "4",
            "High Voltage",
            "Affected by Hydro for 40% less time. Superconduct, Overloaded, Electro-Charged, Quicken, Aggravate, or Hyperbloom have a 100% chance to generate an Electro Elemental Particle.",
            Element::Electro,
        ),
        ElementalResonance::typed(
            "5",
            "Impetuous Winds",
            "Decreases Stamina Consumption by 15%. Increases Movement SPD by 10%. Shortens Skill CD by 5%.",
            Element::Anemo,
        ),
        ElementalResonance::typed(
            "6",
            "Enduring Rock",
            "Increases shield strength by 15%. Characters protected by a shield deal 15% more DMG.",
            Element::Geo,
        ),
        ElementalResonance::wildcard(
            "Protective Canopy",
            "All Elemental RES +15%, Physical RES +15%.",
        ),
        ElementalResonance::typed(
            "8",
            "Sprawling Greenery",
            "Elemental Mastery increased by 50.",
            Element::Dendro,
        ),
    ]
});

/// The built-in resonance table
pub fn builtin_resonances() -> &'static [ElementalResonance] {
    &BUILTIN_RESONANCES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_has_one_wildcard() {
        let wildcards: Vec<_> = builtin_resonances()
            .iter()
            .filter(|r| r.is_wildcard())
            .collect();
        assert_eq!(wildcards.len(), 1);
        assert_eq!(wildcards[0].id, WILDCARD_RESONANCE_ID);
    }

    #[test]
    fn test_every_element_has_a_typed_resonance() {
        for element in Element::all() {
            assert!(
                builtin_resonances().iter().any(|r| r.requires(*element)),
                "no resonance for {}",
                element.name()
            );
        }
    }

    #[test]
    fn test_empty_primary_is_wildcard() {
        let resonance: ElementalResonance =
            serde_json::from_str(r#"{"id":"99","name":"Any"}"#).unwrap();
        assert_eq!(resonance.rule(), ResonanceRule::Wildcard);
    }

    #[test]
    fn test_sentinel_id_is_wildcard_even_with_primary() {
        let resonance: ElementalResonance =
            serde_json::from_str(r#"{"id":"7","name":"Canopy","primary":["geo"]}"#).unwrap();
        assert!(resonance.is_wildcard());
    }
}
