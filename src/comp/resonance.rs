//! Elemental resonance evaluation
//!
//! Derives the active team resonances and the per-position highlight from
//! the current composition. Nothing is cached: the result depends only on
//! the snapshot passed in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::composition::{Composition, PositionKey};
use super::rules::occupant;
use crate::catalog::{Catalogs, Element, ElementalResonance, ResonanceRule};

/// Members of one element needed to trigger a typed resonance
pub const TYPED_RESONANCE_THRESHOLD: usize = 2;

/// Distinct elements needed to trigger the wildcard resonance
pub const WILDCARD_DISTINCT_THRESHOLD: usize = 2;

/// Count of seated characters per element
pub type ElementTally = BTreeMap<Element, usize>;

/// Result of evaluating a composition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResonanceReport {
    /// Ids of active resonances, in catalog order
    pub active: Vec<String>,
    /// Whether each position's occupant benefits from an active resonance
    pub lit: BTreeMap<PositionKey, bool>,
}

impl ResonanceReport {
    /// Check if a resonance is active
    pub fn is_active(&self, resonance_id: &str) -> bool {
        self.active.iter().any(|id| id == resonance_id)
    }

    /// Check if a position is highlighted
    pub fn is_lit(&self, position: &PositionKey) -> bool {
        self.lit.get(position).copied().unwrap_or(false)
    }

    /// Positions that are highlighted
    pub fn lit_positions(&self) -> impl Iterator<Item = &PositionKey> {
        self.lit.iter().filter(|(_, lit)| **lit).map(|(key, _)| key)
    }
}

/// Tally elements across occupied positions
///
/// Characters missing from the catalog contribute nothing.
pub fn element_tally(composition: &Composition, catalogs: &Catalogs) -> ElementTally {
    let mut tally = ElementTally::new();

    for (position, id) in composition.occupied_characters() {
        match catalogs.character(id) {
            Some(character) => *tally.entry(character.element).or_insert(0) += 1,
            None => log::debug!("Unknown character {} at {}, skipping", id, position),
        }
    }

    tally
}

/// Check if a resonance is active for the given tally
pub fn is_active(resonance: &ElementalResonance, tally: &ElementTally) -> bool {
    match resonance.rule() {
        ResonanceRule::Wildcard => tally.len() >= WILDCARD_DISTINCT_THRESHOLD,
        ResonanceRule::Typed(elements) => elements
            .iter()
            .any(|e| tally.get(e).copied().unwrap_or(0) >= TYPED_RESONANCE_THRESHOLD),
    }
}

/// Active resonance definitions, in catalog order
pub fn active_resonances<'a>(
    tally: &ElementTally,
    catalogs: &'a Catalogs,
) -> Vec<&'a ElementalResonance> {
    catalogs
        .resonances
        .iter()
        .filter(|r| is_active(r, tally))
        .collect()
}

fn lights(element: Element, active: &[&ElementalResonance]) -> bool {
    active.iter().any(|r| r.is_wildcard() || r.requires(element))
}

/// Check whether one position's occupant is resonance-lit
pub fn is_resonance_lit(
    position: &PositionKey,
    composition: &Composition,
    catalogs: &Catalogs,
) -> bool {
    let Some(character) = occupant(position, composition, catalogs) else {
        return false;
    };

    let tally = element_tally(composition, catalogs);
    lights(character.element, &active_resonances(&tally, catalogs))
}

/// Evaluate active resonances and highlights for a composition
pub fn evaluate(composition: &Composition, catalogs: &Catalogs) -> ResonanceReport {
    let tally = element_tally(composition, catalogs);
    let active = active_resonances(&tally, catalogs);

    let lit = composition
        .positions()
        .map(|position| {
            let lit = occupant(position, composition, catalogs)
                .is_some_and(|character| lights(character.element, &active));
            (position.clone(), lit)
        })
        .collect();

    ResonanceReport {
        active: active.iter().map(|r| r.id.clone()).collect(),
        lit,
    }
}
