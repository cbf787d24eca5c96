//! Comp Builder - team composition engine for Genshin Impact build planning
//!
//! This library holds the state and rules behind a drag-and-drop team
//! editor: which character, weapon and artifact sets sit at each team
//! position, which drops are allowed, and which elemental resonances the
//! current team unlocks.
//!
//! ## Sessions
//!
//! A [`CompBuilder`] is one editing session. It owns its composition and
//! shares the read-only catalogs, so several sessions can run side by side
//! without touching each other's state.

pub mod catalog;
pub mod comp;
pub mod config;

use std::sync::Arc;

use crate::catalog::Catalogs;
use crate::comp::rules::{can_accept, DockHighlight, DragItem, DropDescriptor};
use crate::comp::{CompError, Composition, CompositionStore, Mutation, PositionKey, ResonanceReport};
use crate::config::Settings;

/// One team editing session
pub struct CompBuilder {
    /// Shared reference data
    catalogs: Arc<Catalogs>,
    /// Session settings
    settings: Settings,
    /// Current composition
    store: CompositionStore,
}

impl CompBuilder {
    /// Create a session with an empty team
    pub fn new(catalogs: Arc<Catalogs>, settings: Settings) -> Self {
        let initial = Composition::empty(settings.positions.iter().cloned());
        Self {
            catalogs,
            settings,
            store: CompositionStore::new(initial),
        }
    }

    /// Create a session starting from a saved composition
    pub fn with_saved(
        catalogs: Arc<Catalogs>,
        settings: Settings,
        saved: Composition,
    ) -> Result<Self, CompError> {
        let initial = Composition::hydrate(settings.positions.iter().cloned(), saved)?;
        log::info!("Restored composition with {} positions", initial.len());

        Ok(Self {
            catalogs,
            settings,
            store: CompositionStore::new(initial),
        })
    }

    /// Create a session from a saved composition in JSON form
    pub fn from_saved_json(
        catalogs: Arc<Catalogs>,
        settings: Settings,
        json: &str,
    ) -> Result<Self, CompError> {
        let saved: Composition = serde_json::from_str(json)?;
        Self::with_saved(catalogs, settings, saved)
    }

    /// Get the reference catalogs
    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Get the session settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the current composition
    pub fn composition(&self) -> &Composition {
        self.store.get()
    }

    /// Number of changes applied in this session
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Apply a mutation to the current composition
    pub fn dispatch(&mut self, mutation: Mutation) -> Result<Outcome, CompError> {
        let position = mutation.position();
        if !self.store.get().contains(position) {
            log::warn!("Rejected {:?}: position not in team", mutation);
            return Err(CompError::UnknownPosition(position.clone()));
        }

        let catalogs = &self.catalogs;
        let policy = self.settings.gear_on_swap;
        let changed = self
            .store
            .set(|comp| mutation.apply_with(comp, catalogs, policy));

        log::debug!("{:?} -> changed: {}", mutation, changed);
        Ok(if changed {
            Outcome::Changed
        } else {
            Outcome::Unchanged
        })
    }

    /// Seat a character
    pub fn assign_character(
        &mut self,
        position: &PositionKey,
        character_id: &str,
    ) -> Result<Outcome, CompError> {
        self.dispatch(Mutation::AssignCharacter {
            position: position.clone(),
            character_id: character_id.to_string(),
        })
    }

    /// Empty a position
    pub fn remove_character(&mut self, position: &PositionKey) -> Result<Outcome, CompError> {
        self.dispatch(Mutation::RemoveCharacter {
            position: position.clone(),
        })
    }

    /// Equip a weapon
    pub fn assign_weapon(
        &mut self,
        position: &PositionKey,
        weapon_id: &str,
    ) -> Result<Outcome, CompError> {
        self.dispatch(Mutation::AssignWeapon {
            position: position.clone(),
            weapon_id: weapon_id.to_string(),
        })
    }

    /// Unequip a weapon
    pub fn remove_weapon(&mut self, position: &PositionKey) -> Result<Outcome, CompError> {
        self.dispatch(Mutation::RemoveWeapon {
            position: position.clone(),
        })
    }

    /// Append an artifact set
    pub fn assign_artifact(
        &mut self,
        position: &PositionKey,
        artifact_id: &str,
    ) -> Result<Outcome, CompError> {
        self.dispatch(Mutation::AssignArtifact {
            position: position.clone(),
            artifact_id: artifact_id.to_string(),
        })
    }

    /// Remove an artifact set
    pub fn remove_artifact(
        &mut self,
        position: &PositionKey,
        artifact_id: &str,
    ) -> Result<Outcome, CompError> {
        self.dispatch(Mutation::RemoveArtifact {
            position: position.clone(),
            artifact_id: artifact_id.to_string(),
        })
    }

    /// Check whether a drop would be accepted, including the artifact cap
    pub fn can_drop(&self, item: &DragItem, descriptor: &DropDescriptor) -> bool {
        let comp = self.store.get();
        if !can_accept(item, descriptor, comp, &self.catalogs) {
            return false;
        }

        match (item, self.settings.artifact_limit()) {
            (DragItem::Artifact(_), Some(limit)) => {
                comp.artifact_count(&descriptor.position) < limit
            }
            _ => true,
        }
    }

    /// Highlight for a target while `item` is being dragged
    pub fn highlight(
        &self,
        item: &DragItem,
        descriptor: &DropDescriptor,
        is_over: bool,
    ) -> DockHighlight {
        DockHighlight::from_gesture(self.can_drop(item, descriptor), is_over)
    }

    /// Commit a finished drop gesture
    pub fn handle_drop(
        &mut self,
        item: &DragItem,
        descriptor: &DropDescriptor,
    ) -> Result<Outcome, CompError> {
        if !self.store.get().contains(&descriptor.position) {
            return Err(CompError::UnknownPosition(descriptor.position.clone()));
        }
        if !self.can_drop(item, descriptor) {
            log::debug!("Drop of {:?} on {:?} rejected", item, descriptor);
            return Ok(Outcome::Rejected);
        }

        self.dispatch(Mutation::from_drop(item, descriptor))
    }

    /// Evaluate resonances for the current team
    pub fn resonance(&self) -> ResonanceReport {
        comp::resonance::evaluate(self.store.get(), &self.catalogs)
    }

    /// Empty every position, keeping the session's position set
    pub fn reset(&mut self) {
        let positions: Vec<PositionKey> = self.store.get().positions().cloned().collect();
        self.store.set(|_| Composition::empty(positions));
    }
}

/// Result of a mutation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The composition changed
    Changed,
    /// Accepted, but the composition is identical (e.g. class mismatch)
    Unchanged,
    /// The drop target refused the item
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        ArtifactSet, Character, Element, Weapon, WeaponClass, WILDCARD_RESONANCE_ID,
    };
    use crate::comp::{default_positions, Build};

    fn catalogs() -> Arc<Catalogs> {
        Arc::new(
            Catalogs::new()
                .with_character(Character::new("c1", "Bennett", WeaponClass::Sword, Element::Pyro))
                .with_character(Character::new("c2", "Xingqiu", WeaponClass::Sword, Element::Hydro))
                .with_weapon(Weapon::new("w1", "Aquila Favonia", WeaponClass::Sword))
                .with_weapon(Weapon::new("w2", "Skyward Harp", WeaponClass::Bow))
                .with_artifact(ArtifactSet::new("a1", "Noblesse Oblige")),
        )
    }

    fn p(key: &str) -> PositionKey {
        PositionKey::from(key)
    }

    #[test]
    fn test_wildcard_scenario_over_two_positions() {
        let mut builder = CompBuilder::new(catalogs(), Settings::duo());
        assert_eq!(builder.composition().len(), 2);

        builder.assign_character(&p("pos1"), "c1").unwrap();
        builder.assign_character(&p("pos2"), "c2").unwrap();
        let report = builder.resonance();
        assert!(report.is_active(WILDCARD_RESONANCE_ID));
        assert!(report.is_lit(&p("pos1")));
        assert!(report.is_lit(&p("pos2")));

        builder.remove_character(&p("pos2")).unwrap();
        let report = builder.resonance();
        assert!(!report.is_active(WILDCARD_RESONANCE_ID));
        assert!(!report.is_lit(&p("pos1")));
    }

    #[test]
    fn test_mismatched_weapon_leaves_slot_unchanged() {
        let mut builder = CompBuilder::new(catalogs(), Settings::default());
        builder.assign_character(&p("pos1"), "c1").unwrap();
        let revision = builder.revision();

        let outcome = builder.assign_weapon(&p("pos1"), "w2").unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(builder.revision(), revision);
        assert!(builder.composition().get(&p("pos1")).unwrap().weapon_id.is_none());
    }

    #[test]
    fn test_unknown_position_rejected() {
        let mut builder = CompBuilder::new(catalogs(), Settings::duo());
        let before = builder.composition().clone();

        let err = builder.assign_character(&p("pos3"), "c1").unwrap_err();
        assert!(matches!(err, CompError::UnknownPosition(_)));
        assert_eq!(builder.composition(), &before);

        let drop = DropDescriptor::character_slot(p("pos3"));
        assert!(builder.handle_drop(&DragItem::Character("c1".into()), &drop).is_err());
    }

    #[test]
    fn test_drop_flow() {
        let mut builder = CompBuilder::new(catalogs(), Settings::default());
        let slot = DropDescriptor::character_slot(p("pos1"));
        let dock = DropDescriptor::weapon_dock(p("pos1"), "c1");

        assert_eq!(
            builder.handle_drop(&DragItem::Character("c1".into()), &slot).unwrap(),
            Outcome::Changed
        );
        assert_eq!(
            builder.handle_drop(&DragItem::Weapon("w2".into()), &dock).unwrap(),
            Outcome::Rejected
        );
        assert_eq!(
            builder.handle_drop(&DragItem::Weapon("w1".into()), &dock).unwrap(),
            Outcome::Changed
        );
        assert_eq!(
            builder.composition().get(&p("pos1")).unwrap().weapon_id.as_deref(),
            Some("w1")
        );
    }

    #[test]
    fn test_artifact_cap_applies_to_drops_only() {
        let settings = Settings {
            max_artifacts_per_slot: 2,
            ..Settings::default()
        };
        let mut builder = CompBuilder::new(catalogs(), settings);
        builder.assign_character(&p("pos1"), "c1").unwrap();
        let dock = DropDescriptor::artifact_dock(p("pos1"), "c1");
        let item = DragItem::Artifact("a1".into());

        assert_eq!(builder.handle_drop(&item, &dock).unwrap(), Outcome::Changed);
        assert_eq!(builder.highlight(&item, &dock, true), DockHighlight::Active);
        assert_eq!(builder.handle_drop(&item, &dock).unwrap(), Outcome::Changed);
        assert!(!builder.can_drop(&item, &dock));
        assert_eq!(builder.highlight(&item, &dock, true), DockHighlight::Idle);
        assert_eq!(builder.handle_drop(&item, &dock).unwrap(), Outcome::Rejected);

        // Direct calls are not capped
        builder.assign_artifact(&p("pos1"), "a1").unwrap();
        assert_eq!(builder.composition().artifact_count(&p("pos1")), 3);
    }

    #[test]
    fn test_restore_from_saved_json() {
        let json = r#"{"pos1":{"i":"c1","w":"w1","a":["a1"]}}"#;
        let builder = CompBuilder::from_saved_json(catalogs(), Settings::default(), json).unwrap();
        assert_eq!(builder.composition().len(), 4);
        assert_eq!(
            builder.composition().get(&p("pos1")),
            Some(&Build {
                character_id: Some("c1".into()),
                weapon_id: Some("w1".into()),
                artifact_ids: vec!["a1".into()],
            })
        );

        let bad = r#"{"pos9":{"i":"c1"}}"#;
        assert!(CompBuilder::from_saved_json(catalogs(), Settings::default(), bad).is_err());
    }

    #[test]
    fn test_sessions_are_independent() {
        let shared = catalogs();
        let mut first = CompBuilder::new(Arc::clone(&shared), Settings::default());
        let second = CompBuilder::new(shared, Settings::default());

        first.assign_character(&p("pos1"), "c1").unwrap();
        assert!(second.composition().get(&p("pos1")).unwrap().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut builder = CompBuilder::new(catalogs(), Settings::default());
        builder.assign_character(&p("pos1"), "c1").unwrap();
        builder.reset();
        assert_eq!(builder.composition(), &Composition::default());
    }

    #[test]
    fn test_reset_keeps_position_set() {
        let mut builder = CompBuilder::new(catalogs(), Settings::default());
        builder.assign_character(&p("pos2"), "c2").unwrap();
        builder.settings.positions = vec![p("bench")];

        builder.reset();
        let keys: Vec<_> = builder.composition().positions().cloned().collect();
        assert_eq!(keys, default_positions());
        assert!(builder.composition().builds().all(|(_, b)| b.is_empty()));
    }

    #[test]
    fn test_saved_gear_without_character_is_dropped() {
        let json = r#"{"pos1":{"i":"","w":"w1","a":["a1"]}}"#;
        let builder = CompBuilder::from_saved_json(catalogs(), Settings::default(), json).unwrap();
        assert_eq!(builder.composition().get(&p("pos1")), Some(&Build::empty()));
    }
}
