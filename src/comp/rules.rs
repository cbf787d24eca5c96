//! Slot compatibility rules
//!
//! Pure checks deciding whether a dragged item may land on a drop target.
//! They read only the catalogs and the current composition, so they can be
//! polled on every hover update before anything is committed.

use serde::{Deserialize, Serialize};

use super::composition::{Composition, PositionKey};
use crate::catalog::{Catalogs, Character, WeaponClass};

/// Kind of drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropTarget {
    /// The position itself (accepts characters)
    CharacterSlot,
    /// Weapon dock of an occupied position
    WeaponDock,
    /// Artifact dock of an occupied position
    ArtifactDock,
}

/// The item being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragItem {
    Character(String),
    Weapon(String),
    Artifact(String),
}

impl DragItem {
    /// The only target kind this item can land on
    pub fn target(&self) -> DropTarget {
        match self {
            DragItem::Character(_) => DropTarget::CharacterSlot,
            DragItem::Weapon(_) => DropTarget::WeaponDock,
            DragItem::Artifact(_) => DropTarget::ArtifactDock,
        }
    }

    /// Catalog id of the dragged item
    pub fn id(&self) -> &str {
        match self {
            DragItem::Character(id) | DragItem::Weapon(id) | DragItem::Artifact(id) => id,
        }
    }
}

/// Where a drop gesture ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropDescriptor {
    /// Kind of target hit
    pub target: DropTarget,
    /// Position owning the target
    pub position: PositionKey,
    /// Character the dock was rendered for (docks only)
    pub character_id: Option<String>,
}

impl DropDescriptor {
    /// Drop onto a position's character slot
    pub fn character_slot(position: PositionKey) -> Self {
        Self {
            target: DropTarget::CharacterSlot,
            position,
            character_id: None,
        }
    }

    /// Drop onto the weapon dock rendered for `character_id`
    pub fn weapon_dock(position: PositionKey, character_id: &str) -> Self {
        Self {
            target: DropTarget::WeaponDock,
            position,
            character_id: Some(character_id.to_string()),
        }
    }

    /// Drop onto the artifact dock rendered for `character_id`
    pub fn artifact_dock(position: PositionKey, character_id: &str) -> Self {
        Self {
            target: DropTarget::ArtifactDock,
            position,
            character_id: Some(character_id.to_string()),
        }
    }
}

/// Highlight state of a drop target during a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DockHighlight {
    /// Target cannot take the dragged item
    Idle,
    /// Target can take the item
    Available,
    /// Item is hovering over a target that can take it
    Active,
}

impl DockHighlight {
    /// Map live gesture state to a highlight
    pub fn from_gesture(can_drop: bool, is_over: bool) -> Self {
        match (can_drop, is_over) {
            (true, true) => DockHighlight::Active,
            (true, false) => DockHighlight::Available,
            _ => DockHighlight::Idle,
        }
    }
}

/// Catalog entry of the character occupying `position`
pub fn occupant<'a>(
    position: &PositionKey,
    composition: &Composition,
    catalogs: &'a Catalogs,
) -> Option<&'a Character> {
    let id = composition.get(position)?.character_id.as_deref()?;
    catalogs.character(id)
}

/// Weapon class accepted by the weapon dock at `position`
///
/// `None` when the slot is empty or its occupant is not in the catalog.
pub fn weapon_dock_class(
    position: &PositionKey,
    composition: &Composition,
    catalogs: &Catalogs,
) -> Option<WeaponClass> {
    occupant(position, composition, catalogs).map(|c| c.weapon)
}

/// Check if the occupant of `position` can wield `weapon_id`
pub fn can_equip_weapon(
    position: &PositionKey,
    weapon_id: &str,
    composition: &Composition,
    catalogs: &Catalogs,
) -> bool {
    let Some(class) = weapon_dock_class(position, composition, catalogs) else {
        return false;
    };

    catalogs
        .weapon(weapon_id)
        .is_some_and(|weapon| weapon.weapon == class)
}

/// Decide whether `item` may be dropped on `descriptor`
pub fn can_accept(
    item: &DragItem,
    descriptor: &DropDescriptor,
    composition: &Composition,
    catalogs: &Catalogs,
) -> bool {
    if item.target() != descriptor.target {
        return false;
    }

    let Some(build) = composition.get(&descriptor.position) else {
        return false;
    };

    if descriptor.target == DropTarget::CharacterSlot {
        return true;
    }

    // Docks only exist while the character they were rendered for is seated
    if let Some(expected) = descriptor.character_id.as_deref() {
        if build.character_id.as_deref() != Some(expected) {
            return false;
        }
    }
    if occupant(&descriptor.position, composition, catalogs).is_none() {
        return false;
    }

    match item {
        DragItem::Weapon(id) => can_equip_weapon(&descriptor.position, id, composition, catalogs),
        DragItem::Artifact(_) => true,
        DragItem::Character(_) => false,
    }
}
