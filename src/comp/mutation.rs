//! Composition mutations
//!
//! Every operation is a pure `Composition -> Composition` function. None of
//! them fail: when a precondition does not hold the input comes back
//! unchanged. Only the targeted position is ever touched.

use serde::{Deserialize, Serialize};

use super::composition::{Build, Composition, PositionKey};
use super::rules::{can_equip_weapon, DragItem, DropDescriptor};
use crate::catalog::Catalogs;
use crate::config::settings::GearPolicy;

/// A state transition requested by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    /// Seat a character, clearing the previous gear
    AssignCharacter {
        position: PositionKey,
        character_id: String,
    },
    /// Empty the position entirely
    RemoveCharacter { position: PositionKey },
    /// Equip a weapon if the occupant can wield it
    AssignWeapon {
        position: PositionKey,
        weapon_id: String,
    },
    /// Unequip the weapon
    RemoveWeapon { position: PositionKey },
    /// Append an artifact set
    AssignArtifact {
        position: PositionKey,
        artifact_id: String,
    },
    /// Remove every occurrence of an artifact set
    RemoveArtifact {
        position: PositionKey,
        artifact_id: String,
    },
}

impl Mutation {
    /// Build the mutation that commits `item` onto `descriptor`
    pub fn from_drop(item: &DragItem, descriptor: &DropDescriptor) -> Self {
        let position = descriptor.position.clone();
        match item {
            DragItem::Character(id) => Mutation::AssignCharacter {
                position,
                character_id: id.clone(),
            },
            DragItem::Weapon(id) => Mutation::AssignWeapon {
                position,
                weapon_id: id.clone(),
            },
            DragItem::Artifact(id) => Mutation::AssignArtifact {
                position,
                artifact_id: id.clone(),
            },
        }
    }

    /// Position targeted by this mutation
    pub fn position(&self) -> &PositionKey {
        match self {
            Mutation::AssignCharacter { position, .. }
            | Mutation::RemoveCharacter { position }
            | Mutation::AssignWeapon { position, .. }
            | Mutation::RemoveWeapon { position }
            | Mutation::AssignArtifact { position, .. }
            | Mutation::RemoveArtifact { position, .. } => position,
        }
    }

    /// Apply with the default discard-on-swap gear policy
    pub fn apply(&self, composition: &Composition, catalogs: &Catalogs) -> Composition {
        self.apply_with(composition, catalogs, GearPolicy::Discard)
    }

    /// Apply using the given gear policy for character swaps
    pub fn apply_with(
        &self,
        composition: &Composition,
        catalogs: &Catalogs,
        policy: GearPolicy,
    ) -> Composition {
        match self {
            Mutation::AssignCharacter {
                position,
                character_id,
            } => match policy {
                GearPolicy::Discard => assign_character(composition, position, character_id),
                GearPolicy::KeepMatching => {
                    swap_character_keeping_gear(composition, catalogs, position, character_id)
                }
            },
            Mutation::RemoveCharacter { position } => remove_character(composition, position),
            Mutation::AssignWeapon {
                position,
                weapon_id,
            } => assign_weapon(composition, catalogs, position, weapon_id),
            Mutation::RemoveWeapon { position } => remove_weapon(composition, position),
            Mutation::AssignArtifact {
                position,
                artifact_id,
            } => assign_artifact(composition, position, artifact_id),
            Mutation::RemoveArtifact {
                position,
                artifact_id,
            } => remove_artifact(composition, position, artifact_id),
        }
    }
}

/// Seat `character_id` at `position` with no weapon and no artifacts
pub fn assign_character(
    composition: &Composition,
    position: &PositionKey,
    character_id: &str,
) -> Composition {
    composition.update(position, |_| Build::with_character(character_id))
}

/// Seat `character_id`, keeping artifacts and any weapon the newcomer can wield
pub fn swap_character_keeping_gear(
    composition: &Composition,
    catalogs: &Catalogs,
    position: &PositionKey,
    character_id: &str,
) -> Composition {
    composition.update(position, |build| {
        let class = catalogs.character(character_id).map(|c| c.weapon);
        let weapon_id = build.weapon_id.clone().filter(|id| {
            catalogs
                .weapon(id)
                .is_some_and(|weapon| Some(weapon.weapon) == class)
        });

        Build {
            character_id: Some(character_id.to_string()),
            weapon_id,
            artifact_ids: build.artifact_ids.clone(),
        }
    })
}

/// Reset `position` to an empty build
pub fn remove_character(composition: &Composition, position: &PositionKey) -> Composition {
    composition.update(position, |_| Build::empty())
}

/// Equip `weapon_id` at `position` if the occupant's weapon class matches
pub fn assign_weapon(
    composition: &Composition,
    catalogs: &Catalogs,
    position: &PositionKey,
    weapon_id: &str,
) -> Composition {
    if !can_equip_weapon(position, weapon_id, composition, catalogs) {
        log::debug!("Weapon {} does not fit {}, ignoring", weapon_id, position);
        return composition.clone();
    }

    composition.update(position, |build| Build {
        weapon_id: Some(weapon_id.to_string()),
        ..build.clone()
    })
}

/// Clear the weapon at `position`
pub fn remove_weapon(composition: &Composition, position: &PositionKey) -> Composition {
    composition.update(position, |build| Build {
        weapon_id: None,
        ..build.clone()
    })
}

/// Append `artifact_id` to the artifact list at `position`
pub fn assign_artifact(
    composition: &Composition,
    position: &PositionKey,
    artifact_id: &str,
) -> Composition {
    composition.update(position, |build| {
        let mut next = build.clone();
        next.artifact_ids.push(artifact_id.to_string());
        next
    })
}

/// Remove every occurrence of `artifact_id` at `position`
pub fn remove_artifact(
    composition: &Composition,
    position: &PositionKey,
    artifact_id: &str,
) -> Composition {
    composition.update(position, |build| {
        let mut next = build.clone();
        next.artifact_ids.retain(|id| id != artifact_id);
        next
    })
}
