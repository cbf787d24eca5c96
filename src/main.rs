//! Comp Builder CLI - Testing and development entry point
//!
//! Loads a catalog (the bundled sample, or the JSON file given as the first
//! argument), walks a short editing session and prints the resulting team.

use std::process;
use std::sync::Arc;

use comp_builder::catalog::Catalogs;
use comp_builder::comp::{DragItem, DropDescriptor, PositionKey};
use comp_builder::config::Settings;
use comp_builder::CompBuilder;

const SAMPLE_CATALOG: &str = include_str!("../data/sample_catalog.json");

fn main() {
    println!("Comp Builder - Team Composition Engine");
    println!("======================================");
    println!();

    let catalog_json = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path, e);
                process::exit(1);
            }
        },
        None => SAMPLE_CATALOG.to_string(),
    };

    let catalogs = match Catalogs::from_json(&catalog_json) {
        Ok(catalogs) => Arc::new(catalogs),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    println!("Catalog loaded:");
    println!("  - Characters: {}", catalogs.characters.len());
    println!("  - Weapons: {}", catalogs.weapons.len());
    println!("  - Artifact sets: {}", catalogs.artifacts.len());
    println!("  - Resonances: {}", catalogs.resonances.len());
    println!();

    let mut builder = CompBuilder::new(Arc::clone(&catalogs), Settings::default());

    // Seat whichever characters come first in id order
    let mut character_ids: Vec<&String> = catalogs.characters.keys().collect();
    character_ids.sort();
    let mut weapon_ids: Vec<&String> = catalogs.weapons.keys().collect();
    weapon_ids.sort();
    let positions: Vec<PositionKey> = builder.composition().positions().cloned().collect();

    for (position, id) in positions.iter().zip(character_ids) {
        let slot = DropDescriptor::character_slot(position.clone());
        if let Err(e) = builder.handle_drop(&DragItem::Character(id.clone()), &slot) {
            eprintln!("{}", e);
            process::exit(1);
        }

        // First matching weapon and first artifact set, if any
        let dock = DropDescriptor::weapon_dock(position.clone(), id);
        let weapon = weapon_ids
            .iter()
            .find(|w| builder.can_drop(&DragItem::Weapon((**w).clone()), &dock))
            .map(|w| (*w).clone());
        if let Some(weapon_id) = weapon {
            if let Err(e) = builder.handle_drop(&DragItem::Weapon(weapon_id), &dock) {
                eprintln!("Failed to equip weapon at {}: {}", position, e);
            }
        }
        if let Some(artifact_id) = catalogs.artifacts.keys().min() {
            let dock = DropDescriptor::artifact_dock(position.clone(), id);
            let item = DragItem::Artifact(artifact_id.clone());
            if let Err(e) = builder.handle_drop(&item, &dock) {
                eprintln!("Failed to add artifact at {}: {}", position, e);
            }
        }
    }

    let report = builder.resonance();
    println!("Team:");
    for (position, build) in builder.composition().builds() {
        let name = build
            .character_id
            .as_deref()
            .and_then(|id| catalogs.character(id))
            .map_or("(empty)", |c| c.name.as_str());
        let weapon = build
            .weapon_id
            .as_deref()
            .and_then(|id| catalogs.weapon(id))
            .map_or("-", |w| w.name.as_str());
        let lit = if report.is_lit(position) { " *" } else { "" };
        println!(
            "  - {}: {} [{}] artifacts: {}{}",
            position,
            name,
            weapon,
            build.artifact_count(),
            lit
        );
    }
    println!();

    println!("Active resonances:");
    for id in &report.active {
        if let Some(resonance) = catalogs.resonance(id) {
            println!("  - {}: {}", resonance.name, resonance.description);
        }
    }
    println!();

    match builder.composition().to_json() {
        Ok(json) => println!("Saved composition: {}", json),
        Err(e) => eprintln!("Failed to encode composition: {}", e),
    }
}
