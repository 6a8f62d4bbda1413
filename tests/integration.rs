//! Cross-module integration tests exercising the public API surface as a
//! caller would: generate a dungeon, validate it, round-trip it through
//! JSON, and run a combat simulation over it.

use dungeoncraft::algorithms::{generate_bsp, BspConfig};
use dungeoncraft::io::{export_to_json, import_from_json, DungeonMetadata};
use dungeoncraft::sim::{simulate, spawn_units, SimulationOptions, SpawnOptions};
use dungeoncraft::validate::{validate_dungeon, ValidationOptions};

#[test]
fn generated_dungeon_passes_validation() {
    let grid = generate_bsp(48, 2024, BspConfig::default()).expect("bsp generation");
    let report = validate_dungeon(&grid, &ValidationOptions::default());
    assert!(report.valid, "issues: {:?}", report.issues);
    assert!(report.stats.room_count >= 1);
}

#[test]
fn json_round_trip_preserves_grid_and_metadata() {
    let grid = generate_bsp(32, 99, BspConfig::default()).expect("bsp generation");
    let metadata = DungeonMetadata {
        name: Some("test-level".into()),
        generator: Some("bsp".into()),
        seed: Some(99),
        ..Default::default()
    };
    let text = export_to_json(&grid, &metadata);
    let (restored, restored_meta) = import_from_json(&text).expect("import");
    assert_eq!(grid, restored);
    assert_eq!(restored_meta.name.as_deref(), Some("test-level"));
    assert_eq!(restored_meta.seed, Some(99));
}

#[test]
fn spawned_units_fight_to_a_conclusion() {
    let grid = generate_bsp(48, 555, BspConfig::default()).expect("bsp generation");
    let options = SpawnOptions { units_per_faction: 3, ..Default::default() };
    let units = spawn_units(&grid, &options, 555);
    assert_eq!(units.len(), 6);

    let result = simulate(&grid, units, &SimulationOptions::default());
    assert!(result.is_complete);
    assert!(result.turn > 0);
    assert!(!result.events.is_empty());
}

#[test]
fn invalid_size_fails_synchronously_at_the_boundary() {
    let err = generate_bsp(0, 1, BspConfig::default()).unwrap_err();
    assert!(matches!(err, dungeoncraft::Error::InvalidSize { .. }));
}
