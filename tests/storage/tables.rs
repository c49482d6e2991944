//! Integration tests for the hash table
//!
//! Tests round-trips, resize transparency, and the asset-registry usage
//! pattern across all three key kinds.

use loam::foundation::Identity;
use loam::storage::HashTable;

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn text_key_round_trip() {
    let mut table: HashTable<String, u32> = HashTable::new();
    table.add("shader/sprite".to_string(), 3).unwrap();

    assert_eq!(table.get("shader/sprite"), Some(&3));
    table.del("shader/sprite").unwrap();
    assert_eq!(table.get("shader/sprite"), None);
}

#[test]
fn integer_key_round_trip() {
    let mut table: HashTable<u64, String> = HashTable::new();
    table.add(0xdead_beef, "marker".to_string()).unwrap();

    assert_eq!(table.get(&0xdead_beef).map(String::as_str), Some("marker"));
    table.del(&0xdead_beef).unwrap();
    assert_eq!(table.get(&0xdead_beef), None);
}

#[test]
fn identity_key_round_trip() {
    let mut table: HashTable<Identity, u32> = HashTable::new();
    let id = Identity::generate();
    table.add(id, 7).unwrap();

    assert_eq!(table.get(&id), Some(&7));
    assert_eq!(table.get(&Identity::generate()), None);
}

// =============================================================================
// Resize transparency
// =============================================================================

#[test]
fn nine_text_keys_double_capacity_17_to_34() {
    let mut table: HashTable<String, usize> = HashTable::new();
    let keys = [
        "shader/sprite",
        "shader/text",
        "atlas/tiles",
        "atlas/actors",
        "font/small",
        "font/large",
        "sound/jump",
        "sound/hit",
        "music/theme",
    ];

    for (value, key) in keys.iter().enumerate().take(8) {
        table.add((*key).to_string(), value).unwrap();
    }
    assert_eq!(table.capacity(), 17);

    table.add(keys[8].to_string(), 8).unwrap();
    assert_eq!(table.capacity(), 34);

    for (value, key) in keys.iter().enumerate() {
        assert_eq!(table.get(*key), Some(&value));
    }
}

#[test]
fn heavy_insertion_loses_nothing() {
    let mut table: HashTable<u64, u64> = HashTable::new();
    for i in 0..10_000 {
        table.add(i, i * 31).unwrap();
    }
    assert_eq!(table.len(), 10_000);
    for i in 0..10_000 {
        assert_eq!(table.get(&i), Some(&(i * 31)));
    }
}

// =============================================================================
// Asset-registry usage pattern
// =============================================================================

#[test]
fn registry_recovers_names_for_diagnostics() {
    // An asset manager registers metadata by name and uses the reverse
    // lookup to report which entry a value belongs to.
    #[derive(Default)]
    struct AtlasInfo {
        texture: u32,
        tile: (u16, u16),
    }

    let mut registry: HashTable<String, AtlasInfo> = HashTable::new();
    let info = registry
        .add(
            "atlas/dungeon".to_string(),
            AtlasInfo {
                texture: 2,
                tile: (16, 16),
            },
        )
        .unwrap();
    info.texture = 3;

    let info = registry.get("atlas/dungeon").unwrap();
    assert_eq!(info.texture, 3);
    assert_eq!(info.tile, (16, 16));
    assert_eq!(
        registry.key_of(info).map(String::as_str),
        Some("atlas/dungeon")
    );
}

#[test]
fn clear_resets_a_registry_for_reuse() {
    let mut table: HashTable<String, u32> = HashTable::new();
    for i in 0..20_u32 {
        table.add(format!("entry-{i}"), i).unwrap();
    }
    table.clear();
    assert!(table.is_empty());

    table.add("entry-0".to_string(), 99).unwrap();
    assert_eq!(table.get("entry-0"), Some(&99));
}
