//! Integration tests for the entity/component store
//!
//! Tests schema declaration, slot coherence under destruction, and the
//! per-frame driver usage pattern.

use loam::foundation::Identity;
use loam::storage::EntityStore;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
struct Vec2 {
    x: f32,
    y: f32,
}

fn declare_enemy(store: &mut EntityStore) {
    store.type_begin("enemy").unwrap();
    store.add_component::<Vec2>("position").unwrap();
    store.add_component::<Vec2>("velocity").unwrap();
    store.type_end().unwrap();
}

// =============================================================================
// Declaration
// =============================================================================

#[test]
fn schema_closes_after_type_end() {
    let mut store = EntityStore::new();
    declare_enemy(&mut store);

    assert!(!store.is_declaring());
    assert!(store.add_component::<u32>("health").is_err());
    assert_eq!(store.type_names(), &["enemy"]);
}

#[test]
fn several_types_coexist() {
    let mut store = EntityStore::new();
    declare_enemy(&mut store);

    store.type_begin("bullet").unwrap();
    store.add_component::<Vec2>("position").unwrap();
    store.add_component::<f32>("damage").unwrap();
    store.type_end().unwrap();

    let e = store.create("enemy").unwrap();
    let b = store.create("bullet").unwrap();

    *store.get_component_mut::<f32>(b, "damage").unwrap() = 12.5;
    assert_eq!(store.get_component::<f32>(b, "damage").unwrap(), &12.5);
    // The enemy type has no "damage" component.
    assert!(store.get_component::<f32>(e, "damage").is_err());
    assert_eq!(store.population("enemy").unwrap(), 1);
    assert_eq!(store.population("bullet").unwrap(), 1);
}

// =============================================================================
// Destroy reindexing
// =============================================================================

#[test]
fn destroying_the_second_of_three_enemies() {
    let mut store = EntityStore::new();
    declare_enemy(&mut store);

    let e1 = store.create("enemy").unwrap();
    let e2 = store.create("enemy").unwrap();
    let e3 = store.create("enemy").unwrap();

    for (i, e) in [e1, e2, e3].iter().enumerate() {
        let position = store.get_component_mut::<Vec2>(*e, "position").unwrap();
        *position = Vec2 {
            x: i as f32,
            y: 0.0,
        };
        let velocity = store.get_component_mut::<Vec2>(*e, "velocity").unwrap();
        *velocity = Vec2 {
            x: 0.0,
            y: i as f32,
        };
    }

    store.destroy(e2).unwrap();

    // The 1st keeps slot 0, the former 3rd now occupies slot 1.
    assert_eq!(store.population("enemy").unwrap(), 2);
    assert_eq!(store.identities("enemy").unwrap(), &[e1.id(), e3.id()]);

    // Values read back unchanged through both survivors.
    assert_eq!(
        store.get_component::<Vec2>(e1, "position").unwrap(),
        &Vec2 { x: 0.0, y: 0.0 }
    );
    assert_eq!(
        store.get_component::<Vec2>(e3, "position").unwrap(),
        &Vec2 { x: 2.0, y: 0.0 }
    );
    assert_eq!(
        store.get_component::<Vec2>(e3, "velocity").unwrap(),
        &Vec2 { x: 0.0, y: 2.0 }
    );

    // Slot order matches the identity list across every column.
    assert_eq!(
        store.components::<Vec2>("enemy", "position").unwrap(),
        &[Vec2 { x: 0.0, y: 0.0 }, Vec2 { x: 2.0, y: 0.0 }]
    );
}

#[test]
fn survivors_stay_coherent_across_many_destroys() {
    let mut store = EntityStore::new();
    declare_enemy(&mut store);

    let mut live: Vec<_> = (0..20)
        .map(|i| {
            let e = store.create("enemy").unwrap();
            *store.get_component_mut::<Vec2>(e, "position").unwrap() = Vec2 {
                x: i as f32,
                y: 0.0,
            };
            e
        })
        .collect();

    // Destroy every other entity, front to back.
    let mut i = 0;
    while i < live.len() {
        store.destroy(live.remove(i)).unwrap();
        i += 1;
    }

    let expected: Vec<Identity> = live.iter().map(|e| e.id()).collect();
    assert_eq!(store.identities("enemy").unwrap(), expected.as_slice());
    for e in &live {
        let slot = store
            .identities("enemy")
            .unwrap()
            .iter()
            .position(|id| *id == e.id())
            .unwrap();
        let column = store.components::<Vec2>("enemy", "position").unwrap();
        assert_eq!(
            &column[slot],
            store.get_component::<Vec2>(*e, "position").unwrap()
        );
    }
}

// =============================================================================
// Per-frame driver pattern
// =============================================================================

#[test]
fn bulk_column_update_then_per_entity_read() {
    let mut store = EntityStore::new();
    declare_enemy(&mut store);

    let entities: Vec<_> = (0..8).map(|_| store.create("enemy").unwrap()).collect();
    for (i, e) in entities.iter().enumerate() {
        *store.get_component_mut::<Vec2>(*e, "velocity").unwrap() = Vec2 {
            x: 1.0,
            y: i as f32,
        };
    }

    // Simulate step: integrate velocities over the whole column.
    let velocities = store.components::<Vec2>("enemy", "velocity").unwrap().to_vec();
    let positions = store.components_mut::<Vec2>("enemy", "position").unwrap();
    for (position, velocity) in positions.iter_mut().zip(&velocities) {
        position.x += velocity.x;
        position.y += velocity.y;
    }

    for (i, e) in entities.iter().enumerate() {
        assert_eq!(
            store.get_component::<Vec2>(*e, "position").unwrap(),
            &Vec2 {
                x: 1.0,
                y: i as f32
            }
        );
    }
}

#[test]
fn level_reset_clears_population_but_not_schema() {
    let mut store = EntityStore::new();
    declare_enemy(&mut store);

    for _ in 0..50 {
        store.create("enemy").unwrap();
    }
    store.type_clear("enemy").unwrap();
    assert_eq!(store.population("enemy").unwrap(), 0);

    // Next level repopulates immediately.
    let e = store.create("enemy").unwrap();
    assert_eq!(store.population("enemy").unwrap(), 1);
    assert_eq!(store.identities("enemy").unwrap(), &[e.id()]);
}
