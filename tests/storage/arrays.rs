//! Integration tests for the growable array
//!
//! Tests growth, shift correctness, and per-frame reuse through the
//! public surface.

use loam::storage::GrowArray;

// =============================================================================
// Growth
// =============================================================================

#[test]
fn every_pushed_value_stays_readable_across_growth() {
    let mut arr = GrowArray::new();
    for i in 0..1000_u32 {
        arr.push(i);
        assert_eq!(arr.len() as u32, i + 1);
    }
    for i in 0..1000_u32 {
        assert_eq!(arr[i as usize], i);
    }
}

#[test]
fn capacity_starts_at_one_and_doubles() {
    let mut arr = GrowArray::new();
    assert_eq!(arr.capacity(), 1);

    arr.push(0_u8);
    arr.push(1);
    assert_eq!(arr.capacity(), 2);

    arr.push(2);
    assert_eq!(arr.capacity(), 4);
}

// =============================================================================
// Shift correctness
// =============================================================================

#[test]
fn remove_at_deletes_exactly_one_element() {
    let original: Vec<u32> = (0..10).collect();
    for i in 0..original.len() {
        let mut arr: GrowArray<u32> = original.iter().copied().collect();
        assert_eq!(arr.remove_at(i), Some(original[i]));
        assert_eq!(arr.len(), original.len() - 1);

        let mut expected = original.clone();
        expected.remove(i);
        assert_eq!(arr.as_slice(), expected.as_slice());
    }
}

#[test]
fn out_of_range_removal_changes_nothing() {
    let mut arr: GrowArray<u32> = (0..3).collect();
    assert_eq!(arr.remove_at(99), None);
    assert_eq!(arr.as_slice(), &[0, 1, 2]);
}

// =============================================================================
// Per-frame reuse
// =============================================================================

#[test]
fn clear_then_refill_does_not_regrow() {
    // A draw-request accumulator flushes every frame; clearing must keep
    // the capacity it already paid for.
    let mut requests: GrowArray<(u32, f32)> = GrowArray::new();
    for frame in 0..3 {
        for i in 0..100 {
            requests.push((i, frame as f32));
        }
        assert_eq!(requests.len(), 100);
        let capa = requests.capacity();
        requests.clear();
        assert_eq!(requests.len(), 0);
        assert_eq!(requests.capacity(), capa);
    }
}
