use super::*;

#[test]
fn slots_are_disjoint_and_zeroed() {
    let mut arena = ScratchArena::new();
    let a = arena.allocate(4);
    let b = arena.allocate(8);
    assert_eq!(a.len(), 4);
    assert_eq!(b.len(), 8);

    arena.slot_mut(a).fill(1.0);
    assert!(arena.slot(b).iter().all(|v| *v == 0.0));
    assert!(arena.slot(a).iter().all(|v| *v == 1.0));
    assert_eq!(arena.allocation_count(), 2);
    assert_eq!(arena.bytes_reserved(), 12 * 4);
}

#[test]
fn reset_releases_everything() {
    let mut arena = ScratchArena::new();
    let _ = arena.allocate(32);
    arena.reset();
    assert_eq!(arena.allocation_count(), 0);
    assert_eq!(arena.bytes_reserved(), 0);

    let s = arena.allocate(2);
    assert!(arena.slot(s).iter().all(|v| *v == 0.0));
}

#[test]
fn contains_tracks_live_storage() {
    let mut arena = ScratchArena::new();
    let slot = arena.allocate(8);
    assert!(arena.contains(slot));
    assert!(!ScratchArena::new().contains(slot));

    arena.reset();
    assert!(!arena.contains(slot));
    let _ = arena.allocate(4);
    assert!(!arena.contains(slot));
}
