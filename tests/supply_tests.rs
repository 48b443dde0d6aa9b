//! Piece supply tests - next preview and hold slot

use fallblock::core::{HoldOutcome, Palette, PieceSupply, ScriptedRng, SimpleRng};
use fallblock::types::{Orientation, PieceKind};

#[test]
fn test_draw_order_is_kind_then_orientation() {
    // kind 1 (T), orientation 3 (Bottom)
    let mut rng = ScriptedRng::new(vec![1, 3]);
    let supply = PieceSupply::new(Palette::default(), &mut rng);
    assert_eq!(supply.peek_next().kind(), PieceKind::T);
    assert_eq!(supply.peek_next().orientation(), Orientation::Bottom);
}

#[test]
fn test_all_playable_kinds_appear() {
    let mut rng = SimpleRng::new(2024);
    let mut supply = PieceSupply::new(Palette::default(), &mut rng);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(supply.take_next(&mut rng).kind());
    }
    assert_eq!(seen.len(), PieceKind::PLAYABLE.len());
    assert!(!seen.contains(&PieceKind::Background));
}

#[test]
fn test_same_seed_same_sequence() {
    let draw = |seed| {
        let mut rng = SimpleRng::new(seed);
        let mut supply = PieceSupply::new(Palette::default(), &mut rng);
        (0..20).map(|_| supply.take_next(&mut rng)).collect::<Vec<_>>()
    };
    assert_eq!(draw(77), draw(77));
}

#[test]
fn test_hold_once_per_spawn() {
    let mut rng = SimpleRng::new(5);
    let mut supply = PieceSupply::new(Palette::default(), &mut rng);
    let a = supply.take_next(&mut rng);

    let b = match supply.hold(a, &mut rng) {
        HoldOutcome::Stored { next } => next,
        other => panic!("expected Stored, got {:?}", other),
    };
    // Playing the replacement does not re-arm hold.
    assert!(!supply.can_hold());
    assert_eq!(supply.hold(b, &mut rng), HoldOutcome::Rejected(b));
    assert_eq!(supply.peek_held(), Some(&a));

    // Only a fresh spawn re-arms it.
    let c = supply.take_next(&mut rng);
    assert!(supply.can_hold());
    assert_eq!(supply.hold(c, &mut rng), HoldOutcome::Swapped { previous: a });
    assert_eq!(supply.peek_held(), Some(&c));
}

#[test]
fn test_swap_does_not_consume_next() {
    let mut rng = SimpleRng::new(8);
    let mut supply = PieceSupply::new(Palette::default(), &mut rng);
    let a = supply.take_next(&mut rng);
    let _ = supply.hold(a, &mut rng);
    let b = supply.take_next(&mut rng);
    let upcoming = *supply.peek_next();

    let _ = supply.hold(b, &mut rng);
    assert_eq!(supply.peek_next(), &upcoming);
}
