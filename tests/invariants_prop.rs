//! Property tests for board and lifecycle invariants.
//!
//! Random command sequences on random board sizes must never:
//! - leave the falling piece with anything but four in-bounds, occupied cells
//! - change the board when a command is rejected
//! - lose or invent occupied cells, except through scored line clears
//! - honor more than one hold per spawn

use std::collections::HashSet;

use fallblock::core::{calculate_line_score, EngineConfig, Game};
use fallblock::types::{Descent, GameEvent};
use proptest::prelude::*;

fn occupied(game: &Game) -> usize {
    game.board().cells().iter().filter(|c| c.is_occupied()).count()
}

fn assert_active_cells_consistent(game: &Game) {
    let board = game.board();
    let cells = board.active_cells();

    match board.active_piece() {
        Some(piece) => {
            assert_eq!(cells.len(), 4);
            let unique: HashSet<_> = cells.iter().collect();
            assert_eq!(unique.len(), 4);
            for p in cells {
                let cell = board.get(p.x, p.y).expect("active cell in bounds");
                assert!(cell.is_occupied());
                assert_eq!(cell.color, piece.color());
            }
        }
        None => assert!(cells.is_empty()),
    }
}

proptest! {
    #[test]
    fn random_commands_keep_invariants(
        seed in any::<u32>(),
        width in 4u16..12,
        height in 4u16..24,
        commands in prop::collection::vec(0u8..7, 1..300),
    ) {
        let config = EngineConfig::new(width, height).with_seed(seed);
        let mut game = Game::new(config).unwrap();

        for cmd in commands {
            if game.game_over() {
                break;
            }

            let before = game.board().clone();
            let count_before = occupied(&game);
            let score_before = game.score();

            match cmd {
                0 => {
                    if game.spawn_next() {
                        prop_assert!(game.can_hold());
                        prop_assert_eq!(occupied(&game), count_before + 4);
                    } else if !game.game_over() {
                        prop_assert_eq!(game.board(), &before);
                    }
                }
                1 | 2 | 3 | 4 => {
                    let ok = match cmd {
                        1 => game.move_left(),
                        2 => game.move_right(),
                        3 => game.rotate_left(),
                        _ => game.rotate_right(),
                    };
                    if !ok {
                        prop_assert_eq!(game.board(), &before);
                    }
                    prop_assert_eq!(occupied(&game), count_before);
                }
                5 => {
                    let descent = game.soft_drop_tick();
                    let mut cleared = 0;
                    for event in game.take_events() {
                        if let GameEvent::LinesCleared { count, points } = event {
                            prop_assert_eq!(points, calculate_line_score(width as u32, count));
                            cleared += count as usize;
                        }
                    }
                    if descent != Descent::Landed {
                        prop_assert_eq!(cleared, 0);
                    }
                    prop_assert_eq!(occupied(&game), count_before - cleared * width as usize);
                }
                _ => {
                    if game.hold() {
                        prop_assert!(!game.can_hold());
                        prop_assert!(game.peek_held().is_some());
                        prop_assert!(!game.hold());
                    } else {
                        prop_assert_eq!(game.board(), &before);
                    }
                }
            }

            prop_assert!(game.score() >= score_before);
            assert_active_cells_consistent(&game);
        }
    }

    #[test]
    fn lateral_moves_are_reversible(seed in any::<u32>(), shifts in 1usize..6) {
        let mut game = Game::new(EngineConfig::default().with_seed(seed)).unwrap();
        prop_assert!(game.spawn_next());
        let start = game.board().clone();

        let mut moved = 0;
        for _ in 0..shifts {
            if game.move_right() {
                moved += 1;
            }
        }
        for _ in 0..moved {
            prop_assert!(game.move_left());
        }
        prop_assert_eq!(game.board(), &start);
    }
}
