use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fallblock::core::{Board, EngineConfig, Game, Piece};
use fallblock::types::{Cell, Color, Orientation, PieceKind};

fn bench_drop_tick(c: &mut Criterion) {
    let mut game = Game::new(EngineConfig::default().with_seed(12345)).unwrap();

    c.bench_function("soft_drop_tick", |b| {
        b.iter(|| {
            if !game.has_active_piece() && !game.spawn_next() {
                game.restart();
            }
            black_box(game.soft_drop_tick());
            game.take_events();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let color = Color::new(200, 40, 40);
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::default();
            // Fill bottom 4 rows
            for y in 18..22 {
                for x in 0..10 {
                    board.set(x, y, Cell::occupied(color));
                }
            }
            black_box(board.check_and_clear_lines());
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut board = Board::default();
    let piece = Piece::new(PieceKind::T, Color::new(1, 2, 3), Orientation::Top);

    c.bench_function("place_piece", |b| {
        b.iter(|| {
            black_box(board.place_at(black_box(piece), 4));
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut board = Board::default();
    board.place_at(Piece::new(PieceKind::L, Color::new(1, 2, 3), Orientation::Left), 4);

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            board.move_left();
            board.move_right();
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut board = Board::default();
    board.place_at(Piece::new(PieceKind::T, Color::new(1, 2, 3), Orientation::Top), 4);
    board.move_down();

    c.bench_function("rotate_right", |b| {
        b.iter(|| {
            black_box(board.rotate_right());
        })
    });
}

criterion_group!(
    benches,
    bench_drop_tick,
    bench_line_clear,
    bench_piece_spawn,
    bench_move,
    bench_rotate
);
criterion_main!(benches);
