use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_duel::ai::{board_stats, find_best_move, STRATEGIES};
use tetris_duel::core::{Board, GameSession};
use tetris_duel::types::PieceKind;

/// A jagged mid-game stack with a couple of buried holes.
fn rough_board() -> Board {
    let mut board = Board::new();
    for x in 0..10i8 {
        let height = 2 + (x % 4);
        for y in (20 - height)..20 {
            board.set(x, y, Some(PieceKind::J));
        }
    }
    board.set(2, 19, None);
    board.set(6, 19, None);
    board
}

fn bench_search_empty(c: &mut Criterion) {
    let board = Board::new();
    let weights = &STRATEGIES[0].weights;

    c.bench_function("search_empty_board", |b| {
        b.iter(|| find_best_move(black_box(&board), PieceKind::T, weights))
    });
}

fn bench_search_rough(c: &mut Criterion) {
    let board = rough_board();
    let weights = &STRATEGIES[3].weights;

    c.bench_function("search_rough_board", |b| {
        b.iter(|| find_best_move(black_box(&board), PieceKind::I, weights))
    });
}

fn bench_board_stats(c: &mut Criterion) {
    let board = rough_board();

    c.bench_function("board_stats", |b| {
        b.iter(|| board_stats(black_box(&board)))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows()
        })
    });
}

fn bench_session_advance(c: &mut Criterion) {
    let mut session = GameSession::new(&STRATEGIES[1], 42);

    c.bench_function("session_advance", |b| {
        b.iter(|| {
            session.advance();
            if session.game_over() {
                session.reset();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_search_empty,
    bench_search_rough,
    bench_board_stats,
    bench_line_clear,
    bench_session_advance
);
criterion_main!(benches);
