use criterion::{Criterion, SamplingMode, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use tictactoe_common::games::tictactoe::{Board, Side, analyze, best_move, exhaustive_best_move};

fn bench_self_play() {
    let mut board = Board::new();
    while !board.outcome().is_terminal() {
        let side = board.side_to_move();
        let Ok(index) = best_move(&board, side) else {
            break;
        };
        let Ok(next) = board.apply_move(index, side) else {
            break;
        };
        board = next;
    }
}

fn mid_game_board() -> Board {
    let Ok(board) = "X...O...X".parse::<Board>() else {
        panic!("mid-game board literal is invalid");
    };
    board
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(20)
        .measurement_time(Duration::from_secs(10));

    let empty = Board::new();
    let mid_game = mid_game_board();

    group.bench_function("single_move_empty", |b| {
        b.iter(|| analyze(black_box(&empty), Side::X))
    });

    group.bench_function("single_move_mid_game", |b| {
        b.iter(|| analyze(black_box(&mid_game), Side::O))
    });

    group.bench_function("self_play", |b| b.iter(bench_self_play));

    group.bench_function("exhaustive_empty", |b| {
        b.iter(|| exhaustive_best_move(black_box(&empty), Side::X))
    });

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
