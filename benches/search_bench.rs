//! Search benchmarks using Criterion.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use salmon_search::search::{BestMoveRegister, CancelToken, Search, INFINITY};
use salmon_search::{board, ordering, CapturedSet, Evaluator, PositionHistory, TranspositionTable};

const MIDDLEGAME: &str = "r3k2r/ppp2ppp/2n5/3qp3/3P4/2N2N2/PPP2PPP/R2QK2R b - - 0 1";

fn bench_evaluate_starting(c: &mut Criterion) {
    let board = board::starting_position();
    let evaluator = Evaluator::new();
    let captured = CapturedSet::new();
    let history = PositionHistory::new();

    c.bench_function("evaluate_starting_position", |b| {
        b.iter(|| black_box(evaluator.evaluate(&board, &captured, &history)))
    });
}

fn bench_order_moves_middlegame(c: &mut Criterion) {
    let board = board::from_fen(MIDDLEGAME).unwrap();

    c.bench_function("order_moves_middlegame", |b| {
        b.iter(|| black_box(ordering::order_moves(&board)))
    });
}

fn bench_search_depth_3(c: &mut Criterion) {
    let board = board::from_fen(MIDDLEGAME).unwrap();
    let register = BestMoveRegister::new(board::legal_moves(&board)[0]);
    let cancel = CancelToken::new();

    c.bench_function("search_middlegame_depth_3", |b| {
        b.iter(|| {
            // Fresh table each run so every iteration does the full search
            let table = TranspositionTable::new();
            let mut search = Search::new(&table, &register, &cancel, 3, board.side_to_move());
            black_box(search.search(
                &board,
                3,
                -INFINITY,
                INFINITY,
                true,
                &mut CapturedSet::new(),
                &mut PositionHistory::new(),
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_evaluate_starting,
    bench_order_moves_middlegame,
    bench_search_depth_3,
);
criterion_main!(benches);
