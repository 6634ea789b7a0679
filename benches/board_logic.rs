use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crumble::core::Board;
use crumble::types::{BoardConfig, SpawnPolicy};

fn single_kind_board(width: usize, height: usize) -> Board {
    let row: String = "c".repeat(width);
    let rows: Vec<&str> = (0..height).map(|_| row.as_str()).collect();
    Board::from_rows(&rows).unwrap()
}

fn bench_board_fill(c: &mut Criterion) {
    let config = BoardConfig::new(10, 12).with_seed(12345);

    c.bench_function("board_fill_10x12", |b| {
        b.iter(|| Board::new(black_box(&config)))
    });
}

fn bench_board_fill_require_move(c: &mut Criterion) {
    let config = BoardConfig::new(10, 12)
        .with_seed(12345)
        .with_spawn(SpawnPolicy::RequireMove);

    c.bench_function("board_fill_require_move", |b| {
        b.iter(|| Board::new(black_box(&config)))
    });
}

fn bench_connected_group_worst_case(c: &mut Criterion) {
    // A single-kind board makes every flood span the whole grid
    let board = single_kind_board(10, 12);

    c.bench_function("connected_group_full_board", |b| {
        b.iter(|| board.connected_group(black_box(0), black_box(0)))
    });
}

fn bench_remove_and_settle(c: &mut Criterion) {
    let board = single_kind_board(10, 12);
    let group = board.connected_group(0, 0).unwrap();

    c.bench_function("remove_group_and_settle", |b| {
        b.iter(|| {
            let mut scratch = board.clone();
            scratch.remove_group(black_box(&group));
            scratch.compact_columns();
        })
    });
}

fn bench_is_over(c: &mut Criterion) {
    let board = Board::new(&BoardConfig::new(10, 12).with_seed(12345));

    c.bench_function("is_over_10x12", |b| b.iter(|| black_box(&board).is_over()));
}

criterion_group!(
    benches,
    bench_board_fill,
    bench_board_fill_require_move,
    bench_connected_group_worst_case,
    bench_remove_and_settle,
    bench_is_over
);
criterion_main!(benches);
