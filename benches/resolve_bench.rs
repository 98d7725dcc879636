use boardcheck::rules::{resolve, MoveLog};
use boardcheck::{Board, Color, Position};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sq(s: &str) -> Position { s.parse().unwrap() }

fn bench_resolve(c: &mut Criterion) {
    let start = Board::initial();
    let push = start.relocated(sq("e2"), sq("e4"));
    let log = MoveLog::new();
    c.bench_function("resolve_e2e4", |ben| {
        ben.iter(|| black_box(resolve(black_box(&start), black_box(&push), Color::White, &log)))
    });

    let before = Board::from_placement("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR").unwrap();
    let mate = before.relocated(sq("h5"), sq("f7"));
    let log: MoveLog = ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"].iter().map(|m| m.parse().unwrap()).collect();
    c.bench_function("resolve_scholars_mate", |ben| {
        ben.iter(|| black_box(resolve(black_box(&before), black_box(&mate), Color::White, &log)))
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
