use boardcheck::rules::is_checkmate;
use boardcheck::{Board, Color};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_checkmate(c: &mut Criterion) {
    let positions = [
        ("back_rank", "R5k1/5ppp/8/8/8/8/8/6K1", Color::Black),
        ("interposed", "R5k1/3r1ppp/8/8/8/8/8/6K1", Color::Black),
        ("middlegame_check", "r1bqk2r/pppp1Bpp/2n2n2/2b1p3/4P3/5N2/PPPP1PPP/RNBQK2R", Color::Black),
    ];
    for (name, placement, color) in positions {
        let b = Board::from_placement(placement).unwrap();
        c.bench_function(&format!("is_checkmate_{name}"), |ben| {
            ben.iter(|| black_box(is_checkmate(black_box(&b), color)))
        });
    }
}

criterion_group!(benches, bench_checkmate);
criterion_main!(benches);
