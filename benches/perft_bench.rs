use criterion::{black_box, criterion_group, criterion_main, Criterion};
use isobot::board::{Board, Player};
use isobot::perft::{perft, perft_copy};

// Make/unmake against per-node copies on the same tree.
fn bench_perft(c: &mut Criterion) {
    let b = Board::corners(5).unwrap();
    c.bench_function("perft_3_make_unmake", |ben| {
        ben.iter(|| {
            let mut scratch = b.clone();
            black_box(perft(&mut scratch, Player::One, 3))
        })
    });
    c.bench_function("perft_3_copy", |ben| {
        ben.iter(|| black_box(perft_copy(black_box(&b), Player::One, 3)))
    });
}

criterion_group!(benches, bench_perft);
criterion_main!(benches);
