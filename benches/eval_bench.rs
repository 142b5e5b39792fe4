use criterion::{black_box, criterion_group, criterion_main, Criterion};
use isobot::board::{Board, Player};
use isobot::search::eval::score;

fn bench_eval(c: &mut Criterion) {
    let b = Board::corners(7).unwrap();
    c.bench_function("score_corners_7x7", |ben| {
        ben.iter(|| {
            let v = score(black_box(&b), Player::One);
            black_box(v)
        })
    });
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
