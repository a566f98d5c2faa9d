use criterion::{black_box, criterion_group, criterion_main, Criterion};
use primpoly::factor::Factorization;

fn bench_trial_division(c: &mut Criterion) {
    c.bench_function("trial division of 25852", |b| {
        b.iter(|| Factorization::<u64>::by_trial_division(black_box(25852)).unwrap())
    });
}

fn bench_automatic_cascade_word(c: &mut Criterion) {
    let n = 3u64.pow(20) - 1;
    c.bench_function("automatic_cascade of 3^20 - 1", |b| {
        b.iter(|| Factorization::<u64>::automatic_cascade(black_box(n), None).unwrap())
    });
}

fn bench_miller_rabin(c: &mut Criterion) {
    c.bench_function("is_almost_surely_prime(104729)", |b| {
        b.iter(|| primpoly::factor::is_almost_surely_prime(black_box(104729)).unwrap())
    });
}

criterion_group!(benches, bench_trial_division, bench_automatic_cascade_word, bench_miller_rabin);
criterion_main!(benches);
