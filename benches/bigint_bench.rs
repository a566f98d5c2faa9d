use criterion::{black_box, criterion_group, criterion_main, Criterion};
use primpoly::bigint::{self, BigInt};

fn bench_power(c: &mut Criterion) {
    c.bench_function("bigint::power(13, 19)", |b| {
        b.iter(|| bigint::power(black_box(13), black_box(19)).unwrap())
    });
}

fn bench_mul(c: &mut Criterion) {
    let a = BigInt::from_decimal_str("3141592653589793238462643383279").unwrap();
    let n = BigInt::from_decimal_str("2718281828459045").unwrap();
    c.bench_function("bigint mul of a 31-digit and a 16-digit value", |b| {
        b.iter(|| black_box(&a).mul(black_box(&n)))
    });
}

fn bench_div_rem(c: &mut Criterion) {
    let product = BigInt::from_decimal_str("3141592653589793238462643383279")
        .unwrap()
        .mul(&BigInt::from_decimal_str("2718281828459045").unwrap());
    let n = BigInt::from_decimal_str("2718281828459045").unwrap();
    c.bench_function("bigint div_rem recovering a 31-digit quotient", |b| {
        b.iter(|| black_box(&product).div_rem(black_box(&n)).unwrap())
    });
}

criterion_group!(benches, bench_power, bench_mul, bench_div_rem);
criterion_main!(benches);
