use cinedex_core::tokenizer::normalize;
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_normalize(c: &mut Criterion) {
    let text = include_str!("../../README.md");
    c.bench_function("normalize_readme", |b| b.iter(|| normalize(text, None)));
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
