use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lexicalc::{Coercion, FunctionCollection, Tokenizer, Variant};

fn tokenizer_benchmark(c: &mut Criterion) {
    let source = r#"
        If(total >= 100, 'large', "small") // classify
        /* running sum */ Sum(-1.5, 2, 3.25) <> Max(a, b, c)
    "#;

    c.bench_function("tokenize expression", |b| {
        b.iter(|| Tokenizer::new(black_box(source)).tokenize().unwrap())
    });

    let long_source = source.repeat(100);
    c.bench_function("tokenize long source", |b| {
        b.iter(|| Tokenizer::new(black_box(&long_source)).tokenize().unwrap())
    });
}

fn function_benchmark(c: &mut Criterion) {
    let functions = FunctionCollection::new();
    let ops = Coercion::new();
    let params: Vec<Variant> = (0..32).map(Variant::Int32).collect();

    c.bench_function("evaluate Sum", |b| {
        b.iter(|| functions.evaluate("sum", black_box(&params), &ops).unwrap())
    });

    c.bench_function("evaluate Max", |b| {
        b.iter(|| functions.evaluate("MAX", black_box(&params), &ops).unwrap())
    });
}

criterion_group!(benches, tokenizer_benchmark, function_benchmark);
criterion_main!(benches);
