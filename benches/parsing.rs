use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tomlet::{parse, to_string, Tokenizer};

const CONFIG: &str = r#"
title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00

[database]
enabled = true
ports = [ 8000, 8001, 8002 ]
data = [ ["delta", "phi"], [3.14] ]
temp_targets = { cpu = 79.5, case = 72.0 }

[servers.alpha]
ip = "10.0.0.1"
role = "frontend"

[servers.beta]
ip = "10.0.0.2"
role = "backend"
"#;

fn products(size: usize) -> String {
    let mut text = String::new();
    for i in 0..size {
        text.push_str(&format!(
            "[[products]]\nsku = 'SKU{}'\nname = \"Product {}\"\nprice = {}\nquantity = {}\n\n",
            i,
            i,
            9.99 + i as f64,
            i
        ));
    }
    text
}

fn benchmark_parse_config(c: &mut Criterion) {
    c.bench_function("parse_config", |b| b.iter(|| parse(black_box(CONFIG))));
}

fn benchmark_tokenize_config(c: &mut Criterion) {
    c.bench_function("tokenize_config", |b| {
        b.iter(|| Tokenizer::new(black_box(CONFIG)).count())
    });
}

fn benchmark_write_config(c: &mut Criterion) {
    let doc = parse(CONFIG).unwrap();
    c.bench_function("write_config", |b| b.iter(|| to_string(black_box(doc.root()))));
}

fn benchmark_arrays_of_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrays_of_tables");

    for size in [10, 50, 100, 500].iter() {
        let text = products(*size);
        group.bench_with_input(BenchmarkId::new("parse", size), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });

        let doc = parse(&text).unwrap();
        group.bench_with_input(BenchmarkId::new("write", size), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc.root())))
        });
    }
    group.finish();
}

fn benchmark_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("strings");

    let basic = format!("s = \"{}\"", "escaped \\t text \\u00E9 ".repeat(20));
    let literal = format!("s = '{}'", "C:\\raw\\path ".repeat(20));
    let multiline = format!("s = \"\"\"\n{}\"\"\"", "a line of text \\\n".repeat(20));

    group.bench_function("basic", |b| b.iter(|| parse(black_box(&basic))));
    group.bench_function("literal", |b| b.iter(|| parse(black_box(&literal))));
    group.bench_function("multiline_basic", |b| b.iter(|| parse(black_box(&multiline))));

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let doc = parse(CONFIG).unwrap();
    let json = serde_json::to_string(&doc).unwrap();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("toml_parse", |b| b.iter(|| parse(black_box(CONFIG))));
    group.bench_function("json_parse", |b| {
        b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(&json)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    c.bench_function("roundtrip_config", |b| {
        b.iter(|| {
            let doc = parse(black_box(CONFIG)).unwrap();
            let _again = parse(&doc.to_string()).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse_config,
    benchmark_tokenize_config,
    benchmark_write_config,
    benchmark_arrays_of_tables,
    benchmark_strings,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
