use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fprule::{CompiledRule, Context, Engine, Expr, keyword};

const KEYWORDS: [&str; 4] = ["header", "body", "title", "icon"];

/// Build rule text with `n` predicates cycling through every comparator,
/// grouped in pairs: `(a && b) || (c && d) || ...`.
fn rule_text(n: usize) -> String {
    let predicates: Vec<String> = (0..n)
        .map(|i| {
            let kw = KEYWORDS[i % KEYWORDS.len()];
            match i % 4 {
                0 => format!("{kw}=\"needle{i}\""),
                1 => format!("{kw}!=\"absent{i}\""),
                2 => format!("{kw}==\"exact{i}\""),
                _ => format!("{kw}~=\"v{i}\\.\\d+\""),
            }
        })
        .collect();
    predicates
        .chunks(2)
        .map(|pair| format!("({})", pair.join(" && ")))
        .collect::<Vec<_>>()
        .join(" || ")
}

/// A context that fails every group, so evaluation visits every `||` branch.
fn miss_context() -> Context {
    Context::new()
        .set("header", "Server: nginx/1.25.3\r\nX-Powered-By: PHP/8.2")
        .set("body", "<html><head><title>Welcome</title></head><body>It works!</body></html>")
        .set("title", "Welcome")
        .set("icon", "-1234567890")
}

fn build(n: usize) -> CompiledRule {
    Engine::default().compile(&rule_text(n)).unwrap()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_eval");
    let ctx = miss_context();

    for &n in &[4, 16, 64] {
        let rule = build(n);
        group.bench_function(&format!("{n}_predicates"), |b| {
            b.iter(|| rule.is_match(black_box(&ctx)));
        });
    }

    let hit = Engine::default()
        .compile(r#"body="it works" || title="nginx""#)
        .unwrap();
    group.bench_function("short_circuit_hit", |b| {
        b.iter(|| hit.is_match(black_box(&ctx)));
    });

    group.finish();
}

fn bench_context_construction(c: &mut Criterion) {
    let engine = Engine::default();
    c.bench_function("context_construction", |b| {
        b.iter(|| {
            engine.new_context(black_box([
                ("Header", "Server: nginx"),
                ("Body", "It works!"),
                ("Title", "Welcome"),
                ("Icon", "-1234567890"),
            ]))
        });
    });
}

fn bench_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");
    let engine = Engine::default();

    for &n in &[4, 16, 64] {
        let text = rule_text(n);
        group.bench_function(&format!("{n}_predicates_text"), |b| {
            b.iter(|| black_box(engine.compile(black_box(&text)).unwrap()));
        });
    }

    group.bench_function("builder", |b| {
        b.iter(|| {
            let expr: Expr = keyword("body").contains("nginx").and(
                keyword("title")
                    .equal("Welcome")
                    .or(keyword("header").regexp_match(r"nginx/\d")),
            );
            black_box(engine.compile_expr(expr).unwrap())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_context_construction,
    bench_compilation
);
criterion_main!(benches);
