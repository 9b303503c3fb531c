use std::hint::black_box;
use std::time::Instant;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sieve_core::extract::{FunctionExtractor, StringExtractor, run};
use sieve_core::parser::{ParseOptions, SourceParser, SwcParser};
use sieve_core::patterns::{PatternRegistry, match_patterns};
use sieve_core::visitor::VisitorContext;
use sieve_core::{Extractor, OptionsUpdate};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/fixtures");

fn generate_500_loc_typescript() -> String {
    let mut code = String::with_capacity(20000);
    code.push_str("// Generated 500 LOC TypeScript file for benchmarking\n\n");

    for i in 0..25 {
        code.push_str(&format!(
            r#"interface Entity{i} {{
    id: number;
    name: string;
    createdAt: Date;
    updatedAt: Date;
    metadata?: Record<string, unknown>;
}}

function processEntity{i}(entity: Entity{i}): Entity{i} {{
    const result = {{
        ...entity,
        updatedAt: new Date(),
    }};
    if (entity.metadata) {{
        result.metadata = {{ ...entity.metadata, processed: true }};
    }}
    return result;
}}

async function fetchEntity{i}(id: number): Promise<Entity{i} | null> {{
    const response = await fetch(`/api/entities/{i}/${{id}}`);
    if (!response.ok) {{
        return null;
    }}
    return response.json();
}}

"#,
            i = i
        ));
    }

    code
}

fn generate_100_files() -> Vec<String> {
    (0..100)
        .map(|i| {
            format!(
                r#"import {{ request }} from './http';

const ENDPOINT_{i} = 'https://service-{i}.example.com/items';

export function load{i}(id: string) {{
    return request(ENDPOINT_{i} + '/' + id, {{ retries: 3 }});
}}
"#,
                i = i
            )
        })
        .collect()
}

fn read_fixture(path: &str) -> String {
    std::fs::read_to_string(format!("{}/{}", FIXTURES_DIR, path))
        .unwrap_or_else(|_| panic!("Failed to read fixture: {}", path))
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    let parser = SwcParser::new();
    let options = ParseOptions::default();

    let code_500 = generate_500_loc_typescript();
    let lines_500 = code_500.lines().count();

    group.throughput(Throughput::Elements(lines_500 as u64));
    group.bench_function("parse_500_loc", |b| {
        b.iter(|| parser.parse(black_box(&code_500), &options))
    });

    let module_code = read_fixture("javascript/module.js");
    group.throughput(Throughput::Elements(module_code.lines().count() as u64));
    group.bench_function("parse_module_fixture", |b| {
        b.iter(|| parser.parse(black_box(&module_code), &options))
    });

    group.finish();
}

fn bench_passes(c: &mut Criterion) {
    let mut group = c.benchmark_group("passes");

    let code_500 = generate_500_loc_typescript();
    let parsed = match SwcParser::new().parse(&code_500, &ParseOptions::default()) {
        Ok(parsed) => parsed,
        Err(e) => panic!("benchmark source failed to parse: {}", e),
    };

    group.bench_function("strings_500_loc", |b| {
        b.iter(|| {
            let ctx = VisitorContext::new(&parsed);
            run(StringExtractor::new(1, &[]), black_box(&ctx))
        })
    });

    group.bench_function("functions_500_loc", |b| {
        b.iter(|| {
            let ctx = VisitorContext::new(&parsed);
            run(FunctionExtractor::new(), black_box(&ctx))
        })
    });

    let registry = PatternRegistry::with_defaults();
    group.bench_function("patterns_500_loc", |b| {
        b.iter(|| match_patterns(&registry, black_box(&code_500)))
    });

    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    let code_500 = generate_500_loc_typescript();
    group.bench_function("extract_500_loc", |b| {
        let mut extractor = Extractor::new();
        b.iter(|| {
            let _ = extractor.extract(black_box(&code_500));
            extractor.clear_results();
        })
    });

    let strings_only = OptionsUpdate {
        extract_functions: Some(false),
        extract_variables: Some(false),
        extract_classes: Some(false),
        extract_imports: Some(false),
        extract_exports: Some(false),
        ..OptionsUpdate::default()
    };
    group.bench_function("extract_500_loc_strings_only", |b| {
        let mut extractor = Extractor::new();
        b.iter(|| {
            let _ = extractor.extract_with(black_box(&code_500), &strings_only);
            extractor.clear_results();
        })
    });

    let files_100 = generate_100_files();
    for size in [10, 25, 50, 100] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("project_size", size), &size, |b, &size| {
            let mut extractor = Extractor::new();
            b.iter(|| {
                for file in files_100.iter().take(size) {
                    let _ = extractor.extract(black_box(file));
                }
                extractor.clear_results();
            })
        });
    }

    group.finish();
}

fn bench_latency_percentiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("latency");

    let code_500 = generate_500_loc_typescript();

    group.bench_function("p95_500_loc_extract", |b| {
        let mut extractor = Extractor::new();
        b.iter_custom(|iters| {
            let mut durations: Vec<_> = (0..iters)
                .map(|_| {
                    let start = Instant::now();
                    let _ = extractor.extract(black_box(&code_500));
                    start.elapsed()
                })
                .collect();
            extractor.clear_results();
            durations.sort();
            let p95_idx = ((iters as f64) * 0.95) as usize;
            let p95_idx = p95_idx.min(durations.len().saturating_sub(1));
            durations[p95_idx]
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_passes,
    bench_extraction,
    bench_latency_percentiles
);
criterion_main!(benches);
