use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use eol_guard::{
    DocumentTable, LineEndingStats, NormalizeOptions, Normalizer, Position, SaveInterceptor,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LINE_ENDINGS: [&str; 3] = ["\r\n", "\n", "\r"];

fn mixed_text(line_count: usize) -> String {
    let mut rng = StdRng::seed_from_u64(0x0d0a);
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (eol-guard benchmark line)"
        ));
        if rng.gen_bool(0.1) {
            out.push_str("  \t");
        }
        out.push_str(LINE_ENDINGS[rng.gen_range(0..LINE_ENDINGS.len())]);
    }
    out
}

fn bench_normalize_mixed(c: &mut Criterion) {
    let text = mixed_text(50_000);
    let normalizer = Normalizer::default();
    c.bench_function("normalize/50k_lines_mixed", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(&text))))
    });
}

fn bench_normalize_trim(c: &mut Criterion) {
    let text = mixed_text(50_000);
    let normalizer = Normalizer::new(NormalizeOptions {
        trim_trailing_whitespace: true,
    });
    c.bench_function("normalize/50k_lines_trim", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(&text))))
    });
}

fn bench_stats(c: &mut Criterion) {
    let text = mixed_text(50_000);
    c.bench_function("stats/50k_lines", |b| {
        b.iter(|| black_box(LineEndingStats::scan(black_box(&text))))
    });
}

fn bench_save_roundtrip(c: &mut Criterion) {
    let text = mixed_text(50_000);
    c.bench_function("save/50k_lines_with_caret", |b| {
        b.iter_batched(
            || {
                let mut table = DocumentTable::new();
                table.advise(SaveInterceptor::default());
                let doc = table.open(None, text.clone()).unwrap();
                table.set_caret(doc, Position::new(25_000, 10)).unwrap();
                (table, doc)
            },
            |(mut table, doc)| black_box(table.save(doc).unwrap()),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_normalize_mixed,
    bench_normalize_trim,
    bench_stats,
    bench_save_roundtrip
);
criterion_main!(benches);
