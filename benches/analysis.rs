use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bioseq_analyzer::engines::compute::string_ops;
use bioseq_analyzer::modules::analysis::{BatchAnalyzer, BatchConfig};
use bioseq_analyzer::modules::io::{generate_records, GeneratorConfig};
use bioseq_analyzer::modules::seq::{DnaSequence, GeneticCode, ReferenceTables};

fn random_dna(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    string_ops::random_dna(&mut rng, len)
}

fn bench_kmp(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmp_search");
    for len in [1_000, 100_000] {
        let text = random_dna(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| string_ops::kmp_search(black_box(text), black_box(b"GAATTC")))
        });
    }
    group.finish();
}

fn bench_translate(c: &mut Criterion) {
    let code = GeneticCode::standard();
    // No stop codon, so the whole 30kb is translated
    let seq = DnaSequence::new("bench", "ATGGCCAAGTGC".repeat(2_500)).unwrap();
    c.bench_function("translate_30kb", |b| b.iter(|| black_box(&seq).translate(&code)));
}

fn bench_batch(c: &mut Criterion) {
    let tables = ReferenceTables::default();
    let analyzer = BatchAnalyzer::new(&tables, BatchConfig::default()).unwrap();
    let records = generate_records(&GeneratorConfig::default().with_seed(42)).unwrap();

    c.bench_function("batch_600_records", |b| {
        b.iter(|| analyzer.analyze(black_box(records.clone())).unwrap())
    });
}

criterion_group!(benches, bench_kmp, bench_translate, bench_batch);
criterion_main!(benches);
