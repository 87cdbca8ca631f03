use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use simplecorpus::config::VocabFilter;
use simplecorpus::processing::{SentenceEncoder, VocabularyBuilder};
use simplecorpus::sources::SentencePair;

// bench protocol:
//
// Synthetic pairs with a zipfian-ish token distribution,
// so that both filtered and unfiltered vocabularies are exercised.
//
// - vocabulary building
// - encoding + bucketing, unfiltered and filtered vocabularies

fn corpus(nb_pairs: usize) -> Vec<SentencePair> {
    (0..nb_pairs)
        .map(|i| {
            let len = 5 + i % 40;
            let source: Vec<String> = (0..len)
                .map(|j| format!("tok{}", (i * 31 + j * 7) % (1 + j * 50)))
                .collect();
            let target: Vec<String> = source.iter().step_by(2).cloned().collect();
            SentencePair::new(
                format!("{} in {} .", source.join(" "), 1900 + i % 120),
                format!("{} .", target.join(" ")),
            )
        })
        .collect()
}

pub fn vocabulary(c: &mut Criterion) {
    let pairs = corpus(10_000);
    c.bench_function("vocabulary 10k pairs", |b| {
        b.iter(|| {
            let mut builder = VocabularyBuilder::new();
            for pair in &pairs {
                builder.add_pair(pair);
            }
            black_box(builder.build(Some(VocabFilter::default())))
        })
    });
}

pub fn encode(c: &mut Criterion) {
    let pairs = corpus(10_000);
    let mut group = c.benchmark_group("encode+bucket 10k pairs");
    for filter in [None, Some(VocabFilter::default())] {
        let mut builder = VocabularyBuilder::new();
        for pair in &pairs {
            builder.add_pair(pair);
        }
        let built = builder.build(filter);
        let encoder = SentenceEncoder::new(&built.vocabulary, built.max_lengths[1], Some(100));
        let name = if filter.is_some() { "filtered" } else { "all" };
        group.bench_with_input(BenchmarkId::from_parameter(name), &pairs, |b, pairs| {
            b.iter(|| black_box(encoder.encode_all(pairs).unwrap().into_buckets()))
        });
    }
    group.finish();
}

criterion_group!(benches, vocabulary, encode);
criterion_main!(benches);
