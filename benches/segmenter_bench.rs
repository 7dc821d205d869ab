use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use siftkit::{locate, SanitizeLevel, Sanitizer, SentenceSegmenter};

const SIMPLE_TEXT: &str = "Hello world. This is a test. How are you?";
const MIXED_TEXT: &str = "我非常喜欢算法！I am very interested in algorithm.特别是NLP？Yes!! Really... ok";

fn long_text() -> String {
    MIXED_TEXT.repeat(2000)
}

fn bench_segmentation(c: &mut Criterion) {
    let segmenter = SentenceSegmenter::with_default_rules().unwrap();
    let long = long_text();

    let mut group = c.benchmark_group("segment");
    group.throughput(Throughput::Bytes(long.len() as u64));
    group.bench_function("simple_borrowed", |b| {
        b.iter(|| segmenter.segment_borrowed(black_box(SIMPLE_TEXT)))
    });
    group.bench_function("long_borrowed", |b| b.iter(|| segmenter.segment_borrowed(black_box(&long))));
    group.bench_function("long_normalized", |b| b.iter(|| segmenter.segment_normalized(black_box(&long))));
    group.finish();
}

fn bench_locate_and_sanitize(c: &mut Criterion) {
    let long = long_text();
    let html = format!("<div><p>{}</p><!-- c --></div>", long);
    let sanitizer = Sanitizer::new().unwrap();

    c.bench_function("locate_long", |b| b.iter(|| locate(black_box(&long), "算法").unwrap()));
    c.bench_function("sanitize_normal", |b| {
        b.iter(|| sanitizer.sanitize(black_box(&html), SanitizeLevel::Normal))
    });
    c.bench_function("sanitize_deeper", |b| {
        b.iter(|| sanitizer.sanitize(black_box(&html), SanitizeLevel::Deeper))
    });
}

criterion_group!(benches, bench_segmentation, bench_locate_and_sanitize);
criterion_main!(benches);
