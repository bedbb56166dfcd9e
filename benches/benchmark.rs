//! Performance benchmarks for entry-rewrite.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use entry_rewrite::{rewrite, rewrite_entry, Options};

const LAZY_ARTICLE: &str = r#"
<h1>Sample Article Title</h1>
<p>This is the first paragraph of the article.</p>
<div data-src="https://cdn.example.org/hero.jpg" alt="Hero"></div>
<p>Here is a second paragraph with more content.</p>
<img src="placeholder.gif" data-original="https://cdn.example.org/inline.jpg" alt="Inline">
<p><span>Baca juga:</span> <a href="/other">Another story</a></p>
<div class="td-all-devices"><a href="/ad"><img src="ad.gif"></a></div>
<h3>Related Posts</h3>
<ul><li>Related article 1</li><li>Related article 2</li></ul>
"#;

const DESCRIPTION: &str = "Watch the full talk.\nSlides: https://example.org/slides.pdf\nThanks!";

fn bench_dynamic_image(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");
    group.throughput(Throughput::Bytes(LAZY_ARTICLE.len() as u64));
    group.bench_function("add_dynamic_image", |b| {
        b.iter(|| rewrite("https://example.org/a", black_box(LAZY_ARTICLE), &["add_dynamic_image"]));
    });
    group.bench_function("cleanup_metrobali", |b| {
        b.iter(|| rewrite("https://metrobali.com/a", black_box(LAZY_ARTICLE), &["cleanup_metrobali"]));
    });
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let options = Options::default();
    c.bench_function("pipeline_metrobali", |b| {
        b.iter(|| rewrite_entry("https://www.metrobali.com/story", black_box(LAZY_ARTICLE), &options));
    });
    c.bench_function("pipeline_youtube", |b| {
        b.iter(|| rewrite_entry("https://www.youtube.com/watch?v=abc123", black_box(DESCRIPTION), &options));
    });
}

criterion_group!(benches, bench_dynamic_image, bench_full_pipeline);
criterion_main!(benches);
