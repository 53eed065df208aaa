//! Benchmarks for the per-keystroke annotation pass.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use typolens::annotate::{AiSuggestion, Annotations, TypoDictionary};
use typolens::overlay::{HitMap, Layout};

const PARAGRAPH: &str = "Todays students spends more time on social medias then ever, \
and severel goverments dont see the consequencee for concentrashun. ";

fn bench_annotate_paragraph(c: &mut Criterion) {
    let dictionary = TypoDictionary::builtin();
    let dynamic = vec![AiSuggestion::new("ever,", "before")];
    c.bench_function("annotate_paragraph", |b| {
        b.iter(|| Annotations::compute(black_box(PARAGRAPH), &dictionary, &dynamic));
    });
}

fn bench_annotate_long_draft(c: &mut Criterion) {
    let dictionary = TypoDictionary::builtin();
    let draft = format!("{PARAGRAPH}\n\n").repeat(200);
    c.bench_function("annotate_long_draft", |b| {
        b.iter(|| Annotations::compute(black_box(&draft), &dictionary, &[]));
    });
}

fn bench_layout_and_hitmap(c: &mut Criterion) {
    let dictionary = TypoDictionary::builtin();
    let draft = format!("{PARAGRAPH}\n").repeat(200);
    let notes = Annotations::compute(&draft, &dictionary, &[]);
    c.bench_function("layout_and_hitmap", |b| {
        b.iter(|| {
            let layout = Layout::new(&notes.tokens(), black_box(72));
            HitMap::build(&layout, &notes)
        });
    });
}

criterion_group!(
    benches,
    bench_annotate_paragraph,
    bench_annotate_long_draft,
    bench_layout_and_hitmap
);
criterion_main!(benches);
