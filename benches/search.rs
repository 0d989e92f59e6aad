//! Benchmarks for inline search and the scroll-spy.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use contextsite::i18n::{Lang, Strings};
use contextsite::search::{InlineSearchIndex, filter_records};
use contextsite::site::{ContactForm, Route, build_page, home_search_records, home_toc_entries, line_to_px};
use contextsite::toc::{LOOKAHEAD_PX, active_entry};

fn bench_filter_records(c: &mut Criterion) {
    let records = home_search_records(Strings::new(Lang::En));
    c.bench_function("filter_records", |b| {
        b.iter(|| filter_records(black_box(&records), black_box("context")));
    });
}

fn bench_incremental_typing(c: &mut Criterion) {
    let query = "context engineering";
    c.bench_function("search_keystrokes", |b| {
        b.iter(|| {
            let mut index = InlineSearchIndex::new(home_search_records(Strings::new(Lang::Fr)));
            for end in 1..=query.len() {
                index.set_query(&query[..end]);
            }
            black_box(index.results().len())
        });
    });
}

fn bench_active_entry(c: &mut Criterion) {
    let entries = home_toc_entries(Strings::new(Lang::En));
    let layout = build_page(Route::default(), 80, &ContactForm::default());
    let bottom = line_to_px(layout.line_count());
    c.bench_function("active_entry_sweep", |b| {
        b.iter(|| {
            (0..bottom)
                .step_by(20)
                .filter_map(|y| active_entry(&entries, &layout, y, LOOKAHEAD_PX))
                .count()
        });
    });
}

criterion_group!(
    benches,
    bench_filter_records,
    bench_incremental_typing,
    bench_active_entry
);
criterion_main!(benches);
