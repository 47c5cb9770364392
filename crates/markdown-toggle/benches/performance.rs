use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use markdown_toggle::{
    EditorHost, EditorSession, MarkdownStyle, Position, Selection, TextBuffer, order_for_mutation,
    toggle_style,
};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (markdown-toggle benchmark line)\n"
        ));
    }
    // Remove the final '\n' to avoid creating an extra trailing empty line.
    out.pop();
    out
}

/// One selection over the word "quick" on every `step`-th line.
fn word_selections(line_count: usize, step: usize) -> Vec<Selection> {
    (1..=line_count)
        .step_by(step)
        .map(|line| Selection::forward(Position::new(line, 12), Position::new(line, 17)))
        .collect()
}

fn bench_order_selections(c: &mut Criterion) {
    let text = large_text(50_000);
    let session = EditorSession::new(&text);
    let buffer = session.buffer().unwrap();
    let selections = word_selections(50_000, 10);

    c.bench_function("order_for_mutation/5k_selections", |b| {
        b.iter(|| black_box(order_for_mutation(buffer, black_box(&selections))))
    });
}

fn bench_toggle_many_cursors(c: &mut Criterion) {
    let text = large_text(50_000);
    let selections = word_selections(50_000, 50);

    c.bench_function("toggle_bold/1k_cursors", |b| {
        b.iter_batched(
            || {
                let mut session = EditorSession::new(&text);
                session.set_selections(selections.clone());
                session
            },
            |mut session| {
                toggle_style(&mut session, MarkdownStyle::Bold).unwrap();
                black_box(session.buffer().unwrap().document_length());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_toggle_round_trip_single_cursor(c: &mut Criterion) {
    let text = large_text(50_000);
    let mut session = EditorSession::new(&text);
    // Well into the file to avoid warming only the top-of-document paths.
    session.set_selection(Selection::forward(
        Position::new(25_000, 12),
        Position::new(25_000, 17),
    ));

    c.bench_function("toggle_bold/round_trip_middle", |b| {
        b.iter(|| {
            toggle_style(&mut session, MarkdownStyle::Bold).unwrap();
            toggle_style(&mut session, MarkdownStyle::Bold).unwrap();
            black_box(session.selections_ref());
        })
    });
}

criterion_group!(
    benches,
    bench_order_selections,
    bench_toggle_many_cursors,
    bench_toggle_round_trip_single_cursor
);
criterion_main!(benches);
