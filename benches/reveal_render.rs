use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use revealer::core::message::Message;
use revealer::core::view::MessageView;
use revealer::ui::markdown::{MessageRenderer, RenderConfig};
use revealer::ui::theme::Theme;

fn long_reply(paragraphs: usize) -> String {
    let mut content = String::from("<Thinking>Outline the answer, then add an example.</Thinking>");
    for i in 0..paragraphs {
        content.push_str(&format!(
            "## Section {i}\n\nlorem ipsum *dolor* sit amet, `consectetur` adipiscing elit.\n\n- one\n- two\n\n```rust\nfn section_{i}() -> usize {{ {i} }}\n```\n\n"
        ));
    }
    content
}

fn bench_reveal_render(c: &mut Criterion) {
    let theme = Theme::dark_default();

    for &paragraphs in &[10usize, 40usize] {
        let message = Message::assistant(1, long_reply(paragraphs));
        let mut view = MessageView::new(&message);
        while view.needs_tick() {
            view.tick(view.reveal().cycle());
        }
        let text = view.revealed().to_string();

        let mut group = c.benchmark_group(format!("render_paragraphs{paragraphs}"));
        group.throughput(Throughput::Bytes(text.len() as u64));

        for syntax in [false, true] {
            let renderer = MessageRenderer::new(
                theme.clone(),
                RenderConfig {
                    markdown: true,
                    syntax_highlighting: syntax,
                },
            );
            group.bench_function(BenchmarkId::new("full", syntax), |b| {
                b.iter(|| renderer.render(&text))
            });
        }

        // Re-rendering every revealed prefix the way a reveal redraws.
        let renderer = MessageRenderer::new(theme.clone(), RenderConfig::default());
        let step = (view.reveal().len() / 50).max(1);
        group.bench_function("prefixes", |b| {
            b.iter(|| {
                let mut prefix = MessageView::new(&message);
                let mut n = 0;
                while prefix.needs_tick() {
                    prefix.tick(prefix.reveal().cycle());
                    n += 1;
                    if n % step == 0 {
                        let _ = renderer.render(prefix.revealed());
                    }
                }
            })
        });

        group.finish();
    }
}

criterion_group!(benches, bench_reveal_render);
criterion_main!(benches);
