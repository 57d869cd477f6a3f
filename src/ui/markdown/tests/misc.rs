use super::helpers::{assert_line_text, render_markdown_for_test};
use crate::ui::markdown::{MessageRenderer, RenderConfig};
use crate::ui::span::SpanKind;
use crate::ui::theme::Theme;
use ratatui::style::Modifier;

#[test]
fn heading_is_styled_and_followed_by_blank_line() {
    let theme = Theme::dark_default();
    let tree = render_markdown_for_test("# Title\n\nBody", true);
    let lines = tree.line_texts();
    assert_eq!(lines, vec!["Title", "", "Body"]);
    assert_eq!(tree.lines[0].spans[0].style, theme.md_heading_style(1));
}

#[test]
fn emphasis_strong_and_strikethrough_add_modifiers() {
    let tree = render_markdown_for_test("*a* **b** ~~c~~", true);
    let spans = &tree.lines[0].spans;
    let find = |text: &str| {
        spans
            .iter()
            .find(|span| span.content == text)
            .map(|span| span.style.add_modifier)
            .expect("span present")
    };
    assert!(find("a").contains(Modifier::ITALIC));
    assert!(find("b").contains(Modifier::BOLD));
    assert!(find("c").contains(Modifier::CROSSED_OUT));
}

#[test]
fn inline_code_is_tagged_and_not_highlighted() {
    let tree = render_markdown_for_test("Use `cargo run` now", true);
    assert_eq!(tree.text(), "Use cargo run now");
    let spans = &tree.lines[0].spans;
    let kinds = &tree.span_metadata[0];
    assert_eq!(spans[1].content, "cargo run");
    assert!(kinds[1].is_inline_code());
    assert_eq!(kinds.iter().filter(|kind| kind.is_inline_code()).count(), 1);
    assert!(tree.code_blocks().is_empty());
}

#[test]
fn links_and_images_carry_their_targets() {
    let tree = render_markdown_for_test(
        "[site](https://example.com) and ![logo](https://x.test/i.png)",
        true,
    );
    assert_eq!(
        tree.links(),
        vec!["https://example.com", "https://x.test/i.png"]
    );
    assert_eq!(tree.text(), "site and logo");
    let kinds = &tree.span_metadata[0];
    assert!(kinds[0].is_link());
    assert_eq!(kinds[1], SpanKind::Text);
}

#[test]
fn raw_html_is_shown_as_text() {
    let tree = render_markdown_for_test("a <b>bold</b> c", true);
    assert_eq!(tree.text(), "a <b>bold</b> c");
}

#[test]
fn rule_and_blockquote_render() {
    let theme = Theme::dark_default();
    let tree = render_markdown_for_test("a\n\n---\n\n> quoted", true);
    let lines = tree.line_texts();
    assert_line_text(&lines, 0, "a");
    assert!(lines[2].chars().all(|c| c == '─'));
    assert_line_text(&lines, 4, "quoted");
    assert_eq!(tree.lines[4].spans[0].style, theme.md_blockquote_style());
}

#[test]
fn soft_breaks_start_new_lines() {
    let tree = render_markdown_for_test("one\ntwo", true);
    assert_eq!(tree.line_texts(), vec!["one", "two"]);
}

#[test]
fn trailing_blank_lines_are_trimmed() {
    let tree = render_markdown_for_test("para\n\n", true);
    assert_eq!(tree.lines.len(), 1);
    assert!(render_markdown_for_test("", true).is_empty());
}

#[test]
fn markdown_disabled_keeps_source_lines() {
    let renderer = MessageRenderer::new(
        Theme::dark_default(),
        RenderConfig {
            markdown: false,
            syntax_highlighting: true,
        },
    );
    let tree = renderer.render("# not a heading\n*x*\n\tindented");
    assert_eq!(
        tree.line_texts(),
        vec!["# not a heading", "*x*", "    indented"]
    );
}

#[test]
fn separate_renders_do_not_share_state() {
    let renderer = MessageRenderer::default();
    let visible = "Answer:\n\n```rust\nfn a() {}\n```";
    let reasoning = "```python\nx = 1\n```";

    let first_visible = renderer.render(visible);
    let reasoning_tree = renderer.render(reasoning);
    let second_visible = renderer.render(visible);

    assert_eq!(first_visible, second_visible);
    // Block numbering starts over in every call.
    assert_eq!(reasoning_tree.code_blocks()[0].block_index, 0);
    assert_eq!(first_visible.code_blocks()[0].block_index, 0);
    assert_eq!(reasoning_tree.code_block_content(0).as_deref(), Some("x = 1"));
}
