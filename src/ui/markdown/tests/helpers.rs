use crate::ui::markdown::{DisplayTree, MessageRenderer, RenderConfig};
use crate::ui::theme::Theme;

pub fn render_markdown_for_test(text: &str, syntax_enabled: bool) -> DisplayTree {
    let config = RenderConfig {
        markdown: true,
        syntax_highlighting: syntax_enabled,
    };
    MessageRenderer::new(Theme::dark_default(), config).render(text)
}

pub fn assert_line_text(lines: &[String], index: usize, expected: &str) {
    assert_eq!(lines.get(index).map(String::as_str), Some(expected));
}

pub fn assert_first_span_is_space_indented(
    line: &ratatui::text::Line<'static>,
    expected_width: usize,
) {
    let indent = line
        .spans
        .first()
        .expect("indent span present")
        .content
        .as_ref();
    assert!(indent.chars().all(|ch| ch == ' '));
    assert_eq!(
        unicode_width::UnicodeWidthStr::width(indent),
        expected_width
    );
}
