use crate::ui::span::{extract_code_block_content, extract_code_blocks, CodeBlockPosition, SpanKind};
use crate::ui::theme::Theme;
use ratatui::text::{Line, Span};

/// Rendered output for one piece of message text: styled lines plus a
/// parallel list of span kinds for every line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayTree {
    pub lines: Vec<Line<'static>>,
    pub span_metadata: Vec<Vec<SpanKind>>,
}

impl DisplayTree {
    pub(crate) fn placeholder(text: &str, theme: &Theme) -> Self {
        Self {
            lines: vec![Line::from(vec![Span::styled(
                text.to_string(),
                theme.placeholder_style,
            )])],
            span_metadata: vec![vec![SpanKind::Placeholder]],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_placeholder(&self) -> bool {
        self.span_metadata
            .iter()
            .flatten()
            .any(|kind| *kind == SpanKind::Placeholder)
    }

    /// Plain text of each line, styles dropped.
    pub fn line_texts(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.to_string()).collect()
    }

    pub fn text(&self) -> String {
        self.line_texts().join("\n")
    }

    pub fn code_blocks(&self) -> Vec<CodeBlockPosition> {
        extract_code_blocks(&self.span_metadata)
    }

    pub fn code_block_content(&self, block_index: usize) -> Option<String> {
        extract_code_block_content(&self.lines, &self.span_metadata, block_index)
    }

    pub fn links(&self) -> Vec<String> {
        let mut hrefs: Vec<String> = Vec::new();
        for href in self.span_metadata.iter().flatten().filter_map(SpanKind::link_href) {
            if hrefs.last().map(String::as_str) != Some(href) {
                hrefs.push(href.to_string());
            }
        }
        hrefs
    }
}
