use crate::ui::span::SpanKind;
use crate::ui::theme::Theme;
use crate::utils::syntax::{plain_code_block, HighlightedCode, HighlighterTable};
use pulldown_cmark::CodeBlockKind;
use ratatui::text::{Line, Span};

/// Language tag of a code block: the first word of the fence info string,
/// with an optional `language-` prefix removed, cut at the first character
/// that is not `[A-Za-z0-9_]`.
pub(super) fn language_hint_from_codeblock_kind(kind: &CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Indented => None,
        CodeBlockKind::Fenced(info) => {
            let word = info.split_ascii_whitespace().next().unwrap_or("");
            let word = word.strip_prefix("language-").unwrap_or(word);
            let tag: String = word
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            (!tag.is_empty()).then_some(tag)
        }
    }
}

/// Code handed to a highlighter: at most one trailing newline removed.
pub(super) fn strip_one_trailing_newline(code: &str) -> &str {
    code.strip_suffix('\n').unwrap_or(code)
}

pub(super) struct CodeBlockOutput {
    pub(super) lines: Vec<Line<'static>>,
    pub(super) kinds: Vec<Vec<SpanKind>>,
}

pub(super) fn render_code_block(
    code: &str,
    language: Option<&str>,
    syntax_enabled: bool,
    highlighters: &HighlighterTable,
    theme: &Theme,
    list_indent: usize,
    block_index: usize,
) -> CodeBlockOutput {
    let HighlightedCode { lines, highlighted } = if syntax_enabled {
        highlighters.highlight(language, code, theme)
    } else {
        HighlightedCode {
            lines: plain_code_block("", code, theme).unwrap_or_default(),
            highlighted: false,
        }
    };

    let indent = (list_indent > 0).then(|| " ".repeat(list_indent));
    let code_kind = SpanKind::code_block(language, block_index, highlighted);
    let mut out = CodeBlockOutput {
        lines: Vec::with_capacity(lines.len()),
        kinds: Vec::with_capacity(lines.len()),
    };

    for mut line in lines {
        let mut kinds = vec![code_kind.clone(); line.spans.len()];
        if let Some(indent) = indent.as_ref() {
            line.spans.insert(0, Span::raw(indent.clone()));
            kinds.insert(0, SpanKind::Text);
        }
        out.lines.push(line);
        out.kinds.push(kinds);
    }
    out
}
