use super::code::{language_hint_from_codeblock_kind, render_code_block, strip_one_trailing_newline};
use super::tree::DisplayTree;
use crate::ui::span::SpanKind;
use crate::ui::theme::Theme;
use crate::utils::syntax::HighlighterTable;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Switches for the message renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub markdown: bool,
    pub syntax_highlighting: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            markdown: true,
            syntax_highlighting: true,
        }
    }
}

/// Renders message text into a [`DisplayTree`]. Holds no per-call state, so
/// the revealed body and the reasoning block can be rendered with the same
/// renderer without affecting each other.
#[derive(Clone, Debug)]
pub struct MessageRenderer {
    theme: Theme,
    config: RenderConfig,
    highlighters: HighlighterTable,
}

impl MessageRenderer {
    pub fn new(theme: Theme, config: RenderConfig) -> Self {
        Self {
            theme,
            config,
            highlighters: HighlighterTable::default(),
        }
    }

    pub fn with_highlighters(mut self, highlighters: HighlighterTable) -> Self {
        self.highlighters = highlighters;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> RenderConfig {
        self.config
    }

    pub fn highlighters(&self) -> &HighlighterTable {
        &self.highlighters
    }

    pub fn render(&self, text: &str) -> DisplayTree {
        if self.config.markdown {
            MarkdownRenderer::new(
                text,
                &self.theme,
                &self.highlighters,
                self.config.syntax_highlighting,
            )
            .render()
        } else {
            render_plain(text, &self.theme)
        }
    }

    pub(crate) fn placeholder(&self, text: &str) -> DisplayTree {
        DisplayTree::placeholder(text, &self.theme)
    }
}

impl Default for MessageRenderer {
    fn default() -> Self {
        Self::new(Theme::default(), RenderConfig::default())
    }
}

#[derive(Clone, Debug)]
enum ListKind {
    Unordered,
    Ordered(u64),
}

struct MarkdownRenderer<'a> {
    content: &'a str,
    theme: &'a Theme,
    highlighters: &'a HighlighterTable,
    syntax_highlighting: bool,
    lines: Vec<Line<'static>>,
    span_metadata: Vec<Vec<SpanKind>>,
    current_spans: Vec<Span<'static>>,
    current_span_kinds: Vec<SpanKind>,
    style_stack: Vec<Style>,
    kind_stack: Vec<SpanKind>,
    list_stack: Vec<ListKind>,
    list_indent_stack: Vec<usize>,
    pending_list_indent: Option<usize>,
    /// Language tag and collected text of the code block being read.
    in_code_block: Option<(Option<String>, String)>,
    code_block_count: usize,
}

impl<'a> MarkdownRenderer<'a> {
    fn new(
        content: &'a str,
        theme: &'a Theme,
        highlighters: &'a HighlighterTable,
        syntax_highlighting: bool,
    ) -> Self {
        Self {
            content,
            theme,
            highlighters,
            syntax_highlighting,
            lines: Vec::new(),
            span_metadata: Vec::new(),
            current_spans: Vec::new(),
            current_span_kinds: Vec::new(),
            style_stack: vec![theme.md_paragraph_style()],
            kind_stack: vec![SpanKind::Text],
            list_stack: Vec::new(),
            list_indent_stack: Vec::new(),
            pending_list_indent: None,
            in_code_block: None,
            code_block_count: 0,
        }
    }

    fn render(mut self) -> DisplayTree {
        let parser = Parser::new_ext(self.content, Options::ENABLE_STRIKETHROUGH);
        let mut parser = parser.peekable();

        while let Some(event) = parser.next() {
            match event {
                Event::Start(tag) => match tag {
                    Tag::Paragraph => {
                        if self.pending_list_indent.is_none() && !self.list_stack.is_empty() {
                            self.pending_list_indent = Some(self.current_list_indent_width());
                        }
                    }
                    Tag::Heading { level, .. } => {
                        self.flush_current_spans();
                        self.push_style(self.theme.md_heading_style(level as u8));
                    }
                    Tag::BlockQuote(_) => {
                        self.push_style(self.theme.md_blockquote_style());
                    }
                    Tag::List(start) => {
                        self.flush_current_spans();
                        self.list_stack.push(match start {
                            Some(n) => ListKind::Ordered(n),
                            None => ListKind::Unordered,
                        });
                        self.list_indent_stack.push(0);
                        self.pending_list_indent = None;
                    }
                    Tag::Item => {
                        self.flush_current_spans();
                        let marker = match self.list_stack.last_mut() {
                            Some(ListKind::Ordered(k)) => {
                                let cur = *k;
                                *k += 1;
                                format!("{cur}. ")
                            }
                            _ => "- ".to_string(),
                        };
                        let parent_indent: usize = self
                            .list_indent_stack
                            .iter()
                            .take(self.list_indent_stack.len().saturating_sub(1))
                            .sum();
                        if let Some(indent) = self.list_indent_stack.last_mut() {
                            *indent = marker.width();
                        }
                        self.pending_list_indent = Some(parent_indent);
                        self.push_span(
                            Span::styled(marker, self.theme.md_list_marker_style()),
                            SpanKind::Text,
                        );
                    }
                    Tag::CodeBlock(kind) => {
                        self.flush_current_spans();
                        self.in_code_block =
                            Some((language_hint_from_codeblock_kind(&kind), String::new()));
                    }
                    Tag::Emphasis => self.push_modifier(Modifier::ITALIC),
                    Tag::Strong => self.push_modifier(Modifier::BOLD),
                    Tag::Strikethrough => self.push_modifier(Modifier::CROSSED_OUT),
                    Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                        self.style_stack.push(self.theme.md_link_style());
                        self.kind_stack.push(SpanKind::link(dest_url.to_string()));
                    }
                    _ => {}
                },
                Event::End(tag_end) => match tag_end {
                    TagEnd::Paragraph => {
                        self.flush_current_spans();
                        if self.list_stack.is_empty() {
                            self.push_empty_line();
                        } else if matches!(
                            parser.peek(),
                            Some(Event::Start(
                                Tag::Paragraph
                                    | Tag::CodeBlock(_)
                                    | Tag::BlockQuote(_)
                                    | Tag::Heading { .. }
                            ))
                        ) {
                            self.push_empty_line();
                        }
                    }
                    TagEnd::Heading(_) => {
                        self.flush_current_spans();
                        self.push_empty_line();
                        self.pop_style();
                    }
                    TagEnd::BlockQuote(_) => {
                        self.flush_current_spans();
                        self.pop_style();
                    }
                    TagEnd::List(_) => {
                        self.flush_current_spans();
                        if self.list_stack.len() == 1 {
                            self.push_empty_line();
                        }
                        self.list_stack.pop();
                        self.list_indent_stack.pop();
                        self.pending_list_indent = None;
                    }
                    TagEnd::Item => {
                        self.flush_current_spans();
                        self.pending_list_indent = None;
                    }
                    TagEnd::CodeBlock => self.finalize_code_block(),
                    TagEnd::Emphasis
                    | TagEnd::Strong
                    | TagEnd::Strikethrough
                    | TagEnd::Link
                    | TagEnd::Image => self.pop_style(),
                    _ => {}
                },
                Event::Text(text) => {
                    if let Some((_, code)) = self.in_code_block.as_mut() {
                        code.push_str(&text);
                    } else {
                        self.push_text(&text);
                    }
                }
                Event::Code(code) => {
                    self.push_span(
                        Span::styled(detab(&code), self.theme.md_inline_code_style()),
                        SpanKind::InlineCode,
                    );
                }
                Event::Html(html) | Event::InlineHtml(html) => {
                    // Raw HTML is shown as text rather than interpreted.
                    let mut parts = html.split('\n').peekable();
                    while let Some(part) = parts.next() {
                        if !part.is_empty() {
                            self.push_text(part);
                        }
                        if parts.peek().is_some() {
                            self.flush_current_spans();
                        }
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    self.flush_current_spans();
                    if !self.list_stack.is_empty() {
                        self.pending_list_indent = Some(self.current_list_indent_width());
                    }
                }
                Event::Rule => {
                    self.flush_current_spans();
                    self.push_line(
                        vec![Span::styled("─".repeat(40), self.theme.md_rule_style())],
                        vec![SpanKind::Text],
                    );
                    self.push_empty_line();
                }
                _ => {}
            }
        }

        // A fence left open by a partial reveal still renders as code.
        if self.in_code_block.is_some() {
            self.finalize_code_block();
        }
        self.flush_current_spans();
        while self
            .lines
            .last()
            .is_some_and(|line| line.spans.is_empty())
        {
            self.lines.pop();
            self.span_metadata.pop();
        }

        DisplayTree {
            lines: self.lines,
            span_metadata: self.span_metadata,
        }
    }

    fn push_style(&mut self, style: Style) {
        self.style_stack.push(style);
        let current_kind = self.kind_stack.last().cloned().unwrap_or(SpanKind::Text);
        self.kind_stack.push(current_kind);
    }

    fn push_modifier(&mut self, modifier: Modifier) {
        let style = self
            .style_stack
            .last()
            .copied()
            .unwrap_or_default()
            .add_modifier(modifier);
        self.push_style(style);
    }

    fn pop_style(&mut self) {
        // The base entries stay so unbalanced input cannot empty the stacks.
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
        if self.kind_stack.len() > 1 {
            self.kind_stack.pop();
        }
    }

    fn push_text(&mut self, text: &str) {
        let style = self
            .style_stack
            .last()
            .copied()
            .unwrap_or_else(|| self.theme.md_paragraph_style());
        let kind = self.kind_stack.last().cloned().unwrap_or(SpanKind::Text);
        self.push_span(Span::styled(detab(text), style), kind);
    }

    fn push_span(&mut self, span: Span<'static>, kind: SpanKind) {
        if self.current_spans.is_empty() {
            if let Some(indent) = self.pending_list_indent.take() {
                if indent > 0 {
                    self.current_spans.push(Span::raw(" ".repeat(indent)));
                    self.current_span_kinds.push(SpanKind::Text);
                }
            }
        }
        self.current_spans.push(span);
        self.current_span_kinds.push(kind);
    }

    fn flush_current_spans(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.current_spans);
        let kinds = std::mem::take(&mut self.current_span_kinds);
        self.push_line(spans, kinds);
    }

    fn push_line(&mut self, spans: Vec<Span<'static>>, kinds: Vec<SpanKind>) {
        self.lines.push(Line::from(spans));
        self.span_metadata.push(kinds);
    }

    fn push_empty_line(&mut self) {
        self.push_line(Vec::new(), Vec::new());
    }

    fn finalize_code_block(&mut self) {
        let Some((language, code)) = self.in_code_block.take() else {
            return;
        };
        let list_indent = self.current_list_indent_width();
        let code = strip_one_trailing_newline(&code);
        if !code.is_empty() {
            let out = render_code_block(
                code,
                language.as_deref(),
                self.syntax_highlighting,
                self.highlighters,
                self.theme,
                list_indent,
                self.code_block_count,
            );
            self.lines.extend(out.lines);
            self.span_metadata.extend(out.kinds);
            self.code_block_count += 1;
        }
        self.push_empty_line();
        self.pending_list_indent = (list_indent > 0).then_some(list_indent);
    }

    fn current_list_indent_width(&self) -> usize {
        self.list_indent_stack.iter().sum()
    }
}

fn detab(s: &str) -> String {
    s.replace('\t', "    ")
}

fn render_plain(content: &str, theme: &Theme) -> DisplayTree {
    let style = theme.md_paragraph_style();
    let mut tree = DisplayTree::default();
    for line in content.lines() {
        tree.lines
            .push(Line::from(vec![Span::styled(detab(line), style)]));
        tree.span_metadata.push(vec![SpanKind::Text]);
    }
    tree
}
