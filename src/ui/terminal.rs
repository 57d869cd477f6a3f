//! Line-oriented ANSI output for rendered messages, used by the binary
//! instead of a full-screen terminal.

use std::io::{self, Write};

use ratatui::{
    crossterm::{
        queue,
        style::{Attribute as CAttribute, Color as CColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    },
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::markdown::DisplayTree;
use crate::ui::message_view::MessageDisplay;
use crate::ui::theme::Theme;

const REASONING_BORDER: &str = "│ ";
const CODE_GUTTER: &str = "▎ ";

/// Writes styled lines either with ANSI escapes or as plain text.
#[derive(Debug)]
pub struct AnsiWriter<W: Write> {
    inner: W,
    styled: bool,
}

impl<W: Write> AnsiWriter<W> {
    pub fn new(inner: W, styled: bool) -> Self {
        Self { inner, styled }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_display(&mut self, display: &MessageDisplay, theme: &Theme) -> io::Result<()> {
        let label_style = if display.label == crate::core::view::YOU_LABEL {
            theme.user_label_style
        } else {
            theme.assistant_label_style
        };
        self.write_line(&Line::from(Span::styled(format!("{}:", display.label), label_style)))?;

        if let Some(reasoning) = &display.reasoning {
            self.write_framed(reasoning, theme)?;
        }
        self.write_tree(&display.body, theme)?;

        if let Some(toggle) = display.toggle_label {
            self.write_line(&Line::from(Span::styled(format!("[{toggle}]"), theme.toggle_style)))?;
        }
        self.inner.flush()
    }

    /// Code block lines get a gutter and link targets are listed after the
    /// text, since a plain terminal cannot make spans clickable.
    pub fn write_tree(&mut self, tree: &DisplayTree, theme: &Theme) -> io::Result<()> {
        for line in terminal_lines(tree, theme) {
            self.write_line(&line)?;
        }
        Ok(())
    }

    /// Reasoning is drawn with a left border so it reads as a separate block.
    fn write_framed(&mut self, tree: &DisplayTree, theme: &Theme) -> io::Result<()> {
        for line in terminal_lines(tree, theme) {
            self.write_line(&prefixed(REASONING_BORDER, theme.reasoning_border_style, &line))?;
        }
        self.write_line(&Line::default())
    }

    pub fn write_line(&mut self, line: &Line<'_>) -> io::Result<()> {
        for span in &line.spans {
            self.write_span(span)?;
        }
        queue!(self.inner, Print("\n"))
    }

    /// Writes one span with no trailing newline; used for per-tick output.
    pub fn write_span(&mut self, span: &Span<'_>) -> io::Result<()> {
        if !self.styled {
            return queue!(self.inner, Print(span.content.as_ref()));
        }
        queue_style(&mut self.inner, span.style)?;
        queue!(self.inner, Print(span.content.as_ref()))?;
        queue!(
            self.inner,
            SetForegroundColor(CColor::Reset),
            SetBackgroundColor(CColor::Reset),
            SetAttribute(CAttribute::Reset),
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn terminal_lines(tree: &DisplayTree, theme: &Theme) -> Vec<Line<'static>> {
    let blocks = tree.code_blocks();
    let in_code_block =
        |idx: usize| blocks.iter().any(|b| (b.start_line..=b.end_line).contains(&idx));

    let mut lines: Vec<Line<'static>> = tree
        .lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            if in_code_block(idx) {
                prefixed(CODE_GUTTER, theme.md_rule_style(), line)
            } else {
                line.clone()
            }
        })
        .collect();

    for (n, href) in tree.links().iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", n + 1), theme.md_rule_style()),
            Span::styled(href.clone(), theme.md_link_style()),
        ]));
    }
    lines
}

fn prefixed(prefix: &'static str, style: Style, line: &Line<'_>) -> Line<'static> {
    let mut spans = vec![Span::styled(prefix, style)];
    spans.extend(
        line.spans
            .iter()
            .map(|span| Span::styled(span.content.to_string(), span.style)),
    );
    Line::from(spans)
}

fn queue_style<W: Write>(w: &mut W, style: Style) -> io::Result<()> {
    if let Some(fg) = style.fg {
        queue!(w, SetForegroundColor(fg.into()))?;
    }
    if let Some(bg) = style.bg {
        queue!(w, SetBackgroundColor(bg.into()))?;
    }
    let added = style.add_modifier;
    if added.contains(Modifier::BOLD) {
        queue!(w, SetAttribute(CAttribute::Bold))?;
    }
    if added.contains(Modifier::DIM) {
        queue!(w, SetAttribute(CAttribute::Dim))?;
    }
    if added.contains(Modifier::ITALIC) {
        queue!(w, SetAttribute(CAttribute::Italic))?;
    }
    if added.contains(Modifier::UNDERLINED) {
        queue!(w, SetAttribute(CAttribute::Underlined))?;
    }
    if added.contains(Modifier::CROSSED_OUT) {
        queue!(w, SetAttribute(CAttribute::CrossedOut))?;
    }
    if added.contains(Modifier::REVERSED) {
        queue!(w, SetAttribute(CAttribute::Reverse))?;
    }
    Ok(())
}
