//! Semantic span metadata for rendered content.
//!
//! [`SpanKind`] classifies each rendered span so consumers of a
//! [`DisplayTree`](crate::ui::markdown::DisplayTree) can find links and code
//! blocks without re-parsing markdown or guessing from styles.
//!
//! # Examples
//!
//! ```
//! use revealer::ui::span::{extract_code_blocks, SpanKind};
//!
//! let metadata = vec![
//!     vec![SpanKind::Text],
//!     vec![SpanKind::code_block(Some("python"), 0, true)],
//!     vec![SpanKind::code_block(Some("python"), 0, true)],
//!     vec![SpanKind::Text],
//! ];
//!
//! let blocks = extract_code_blocks(&metadata);
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].start_line, 1);
//! assert_eq!(blocks[0].end_line, 2);
//! ```

use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpanKind {
    /// Default text content with no special interaction.
    Text,
    /// Placeholder shown while a message has nothing revealed yet.
    Placeholder,
    /// Inline code (single backticks).
    InlineCode,
    /// A hyperlink span emitted by the markdown renderer.
    Link(LinkMeta),
    /// A span belonging to a fenced or indented code block.
    CodeBlock(CodeBlockMeta),
}

impl SpanKind {
    #[inline]
    pub fn is_link(&self) -> bool {
        matches!(self, SpanKind::Link(_))
    }

    #[inline]
    pub fn link_href(&self) -> Option<&str> {
        match self {
            SpanKind::Link(meta) => Some(meta.href()),
            _ => None,
        }
    }

    #[inline]
    pub fn link(href: impl Into<String>) -> Self {
        SpanKind::Link(LinkMeta::new(href))
    }

    #[inline]
    pub fn is_inline_code(&self) -> bool {
        matches!(self, SpanKind::InlineCode)
    }

    #[inline]
    pub fn is_code_block(&self) -> bool {
        matches!(self, SpanKind::CodeBlock(_))
    }

    #[inline]
    pub fn code_block_meta(&self) -> Option<&CodeBlockMeta> {
        match self {
            SpanKind::CodeBlock(meta) => Some(meta),
            _ => None,
        }
    }

    #[inline]
    pub fn code_block(
        language: Option<impl Into<String>>,
        block_index: usize,
        highlighted: bool,
    ) -> Self {
        SpanKind::CodeBlock(CodeBlockMeta::new(language, block_index, highlighted))
    }
}

/// Metadata for a code block span.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CodeBlockMeta {
    language: Option<Arc<str>>,
    block_index: usize,
    highlighted: bool,
}

impl CodeBlockMeta {
    pub fn new(language: Option<impl Into<String>>, block_index: usize, highlighted: bool) -> Self {
        Self {
            language: language.map(|s| Arc::<str>::from(s.into())),
            block_index,
            highlighted,
        }
    }

    /// Language tag taken from the fence, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Zero-based position of the block within the rendered text.
    pub fn block_index(&self) -> usize {
        self.block_index
    }

    /// True when a syntax highlighter produced the block's lines.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinkMeta {
    href: Arc<str>,
}

impl LinkMeta {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Arc::<str>::from(href.into()),
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }
}

/// Position of a code block in rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockPosition {
    pub block_index: usize,
    /// First line of the block (inclusive).
    pub start_line: usize,
    /// Last line of the block (inclusive).
    pub end_line: usize,
    pub language: Option<String>,
    pub highlighted: bool,
}

/// Code block positions found in span metadata, sorted by block index.
pub fn extract_code_blocks(metadata: &[Vec<SpanKind>]) -> Vec<CodeBlockPosition> {
    use std::collections::HashMap;

    let mut blocks: HashMap<usize, CodeBlockPosition> = HashMap::new();

    for (line_idx, line_meta) in metadata.iter().enumerate() {
        for span_kind in line_meta {
            if let Some(meta) = span_kind.code_block_meta() {
                blocks
                    .entry(meta.block_index())
                    .or_insert_with(|| CodeBlockPosition {
                        block_index: meta.block_index(),
                        start_line: line_idx,
                        end_line: line_idx,
                        language: meta.language().map(String::from),
                        highlighted: meta.is_highlighted(),
                    })
                    .end_line = line_idx;
            }
        }
    }

    let mut result: Vec<_> = blocks.into_values().collect();
    result.sort_by_key(|b| b.block_index);
    result
}

/// Text of one code block, lines joined with `\n`. Blank lines inside the
/// block are kept; list indentation is not part of the block.
pub fn extract_code_block_content(
    lines: &[ratatui::text::Line],
    metadata: &[Vec<SpanKind>],
    block_index: usize,
) -> Option<String> {
    let mut content = String::new();
    let mut found_any = false;

    for (line, line_meta) in lines.iter().zip(metadata.iter()) {
        let mut line_content = String::new();
        let mut line_belongs_to_block = false;

        for (span, kind) in line.spans.iter().zip(line_meta.iter()) {
            if let Some(meta) = kind.code_block_meta() {
                if meta.block_index() == block_index {
                    line_content.push_str(&span.content);
                    line_belongs_to_block = true;
                }
            }
        }

        if line_belongs_to_block {
            if found_any {
                content.push('\n');
            }
            content.push_str(&line_content);
            found_any = true;
        }
    }

    found_any.then_some(content)
}
