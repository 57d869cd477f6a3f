//! Splitting a message into its reasoning block and its visible text.
//!
//! Producers mark chain-of-thought with a single `<Thinking>...</Thinking>`
//! pair. Only the first pair is interpreted; the tags are literal and
//! case-sensitive. An opening tag without a closing tag is not a reasoning
//! block, so the whole content stays visible.

pub const THINKING_OPEN: &str = "<Thinking>";
pub const THINKING_CLOSE: &str = "</Thinking>";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments {
    /// Trimmed text between the tags, empty when no block was found.
    pub reasoning: String,
    /// Content with the whole block removed, trimmed.
    pub visible: String,
}

impl Segments {
    fn plain(content: &str) -> Self {
        Self {
            reasoning: String::new(),
            visible: content.trim().to_string(),
        }
    }

    pub fn has_reasoning(&self) -> bool {
        !self.reasoning.is_empty()
    }
}

/// Locate the first `<Thinking>` block and split it out of `content`.
pub fn extract(content: &str) -> Segments {
    let Some(open) = content.find(THINKING_OPEN) else {
        return Segments::plain(content);
    };
    let body_start = open + THINKING_OPEN.len();
    let Some(close_offset) = content[body_start..].find(THINKING_CLOSE) else {
        return Segments::plain(content);
    };
    let body_end = body_start + close_offset;
    let block_end = body_end + THINKING_CLOSE.len();

    let mut visible = String::with_capacity(content.len() - (block_end - open));
    visible.push_str(&content[..open]);
    visible.push_str(&content[block_end..]);

    Segments {
        reasoning: content[body_start..body_end].trim().to_string(),
        visible: visible.trim().to_string(),
    }
}
