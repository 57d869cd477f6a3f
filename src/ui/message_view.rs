use crate::core::view::MessageView;
use crate::ui::markdown::{DisplayTree, MessageRenderer};

/// Everything needed to draw one message.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDisplay {
    pub label: &'static str,
    pub body: DisplayTree,
    /// Present only while the reasoning toggle is on.
    pub reasoning: Option<DisplayTree>,
    pub toggle_label: Option<&'static str>,
}

impl MessageView {
    /// Render the revealed body and, when toggled on, the reasoning block.
    /// The two texts go through separate render calls.
    pub fn display(&self, renderer: &MessageRenderer) -> MessageDisplay {
        let body = if self.revealed().is_empty() {
            renderer.placeholder(self.body_text())
        } else {
            renderer.render(self.revealed())
        };
        let reasoning = self
            .reasoning_visible()
            .then(|| renderer.render(&self.segments().reasoning));

        MessageDisplay {
            label: self.label(),
            body,
            reasoning,
            toggle_label: self.toggle_label(),
        }
    }
}
