use crate::core::message::{Message, MessageId, Role};
use crate::core::reveal::{RevealState, TickOutcome};
use crate::core::segments::{extract, Segments};

pub const YOU_LABEL: &str = "You";
pub const ASSISTANT_LABEL: &str = "Assistant";
pub const SHOW_REASONING_LABEL: &str = "Show Reasoning";
pub const HIDE_REASONING_LABEL: &str = "Hide Reasoning";
pub const TYPING_PLACEHOLDER: &str = "Thinking...";
pub const EMPTY_PLACEHOLDER: &str = "...";

/// Display state for one message: its segments, its reveal cycle and the
/// reasoning toggle.
#[derive(Debug, Clone)]
pub struct MessageView {
    id: MessageId,
    role: Role,
    content: String,
    is_typing: bool,
    segments: Segments,
    reveal: RevealState,
    show_reasoning: bool,
}

impl MessageView {
    pub fn new(message: &Message) -> Self {
        Self::with_cycle(message, 0)
    }

    pub fn with_cycle(message: &Message, cycle: u64) -> Self {
        let segments = extract(&message.content);
        let reveal = RevealState::begin(message.role, &segments.visible, cycle);
        Self {
            id: message.id,
            role: message.role,
            content: message.content.clone(),
            is_typing: message.is_typing,
            segments,
            reveal,
            show_reasoning: false,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn segments(&self) -> &Segments {
        &self.segments
    }

    pub fn reveal(&self) -> &RevealState {
        &self.reveal
    }

    pub fn revealed(&self) -> &str {
        self.reveal.revealed()
    }

    pub fn matches(&self, message: &Message) -> bool {
        self.id == message.id && self.role == message.role && self.content == message.content
    }

    /// Re-identify against a fresh record. Returns true when the identity
    /// changed and a new cycle was started; the reasoning toggle survives.
    pub fn sync(&mut self, message: &Message) -> bool {
        let next = self.reveal.cycle().wrapping_add(1);
        self.sync_with_cycle(message, next)
    }

    pub fn sync_with_cycle(&mut self, message: &Message, cycle: u64) -> bool {
        self.is_typing = message.is_typing;
        if self.matches(message) {
            return false;
        }
        self.reveal.cancel();
        let show_reasoning = self.show_reasoning;
        *self = Self::with_cycle(message, cycle);
        self.show_reasoning = show_reasoning;
        true
    }

    pub fn cancel(&mut self) {
        self.reveal.cancel();
    }

    pub fn tick(&mut self, cycle: u64) -> TickOutcome {
        self.reveal.tick(cycle)
    }

    pub fn needs_tick(&self) -> bool {
        self.reveal.needs_tick()
    }

    pub fn show_reasoning(&self) -> bool {
        self.show_reasoning
    }

    pub fn set_show_reasoning(&mut self, show: bool) {
        self.show_reasoning = show;
    }

    pub fn toggle_reasoning(&mut self) -> bool {
        self.show_reasoning = !self.show_reasoning;
        self.show_reasoning
    }

    /// Reasoning is only offered for assistant messages that carry some.
    pub fn has_reasoning(&self) -> bool {
        self.role.is_assistant() && self.segments.has_reasoning()
    }

    pub fn reasoning_visible(&self) -> bool {
        self.has_reasoning() && self.show_reasoning
    }

    pub fn label(&self) -> &'static str {
        match self.role {
            Role::User => YOU_LABEL,
            Role::Assistant => ASSISTANT_LABEL,
        }
    }

    pub fn toggle_label(&self) -> Option<&'static str> {
        if !self.has_reasoning() {
            return None;
        }
        Some(if self.show_reasoning {
            HIDE_REASONING_LABEL
        } else {
            SHOW_REASONING_LABEL
        })
    }

    /// Text handed to the renderer for the body: the revealed prefix, or a
    /// placeholder while nothing is shown.
    pub fn body_text(&self) -> &str {
        let revealed = self.reveal.revealed();
        if !revealed.is_empty() {
            revealed
        } else if self.is_typing && self.role.is_assistant() && !self.reveal.is_complete() {
            TYPING_PLACEHOLDER
        } else {
            EMPTY_PLACEHOLDER
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reveal::RevealPhase;

    fn drain(view: &mut MessageView) -> usize {
        let mut ticks = 0;
        while view.needs_tick() {
            view.tick(view.reveal().cycle());
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn plain_assistant_message_reveals_in_eleven_ticks() {
        let msg = Message::assistant(1, "Hello world").typing(true);
        let mut view = MessageView::new(&msg);
        assert_eq!(view.segments().reasoning, "");
        assert_eq!(view.segments().visible, "Hello world");
        assert_eq!(drain(&mut view), 11);
        assert_eq!(view.revealed(), "Hello world");
    }

    #[test]
    fn reasoning_message_splits_and_offers_toggle() {
        let msg = Message::assistant(2, "<Thinking>step 1\nstep 2</Thinking>Final answer")
            .typing(true);
        let mut view = MessageView::new(&msg);
        assert_eq!(view.segments().reasoning, "step 1\nstep 2");
        assert_eq!(view.segments().visible, "Final answer");
        assert!(!view.reasoning_visible());
        assert_eq!(view.toggle_label(), Some(SHOW_REASONING_LABEL));

        assert!(view.toggle_reasoning());
        assert!(view.reasoning_visible());
        assert_eq!(view.toggle_label(), Some(HIDE_REASONING_LABEL));
        assert_eq!(view.reveal().phase(), RevealPhase::Idle);
    }

    #[test]
    fn user_reasoning_is_never_offered() {
        let msg = Message::user(3, "<Thinking>hmm</Thinking>hi");
        let mut view = MessageView::new(&msg);
        view.toggle_reasoning();
        assert!(!view.has_reasoning());
        assert!(!view.reasoning_visible());
        assert_eq!(view.toggle_label(), None);
        assert_eq!(view.label(), YOU_LABEL);
        assert_eq!(view.revealed(), "hi");
    }

    #[test]
    fn placeholder_depends_on_typing_and_completion() {
        let typing = MessageView::new(&Message::assistant(1, "abc").typing(true));
        assert_eq!(typing.body_text(), TYPING_PLACEHOLDER);

        let settled = MessageView::new(&Message::assistant(1, "abc"));
        assert_eq!(settled.body_text(), EMPTY_PLACEHOLDER);

        let empty = MessageView::new(&Message::assistant(1, "<Thinking>x</Thinking>").typing(true));
        assert!(empty.reveal().is_complete());
        assert_eq!(empty.body_text(), EMPTY_PLACEHOLDER);

        let user = MessageView::new(&Message::user(1, "   ").typing(true));
        assert_eq!(user.body_text(), EMPTY_PLACEHOLDER);
    }

    #[test]
    fn body_switches_from_placeholder_to_revealed_text() {
        let mut view = MessageView::new(&Message::assistant(1, "ok").typing(true));
        view.tick(0);
        assert_eq!(view.body_text(), "o");
    }

    #[test]
    fn identity_change_restarts_and_keeps_toggle() {
        let mut view = MessageView::new(&Message::assistant(1, "<Thinking>r</Thinking>first"));
        view.tick(0);
        view.tick(0);
        view.toggle_reasoning();

        assert!(view.sync(&Message::assistant(1, "<Thinking>r</Thinking>second")));
        assert_eq!(view.reveal().cursor(), 0);
        assert_eq!(view.reveal().cycle(), 1);
        assert!(view.show_reasoning());
        assert_eq!(view.tick(0), TickOutcome::Stale);
        assert_eq!(view.revealed(), "");
    }

    #[test]
    fn switching_to_user_role_reveals_everything() {
        let mut view = MessageView::new(&Message::assistant(1, "same"));
        view.tick(0);
        assert!(view.sync(&Message::user(1, "same")));
        assert_eq!(view.reveal().cursor(), 4);
        assert!(!view.needs_tick());
    }

    #[test]
    fn typing_flag_updates_without_restart() {
        let mut view = MessageView::new(&Message::assistant(1, "abc").typing(true));
        view.tick(0);
        assert!(!view.sync(&Message::assistant(1, "abc").typing(false)));
        assert!(!view.is_typing());
        assert_eq!(view.reveal().cursor(), 1);
        assert_eq!(view.reveal().cycle(), 0);
    }
}
