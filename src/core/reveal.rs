//! Per-message reveal state.
//!
//! A [`RevealState`] tracks how many characters of a message's visible text
//! are on screen. It does not own a timer: the arena in
//! [`crate::core::board`] schedules ticks and feeds them back through
//! [`RevealState::tick`], tagged with the cycle they were scheduled for.

use crate::core::message::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Nothing shown yet.
    Idle,
    /// Some, but not all, characters shown.
    Revealing,
    /// Every character shown; no further ticks.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One more character is visible. `more` is false when this tick
    /// finished the reveal.
    Advanced { ch: char, more: bool },
    /// The reveal had already finished; nothing changed.
    Finished,
    /// The tick belongs to a cycle that was cancelled or replaced.
    Stale,
}

#[derive(Debug, Clone)]
pub struct RevealState {
    visible: String,
    /// Characters shown, in `char`s.
    cursor: usize,
    /// Byte offset matching `cursor`.
    revealed_len: usize,
    total: usize,
    cycle: u64,
    cancelled: bool,
}

impl RevealState {
    /// Start a reveal cycle. User text is shown at once; assistant text
    /// starts empty and grows one character per tick.
    pub fn begin(role: Role, visible: &str, cycle: u64) -> Self {
        let total = visible.chars().count();
        let (cursor, revealed_len) = match role {
            Role::User => (total, visible.len()),
            Role::Assistant => (0, 0),
        };
        Self {
            visible: visible.to_string(),
            cursor,
            revealed_len,
            total,
            cycle,
            cancelled: false,
        }
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn visible(&self) -> &str {
        &self.visible
    }

    /// The prefix currently on screen.
    pub fn revealed(&self) -> &str {
        &self.visible[..self.revealed_len]
    }

    pub fn phase(&self) -> RevealPhase {
        if self.cursor >= self.total {
            RevealPhase::Complete
        } else if self.cursor == 0 {
            RevealPhase::Idle
        } else {
            RevealPhase::Revealing
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == RevealPhase::Complete
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether a tick should be pending for this cycle.
    pub fn needs_tick(&self) -> bool {
        !self.cancelled && self.cursor < self.total
    }

    /// Stop the cycle. Every later tick is reported as stale.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Apply one tick scheduled for `cycle`.
    pub fn tick(&mut self, cycle: u64) -> TickOutcome {
        if self.cancelled || cycle != self.cycle {
            return TickOutcome::Stale;
        }
        let Some(ch) = self.visible[self.revealed_len..].chars().next() else {
            return TickOutcome::Finished;
        };
        self.cursor += 1;
        self.revealed_len += ch.len_utf8();
        TickOutcome::Advanced {
            ch,
            more: self.cursor < self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(state: &mut RevealState) -> usize {
        let mut ticks = 0;
        while state.needs_tick() {
            assert!(matches!(
                state.tick(state.cycle()),
                TickOutcome::Advanced { .. }
            ));
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn assistant_reveal_grows_one_char_per_tick() {
        let text = "Hello world";
        let mut state = RevealState::begin(Role::Assistant, text, 0);
        assert_eq!(state.phase(), RevealPhase::Idle);
        assert_eq!(state.revealed(), "");

        for k in 1..=text.len() {
            let outcome = state.tick(0);
            let expected = text.chars().nth(k - 1).unwrap();
            assert_eq!(
                outcome,
                TickOutcome::Advanced {
                    ch: expected,
                    more: k < text.len()
                }
            );
            assert_eq!(state.cursor(), k);
            assert_eq!(state.revealed(), &text[..k]);
        }

        assert_eq!(state.phase(), RevealPhase::Complete);
        assert!(!state.needs_tick());
        assert_eq!(state.tick(0), TickOutcome::Finished);
        assert_eq!(state.cursor(), text.len());
    }

    #[test]
    fn phase_is_revealing_between_first_and_last_tick() {
        let mut state = RevealState::begin(Role::Assistant, "abc", 3);
        state.tick(3);
        assert_eq!(state.phase(), RevealPhase::Revealing);
    }

    #[test]
    fn user_text_is_complete_without_ticks() {
        let state = RevealState::begin(Role::User, "typed by a human", 0);
        assert_eq!(state.cursor(), state.len());
        assert_eq!(state.revealed(), "typed by a human");
        assert!(state.is_complete());
        assert!(!state.needs_tick());
    }

    #[test]
    fn empty_assistant_text_starts_complete() {
        let mut state = RevealState::begin(Role::Assistant, "", 0);
        assert!(state.is_complete());
        assert!(!state.needs_tick());
        assert_eq!(state.tick(0), TickOutcome::Finished);
    }

    #[test]
    fn multibyte_characters_are_revealed_whole() {
        let text = "añ€😀";
        let mut state = RevealState::begin(Role::Assistant, text, 0);
        assert_eq!(state.len(), 4);
        let mut seen = Vec::new();
        while let TickOutcome::Advanced { ch, .. } = state.tick(0) {
            seen.push(state.revealed().to_string());
            assert!(state.revealed().ends_with(ch));
        }
        assert_eq!(seen, vec!["a", "añ", "añ€", "añ€😀"]);
    }

    #[test]
    fn ticks_from_another_cycle_are_stale() {
        let mut state = RevealState::begin(Role::Assistant, "abc", 7);
        assert_eq!(state.tick(6), TickOutcome::Stale);
        assert_eq!(state.cursor(), 0);
        assert!(matches!(state.tick(7), TickOutcome::Advanced { ch: 'a', .. }));
    }

    #[test]
    fn cancelled_state_ignores_ticks() {
        let mut state = RevealState::begin(Role::Assistant, "abc", 1);
        state.tick(1);
        state.cancel();
        assert!(!state.needs_tick());
        assert_eq!(state.tick(1), TickOutcome::Stale);
        assert_eq!(state.revealed(), "a");
    }

    #[test]
    fn drain_takes_exactly_len_ticks() {
        let mut state = RevealState::begin(Role::Assistant, "<b>tags</b> & stuff", 0);
        assert_eq!(drain(&mut state), state.len());
        assert_eq!(state.revealed(), state.visible());
    }
}
