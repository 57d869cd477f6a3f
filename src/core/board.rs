//! Arena of reveal cycles driven by tokio timers.
//!
//! Each message gets one slot holding its [`MessageView`] and at most one
//! pending tick. A tick is a spawned task that sleeps for the configured
//! interval and then sends a [`TickEvent`] back over a channel; the owner of
//! the board feeds those events into [`RevealBoard::handle_tick`], which
//! applies the tick and only then schedules the next one. Ticks carry the
//! cycle and cursor they were scheduled for, so an event that was already in
//! flight when its message was replaced or removed is dropped as stale, and
//! so is an event delivered twice.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::message::{Message, MessageId};
use crate::core::reveal::TickOutcome;
use crate::core::view::MessageView;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickEvent {
    pub id: MessageId,
    pub cycle: u64,
    /// Cursor position the tick was scheduled at.
    pub cursor: usize,
}

#[derive(Clone)]
struct TickDispatcher {
    tx: mpsc::UnboundedSender<TickEvent>,
}

impl TickDispatcher {
    fn spawn(&self, event: TickEvent, delay: Duration, cancel_token: CancellationToken) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    if !cancel_token.is_cancelled() {
                        let _ = tx.send(event);
                    }
                }
                _ = cancel_token.cancelled() => {}
            }
        });
    }
}

struct Slot {
    view: MessageView,
    pending: Option<CancellationToken>,
}

impl Slot {
    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

pub struct RevealBoard {
    slots: HashMap<MessageId, Slot>,
    dispatcher: TickDispatcher,
    rx: mpsc::UnboundedReceiver<TickEvent>,
    interval: Duration,
    next_cycle: u64,
}

impl RevealBoard {
    pub fn new(interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            slots: HashMap::new(),
            dispatcher: TickDispatcher { tx },
            rx,
            interval,
            next_cycle: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn view(&self, id: MessageId) -> Option<&MessageView> {
        self.slots.get(&id).map(|slot| &slot.view)
    }

    /// Insert a message or re-identify an existing one. An identity change
    /// cancels the pending tick before the new cycle begins. Must be called
    /// from within a tokio runtime.
    pub fn upsert(&mut self, message: &Message) {
        let cycle = self.next_cycle;
        match self.slots.get_mut(&message.id) {
            Some(slot) if slot.view.matches(message) => {
                slot.view.sync_with_cycle(message, slot.view.reveal().cycle());
                return;
            }
            Some(slot) => {
                slot.cancel_pending();
                slot.view.sync_with_cycle(message, cycle);
                debug!(id = message.id, cycle, "message replaced, restarting reveal");
            }
            None => {
                self.slots.insert(
                    message.id,
                    Slot {
                        view: MessageView::with_cycle(message, cycle),
                        pending: None,
                    },
                );
                debug!(id = message.id, cycle, role = message.role.as_str(), "reveal started");
            }
        }
        self.next_cycle += 1;
        self.schedule(message.id);
    }

    /// Drop a message and cancel its pending tick.
    pub fn remove(&mut self, id: MessageId) -> bool {
        match self.slots.remove(&id) {
            Some(mut slot) => {
                slot.cancel_pending();
                slot.view.cancel();
                debug!(id, "reveal removed");
                true
            }
            None => false,
        }
    }

    pub fn toggle_reasoning(&mut self, id: MessageId) -> Option<bool> {
        self.slots
            .get_mut(&id)
            .map(|slot| slot.view.toggle_reasoning())
    }

    /// Apply a fired tick. Ticks for removed messages, superseded cycles or
    /// an already applied position are ignored.
    pub fn handle_tick(&mut self, event: TickEvent) -> TickOutcome {
        let Some(slot) = self.slots.get_mut(&event.id) else {
            debug!(id = event.id, cycle = event.cycle, "tick for removed message dropped");
            return TickOutcome::Stale;
        };
        if slot.view.reveal().cycle() != event.cycle {
            debug!(id = event.id, cycle = event.cycle, "stale tick dropped");
            return TickOutcome::Stale;
        }
        if slot.pending.is_none() || slot.view.reveal().cursor() != event.cursor {
            debug!(
                id = event.id,
                cycle = event.cycle,
                cursor = event.cursor,
                "unexpected tick dropped"
            );
            return TickOutcome::Stale;
        }
        slot.cancel_pending();
        let outcome = slot.view.tick(event.cycle);
        self.schedule(event.id);
        outcome
    }

    /// Wait for the next fired tick.
    pub async fn next_tick(&mut self) -> Option<TickEvent> {
        self.rx.recv().await
    }

    /// Wait for and apply the next tick. Returns `None` once nothing is
    /// pending anywhere.
    pub async fn step(&mut self) -> Option<(MessageId, TickOutcome)> {
        if self.is_idle() {
            return None;
        }
        let event = self.next_tick().await?;
        Some((event.id, self.handle_tick(event)))
    }

    /// True when no slot has a pending tick.
    pub fn is_idle(&self) -> bool {
        self.slots.values().all(|slot| slot.pending.is_none())
    }

    pub fn is_pending(&self, id: MessageId) -> bool {
        self.slots
            .get(&id)
            .is_some_and(|slot| slot.pending.is_some())
    }

    fn schedule(&mut self, id: MessageId) {
        let Some(slot) = self.slots.get_mut(&id) else {
            return;
        };
        if slot.pending.is_some() || !slot.view.needs_tick() {
            return;
        }
        let token = CancellationToken::new();
        slot.pending = Some(token.clone());
        let event = TickEvent {
            id,
            cycle: slot.view.reveal().cycle(),
            cursor: slot.view.reveal().cursor(),
        };
        self.dispatcher.spawn(event, self.interval, token);
    }
}

impl Default for RevealBoard {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl Drop for RevealBoard {
    fn drop(&mut self) {
        for slot in self.slots.values_mut() {
            slot.cancel_pending();
        }
    }
}
