//! Event delivery: observers, history and the per-step buffer.

use im::Vector;
use tracing::{debug, info};

use super::event::GameEvent;

/// Receives every event the engine emits.
///
/// Observers only see shared references, so they cannot touch game state.
/// Closures taking `&GameEvent` are observers too.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Fans events out to observers and keeps the full history.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn GameObserver>>,
    history: Vector<GameEvent>,
    /// Events emitted since the last `take_pending`.
    pending: Vec<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Log, record and deliver one event.
    pub fn emit(&mut self, event: GameEvent) {
        if event.is_step() {
            debug!(player = ?event.player(), "{}", event);
        } else {
            info!(player = ?event.player(), "{}", event);
        }

        for observer in &mut self.observers {
            observer.on_event(&event);
        }
        self.history.push_back(event.clone());
        self.pending.push(event);
    }

    /// Every event emitted this session.
    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    /// Forget the recorded history. Observers and pending events are kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Drain the events emitted since the previous call.
    pub fn take_pending(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }
}
