//! Event notifications.
//!
//! The engine reports everything it does as a [`GameEvent`]. Events reach
//! the outside world three ways:
//!
//! - **Observers** registered with [`EventBus::subscribe`] (animation,
//!   turn indicators, log panels)
//! - **Transition records** returned by the turn controller for each step
//! - **`tracing`** output at `info` (and `debug` for per-tile steps)

mod bus;
mod event;

pub use bus::{EventBus, GameObserver};
pub use event::{GameEvent, MoveKind};
