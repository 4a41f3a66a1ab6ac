//! Turn sequencing.
//!
//! [`TurnController`] owns a session's [`GameState`](crate::core::GameState)
//! and runs the roll → move → effect → hand-over cycle as an explicit phase
//! machine. Every tile of movement and every purchase prompt is a point
//! where the controller stops and waits to be driven again.

mod controller;
mod phase;

pub use controller::TurnController;
pub use phase::{PendingPurchase, Phase, PurchaseDecision, Stage, Transition};
