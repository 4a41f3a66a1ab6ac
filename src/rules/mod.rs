//! Board rules: movement, property, jail and tile effects.
//!
//! Components are stateless. Each takes the `GameState` it acts on and the
//! `EventBus` it reports to, so ownership of game data stays with the caller.
//!
//! - [`MovementEngine`]: stepping around the path, pass-start bonus
//! - [`PropertyLedger`]: ownership, purchase, rent
//! - [`JailSubsystem`]: entry, countdown, release
//! - [`TileEffectResolver`]: per-tile effects and the resulting [`TurnDirective`]

mod effects;
mod jail;
mod ledger;
mod movement;

pub use effects::{ChanceDraw, TileEffectResolver, TurnDirective};
pub use jail::{JailEntry, JailSubsystem};
pub use ledger::{PropertyLedger, RentOutcome};
pub use movement::MovementEngine;
