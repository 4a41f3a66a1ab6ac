//! Core engine types: players, configuration, errors, RNG and game state.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{ChanceConfig, GameConfig, InsolvencyPolicy};
pub use error::{GameError, Result};
pub use player::{JailStatus, Money, Player, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::GameState;
