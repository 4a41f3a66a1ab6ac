//! # board-turns
//!
//! A rules engine for a turn-based, roll-and-move board game.
//!
//! Players walk a closed path of tiles. Landing resolves the tile: start
//! bonus, property purchase or rent, a chance card, jail, or a forced walk
//! to jail. Rolling the top face earns another roll unless the tile says
//! otherwise.
//!
//! ## Design Principles
//!
//! 1. **Explicit Ownership**: [`TurnController`] owns the [`GameState`];
//!    rules components are stateless functions over `&mut GameState`.
//!
//! 2. **Resumable Phases**: Movement and purchase prompts are phases of a
//!    state machine, not callbacks. Every tile of movement is a suspension
//!    point the presentation layer can animate.
//!
//! 3. **Observable, Not Mutable**: Presentation and display collaborators
//!    receive [`GameEvent`]s through [`GameObserver`] and can never touch the
//!    state.
//!
//! ## Modules
//!
//! - `core`: Player ids and records, configuration, errors, RNG, state
//! - `board`: Tiles and the immutable board
//! - `rules`: Movement, property ledger, jail, tile effects
//! - `events`: Event records, observers, event bus
//! - `turn`: The turn state machine
//! - `games`: Ready-made boards

pub mod board;
pub mod core;
pub mod events;
pub mod games;
pub mod rules;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    ChanceConfig, GameConfig, GameError, GameRng, GameState, InsolvencyPolicy, JailStatus, Money,
    Player, PlayerId, PlayerMap, Result,
};

pub use crate::board::{Board, BoardBuilder, Deed, Tile, TileIndex, TileKind};

pub use crate::rules::{
    ChanceDraw, JailEntry, JailSubsystem, MovementEngine, PropertyLedger, RentOutcome,
    TileEffectResolver, TurnDirective,
};

pub use crate::events::{EventBus, GameEvent, GameObserver, MoveKind};

pub use crate::turn::{PendingPurchase, Phase, PurchaseDecision, Stage, Transition, TurnController};
