//! Movement around the path, one tile at a time.
//!
//! Every step is its own call so the turn controller can suspend between
//! steps and observers see each intermediate position.

use tracing::trace;

use crate::board::TileIndex;
use crate::core::{GameError, GameState, PlayerId, Result};
use crate::events::{EventBus, GameEvent, MoveKind};

pub struct MovementEngine;

impl MovementEngine {
    /// Move one tile forward under a die roll.
    ///
    /// Wrapping past the end of the path pays the pass-start bonus, but only
    /// once the player's first movement has resolved.
    pub fn advance_one(state: &mut GameState, player: PlayerId, events: &mut EventBus) -> Result<TileIndex> {
        let bonus = state.config.pass_start_bonus;
        let previous = state.player(player)?.position;
        let next = state.board.next_index(previous);

        let p = state.player_mut(player)?;
        p.position = next;
        events.emit(GameEvent::Stepped {
            player,
            position: next,
            kind: MoveKind::Roll,
        });

        if p.has_started && next < previous {
            p.laps_completed += 1;
            p.money += bonus;
            events.emit(GameEvent::PassedStart {
                player,
                bonus,
                laps: p.laps_completed,
            });
        }

        Ok(next)
    }

    /// Move one tile forward on the way to jail. Never pays a bonus.
    pub fn relocate_one(state: &mut GameState, player: PlayerId, events: &mut EventBus) -> Result<TileIndex> {
        let previous = state.player(player)?.position;
        let next = state.board.next_index(previous);

        state.player_mut(player)?.position = next;
        events.emit(GameEvent::Stepped {
            player,
            position: next,
            kind: MoveKind::Relocation,
        });

        Ok(next)
    }

    /// Wrap up a movement sequence.
    ///
    /// After a roll the player counts as started from here on. Reports a
    /// shared tile when other players stand on the final position.
    pub fn finish_move(
        state: &mut GameState,
        player: PlayerId,
        kind: MoveKind,
        events: &mut EventBus,
    ) -> Result<TileIndex> {
        let p = state.player_mut(player)?;
        if kind == MoveKind::Roll {
            p.has_started = true;
        }
        let position = p.position;

        events.emit(GameEvent::MovementFinished {
            player,
            position,
            kind,
        });

        let sharing = state.players_on_tile(position)?;
        if sharing.len() > 1 {
            events.emit(GameEvent::SharedTile {
                tile: position,
                players: sharing,
            });
        }

        trace!(%player, %position, "movement finished");
        Ok(position)
    }

    /// Run a whole roll movement of `steps` tiles without suspending.
    pub fn move_by(
        state: &mut GameState,
        player: PlayerId,
        steps: usize,
        events: &mut EventBus,
    ) -> Result<TileIndex> {
        if steps == 0 {
            return Err(GameError::invalid_state("a move needs at least one step"));
        }

        for _ in 0..steps {
            Self::advance_one(state, player, events)?;
        }
        Self::finish_move(state, player, MoveKind::Roll, events)
    }
}
