//! Jail entry, countdown and release.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameState, JailStatus, PlayerId, Result};
use crate::events::{EventBus, GameEvent};

/// Result of sending a player to jail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JailEntry {
    Entered { turns: u8 },
    /// Already jailed; the countdown is left alone.
    AlreadyJailed { turns_remaining: u8 },
}

/// Jail rules.
///
/// `Free -> Jailed(n)` on entry, `Jailed(n) -> Jailed(n - 1)` for each own
/// turn served, `Jailed(1) -> Free` on the last one.
pub struct JailSubsystem;

impl JailSubsystem {
    /// Jail a player for the configured number of turns.
    pub fn enter(state: &mut GameState, player: PlayerId, events: &mut EventBus) -> Result<JailEntry> {
        let turns = state.config.jail_turns;
        let p = state.player_mut(player)?;

        match p.jail {
            JailStatus::Jailed { turns_remaining } => {
                events.emit(GameEvent::AlreadyJailed {
                    player,
                    turns_remaining,
                });
                Ok(JailEntry::AlreadyJailed { turns_remaining })
            }
            JailStatus::Free => {
                p.jail = JailStatus::Jailed {
                    turns_remaining: turns,
                };
                events.emit(GameEvent::Jailed { player, turns });
                Ok(JailEntry::Entered { turns })
            }
        }
    }

    /// Consume one of a jailed player's turns. Returns the new status.
    pub fn serve_turn(state: &mut GameState, player: PlayerId, events: &mut EventBus) -> Result<JailStatus> {
        let p = state.player_mut(player)?;

        let JailStatus::Jailed { turns_remaining } = p.jail else {
            return Err(GameError::invalid_state(format!("{player} is not in jail")));
        };

        let turns_remaining = turns_remaining.saturating_sub(1);
        if turns_remaining == 0 {
            p.jail = JailStatus::Free;
            events.emit(GameEvent::ReleasedFromJail { player });
        } else {
            p.jail = JailStatus::Jailed { turns_remaining };
            events.emit(GameEvent::JailTurnServed {
                player,
                turns_remaining,
            });
        }

        Ok(p.jail)
    }
}
