//! The turn state machine.

use im::Vector;
use smallvec::SmallVec;
use tracing::debug;

use super::phase::{PendingPurchase, Phase, PurchaseDecision, Stage, Transition};
use crate::board::{Board, TileIndex, TileKind};
use crate::core::{GameConfig, GameError, GameState, JailStatus, Money, Player, PlayerId, Result};
use crate::events::{EventBus, GameEvent, GameObserver, MoveKind};
use crate::rules::{JailSubsystem, MovementEngine, PropertyLedger, TileEffectResolver, TurnDirective};

/// Owns a game session and drives it turn by turn.
///
/// ## Driving the game
///
/// 1. [`request_roll`](Self::request_roll) while [`can_roll`](Self::can_roll)
/// 2. [`step`](Self::step) once per suspension point (one tile of movement,
///    the landing, the turn hand-over), or [`settle`](Self::settle) to run
///    until input is needed
/// 3. Answer a [`pending_decision`](Self::pending_decision) with
///    [`confirm_buy`](Self::confirm_buy) or [`pass`](Self::pass)
///
/// The phase is the roll lock: a roll is only accepted in
/// `Phase::AwaitingRoll`, and play never passes on while a movement or a
/// purchase decision is unfinished.
///
/// ```
/// use board_turns::games::classic::ClassicGameBuilder;
///
/// let mut game = ClassicGameBuilder::new().seed(7).build().unwrap();
/// let first = game.current_player();
///
/// game.request_roll_with(3).unwrap();
/// game.settle().unwrap();
/// if game.pending_decision().is_some() {
///     game.pass().unwrap();
///     game.settle().unwrap();
/// }
/// assert_ne!(game.current_player(), first);
/// ```
pub struct TurnController {
    state: GameState,
    phase: Phase,
    events: EventBus,
}

impl TurnController {
    /// Start a session. The first player is waiting to roll.
    pub fn new(config: GameConfig, board: Board) -> Result<Self> {
        let state = GameState::new(config, board)?;
        let first = state.current;

        let mut events = EventBus::new();
        events.emit(GameEvent::TurnChanged { player: first });

        Ok(Self {
            state,
            phase: Phase::AwaitingRoll { player: first },
            events,
        })
    }

    /// Register an observer for all subsequent events.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.events.subscribe(observer);
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access for setting up scenarios.
    ///
    /// Changes made here bypass the rules and emit no events.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.state.player(id)
    }

    pub fn players_on_tile(&self, tile: TileIndex) -> Result<SmallVec<[PlayerId; 4]>> {
        self.state.players_on_tile(tile)
    }

    pub fn tile_owner(&self, tile: TileIndex) -> Result<Option<PlayerId>> {
        self.state.board.tile_at(tile)?;
        Ok(self.state.ledger.owner_of(tile))
    }

    /// Every event emitted this session.
    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        self.events.history()
    }

    /// Drop the event history, for long-running sessions.
    pub fn clear_history(&mut self) {
        self.events.clear_history();
    }

    /// Whether a roll would be accepted right now.
    #[must_use]
    pub fn can_roll(&self) -> bool {
        matches!(self.phase, Phase::AwaitingRoll { .. })
    }

    #[must_use]
    pub fn pending_decision(&self) -> Option<PendingPurchase> {
        match self.phase {
            Phase::AwaitingDecision(pending) => Some(pending),
            _ => None,
        }
    }

    // === Rolling ===

    /// Roll the die for the current player.
    ///
    /// Returns `None` without touching anything while the roll lock is held.
    pub fn request_roll(&mut self) -> Option<u8> {
        if !self.can_roll() {
            self.ignore_roll();
            return None;
        }

        let value = self.state.dice.roll_die(self.state.config.die_faces);
        self.begin_resolution(value);
        Some(value)
    }

    /// Roll with a die value chosen by the caller.
    ///
    /// While the roll lock is held the call is ignored whatever the value.
    pub fn request_roll_with(&mut self, value: u8) -> Result<Option<u8>> {
        if !self.can_roll() {
            self.ignore_roll();
            return Ok(None);
        }

        let faces = self.state.config.die_faces;
        if !(1..=faces).contains(&value) {
            return Err(GameError::invalid_state(format!(
                "die value {value} outside 1..={faces}"
            )));
        }

        self.begin_resolution(value);
        Ok(Some(value))
    }

    /// Roll and run until the next input is needed.
    pub fn roll_and_settle(&mut self) -> Result<Option<u8>> {
        let rolled = self.request_roll();
        if rolled.is_some() {
            self.settle()?;
        }
        Ok(rolled)
    }

    fn ignore_roll(&self) {
        debug!(
            player = %self.state.current,
            phase = self.phase.name(),
            "roll ignored while the roll lock is held"
        );
    }

    fn begin_resolution(&mut self, value: u8) {
        let player = self.state.current;
        let max_face = value == self.state.config.die_faces;
        self.state.extra_roll_pending = max_face;

        self.events.emit(GameEvent::DiceRolled {
            player,
            value,
            max_face,
        });
        self.phase = Phase::Resolving {
            player,
            die: value,
            stage: Stage::Moving {
                remaining: value as usize,
            },
        };
    }

    // === Stepping ===

    /// Advance one suspension point.
    ///
    /// Returns `None` when the game is waiting for a roll or a decision.
    /// On error the phase is left as it was.
    pub fn step(&mut self) -> Result<Option<Transition>> {
        let from = self.phase;
        let to = match from {
            Phase::AwaitingRoll { .. } | Phase::AwaitingDecision(_) => return Ok(None),
            Phase::Resolving { player, die, stage } => self.resolve_stage(player, die, stage)?,
            Phase::TurnEnding { player } => self.hand_over(player)?,
        };

        self.phase = to;
        Ok(Some(Transition {
            from,
            to,
            events: self.events.take_pending(),
        }))
    }

    /// Step until a roll or a decision is needed.
    pub fn settle(&mut self) -> Result<Vec<Transition>> {
        let mut transitions = Vec::new();
        while let Some(transition) = self.step()? {
            transitions.push(transition);
        }
        Ok(transitions)
    }

    fn resolve_stage(&mut self, player: PlayerId, die: u8, stage: Stage) -> Result<Phase> {
        let resolving = |stage| Phase::Resolving { player, die, stage };

        match stage {
            Stage::Moving { remaining } => {
                if remaining > 0 {
                    MovementEngine::advance_one(&mut self.state, player, &mut self.events)?;
                }
                let remaining = remaining.saturating_sub(1);
                if remaining > 0 {
                    return Ok(resolving(Stage::Moving { remaining }));
                }

                MovementEngine::finish_move(&mut self.state, player, MoveKind::Roll, &mut self.events)?;
                Ok(resolving(Stage::Landed))
            }

            Stage::Landed => {
                let directive = TileEffectResolver::resolve(&mut self.state, player, &mut self.events)?;
                self.follow(player, die, directive)
            }

            Stage::Relocating { remaining } => {
                if remaining > 0 {
                    MovementEngine::relocate_one(&mut self.state, player, &mut self.events)?;
                }
                let remaining = remaining.saturating_sub(1);
                if remaining > 0 {
                    return Ok(resolving(Stage::Relocating { remaining }));
                }

                MovementEngine::finish_move(&mut self.state, player, MoveKind::Relocation, &mut self.events)?;
                TileEffectResolver::complete_jail_relocation(&mut self.state, player, &mut self.events)?;
                Ok(Phase::TurnEnding { player })
            }
        }
    }

    fn follow(&mut self, player: PlayerId, die: u8, directive: TurnDirective) -> Result<Phase> {
        match directive {
            TurnDirective::EndTurn => Ok(Phase::TurnEnding { player }),
            TurnDirective::ContinueOnMaxRoll => self.continue_on_max_roll(player),
            TurnDirective::AwaitPurchase(tile) => {
                let t = self.state.board.tile_at(tile)?;
                let deed = t
                    .deed()
                    .ok_or_else(|| GameError::invalid_state(format!("{} is not for sale", t.name)))?;

                Ok(Phase::AwaitingDecision(PendingPurchase {
                    player,
                    tile,
                    cost: deed.cost,
                    die,
                    special: matches!(t.kind, TileKind::SpecialProperty(_)),
                }))
            }
            TurnDirective::RelocateToJail { distance } => Ok(Phase::Resolving {
                player,
                die,
                stage: Stage::Relocating { remaining: distance },
            }),
        }
    }

    /// The extra-roll rule: top face and still free means roll again.
    fn continue_on_max_roll(&mut self, player: PlayerId) -> Result<Phase> {
        let jailed = self.state.player(player)?.is_jailed();

        if self.state.extra_roll_pending && !jailed {
            self.state.extra_roll_pending = false;
            self.events.emit(GameEvent::ExtraRollGranted { player });
            Ok(Phase::AwaitingRoll { player })
        } else {
            Ok(Phase::TurnEnding { player })
        }
    }

    /// Pass play to the next player who may roll, serving jail turns of
    /// everyone skipped on the way.
    fn hand_over(&mut self, player: PlayerId) -> Result<Phase> {
        self.state.extra_roll_pending = false;
        self.events.emit(GameEvent::TurnEnded { player });

        let count = self.state.player_count();
        let mut next = player;
        loop {
            next = next.next(count);
            self.state.current = next;
            self.state.turn_number += 1;

            if !self.state.player(next)?.is_jailed() {
                break;
            }

            let status = JailSubsystem::serve_turn(&mut self.state, next, &mut self.events)?;
            if status == JailStatus::Free && self.state.config.release_grants_roll {
                break;
            }
        }

        self.events.emit(GameEvent::TurnChanged { player: next });
        Ok(Phase::AwaitingRoll { player: next })
    }

    // === Purchase decisions ===

    /// Buy the tile on offer. Returns the price paid.
    ///
    /// If the player can no longer pay, the decision stays pending.
    pub fn confirm_buy(&mut self) -> Result<Money> {
        let pending = self.expect_pending()?;
        let paid = PropertyLedger::purchase(&mut self.state, pending.player, pending.tile, &mut self.events)?;
        self.phase = self.after_decision(pending)?;
        Ok(paid)
    }

    /// Decline the tile on offer.
    pub fn pass(&mut self) -> Result<()> {
        let pending = self.expect_pending()?;
        self.events.emit(GameEvent::PurchaseDeclined {
            player: pending.player,
            tile: pending.tile,
        });
        self.phase = self.after_decision(pending)?;
        Ok(())
    }

    /// Answer the decision for a specific tile.
    ///
    /// Fails with `InvalidState` unless `tile` is the one on offer.
    pub fn decide(&mut self, tile: TileIndex, decision: PurchaseDecision) -> Result<()> {
        let pending = self.expect_pending()?;
        if pending.tile != tile {
            return Err(GameError::invalid_state(format!(
                "{tile} is not on offer (pending: {})",
                pending.tile
            )));
        }

        match decision {
            PurchaseDecision::Buy => self.confirm_buy().map(|_| ()),
            PurchaseDecision::Pass => self.pass(),
        }
    }

    fn expect_pending(&self) -> Result<PendingPurchase> {
        self.pending_decision()
            .ok_or_else(|| GameError::invalid_state(format!("no purchase decision pending in {}", self.phase.name())))
    }

    fn after_decision(&mut self, pending: PendingPurchase) -> Result<Phase> {
        let directive = TileEffectResolver::after_ownable(pending.special);
        self.follow(pending.player, pending.die, directive)
    }
}
