//! Turn sequencing tests.
//!
//! These drive `TurnController` with scripted die values over a small
//! purpose-built board and check who rolls next.

use std::cell::RefCell;
use std::rc::Rc;

use board_turns::{
    BoardBuilder, EventBus, GameConfig, GameError, GameEvent, JailStatus, MoveKind, Phase,
    PlayerId, PropertyLedger, TileIndex, TurnController,
};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

const LANE: TileIndex = TileIndex::new(2);
const STATION: TileIndex = TileIndex::new(4);
const AVENUE: TileIndex = TileIndex::new(8);
const JAIL: TileIndex = TileIndex::new(9);

/// 0 GO, 1 Rest, 2 Lane, 3 Chance, 4 Station (special), 5 Rest, 6 Rest,
/// 7 Go To Jail, 8 Avenue, 9 Jail, 10 Rest, 11 Rest
fn controller_with(config: GameConfig) -> TurnController {
    let board = BoardBuilder::new()
        .start("GO")
        .empty("Rest 1")
        .property("Lane", 100, 10)
        .chance("Chance")
        .special_property("Station", 200, 25)
        .empty("Rest 5")
        .empty("Rest 6")
        .go_to_jail("Go To Jail")
        .property("Avenue", 150, 12)
        .jail("Jail")
        .empty("Rest 10")
        .empty("Rest 11")
        .build()
        .unwrap();
    TurnController::new(config, board).unwrap()
}

fn controller() -> TurnController {
    controller_with(GameConfig::new(2))
}

fn place(c: &mut TurnController, player: PlayerId, tile: u16) {
    c.state_mut().players[player].position = TileIndex::new(tile);
}

fn roll(c: &mut TurnController, value: u8) {
    assert_eq!(c.request_roll_with(value).unwrap(), Some(value));
    c.settle().unwrap();
}

fn give(c: &mut TurnController, owner: PlayerId, tile: TileIndex) {
    let mut scratch = EventBus::new();
    PropertyLedger::purchase(c.state_mut(), owner, tile, &mut scratch).unwrap();
}

fn count(c: &TurnController, pred: impl Fn(&GameEvent) -> bool) -> usize {
    c.history().iter().filter(|e| pred(e)).count()
}

/// Test that play passes to (i + 1) mod n after an ordinary roll.
#[test]
fn test_non_max_roll_passes_turn() {
    let mut c = controller();

    roll(&mut c, 1);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });

    roll(&mut c, 1);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P0 });
    assert_eq!(c.state().turn_number, 3);
}

/// Test that the top face earns exactly one more roll.
#[test]
fn test_max_roll_on_empty_grants_one_extra_roll() {
    let mut c = controller();

    roll(&mut c, 6);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P0 });
    assert!(!c.state().extra_roll_pending);
    assert_eq!(count(&c, |e| matches!(e, GameEvent::ExtraRollGranted { .. })), 1);

    roll(&mut c, 5);
    assert_eq!(c.player(P0).unwrap().position, TileIndex::new(11));
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
}

#[test]
fn test_empty_tile_without_max_roll_ends_turn() {
    let mut c = controller();

    roll(&mut c, 5);

    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
    assert_eq!(c.player(P0).unwrap().money, 1000);
}

/// Test that landing on start ends the turn even on the top face.
#[test]
fn test_start_overrides_extra_roll() {
    let mut c = controller();
    place(&mut c, P0, 6);
    c.state_mut().players[P0].has_started = true;

    roll(&mut c, 6);

    // Passing start and landing on it both pay
    assert_eq!(c.player(P0).unwrap().position, TileIndex::new(0));
    assert_eq!(c.player(P0).unwrap().money, 1400);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
}

#[test]
fn test_chance_with_max_roll_grants_extra_roll() {
    let mut c = controller();
    place(&mut c, P0, 9);

    roll(&mut c, 6);

    assert_eq!(c.player(P0).unwrap().position, TileIndex::new(3));
    assert_eq!(
        count(&c, |e| matches!(e, GameEvent::ChanceLoss { .. } | GameEvent::ChanceGain { .. })),
        1
    );
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P0 });
}

#[test]
fn test_chance_without_max_roll_ends_turn() {
    let mut c = controller();

    roll(&mut c, 3);

    assert_ne!(c.player(P0).unwrap().money, 1000);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
}

#[test]
fn test_jail_tile_ends_turn_despite_max_roll() {
    let mut c = controller();
    place(&mut c, P0, 3);

    roll(&mut c, 6);

    assert_eq!(c.player(P0).unwrap().position, JAIL);
    assert_eq!(c.player(P0).unwrap().jail, JailStatus::Jailed { turns_remaining: 3 });
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
    assert!(!c.state().extra_roll_pending);
}

#[test]
fn test_go_to_jail_relocates_and_ends_turn() {
    let mut c = controller();
    place(&mut c, P0, 1);

    roll(&mut c, 6);

    let p0 = c.player(P0).unwrap();
    assert_eq!(p0.position, JAIL);
    assert_eq!(p0.jail_turns_remaining(), 3);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });

    let relocation_steps: Vec<_> = c
        .history()
        .iter()
        .filter_map(|e| match e {
            GameEvent::Stepped { position, kind: MoveKind::Relocation, .. } => Some(*position),
            _ => None,
        })
        .collect();
    assert_eq!(relocation_steps, vec![TileIndex::new(8), JAIL]);
}

/// Test that the walk to jail never pays the pass-start bonus, even across the start.
#[test]
fn test_go_to_jail_wrap_pays_no_bonus() {
    // 0 GO, 1 Jail, 2 Rest, 3 Go To Jail, 4 Rest
    let board = BoardBuilder::new()
        .start("GO")
        .jail("Jail")
        .empty("Rest")
        .go_to_jail("Go To Jail")
        .empty("Rest")
        .build()
        .unwrap();
    let mut c = TurnController::new(GameConfig::new(2), board).unwrap();
    c.state_mut().players[P0].has_started = true;

    roll(&mut c, 3);

    let p0 = c.player(P0).unwrap();
    assert_eq!(p0.position, TileIndex::new(1));
    assert!(p0.is_jailed());
    assert_eq!(p0.money, 1000);
    assert_eq!(p0.laps_completed, 0);
    assert_eq!(count(&c, |e| matches!(e, GameEvent::PassedStart { .. })), 0);
}

/// Test that a jailed player's turns are spent on the countdown, not on rolling.
#[test]
fn test_jailed_player_turns_are_consumed() {
    let mut c = controller();
    c.state_mut().players[P0].jail = JailStatus::Jailed { turns_remaining: 3 };
    place(&mut c, P0, 9);

    // P0 rolls once more to hand over; P0 is then skipped on each pass
    roll(&mut c, 1);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });

    let mut remaining = Vec::new();
    for _ in 0..3 {
        place(&mut c, P1, 10);
        roll(&mut c, 1);
        remaining.push(c.player(P0).unwrap().jail_turns_remaining());
        assert_eq!(c.player(P0).unwrap().position, TileIndex::new(10));
    }

    // Two skipped turns, then the release consumes the third
    assert_eq!(remaining, vec![2, 1, 0]);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
    assert!(!c.player(P0).unwrap().is_jailed());

    place(&mut c, P1, 10);
    roll(&mut c, 1);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P0 });
}

#[test]
fn test_release_can_grant_roll() {
    let mut c = controller_with(GameConfig::new(2).with_release_grants_roll(true));
    roll(&mut c, 1);
    c.state_mut().players[P0].jail = JailStatus::Jailed { turns_remaining: 1 };

    roll(&mut c, 1);

    assert!(!c.player(P0).unwrap().is_jailed());
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P0 });
}

/// Test that hand-over terminates when every player is jailed.
#[test]
fn test_everyone_jailed_still_advances() {
    let mut c = controller();
    c.state_mut().players[P1].jail = JailStatus::Jailed { turns_remaining: 2 };
    place(&mut c, P0, 3);

    roll(&mut c, 6);

    // P1: 2 -> 1, P0: 3 -> 2, P1: 1 -> free (turn consumed), P0: 2 -> 1, P1 rolls
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
    assert_eq!(c.player(P0).unwrap().jail_turns_remaining(), 1);
    assert!(!c.player(P1).unwrap().is_jailed());
}

#[test]
fn test_buy_property_with_max_roll_rolls_again() {
    let mut c = controller();
    place(&mut c, P0, 2);

    roll(&mut c, 6);
    let pending = c.pending_decision().unwrap();
    assert_eq!(pending.tile, AVENUE);
    assert!(!c.can_roll());

    assert_eq!(c.confirm_buy().unwrap(), 150);
    c.settle().unwrap();

    assert_eq!(c.player(P0).unwrap().money, 850);
    assert_eq!(c.tile_owner(AVENUE).unwrap(), Some(P0));
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P0 });
}

#[test]
fn test_buy_special_property_ends_turn_despite_max_roll() {
    let mut c = controller();
    place(&mut c, P0, 10);

    roll(&mut c, 6);
    assert_eq!(c.pending_decision().unwrap().tile, STATION);

    c.confirm_buy().unwrap();
    c.settle().unwrap();

    assert_eq!(c.player(P0).unwrap().money, 800);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
}

#[test]
fn test_pass_without_max_roll_ends_turn() {
    let mut c = controller();

    roll(&mut c, 2);
    assert_eq!(c.pending_decision().unwrap().tile, LANE);

    c.pass().unwrap();
    c.settle().unwrap();

    assert_eq!(c.tile_owner(LANE).unwrap(), None);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
    assert_eq!(count(&c, |e| matches!(e, GameEvent::PurchaseDeclined { .. })), 1);
}

#[test]
fn test_pending_decision_blocks_play() {
    let mut c = controller();
    roll(&mut c, 2);

    assert_eq!(c.request_roll_with(3).unwrap(), None);
    assert!(c.step().unwrap().is_none());
    assert!(c.settle().unwrap().is_empty());
    assert!(c.pending_decision().is_some());
}

#[test]
fn test_decision_without_prompt_is_invalid() {
    let mut c = controller();

    assert!(matches!(c.confirm_buy(), Err(GameError::InvalidState(_))));
    assert!(matches!(c.pass(), Err(GameError::InvalidState(_))));
}

/// Test that a failed purchase leaves the decision open.
#[test]
fn test_unaffordable_confirmation_keeps_prompt() {
    let mut c = controller();
    roll(&mut c, 2);
    c.state_mut().players[P0].money = 10;

    assert_eq!(
        c.confirm_buy(),
        Err(GameError::InsufficientFunds { player: P0, cost: 100, money: 10 })
    );
    assert!(c.pending_decision().is_some());

    c.pass().unwrap();
    c.settle().unwrap();
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
}

#[test]
fn test_unaffordable_property_skips_prompt() {
    let mut c = controller();
    c.state_mut().players[P0].money = 50;

    roll(&mut c, 2);

    assert!(c.pending_decision().is_none());
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
}

/// Test that a property the player cannot pay for ends the turn, top face or not.
#[test]
fn test_unaffordable_property_on_max_roll_ends_turn() {
    let mut c = controller();
    c.state_mut().players[P0].money = 50;
    place(&mut c, P0, 2);

    roll(&mut c, 6);

    assert_eq!(c.player(P0).unwrap().position, AVENUE);
    assert_eq!(count(&c, |e| matches!(e, GameEvent::PurchaseUnaffordable { .. })), 1);
    assert_eq!(count(&c, |e| matches!(e, GameEvent::ExtraRollGranted { .. })), 0);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
    assert!(!c.state().extra_roll_pending);
}

#[test]
fn test_rent_with_max_roll_rolls_again() {
    let mut c = controller();
    give(&mut c, P1, AVENUE);
    place(&mut c, P0, 2);

    roll(&mut c, 6);

    assert_eq!(c.player(P0).unwrap().money, 988);
    assert_eq!(c.player(P1).unwrap().money, 850 + 12);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P0 });
}

/// Test that a waived rent does not cost the payer their extra roll.
#[test]
fn test_rent_waived_for_jailed_owner_still_grants_payer_roll() {
    let mut c = controller();
    give(&mut c, P1, AVENUE);
    c.state_mut().players[P1].jail = JailStatus::Jailed { turns_remaining: 2 };
    place(&mut c, P0, 2);

    roll(&mut c, 6);

    assert_eq!(c.player(P0).unwrap().money, 1000);
    assert_eq!(c.player(P1).unwrap().money, 850);
    assert_eq!(count(&c, |e| matches!(e, GameEvent::RentWaived { .. })), 1);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P0 });
}

/// Test the deliberate asymmetry between self-owned property kinds.
#[test]
fn test_self_owned_property_and_special_property_differ() {
    let mut c = controller();
    give(&mut c, P0, AVENUE);
    give(&mut c, P0, STATION);

    // Ordinary property: the top face still earns a roll
    place(&mut c, P0, 2);
    roll(&mut c, 6);
    assert_eq!(c.player(P0).unwrap().position, AVENUE);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P0 });

    // Special property: the turn ends regardless
    place(&mut c, P0, 10);
    roll(&mut c, 6);
    assert_eq!(c.player(P0).unwrap().position, STATION);
    assert_eq!(c.phase(), Phase::AwaitingRoll { player: P1 });
}

/// Test that observers get one update per tile of movement.
#[test]
fn test_observer_sees_each_step() {
    let mut c = controller();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    c.subscribe(move |e: &GameEvent| {
        if let GameEvent::Stepped { player, position, .. } = e {
            sink.borrow_mut().push((*player, *position));
        }
    });

    c.request_roll_with(4).unwrap();
    c.step().unwrap();
    assert_eq!(seen.borrow().len(), 1);

    c.settle().unwrap();
    let positions: Vec<u16> = seen.borrow().iter().map(|(_, t)| t.0).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);
}

#[test]
fn test_turn_changed_notifications() {
    let mut c = controller();
    let turns = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&turns);
    c.subscribe(move |e: &GameEvent| {
        if let GameEvent::TurnChanged { player } = e {
            sink.borrow_mut().push(*player);
        }
    });

    roll(&mut c, 1);
    roll(&mut c, 1);

    assert_eq!(*turns.borrow(), vec![P1, P0]);
}

#[test]
fn test_unknown_player_not_found() {
    let c = controller();

    assert_eq!(
        c.player(PlayerId::new(5)).unwrap_err(),
        GameError::NotFound(PlayerId::new(5))
    );
    assert!(matches!(
        c.tile_owner(TileIndex::new(40)),
        Err(GameError::OutOfRange { index: 40, len: 12 })
    ));
}
