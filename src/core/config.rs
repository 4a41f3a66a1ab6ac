//! Session configuration.
//!
//! Everything a game session fixes at construction time: roster size,
//! starting money, bonuses, jail length, die size and chance odds. The board
//! layout is supplied separately (see [`crate::board::Board`]).

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use super::player::Money;

/// What happens when a player lands on rent they cannot cover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsolvencyPolicy {
    /// The payer hands over whatever they have; the owner receives exactly
    /// that amount. Balances never drop below zero.
    #[default]
    PayWhatYouCan,
    /// Full rent is always debited, so balances may go negative.
    AllowDebt,
}

/// Odds and magnitudes of the chance tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChanceConfig {
    /// Probability of the losing outcome.
    pub loss_probability: f64,
    /// Fraction of current money lost, drawn uniformly from `[min, max)`.
    pub loss_min: f64,
    pub loss_max: f64,
    /// Fraction of current money gained on the winning outcome.
    pub gain_fraction: f64,
}

impl Default for ChanceConfig {
    fn default() -> Self {
        Self {
            loss_probability: 0.9,
            loss_min: 0.10,
            loss_max: 0.31,
            gain_fraction: 0.5,
        }
    }
}

/// Complete session configuration.
///
/// ```
/// use board_turns::core::{GameConfig, InsolvencyPolicy};
///
/// let config = GameConfig::new(2)
///     .with_starting_money(1500)
///     .with_insolvency(InsolvencyPolicy::AllowDebt);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (2-8).
    pub player_count: usize,
    pub starting_money: Money,
    /// Credited each time a player wraps past start after their first move.
    pub pass_start_bonus: Money,
    /// Credited for ending a move on the start tile.
    pub start_landing_bonus: Money,
    /// Own turns skipped when jailed.
    pub jail_turns: u8,
    /// Die faces; rolling the top face earns an extra roll.
    pub die_faces: u8,
    pub chance: ChanceConfig,
    pub insolvency: InsolvencyPolicy,
    /// If set, a player released by serving their last jail turn rolls in
    /// that same turn instead of passing play on.
    pub release_grants_roll: bool,
    pub seed: u64,
}

impl GameConfig {
    /// Create a configuration with the standard rules.
    pub fn new(player_count: usize) -> Self {
        assert!((2..=8).contains(&player_count), "Player count must be 2-8");

        Self {
            player_count,
            starting_money: 1000,
            pass_start_bonus: 200,
            start_landing_bonus: 200,
            jail_turns: 3,
            die_faces: 6,
            chance: ChanceConfig::default(),
            insolvency: InsolvencyPolicy::default(),
            release_grants_roll: false,
            seed: 0,
        }
    }

    #[must_use]
    pub fn with_starting_money(mut self, money: Money) -> Self {
        self.starting_money = money;
        self
    }

    #[must_use]
    pub fn with_pass_start_bonus(mut self, bonus: Money) -> Self {
        self.pass_start_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_start_landing_bonus(mut self, bonus: Money) -> Self {
        self.start_landing_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_jail_turns(mut self, turns: u8) -> Self {
        self.jail_turns = turns;
        self
    }

    #[must_use]
    pub fn with_die_faces(mut self, faces: u8) -> Self {
        self.die_faces = faces;
        self
    }

    #[must_use]
    pub fn with_chance(mut self, chance: ChanceConfig) -> Self {
        self.chance = chance;
        self
    }

    #[must_use]
    pub fn with_insolvency(mut self, policy: InsolvencyPolicy) -> Self {
        self.insolvency = policy;
        self
    }

    #[must_use]
    pub fn with_release_grants_roll(mut self, grants: bool) -> Self {
        self.release_grants_roll = grants;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration for values the rules cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(2..=8).contains(&self.player_count) {
            return Err(GameError::invalid_config(format!(
                "player count {} outside 2-8",
                self.player_count
            )));
        }
        if self.starting_money < 0 {
            return Err(GameError::invalid_config("starting money is negative"));
        }
        if self.die_faces < 2 {
            return Err(GameError::invalid_config("die needs at least 2 faces"));
        }
        if self.jail_turns == 0 {
            return Err(GameError::invalid_config("jail must last at least 1 turn"));
        }

        let chance = &self.chance;
        if !(0.0..=1.0).contains(&chance.loss_probability) {
            return Err(GameError::invalid_config("chance loss probability outside [0, 1]"));
        }
        if !(0.0 <= chance.loss_min && chance.loss_min < chance.loss_max && chance.loss_max <= 1.0) {
            return Err(GameError::invalid_config("chance loss range must satisfy 0 <= min < max <= 1"));
        }
        if chance.gain_fraction < 0.0 {
            return Err(GameError::invalid_config("chance gain fraction is negative"));
        }

        Ok(())
    }
}
