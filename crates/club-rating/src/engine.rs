//! Rating update computation.

use std::collections::HashMap;

use club_core::{Outcome, PlayerId, Score, TeamSide};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::{validate, GameInput, ValidatedGame, ValidationError};
use crate::multipliers::{
    expected_score, margin_multiplier, performance_multiplier, team_rating, underdog_multiplier,
};
use crate::{ConfigError, FormulaVersion, RatingConfig};

/// The factors that scaled one player's swing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub margin: f64,
    pub performance: f64,
    pub underdog: f64,
}

impl Multipliers {
    pub fn product(&self) -> f64 {
        self.margin * self.performance * self.underdog
    }
}

/// Win/loss/draw increments for one player, each 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WinLossDelta {
    pub win: u8,
    pub loss: u8,
    pub draw: u8,
}

impl From<Outcome> for WinLossDelta {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => Self { win: 1, ..Self::default() },
            Outcome::Loss => Self { loss: 1, ..Self::default() },
            Outcome::Draw => Self { draw: 1, ..Self::default() },
        }
    }
}

/// Rating change and tallies for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDelta {
    pub player_id: PlayerId,
    pub side: TeamSide,
    pub outcome: Outcome,
    pub before: f64,
    pub after: f64,
    pub points_for: u32,
    pub points_against: u32,
    pub multipliers: Multipliers,
}

impl PlayerDelta {
    /// Applied change, after clamping to the rating bounds.
    pub fn change(&self) -> f64 {
        self.after - self.before
    }
}

/// Result of rating one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub formula: FormulaVersion,
    pub score: Score,
    pub team1_rating: f64,
    pub team2_rating: f64,
    pub team1_expected: f64,
    pub team2_expected: f64,
    /// Team 1 first, in input order.
    pub players: Vec<PlayerDelta>,
}

impl RatingUpdate {
    /// New rating per player.
    pub fn new_ratings(&self) -> HashMap<PlayerId, f64> {
        self.players
            .iter()
            .map(|p| (p.player_id.clone(), p.after))
            .collect()
    }

    /// Win/loss/draw increments per player.
    pub fn win_loss_delta(&self) -> HashMap<PlayerId, WinLossDelta> {
        self.players
            .iter()
            .map(|p| (p.player_id.clone(), WinLossDelta::from(p.outcome)))
            .collect()
    }

    pub fn player(&self, id: &PlayerId) -> Option<&PlayerDelta> {
        self.players.iter().find(|p| &p.player_id == id)
    }

    pub fn expected(&self, side: TeamSide) -> f64 {
        match side {
            TeamSide::Team1 => self.team1_expected,
            TeamSide::Team2 => self.team2_expected,
        }
    }
}

/// Computes rating updates with a fixed configuration.
///
/// The engine holds no state between games: the same validated game always
/// yields the same update.
#[derive(Debug, Clone, Default)]
pub struct RatingEngine {
    config: RatingConfig,
}

impl RatingEngine {
    /// Creates an engine after checking `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is inconsistent; see
    /// [`RatingConfig::validate`].
    pub fn new(config: RatingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Rates a validated game.
    pub fn compute(&self, game: &ValidatedGame) -> RatingUpdate {
        let input = game.input();
        let config = &self.config;

        let team1_rating = team_rating(&ratings_of(input, TeamSide::Team1));
        let team2_rating = team_rating(&ratings_of(input, TeamSide::Team2));
        let team1_expected = expected_score(team1_rating, team2_rating, config.scale_factor);
        let team2_expected = expected_score(team2_rating, team1_rating, config.scale_factor);
        let margin = margin_multiplier(config, input.score);

        let mut players = Vec::with_capacity(input.team1.len() + input.team2.len());
        for side in [TeamSide::Team1, TeamSide::Team2] {
            let (own, opponent, expected) = match side {
                TeamSide::Team1 => (team1_rating, team2_rating, team1_expected),
                TeamSide::Team2 => (team2_rating, team1_rating, team2_expected),
            };
            let outcome = outcome_for(input.score, side);

            for player in input.team(side) {
                let (reference, underdog) = match config.formula {
                    FormulaVersion::Current => (
                        own,
                        underdog_multiplier(config, outcome, player.rating, own, opponent),
                    ),
                    FormulaVersion::Legacy => (opponent, 1.0),
                };
                let multipliers = Multipliers {
                    margin,
                    performance: performance_multiplier(
                        config,
                        input.format,
                        outcome,
                        player.rating,
                        reference,
                    ),
                    underdog,
                };

                let delta = config.k_factor
                    * (outcome.actual_score() - expected)
                    * 2.0
                    * multipliers.product();
                let after = config.clamp_rating(player.rating + delta);

                debug!(
                    player = %player.id,
                    ?outcome,
                    before = player.rating,
                    after,
                    expected,
                    margin = multipliers.margin,
                    performance = multipliers.performance,
                    underdog = multipliers.underdog,
                    "rated player"
                );

                players.push(PlayerDelta {
                    player_id: player.id.clone(),
                    side,
                    outcome,
                    before: player.rating,
                    after,
                    points_for: input.score.points_for(side),
                    points_against: input.score.points_against(side),
                    multipliers,
                });
            }
        }

        RatingUpdate {
            formula: config.formula,
            score: input.score,
            team1_rating,
            team2_rating,
            team1_expected,
            team2_expected,
            players,
        }
    }
}

/// Validates `input` and rates it.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the configuration or the game is
/// malformed; see [`validate`].
pub fn compute_rating_update(
    config: &RatingConfig,
    input: &GameInput,
) -> Result<RatingUpdate, ValidationError> {
    let engine = RatingEngine::new(config.clone())?;
    let game = validate(config, input)?;
    Ok(engine.compute(&game))
}

fn ratings_of(input: &GameInput, side: TeamSide) -> Vec<f64> {
    input.team(side).iter().map(|p| p.rating).collect()
}

fn outcome_for(score: Score, side: TeamSide) -> Outcome {
    match score.winner() {
        Some(winner) if winner == side => Outcome::Win,
        Some(_) => Outcome::Loss,
        None => Outcome::Draw,
    }
}
