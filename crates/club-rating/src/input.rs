//! Game input and validation.
//!
//! The engine only accepts a [`ValidatedGame`], which can only be built by
//! [`validate`]. Malformed teams and disallowed ties are reported here,
//! before any rating math runs.

use std::collections::HashSet;
use std::str::FromStr;

use club_core::{CoreError, Format, PlayerId, Score, TeamSide};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ConfigError, RatingConfig};

/// Errors that make a game unratable.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{side:?} has {actual} player(s), {format} needs {expected}")]
    TeamSize {
        side: TeamSide,
        format: Format,
        expected: usize,
        actual: usize,
    },

    #[error("player '{0}' appears more than once in the game")]
    DuplicatePlayer(PlayerId),

    #[error("player '{0}' has a rating that is not a finite number")]
    NonFiniteRating(PlayerId),

    #[error("tied score {0} is not allowed by the configured formula")]
    TiedScore(Score),

    #[error("rating config is invalid: {0}")]
    Config(#[from] ConfigError),
}

/// A player's current rating, as loaded by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub id: PlayerId,
    pub rating: f64,
}

impl PlayerRating {
    pub fn new(id: impl Into<PlayerId>, rating: f64) -> Self {
        Self {
            id: id.into(),
            rating,
        }
    }
}

/// Parses `<id>=<rating>`, e.g. `alice=4.25`.
impl FromStr for PlayerRating {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidPlayerRating(s.to_string());
        let (id, rating) = s.split_once('=').ok_or_else(invalid)?;
        let id = id.trim();
        if id.is_empty() {
            return Err(invalid());
        }
        let rating = rating.trim().parse::<f64>().map_err(|_| invalid())?;
        Ok(PlayerRating::new(id, rating))
    }
}

/// A completed game as submitted for rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInput {
    pub format: Format,
    pub team1: Vec<PlayerRating>,
    pub team2: Vec<PlayerRating>,
    pub score: Score,
}

impl GameInput {
    pub fn team(&self, side: TeamSide) -> &[PlayerRating] {
        match side {
            TeamSide::Team1 => &self.team1,
            TeamSide::Team2 => &self.team2,
        }
    }
}

/// A game that passed [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedGame(GameInput);

impl ValidatedGame {
    pub fn input(&self) -> &GameInput {
        &self.0
    }

    pub fn into_inner(self) -> GameInput {
        self.0
    }
}

/// Checks a game before it is rated.
///
/// # Errors
///
/// - [`ValidationError::Config`] if `config` itself is inconsistent
/// - [`ValidationError::TeamSize`] if a team does not match the format
/// - [`ValidationError::DuplicatePlayer`] if an id repeats across both teams
/// - [`ValidationError::NonFiniteRating`] if a rating is NaN or infinite
/// - [`ValidationError::TiedScore`] if the score is tied and the configured
///   formula does not score draws
pub fn validate(config: &RatingConfig, input: &GameInput) -> Result<ValidatedGame, ValidationError> {
    config.validate()?;

    let expected = input.format.team_size();
    for side in [TeamSide::Team1, TeamSide::Team2] {
        let actual = input.team(side).len();
        if actual != expected {
            return Err(ValidationError::TeamSize {
                side,
                format: input.format,
                expected,
                actual,
            });
        }
    }

    let mut seen = HashSet::new();
    for player in input.team1.iter().chain(input.team2.iter()) {
        if !seen.insert(&player.id) {
            return Err(ValidationError::DuplicatePlayer(player.id.clone()));
        }
        if !player.rating.is_finite() {
            return Err(ValidationError::NonFiniteRating(player.id.clone()));
        }
    }

    if input.score.is_tie() && !config.formula.allows_draws() {
        return Err(ValidationError::TiedScore(input.score));
    }

    Ok(ValidatedGame(input.clone()))
}
