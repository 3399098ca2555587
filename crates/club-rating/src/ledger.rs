//! Applying rating updates to player records.
//!
//! [`record_game`] is the whole game-logging step minus persistence: load the
//! current ratings, rate the game, update every player, and hand back the
//! immutable [`GameRecord`] for the caller to store.

use std::collections::HashMap;

use club_core::{Format, GameRecord, PlayerId, PlayerRecord, RatingSnapshot, Score, TeamSide};
use thiserror::Error;
use tracing::info;

use crate::input::{validate, GameInput, PlayerRating, ValidationError};
use crate::{RatingConfig, RatingEngine};

/// Errors that can occur when recording a game.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// A player in the game has no record.
    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// The game itself is malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Rates a game and applies the result to `players`.
///
/// Records are only touched after the update has been computed, so on
/// error no player changes.
///
/// # Errors
///
/// Returns [`LedgerError::UnknownPlayer`] if an id has no record in
/// `players`, or [`LedgerError::Validation`] if the configuration or the
/// game is malformed.
pub fn record_game(
    config: &RatingConfig,
    players: &mut HashMap<PlayerId, PlayerRecord>,
    format: Format,
    team1: &[PlayerId],
    team2: &[PlayerId],
    score: Score,
) -> Result<GameRecord, LedgerError> {
    let lookup = |ids: &[PlayerId]| -> Result<Vec<PlayerRating>, LedgerError> {
        ids.iter()
            .map(|id| {
                players
                    .get(id)
                    .map(|record| PlayerRating::new(id.clone(), record.rating))
                    .ok_or_else(|| LedgerError::UnknownPlayer(id.clone()))
            })
            .collect()
    };

    let input = GameInput {
        format,
        team1: lookup(team1)?,
        team2: lookup(team2)?,
        score,
    };
    let engine = RatingEngine::new(config.clone()).map_err(ValidationError::from)?;
    let game = validate(config, &input)?;
    let update = engine.compute(&game);

    let mut snapshots = Vec::with_capacity(update.players.len());
    for delta in &update.players {
        if let Some(record) = players.get_mut(&delta.player_id) {
            record.apply(delta.after, delta.outcome, delta.points_for, delta.points_against);
        }
        snapshots.push(RatingSnapshot {
            player_id: delta.player_id.clone(),
            before: delta.before,
            after: delta.after,
        });
    }

    info!(%format, %score, players = snapshots.len(), "recorded game");

    Ok(GameRecord::new(
        format,
        input.team(TeamSide::Team1).iter().map(|p| p.id.clone()).collect(),
        input.team(TeamSide::Team2).iter().map(|p| p.id.clone()).collect(),
        score,
        snapshots,
    ))
}
