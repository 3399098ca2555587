//! Schedule generation errors.

use club_core::{Format, PlayerId};
use thiserror::Error;

/// Errors that can occur when generating a schedule.
///
/// Inputs are never silently trimmed: a player list that does not fit the
/// requested event is rejected with one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("no players given")]
    EmptyPlayerList,

    #[error("player '{0}' is listed more than once")]
    DuplicatePlayer(PlayerId),

    #[error("{count} players cannot be split into groups of {group_size}")]
    UnevenPlayerCount { count: usize, group_size: usize },

    #[error("{count} players is too few, at least {minimum} are needed")]
    TooFewPlayers { count: usize, minimum: usize },

    #[error("box size must be 4, got {0}")]
    InvalidBoxSize(usize),

    #[error("{kind} requires doubles, got {format}")]
    UnsupportedFormat { kind: &'static str, format: Format },

    #[error("cannot move {movers} player(s) per boundary with boxes of {box_size}")]
    InvalidMovers { movers: usize, box_size: usize },

    #[error("standings for box {0} do not match its players")]
    StandingsMismatch(usize),

    #[error("expected standings for {expected} boxes, got {actual}")]
    StandingsCount { expected: usize, actual: usize },

    #[error("entrants mix single players and teams")]
    MixedEntrants,

    #[error("single elimination has no losers' bracket")]
    NoLosersBracket,
}
