//! Generator input and dispatch.

use std::collections::HashSet;
use std::fmt;

use club_core::{Format, Match, PlayerId};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::box_league::{BoxLeague, BOX_SIZE};
use crate::elimination::generate_elimination_matches;
use crate::round_robin::generate_round_robin_matches;
use crate::ScheduleError;

/// The kind of event to schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleKind {
    RoundRobin,
    SingleElimination,
    DoubleElimination,
    BoxLeague,
}

impl ScheduleKind {
    pub const fn name(self) -> &'static str {
        match self {
            ScheduleKind::RoundRobin => "round-robin",
            ScheduleKind::SingleElimination => "single-elimination",
            ScheduleKind::DoubleElimination => "double-elimination",
            ScheduleKind::BoxLeague => "box-league",
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A league or tournament to generate matches for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub player_ids: Vec<PlayerId>,
    pub format: Format,
    pub kind: ScheduleKind,
    /// Players per box. Only read for box leagues.
    #[serde(default = "default_box_size")]
    pub box_size: usize,
}

fn default_box_size() -> usize {
    BOX_SIZE
}

impl ScheduleRequest {
    pub fn new(player_ids: Vec<PlayerId>, format: Format, kind: ScheduleKind) -> Self {
        Self {
            player_ids,
            format,
            kind,
            box_size: BOX_SIZE,
        }
    }

    #[must_use]
    pub fn with_box_size(mut self, box_size: usize) -> Self {
        self.box_size = box_size;
        self
    }
}

/// Generates every match the request calls for.
///
/// Box leagues are seeded in the given player order, so pass players
/// strongest first.
///
/// # Errors
///
/// Returns a [`ScheduleError`] if the player list is empty, has
/// duplicates, or does not fit the requested event.
pub fn generate_matches<R: Rng + ?Sized>(
    request: &ScheduleRequest,
    rng: &mut R,
) -> Result<Vec<Match>, ScheduleError> {
    match request.kind {
        ScheduleKind::RoundRobin => {
            generate_round_robin_matches(&request.player_ids, request.format, rng)
        }
        ScheduleKind::SingleElimination => {
            generate_elimination_matches(&request.player_ids, request.format, false, rng)
        }
        ScheduleKind::DoubleElimination => {
            generate_elimination_matches(&request.player_ids, request.format, true, rng)
        }
        ScheduleKind::BoxLeague => {
            if request.format != Format::Doubles {
                return Err(ScheduleError::UnsupportedFormat {
                    kind: ScheduleKind::BoxLeague.name(),
                    format: request.format,
                });
            }
            Ok(BoxLeague::seed(&request.player_ids, request.box_size)?.schedule(rng))
        }
    }
}

/// Checks that `players` is non-empty, unique, at least `minimum` long, and
/// splits evenly into groups of `group_size`.
pub(crate) fn check_players(
    players: &[PlayerId],
    group_size: usize,
    minimum: usize,
) -> Result<(), ScheduleError> {
    if players.is_empty() {
        return Err(ScheduleError::EmptyPlayerList);
    }

    let mut seen = HashSet::with_capacity(players.len());
    for id in players {
        if !seen.insert(id) {
            return Err(ScheduleError::DuplicatePlayer(id.clone()));
        }
    }

    if players.len() < minimum {
        return Err(ScheduleError::TooFewPlayers {
            count: players.len(),
            minimum,
        });
    }
    if players.len() % group_size != 0 {
        return Err(ScheduleError::UnevenPlayerCount {
            count: players.len(),
            group_size,
        });
    }
    Ok(())
}
