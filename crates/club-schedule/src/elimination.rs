//! Elimination brackets.
//!
//! The first round is seeded by shuffling the field and pairing neighbours.
//! Later rounds are paired on demand from whoever advanced, as results come
//! in.

use club_core::{Bracket, Format, Match, PlayerId, Side, Sides};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::request::check_players;
use crate::ScheduleError;

/// Matches for one bracket round, plus the entrant who sits it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPairing {
    pub matches: Vec<Match>,
    /// Advances without playing when the field is odd.
    pub bye: Option<Side>,
}

/// A single or double elimination event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationBracket {
    pub format: Format,
    pub double_elimination: bool,
}

impl EliminationBracket {
    pub fn new(format: Format, double_elimination: bool) -> Self {
        Self {
            format,
            double_elimination,
        }
    }

    /// Shuffles the field and pairs neighbours into round one.
    ///
    /// In doubles, neighbours first form fixed teams, then neighbouring
    /// teams meet.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] if the list is empty, has duplicates, or
    /// does not divide into whole matches.
    pub fn first_round<R: Rng + ?Sized>(
        &self,
        players: &[PlayerId],
        rng: &mut R,
    ) -> Result<Vec<Match>, ScheduleError> {
        let per_match = self.format.players_per_match();
        check_players(players, per_match, per_match)?;

        let mut field = players.to_vec();
        field.shuffle(rng);

        let entrants: Vec<Side> = match self.format {
            Format::Singles => field.into_iter().map(Side::Player).collect(),
            Format::Doubles => field
                .chunks_exact(2)
                .map(|pair| Side::Team([pair[0].clone(), pair[1].clone()]))
                .collect(),
        };

        let pairing = pair_entrants(entrants, 1, Bracket::Winners)?;
        debug!(
            format = %self.format,
            matches = pairing.matches.len(),
            double = self.double_elimination,
            "seeded elimination bracket"
        );
        Ok(pairing.matches)
    }

    /// Pairs the winners of the previous round, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::MixedEntrants`] if single players and teams
    /// are mixed.
    pub fn next_round(&self, winners: Vec<Side>, round: u32) -> Result<RoundPairing, ScheduleError> {
        pair_entrants(winners, round, Bracket::Winners)
    }

    /// Pairs entrants in the losers' bracket of a double elimination.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::NoLosersBracket`] for single elimination, or
    /// [`ScheduleError::MixedEntrants`] if single players and teams are
    /// mixed.
    pub fn losers_round(&self, losers: Vec<Side>, round: u32) -> Result<RoundPairing, ScheduleError> {
        if !self.double_elimination {
            return Err(ScheduleError::NoLosersBracket);
        }
        pair_entrants(losers, round, Bracket::Losers)
    }
}

/// Generates the first round of an elimination event.
///
/// # Errors
///
/// See [`EliminationBracket::first_round`].
pub fn generate_elimination_matches<R: Rng + ?Sized>(
    players: &[PlayerId],
    format: Format,
    double_elimination: bool,
    rng: &mut R,
) -> Result<Vec<Match>, ScheduleError> {
    EliminationBracket::new(format, double_elimination).first_round(players, rng)
}

fn pair_entrants(
    entrants: Vec<Side>,
    round: u32,
    bracket: Bracket,
) -> Result<RoundPairing, ScheduleError> {
    let mut entrants = entrants.into_iter();
    let mut matches = Vec::new();
    let mut bye = None;

    while let Some(first) = entrants.next() {
        match entrants.next() {
            Some(second) => {
                let sides = Sides::from_entrants(first, second).ok_or(ScheduleError::MixedEntrants)?;
                matches.push(Match::new(round, sides).in_bracket(bracket));
            }
            None => bye = Some(first),
        }
    }

    Ok(RoundPairing { matches, bye })
}
