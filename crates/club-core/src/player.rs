//! Player identity and running record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque player identifier, as issued by the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Result of a game from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Actual score used by expectation-based rating: 1, 0 or one half.
    #[inline]
    pub const fn actual_score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
            Outcome::Draw => 0.5,
        }
    }
}

/// A rated player with cumulative results.
///
/// Counters only ever grow. The record changes through [`PlayerRecord::apply`],
/// which is fed by the rating engine's output for a completed game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub rating: f64,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub draws: u32,
    #[serde(default)]
    pub points_for: u32,
    #[serde(default)]
    pub points_against: u32,
}

impl PlayerRecord {
    /// Creates a player with no games played.
    pub fn new(id: impl Into<PlayerId>, rating: f64) -> Self {
        Self {
            id: id.into(),
            rating,
            wins: 0,
            losses: 0,
            draws: 0,
            points_for: 0,
            points_against: 0,
        }
    }

    /// Total games played.
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Records one completed game.
    pub fn apply(&mut self, new_rating: f64, outcome: Outcome, points_for: u32, points_against: u32) {
        self.rating = new_rating;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
        self.points_for = self.points_for.saturating_add(points_for);
        self.points_against = self.points_against.saturating_add(points_against);
    }
}
