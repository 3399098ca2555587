//! Final scores and the sides they belong to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing core values from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid score '{0}': expected '<team1>-<team2>', e.g. '11-7'")]
    InvalidScore(String),

    #[error("invalid format '{0}': expected 'singles' or 'doubles'")]
    InvalidFormat(String),

    #[error("invalid player rating '{0}': expected '<id>=<rating>'")]
    InvalidPlayerRating(String),
}

/// One of the two teams in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl TeamSide {
    /// Returns the other team.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            TeamSide::Team1 => TeamSide::Team2,
            TeamSide::Team2 => TeamSide::Team1,
        }
    }
}

/// Final score of a game, team 1 first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub team1: u32,
    pub team2: u32,
}

impl Score {
    pub const fn new(team1: u32, team2: u32) -> Self {
        Self { team1, team2 }
    }

    #[inline]
    pub const fn is_tie(self) -> bool {
        self.team1 == self.team2
    }

    /// Returns the winning side, or `None` for a tie.
    pub const fn winner(self) -> Option<TeamSide> {
        if self.team1 > self.team2 {
            Some(TeamSide::Team1)
        } else if self.team2 > self.team1 {
            Some(TeamSide::Team2)
        } else {
            None
        }
    }

    /// Absolute point difference between the teams.
    #[inline]
    pub const fn margin(self) -> u32 {
        self.team1.abs_diff(self.team2)
    }

    /// Points scored by `side`.
    #[inline]
    pub const fn points_for(self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Team1 => self.team1,
            TeamSide::Team2 => self.team2,
        }
    }

    /// Points conceded by `side`.
    #[inline]
    pub const fn points_against(self, side: TeamSide) -> u32 {
        self.points_for(side.opposite())
    }

    /// The same game seen from the other side.
    pub const fn swapped(self) -> Self {
        Self::new(self.team2, self.team1)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team1, self.team2)
    }
}

impl FromStr for Score {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidScore(s.to_string());
        let (left, right) = s.trim().split_once('-').ok_or_else(invalid)?;
        let team1 = left.trim().parse::<u32>().map_err(|_| invalid())?;
        let team2 = right.trim().parse::<u32>().map_err(|_| invalid())?;
        Ok(Score::new(team1, team2))
    }
}
