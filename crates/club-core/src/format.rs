//! Game format representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Whether a game is played one-on-one or two-on-two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Singles,
    Doubles,
}

impl Format {
    /// Returns the number of players on each team.
    #[inline]
    pub const fn team_size(self) -> usize {
        match self {
            Format::Singles => 1,
            Format::Doubles => 2,
        }
    }

    /// Returns the number of players on court for one match.
    #[inline]
    pub const fn players_per_match(self) -> usize {
        self.team_size() * 2
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Singles => write!(f, "singles"),
            Format::Doubles => write!(f, "doubles"),
        }
    }
}

impl FromStr for Format {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "singles" => Ok(Format::Singles),
            "doubles" => Ok(Format::Doubles),
            other => Err(CoreError::InvalidFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_sizes() {
        assert_eq!(Format::Singles.team_size(), 1);
        assert_eq!(Format::Doubles.team_size(), 2);
        assert_eq!(Format::Doubles.players_per_match(), 4);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("Singles".parse::<Format>(), Ok(Format::Singles));
        assert_eq!(" doubles ".parse::<Format>(), Ok(Format::Doubles));
        assert_eq!(format!("{}", Format::Doubles), "doubles");
        assert!(matches!(
            "triples".parse::<Format>(),
            Err(CoreError::InvalidFormat(s)) if s == "triples"
        ));
    }
}
