//! Scheduled match representation.

use serde::{Deserialize, Serialize};

use crate::{Format, PlayerId};

/// Which bracket of an elimination event a match belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bracket {
    Winners,
    Losers,
}

/// One entrant on one side of the net: a single player or a fixed pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Side {
    Player(PlayerId),
    Team([PlayerId; 2]),
}

impl Side {
    pub fn format(&self) -> Format {
        match self {
            Side::Player(_) => Format::Singles,
            Side::Team(_) => Format::Doubles,
        }
    }

    pub fn players(&self) -> &[PlayerId] {
        match self {
            Side::Player(id) => std::slice::from_ref(id),
            Side::Team(ids) => ids,
        }
    }
}

/// The two sides of a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Sides {
    Singles {
        player1: PlayerId,
        player2: PlayerId,
    },
    Doubles {
        team1: [PlayerId; 2],
        team2: [PlayerId; 2],
    },
}

impl Sides {
    /// Builds sides from two entrants of the same format.
    ///
    /// Returns `None` when a single player is set against a pair.
    pub fn from_entrants(a: Side, b: Side) -> Option<Self> {
        match (a, b) {
            (Side::Player(player1), Side::Player(player2)) => {
                Some(Sides::Singles { player1, player2 })
            }
            (Side::Team(team1), Side::Team(team2)) => Some(Sides::Doubles { team1, team2 }),
            _ => None,
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Sides::Singles { .. } => Format::Singles,
            Sides::Doubles { .. } => Format::Doubles,
        }
    }

    /// Returns the two entrants, first side first.
    pub fn entrants(&self) -> (Side, Side) {
        match self {
            Sides::Singles { player1, player2 } => {
                (Side::Player(player1.clone()), Side::Player(player2.clone()))
            }
            Sides::Doubles { team1, team2 } => (Side::Team(team1.clone()), Side::Team(team2.clone())),
        }
    }
}

/// A generated match, tagged with the round it belongs to.
///
/// For singles round robins and elimination rounds nobody plays twice in a
/// round. Doubles partner rotation only groups matches into batches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub round: u32,
    #[serde(flatten)]
    pub sides: Sides,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bracket: Option<Bracket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_index: Option<usize>,
}

impl Match {
    pub fn new(round: u32, sides: Sides) -> Self {
        Self {
            round,
            sides,
            bracket: None,
            box_index: None,
        }
    }

    pub fn singles(round: u32, player1: PlayerId, player2: PlayerId) -> Self {
        Self::new(round, Sides::Singles { player1, player2 })
    }

    pub fn doubles(round: u32, team1: [PlayerId; 2], team2: [PlayerId; 2]) -> Self {
        Self::new(round, Sides::Doubles { team1, team2 })
    }

    #[must_use]
    pub fn in_bracket(mut self, bracket: Bracket) -> Self {
        self.bracket = Some(bracket);
        self
    }

    #[must_use]
    pub fn in_box(mut self, index: usize) -> Self {
        self.box_index = Some(index);
        self
    }

    pub fn format(&self) -> Format {
        self.sides.format()
    }

    /// All players on court, first side first.
    pub fn players(&self) -> Vec<&PlayerId> {
        match &self.sides {
            Sides::Singles { player1, player2 } => vec![player1, player2],
            Sides::Doubles { team1, team2 } => team1.iter().chain(team2.iter()).collect(),
        }
    }

    pub fn involves(&self, player: &PlayerId) -> bool {
        self.players().contains(&player)
    }

    /// Teammate pairs in this match. Empty for singles.
    pub fn partnerships(&self) -> Vec<(&PlayerId, &PlayerId)> {
        match &self.sides {
            Sides::Singles { .. } => Vec::new(),
            Sides::Doubles { team1, team2 } => vec![(&team1[0], &team1[1]), (&team2[0], &team2[1])],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: [&str; 2]) -> [PlayerId; 2] {
        names.map(PlayerId::from)
    }

    #[test]
    fn singles_players() {
        let m = Match::singles(1, "a".into(), "b".into());
        assert_eq!(m.format(), Format::Singles);
        assert_eq!(m.players().len(), 2);
        assert!(m.involves(&"a".into()));
        assert!(!m.involves(&"c".into()));
        assert!(m.partnerships().is_empty());
    }

    #[test]
    fn doubles_players_and_partnerships() {
        let m = Match::doubles(2, ids(["a", "b"]), ids(["c", "d"]));
        assert_eq!(m.format(), Format::Doubles);
        assert_eq!(m.players().len(), 4);
        let pairs = m.partnerships();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], (&PlayerId::from("c"), &PlayerId::from("d")));
    }

    #[test]
    fn sides_from_entrants() {
        let singles = Sides::from_entrants(Side::Player("a".into()), Side::Player("b".into()));
        assert!(matches!(singles, Some(Sides::Singles { .. })));

        let doubles = Sides::from_entrants(Side::Team(ids(["a", "b"])), Side::Team(ids(["c", "d"])));
        assert_eq!(doubles.as_ref().map(Sides::format), Some(Format::Doubles));

        let mixed = Sides::from_entrants(Side::Player("a".into()), Side::Team(ids(["c", "d"])));
        assert!(mixed.is_none());
    }

    #[test]
    fn entrants_roundtrip() {
        let sides = Sides::Doubles {
            team1: ids(["a", "b"]),
            team2: ids(["c", "d"]),
        };
        let (a, b) = sides.entrants();
        assert_eq!(a.players().len(), 2);
        assert_eq!(Sides::from_entrants(a, b), Some(sides));
    }

    #[test]
    fn builders_tag_bracket_and_box() {
        let m = Match::singles(1, "a".into(), "b".into())
            .in_bracket(Bracket::Winners)
            .in_box(3);
        assert_eq!(m.bracket, Some(Bracket::Winners));
        assert_eq!(m.box_index, Some(3));
    }

    #[test]
    fn json_shape() {
        let m = Match::singles(1, "a".into(), "b".into()).in_bracket(Bracket::Winners);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["round"], 1);
        assert_eq!(json["format"], "singles");
        assert_eq!(json["player1"], "a");
        assert_eq!(json["bracket"], "winners");
        assert!(json.get("box_index").is_none());

        let parsed: Match = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, m);
    }
}
