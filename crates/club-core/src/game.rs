//! Immutable record of a rated game.

use serde::{Deserialize, Serialize};

use crate::{Format, PlayerId, Score, TeamSide};

/// A player's rating immediately before and after a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSnapshot {
    pub player_id: PlayerId,
    pub before: f64,
    pub after: f64,
}

impl RatingSnapshot {
    pub fn change(&self) -> f64 {
        self.after - self.before
    }
}

/// A completed, rated game.
///
/// Game records are append-only history: fields are private and there are
/// no setters. A record is the only trigger for a rating change, so the
/// snapshots it carries are exactly what was applied to the players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    format: Format,
    team1: Vec<PlayerId>,
    team2: Vec<PlayerId>,
    score: Score,
    snapshots: Vec<RatingSnapshot>,
}

impl GameRecord {
    pub fn new(
        format: Format,
        team1: Vec<PlayerId>,
        team2: Vec<PlayerId>,
        score: Score,
        snapshots: Vec<RatingSnapshot>,
    ) -> Self {
        Self {
            format,
            team1,
            team2,
            score,
            snapshots,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn team(&self, side: TeamSide) -> &[PlayerId] {
        match side {
            TeamSide::Team1 => &self.team1,
            TeamSide::Team2 => &self.team2,
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn snapshots(&self) -> &[RatingSnapshot] {
        &self.snapshots
    }

    /// Looks up the snapshot for one player.
    pub fn snapshot(&self, player: &PlayerId) -> Option<&RatingSnapshot> {
        self.snapshots.iter().find(|s| &s.player_id == player)
    }

    /// Returns which side `player` was on, if they played.
    pub fn side_of(&self, player: &PlayerId) -> Option<TeamSide> {
        if self.team1.contains(player) {
            Some(TeamSide::Team1)
        } else if self.team2.contains(player) {
            Some(TeamSide::Team2)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GameRecord {
        GameRecord::new(
            Format::Singles,
            vec!["alice".into()],
            vec!["bob".into()],
            Score::new(11, 5),
            vec![
                RatingSnapshot {
                    player_id: "alice".into(),
                    before: 4.0,
                    after: 4.1,
                },
                RatingSnapshot {
                    player_id: "bob".into(),
                    before: 4.0,
                    after: 3.9,
                },
            ],
        )
    }

    #[test]
    fn lookup_by_player() {
        let game = sample();
        let alice = PlayerId::from("alice");
        let bob = PlayerId::from("bob");

        assert_eq!(game.side_of(&alice), Some(TeamSide::Team1));
        assert_eq!(game.side_of(&bob), Some(TeamSide::Team2));
        assert_eq!(game.side_of(&PlayerId::from("carol")), None);
        assert!((game.snapshot(&alice).unwrap().change() - 0.1).abs() < 1e-9);
        assert_eq!(game.team(TeamSide::Team2), &[bob]);
    }

    #[test]
    fn json_roundtrip_keeps_snapshots() {
        let game = sample();
        let json = serde_json::to_string(&game).unwrap();
        let parsed: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, game);
    }
}
