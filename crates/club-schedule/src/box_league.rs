//! Box leagues.
//!
//! Players are seeded strongest first into fixed-size boxes. Inside a box
//! everyone rotates partners, and at the end of a cycle the top finishers
//! move up a box while the bottom finishers move down.

use std::cmp::Ordering;
use std::collections::HashMap;

use club_core::{Match, PlayerId, PlayerRecord, Score, TeamSide};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::request::check_players;
use crate::rotation::partner_rotation;
use crate::ScheduleError;

/// Players per box. The in-box rotation only gives every pair one
/// partnership and everyone the same number of games with four players.
pub const BOX_SIZE: usize = 4;

/// A match with its final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMatch {
    pub played: Match,
    pub score: Score,
}

/// One player's line in a box table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points_for: u32,
    pub points_against: u32,
}

impl Standing {
    fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            points_for: 0,
            points_against: 0,
        }
    }

    pub fn point_difference(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }

    /// Table order: wins, then point difference, then points scored, then id.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .wins
            .cmp(&self.wins)
            .then_with(|| other.point_difference().cmp(&self.point_difference()))
            .then_with(|| other.points_for.cmp(&self.points_for))
            .then_with(|| self.player_id.cmp(&other.player_id))
    }
}

/// Builds the table for `players` from played matches.
///
/// Matches are counted for whichever listed players took part, so results
/// from other boxes can be passed in and are ignored.
pub fn standings(players: &[PlayerId], results: &[PlayedMatch]) -> Vec<Standing> {
    let mut table: HashMap<&PlayerId, Standing> = players
        .iter()
        .map(|id| (id, Standing::new(id.clone())))
        .collect();

    for result in results {
        let (first, second) = result.played.sides.entrants();
        for (side, entrant) in [(TeamSide::Team1, first), (TeamSide::Team2, second)] {
            for id in entrant.players() {
                let Some(line) = table.get_mut(id) else {
                    continue;
                };
                line.played += 1;
                line.points_for += result.score.points_for(side);
                line.points_against += result.score.points_against(side);
                match result.score.winner() {
                    Some(winner) if winner == side => line.wins += 1,
                    Some(_) => line.losses += 1,
                    None => line.draws += 1,
                }
            }
        }
    }

    let mut lines: Vec<Standing> = table.into_values().collect();
    lines.sort_by(Standing::rank);
    lines
}

/// Players split into boxes, strongest box first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxLeague {
    box_size: usize,
    boxes: Vec<Vec<PlayerId>>,
}

impl BoxLeague {
    /// Splits players, already ordered strongest first, into boxes.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] if the box size is not four, or the
    /// list is empty, has duplicates, or does not fill whole boxes.
    pub fn seed(players: &[PlayerId], box_size: usize) -> Result<Self, ScheduleError> {
        if box_size != BOX_SIZE {
            return Err(ScheduleError::InvalidBoxSize(box_size));
        }
        check_players(players, box_size, box_size)?;

        let boxes = players.chunks(box_size).map(<[PlayerId]>::to_vec).collect();
        Ok(Self { box_size, boxes })
    }

    /// Seeds boxes by rating, highest first.
    ///
    /// # Errors
    ///
    /// See [`BoxLeague::seed`].
    pub fn seed_by_rating(players: &[PlayerRecord], box_size: usize) -> Result<Self, ScheduleError> {
        let mut ranked: Vec<&PlayerRecord> = players.iter().collect();
        ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating).then_with(|| a.id.cmp(&b.id)));
        let ids: Vec<PlayerId> = ranked.into_iter().map(|p| p.id.clone()).collect();
        Self::seed(&ids, box_size)
    }

    pub fn box_size(&self) -> usize {
        self.box_size
    }

    pub fn boxes(&self) -> &[Vec<PlayerId>] {
        &self.boxes
    }

    /// Index of the box `player` is in.
    pub fn box_of(&self, player: &PlayerId) -> Option<usize> {
        self.boxes.iter().position(|b| b.contains(player))
    }

    /// Partner rotation inside every box, tagged with the box index.
    ///
    /// Rounds line up across boxes: round `r` in box 0 is played alongside
    /// round `r` in every other box.
    pub fn schedule<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Match> {
        let mut matches = Vec::new();
        for (index, players) in self.boxes.iter().enumerate() {
            matches.extend(
                partner_rotation(players, rng)
                    .into_iter()
                    .map(|m| m.in_box(index)),
            );
        }
        matches.sort_by_key(|m| (m.round, m.box_index));
        debug!(boxes = self.boxes.len(), matches = matches.len(), "scheduled box league");
        matches
    }

    /// Table for one box.
    pub fn box_standings(&self, index: usize, results: &[PlayedMatch]) -> Option<Vec<Standing>> {
        self.boxes.get(index).map(|players| standings(players, results))
    }

    /// Builds next cycle's boxes from this cycle's tables.
    ///
    /// The top `movers` of each box move up one box and the bottom `movers`
    /// move down one. The top box promotes nobody and the bottom box
    /// relegates nobody.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidMovers`] if `movers` is more than half
    /// a box, [`ScheduleError::StandingsCount`] if there is not one table
    /// per box, or [`ScheduleError::StandingsMismatch`] if a table does not
    /// list exactly that box's players.
    pub fn promote_and_relegate(
        &self,
        tables: &[Vec<Standing>],
        movers: usize,
    ) -> Result<BoxLeague, ScheduleError> {
        if movers > self.box_size / 2 {
            return Err(ScheduleError::InvalidMovers {
                movers,
                box_size: self.box_size,
            });
        }
        if tables.len() != self.boxes.len() {
            return Err(ScheduleError::StandingsCount {
                expected: self.boxes.len(),
                actual: tables.len(),
            });
        }

        let mut ranked: Vec<Vec<PlayerId>> = Vec::with_capacity(tables.len());
        for (index, (players, table)) in self.boxes.iter().zip(tables).enumerate() {
            let mut order: Vec<&Standing> = table.iter().collect();
            order.sort_by(|a, b| a.rank(b));
            let ids: Vec<PlayerId> = order.into_iter().map(|s| s.player_id.clone()).collect();

            let mut expected = players.clone();
            let mut actual = ids.clone();
            expected.sort();
            actual.sort();
            if expected != actual {
                return Err(ScheduleError::StandingsMismatch(index));
            }
            ranked.push(ids);
        }

        let size = self.box_size;
        let mut next = ranked.clone();
        for upper in 0..ranked.len().saturating_sub(1) {
            let lower = upper + 1;
            let relegated = &ranked[upper][size - movers..];
            let promoted = &ranked[lower][..movers];
            next[upper][size - movers..].clone_from_slice(promoted);
            next[lower][..movers].clone_from_slice(relegated);
        }

        Ok(BoxLeague {
            box_size: size,
            boxes: next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn players(n: usize) -> Vec<PlayerId> {
        (1..=n).map(|i| PlayerId::new(format!("p{:02}", i))).collect()
    }

    fn names(league: &BoxLeague, index: usize) -> Vec<&str> {
        league.boxes()[index].iter().map(PlayerId::as_str).collect()
    }

    fn doubles(a: &str, b: &str, c: &str, d: &str) -> Match {
        Match::doubles(1, [a.into(), b.into()], [c.into(), d.into()])
    }

    #[test]
    fn seeds_in_order() {
        let league = BoxLeague::seed(&players(8), 4).unwrap();
        assert_eq!(league.boxes().len(), 2);
        assert_eq!(league.boxes()[0], players(8)[..4].to_vec());
        assert_eq!(league.box_of(&"p06".into()), Some(1));
        assert_eq!(league.box_of(&"p99".into()), None);
    }

    #[test]
    fn seed_rejects_bad_input() {
        for size in [3, 5, 6, 8] {
            assert_eq!(
                BoxLeague::seed(&players(24), size),
                Err(ScheduleError::InvalidBoxSize(size))
            );
        }
        assert_eq!(
            BoxLeague::seed(&players(6), 4),
            Err(ScheduleError::UnevenPlayerCount {
                count: 6,
                group_size: 4
            })
        );
        assert_eq!(BoxLeague::seed(&[], 4), Err(ScheduleError::EmptyPlayerList));
    }

    #[test]
    fn seed_by_rating_puts_strongest_first() {
        let records: Vec<PlayerRecord> = [("a", 3.0), ("b", 5.0), ("c", 4.0), ("d", 4.5)]
            .iter()
            .map(|(id, rating)| PlayerRecord::new(*id, *rating))
            .collect();
        let league = BoxLeague::seed_by_rating(&records, 4).unwrap();
        let order: Vec<&str> = league.boxes()[0].iter().map(PlayerId::as_str).collect();
        assert_eq!(order, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn schedule_rotates_within_boxes() {
        let league = BoxLeague::seed(&players(12), 4).unwrap();
        let matches = league.schedule(&mut StdRng::seed_from_u64(11));

        assert_eq!(matches.len(), 9);
        for m in &matches {
            let index = m.box_index.unwrap();
            assert!(m.players().iter().all(|p| league.box_of(p) == Some(index)));
        }
        for round in 1..=3 {
            assert_eq!(matches.iter().filter(|m| m.round == round).count(), 3);
        }
    }

    #[test]
    fn standings_order() {
        let box_players: Vec<PlayerId> = ["a", "b", "c", "d"].into_iter().map(PlayerId::from).collect();
        let results = vec![
            PlayedMatch {
                played: doubles("a", "b", "c", "d"),
                score: Score::new(11, 4),
            },
            PlayedMatch {
                played: doubles("a", "c", "b", "d"),
                score: Score::new(11, 9),
            },
            PlayedMatch {
                played: doubles("a", "d", "b", "c"),
                score: Score::new(8, 11),
            },
            // Another box, ignored
            PlayedMatch {
                played: doubles("e", "f", "g", "h"),
                score: Score::new(11, 0),
            },
        ];

        let table = standings(&box_players, &results);
        let order: Vec<&str> = table.iter().map(|s| s.player_id.as_str()).collect();
        // b: 2 wins, +8; a: 2 wins, +6; c: 2 wins, -2; d: no wins
        assert_eq!(order, vec!["b", "a", "c", "d"]);
        assert!(table.iter().all(|s| s.played == 3));
        assert_eq!(table[0].point_difference(), 8);
    }

    #[test]
    fn draws_are_counted() {
        let box_players: Vec<PlayerId> = ["a", "b", "c", "d"].into_iter().map(PlayerId::from).collect();
        let results = vec![PlayedMatch {
            played: doubles("a", "b", "c", "d"),
            score: Score::new(10, 10),
        }];
        let table = standings(&box_players, &results);
        assert!(table.iter().all(|s| s.draws == 1 && s.wins == 0));
    }

    #[test]
    fn promotion_and_relegation_swap_boundaries() {
        let league = BoxLeague::seed(&players(12), 4).unwrap();
        // Everyone finishes in seeded order
        let tables: Vec<Vec<Standing>> = league
            .boxes()
            .iter()
            .map(|b| {
                b.iter()
                    .enumerate()
                    .map(|(i, id)| Standing {
                        wins: 3 - i as u32,
                        ..Standing::new(id.clone())
                    })
                    .collect()
            })
            .collect();

        let next = league.promote_and_relegate(&tables, 1).unwrap();

        assert_eq!(names(&next, 0), vec!["p01", "p02", "p03", "p05"]);
        assert_eq!(names(&next, 1), vec!["p04", "p06", "p07", "p09"]);
        assert_eq!(names(&next, 2), vec!["p08", "p10", "p11", "p12"]);
    }

    #[test]
    fn promotion_rejects_bad_tables() {
        let league = BoxLeague::seed(&players(8), 4).unwrap();
        let tables: Vec<Vec<Standing>> = league
            .boxes()
            .iter()
            .map(|b| b.iter().cloned().map(Standing::new).collect())
            .collect();

        assert_eq!(
            league.promote_and_relegate(&tables, 3),
            Err(ScheduleError::InvalidMovers {
                movers: 3,
                box_size: 4
            })
        );
        assert_eq!(
            league.promote_and_relegate(&tables[..1], 1),
            Err(ScheduleError::StandingsCount {
                expected: 2,
                actual: 1
            })
        );

        let mut swapped = tables.clone();
        swapped[1][0] = Standing::new("stranger".into());
        assert_eq!(
            league.promote_and_relegate(&swapped, 1),
            Err(ScheduleError::StandingsMismatch(1))
        );

        assert!(league.promote_and_relegate(&tables, 0).is_ok());
    }
}
