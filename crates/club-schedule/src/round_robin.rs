//! Round robin scheduling.
//!
//! Singles use the circle method: one player stays fixed while the rest
//! rotate, which yields a 1-factorization where every pair meets exactly
//! once and nobody plays twice in a round. Odd fields get a bye slot.
//! Doubles hand off to [`partner_rotation`].

use club_core::{Format, Match, PlayerId};
use rand::Rng;
use tracing::debug;

use crate::request::check_players;
use crate::rotation::partner_rotation;
use crate::ScheduleError;

/// Generates a full round robin for `players`.
///
/// # Errors
///
/// Returns a [`ScheduleError`] if the list is empty, has duplicates, has
/// fewer than two teams, or (for doubles) an odd player count.
pub fn generate_round_robin_matches<R: Rng + ?Sized>(
    players: &[PlayerId],
    format: Format,
    rng: &mut R,
) -> Result<Vec<Match>, ScheduleError> {
    check_players(players, format.team_size(), format.players_per_match())?;
    Ok(match format {
        Format::Singles => singles_round_robin(players),
        Format::Doubles => partner_rotation(players, rng),
    })
}

/// Every pair of players meets once, spread over rounds with no player
/// appearing twice in the same round.
///
/// `n` players give `n - 1` rounds when `n` is even and `n` rounds when odd.
pub fn singles_round_robin(players: &[PlayerId]) -> Vec<Match> {
    let mut ring: Vec<Option<&PlayerId>> = players.iter().map(Some).collect();
    if ring.len() % 2 == 1 {
        ring.push(None);
    }
    let n = ring.len();
    if n < 2 {
        return Vec::new();
    }

    let rounds = n - 1;
    let mut matches = Vec::with_capacity(players.len() * players.len().saturating_sub(1) / 2);
    for round in 1..=rounds {
        for i in 0..n / 2 {
            if let (Some(a), Some(b)) = (ring[i], ring[n - 1 - i]) {
                matches.push(Match::singles(round as u32, a.clone(), b.clone()));
            }
        }
        // Keep the first slot fixed, rotate the rest
        ring[1..].rotate_right(1);
    }

    debug!(players = players.len(), rounds, matches = matches.len(), "generated round robin");
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn players(n: usize) -> Vec<PlayerId> {
        (1..=n).map(|i| PlayerId::new(format!("p{}", i))).collect()
    }

    fn pair_key(m: &Match) -> (PlayerId, PlayerId) {
        let ids = m.players();
        let (a, b) = (ids[0].clone(), ids[1].clone());
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn assert_valid_round_robin(n: usize) {
        let field = players(n);
        let matches = singles_round_robin(&field);

        // Every pair exactly once
        assert_eq!(matches.len(), n * (n - 1) / 2);
        let pairs: HashSet<_> = matches.iter().map(pair_key).collect();
        assert_eq!(pairs.len(), matches.len());

        // Nobody twice in a round
        let mut by_round: HashMap<u32, HashSet<PlayerId>> = HashMap::new();
        for m in &matches {
            let seen = by_round.entry(m.round).or_default();
            for p in m.players() {
                assert!(seen.insert(p.clone()), "{} twice in round {}", p, m.round);
            }
        }

        let expected_rounds = if n % 2 == 0 { n - 1 } else { n };
        assert_eq!(by_round.len(), expected_rounds);
        assert!(matches.iter().all(|m| m.round >= 1 && m.round as usize <= expected_rounds));
    }

    #[test]
    fn even_field() {
        assert_valid_round_robin(2);
        assert_valid_round_robin(4);
        assert_valid_round_robin(8);
    }

    #[test]
    fn odd_field_gets_byes() {
        assert_valid_round_robin(3);
        assert_valid_round_robin(5);
        assert_valid_round_robin(9);
    }

    #[test]
    fn rounds_are_non_decreasing() {
        let matches = singles_round_robin(&players(6));
        assert!(matches.windows(2).all(|w| w[0].round <= w[1].round));
    }

    #[test]
    fn single_player_gives_nothing() {
        assert!(singles_round_robin(&players(1)).is_empty());
    }

    #[test]
    fn validation_runs_first() {
        let mut rng = rand::thread_rng();
        assert_eq!(
            generate_round_robin_matches(&[], Format::Singles, &mut rng),
            Err(ScheduleError::EmptyPlayerList)
        );
        assert_eq!(
            generate_round_robin_matches(&players(5), Format::Doubles, &mut rng),
            Err(ScheduleError::UnevenPlayerCount {
                count: 5,
                group_size: 2
            })
        );
        assert_eq!(
            generate_round_robin_matches(&players(2), Format::Doubles, &mut rng),
            Err(ScheduleError::TooFewPlayers { count: 2, minimum: 4 })
        );
    }
}
