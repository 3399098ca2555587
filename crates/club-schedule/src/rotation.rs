//! Doubles partner rotation.
//!
//! Greedy, needs-based packing of partnerships into matches. This is a
//! best-effort heuristic, not an exact combinatorial design: for some field
//! sizes a few partnerships are left over and get no match.

use club_core::{Match, PlayerId};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Generates doubles matches in which players rotate partners.
///
/// All `n(n-1)/2` partnerships are shuffled. Walking that order, each
/// partnership still open is matched against the disjoint open partnership
/// whose four players have the most games left to play; the earliest one
/// wins a tie. No player plays more than `n - 1` games. Matches are grouped
/// into rounds of `n / 4` (at least one).
///
/// A round here is a batch of matches in generation order, not a time slot:
/// the same player can appear in more than one match of a round, so callers
/// that need simultaneous courts must reschedule within the batch.
///
/// Fewer than four players yields no matches.
pub fn partner_rotation<R: Rng + ?Sized>(players: &[PlayerId], rng: &mut R) -> Vec<Match> {
    let n = players.len();
    if n < 4 {
        return Vec::new();
    }
    let cap = n - 1;

    let mut partnerships: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();
    partnerships.shuffle(rng);

    let mut used = vec![false; partnerships.len()];
    let mut games = vec![0usize; n];
    let mut pairings = Vec::new();

    for i in 0..partnerships.len() {
        if used[i] {
            continue;
        }
        let (a, b) = partnerships[i];
        if games[a] >= cap || games[b] >= cap {
            continue;
        }

        let mut best: Option<(usize, usize)> = None;
        for (j, &(c, d)) in partnerships.iter().enumerate().skip(i + 1) {
            if used[j] || c == a || c == b || d == a || d == b {
                continue;
            }
            if games[c] >= cap || games[d] >= cap {
                continue;
            }
            let need: usize = [a, b, c, d].iter().map(|&p| cap - games[p]).sum();
            if best.map_or(true, |(_, best_need)| need > best_need) {
                best = Some((j, need));
            }
        }

        if let Some((j, _)) = best {
            let (c, d) = partnerships[j];
            used[i] = true;
            used[j] = true;
            for p in [a, b, c, d] {
                games[p] += 1;
            }
            pairings.push(((a, b), (c, d)));
        }
    }

    let left_over = used.iter().filter(|u| !**u).count();
    if left_over > 0 {
        warn!(
            players = n,
            left_over,
            "partner rotation left partnerships without a match"
        );
    }

    let per_round = (n / 4).max(1);
    let matches: Vec<Match> = pairings
        .into_iter()
        .enumerate()
        .map(|(index, ((a, b), (c, d)))| {
            Match::doubles(
                (index / per_round) as u32 + 1,
                [players[a].clone(), players[b].clone()],
                [players[c].clone(), players[d].clone()],
            )
        })
        .collect();

    debug!(
        players = n,
        matches = matches.len(),
        rounds = matches.last().map_or(0, |m| m.round),
        "generated partner rotation"
    );
    matches
}
