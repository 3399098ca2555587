//! Expected score and the multipliers that scale a rating swing.
//!
//! Every function here is pure and takes its constants from a
//! [`RatingConfig`], so each factor can be checked on its own.

use club_core::{Format, Outcome, Score};

use crate::RatingConfig;

/// Arithmetic mean of a team's ratings.
///
/// Returns `0.0` for an empty slice; validation rejects empty teams before
/// the engine runs.
pub fn team_rating(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().sum::<f64>() / ratings.len() as f64
}

/// Expected score of a team rated `own` against a team rated `opponent`.
///
/// `expected_score(a, b, s) + expected_score(b, a, s) == 1`.
pub fn expected_score(own: f64, opponent: f64, scale_factor: f64) -> f64 {
    1.0 / (1.0 + 10_f64.powf((opponent - own) / scale_factor))
}

/// Scales the swing by how decisive the result was.
///
/// A one-point win gets `margin_base`; each further point adds
/// `margin_slope`. Draws are neutral.
pub fn margin_multiplier(config: &RatingConfig, score: Score) -> f64 {
    let margin = score.margin();
    if margin == 0 {
        return 1.0;
    }
    let raw = config.margin_base + f64::from(margin - 1) * config.margin_slope;
    config.margin_band.clamp(raw)
}

/// Scales one player's swing by where they sit relative to `reference`.
///
/// Winners rated below the reference gain more and winners above it gain
/// less. Losers below the reference lose less and losers above it lose more.
/// Singles games and draws are neutral.
pub fn performance_multiplier(
    config: &RatingConfig,
    format: Format,
    outcome: Outcome,
    player_rating: f64,
    reference_rating: f64,
) -> f64 {
    if format == Format::Singles {
        return 1.0;
    }
    let diff = player_rating - reference_rating;
    let raw = match outcome {
        Outcome::Win => 1.0 - diff * config.performance_coefficient,
        Outcome::Loss => 1.0 + diff * config.performance_coefficient,
        Outcome::Draw => return 1.0,
    };
    config.performance_band.clamp(raw)
}

/// Team-level underdog factor.
///
/// Underdogs who win and favourites who lose are amplified. Favourites who
/// win and underdogs who lose are damped.
pub fn team_underdog_factor(
    config: &RatingConfig,
    outcome: Outcome,
    own_team: f64,
    opponent_team: f64,
) -> f64 {
    let gap = match outcome {
        Outcome::Win => opponent_team - own_team,
        Outcome::Loss => own_team - opponent_team,
        Outcome::Draw => return 1.0,
    };
    config
        .underdog_team_band
        .clamp(1.0 + gap * config.underdog_team_coefficient)
}

/// Individual underdog factor, measured against the default rating.
///
/// Low-rated winners get extra credit and high-rated losers an extra
/// penalty.
pub fn individual_underdog_factor(config: &RatingConfig, outcome: Outcome, player_rating: f64) -> f64 {
    let gap = match outcome {
        Outcome::Win => config.default_rating - player_rating,
        Outcome::Loss => player_rating - config.default_rating,
        Outcome::Draw => return 1.0,
    };
    config
        .underdog_individual_band
        .clamp(1.0 + gap * config.underdog_individual_coefficient)
}

/// Combined underdog multiplier for one player.
pub fn underdog_multiplier(
    config: &RatingConfig,
    outcome: Outcome,
    player_rating: f64,
    own_team: f64,
    opponent_team: f64,
) -> f64 {
    let product = team_underdog_factor(config, outcome, own_team, opponent_team)
        * individual_underdog_factor(config, outcome, player_rating);
    match outcome {
        Outcome::Win => config.underdog_winner_band.clamp(product),
        Outcome::Loss => config.underdog_loser_band.clamp(product),
        Outcome::Draw => 1.0,
    }
}
