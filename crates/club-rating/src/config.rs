//! Rating engine tuning.
//!
//! All constants the engine uses live in [`RatingConfig`], so alternate
//! tunings can be tested side by side and loaded from a `[rating]` table.

use club_core::{PlayerId, PlayerRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when validating a rating configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A clamp band whose lower edge is above its upper edge.
    #[error("invalid band '{name}': min {min} is greater than max {max}")]
    InvalidBand { name: &'static str, min: f64, max: f64 },
    /// Rating bounds that leave no room for a rating.
    #[error("invalid rating bounds: min {min} must be below max {max}")]
    InvalidRatingBounds { min: f64, max: f64 },
    /// Default rating outside the rating bounds.
    #[error("default rating {0} is outside the rating bounds")]
    DefaultRatingOutOfBounds(f64),
    /// A value that must be strictly positive.
    #[error("'{name}' must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    /// A value that is NaN or infinite.
    #[error("'{0}' must be a finite number")]
    NotFinite(&'static str),
}

/// Which rating formula the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaVersion {
    /// Earlier formula: ties rejected, performance measured against the
    /// opposing team, no underdog adjustment.
    Legacy,
    /// Performance measured against the player's own team, underdog
    /// adjustment applied, draws scored one half each.
    #[default]
    Current,
}

impl FormulaVersion {
    /// Returns true if tied scores are accepted as draws.
    #[inline]
    pub const fn allows_draws(self) -> bool {
        matches!(self, FormulaVersion::Current)
    }
}

/// Closed interval used to clamp a multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamps `value` into the band. Never panics, even on an inverted band.
    #[inline]
    pub fn clamp(self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(self, name: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NotFinite(name));
        }
        if self.min > self.max {
            return Err(ConfigError::InvalidBand {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Constants for the rating engine.
///
/// Missing fields take their default when deserialized, so a config file
/// only needs to name the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub formula: FormulaVersion,
    /// Maximum swing scale per game.
    pub k_factor: f64,
    /// Rating for new players. Also the baseline for individual underdog
    /// adjustment.
    pub default_rating: f64,
    pub min_rating: f64,
    pub max_rating: f64,
    /// Rating gap at which the favourite is expected to win ten to one.
    pub scale_factor: f64,

    /// Margin multiplier for a one-point win.
    pub margin_base: f64,
    /// Added to the margin multiplier per extra point of margin.
    pub margin_slope: f64,
    pub margin_band: Band,

    pub performance_coefficient: f64,
    pub performance_band: Band,

    pub underdog_team_coefficient: f64,
    pub underdog_team_band: Band,
    pub underdog_individual_coefficient: f64,
    pub underdog_individual_band: Band,
    /// Clamp for the combined underdog multiplier of a winner.
    pub underdog_winner_band: Band,
    /// Clamp for the combined underdog multiplier of a loser.
    pub underdog_loser_band: Band,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            formula: FormulaVersion::Current,
            k_factor: 0.1,
            default_rating: 4.0,
            min_rating: 2.0,
            max_rating: 8.0,
            scale_factor: 2.0,
            margin_base: 0.7,
            margin_slope: 0.075,
            margin_band: Band::new(0.5, 1.5),
            performance_coefficient: 0.5,
            performance_band: Band::new(0.6, 1.4),
            underdog_team_coefficient: 0.5,
            underdog_team_band: Band::new(0.7, 1.4),
            underdog_individual_coefficient: 0.25,
            underdog_individual_band: Band::new(0.8, 1.3),
            underdog_winner_band: Band::new(0.7, 1.5),
            underdog_loser_band: Band::new(0.5, 1.6),
        }
    }
}

impl RatingConfig {
    /// Configuration for the legacy formula with default constants.
    pub fn legacy() -> Self {
        Self {
            formula: FormulaVersion::Legacy,
            ..Self::default()
        }
    }

    /// Checks that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a non-finite constant, a
    /// non-positive K-factor or scale factor, inverted rating bounds, a
    /// default rating outside the bounds, or an inverted clamp band.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("k_factor", self.k_factor),
            ("default_rating", self.default_rating),
            ("min_rating", self.min_rating),
            ("max_rating", self.max_rating),
            ("scale_factor", self.scale_factor),
            ("margin_base", self.margin_base),
            ("margin_slope", self.margin_slope),
            ("performance_coefficient", self.performance_coefficient),
            ("underdog_team_coefficient", self.underdog_team_coefficient),
            (
                "underdog_individual_coefficient",
                self.underdog_individual_coefficient,
            ),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(name));
            }
        }

        for (name, value) in [("k_factor", self.k_factor), ("scale_factor", self.scale_factor)] {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        if self.min_rating >= self.max_rating {
            return Err(ConfigError::InvalidRatingBounds {
                min: self.min_rating,
                max: self.max_rating,
            });
        }
        if self.default_rating < self.min_rating || self.default_rating > self.max_rating {
            return Err(ConfigError::DefaultRatingOutOfBounds(self.default_rating));
        }

        self.margin_band.check("margin_band")?;
        self.performance_band.check("performance_band")?;
        self.underdog_team_band.check("underdog_team_band")?;
        self.underdog_individual_band.check("underdog_individual_band")?;
        self.underdog_winner_band.check("underdog_winner_band")?;
        self.underdog_loser_band.check("underdog_loser_band")?;
        Ok(())
    }

    /// Clamps a rating into `[min_rating, max_rating]`.
    #[inline]
    pub fn clamp_rating(&self, rating: f64) -> f64 {
        rating.max(self.min_rating).min(self.max_rating)
    }

    /// Creates a player record at the default rating.
    pub fn new_player(&self, id: impl Into<PlayerId>) -> PlayerRecord {
        PlayerRecord::new(id, self.default_rating)
    }
}
