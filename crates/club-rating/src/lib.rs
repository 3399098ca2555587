//! Rating engine for club games.
//!
//! This crate turns a final score into rating changes:
//! - [`RatingConfig`] - every tunable constant, loadable from TOML
//! - [`validate`] - checks a [`GameInput`] before the engine sees it
//! - [`RatingEngine`] - expected scores and the margin, performance and
//!   underdog multipliers
//! - [`record_game`] - applies an update to player records and returns the
//!   immutable [`club_core::GameRecord`]
//!
//! # Example
//!
//! ```
//! use club_core::{Format, PlayerId, Score};
//! use club_rating::{compute_rating_update, GameInput, PlayerRating, RatingConfig};
//!
//! let config = RatingConfig::default();
//! let input = GameInput {
//!     format: Format::Singles,
//!     team1: vec![PlayerRating::new("alice", 4.0)],
//!     team2: vec![PlayerRating::new("bob", 4.0)],
//!     score: Score::new(11, 5),
//! };
//!
//! let update = compute_rating_update(&config, &input).unwrap();
//! let ratings = update.new_ratings();
//! assert!(ratings[&PlayerId::from("alice")] > 4.0);
//! assert!(ratings[&PlayerId::from("bob")] < 4.0);
//! ```

mod config;
mod engine;
mod input;
mod ledger;
pub mod multipliers;

pub use config::{Band, ConfigError, FormulaVersion, RatingConfig};
pub use engine::{
    compute_rating_update, Multipliers, PlayerDelta, RatingEngine, RatingUpdate, WinLossDelta,
};
pub use input::{validate, GameInput, PlayerRating, ValidatedGame, ValidationError};
pub use ledger::{record_game, LedgerError};
