//! Core types for club play.
//!
//! This crate provides the fundamental types shared by the rating engine
//! and the schedule generator:
//! - [`PlayerId`] and [`PlayerRecord`] for rated players
//! - [`Format`], [`Score`], [`TeamSide`] and [`Outcome`] for game results
//! - [`GameRecord`] for the immutable history of a rated game
//! - [`Match`], [`Sides`], [`Side`] and [`Bracket`] for generated schedules

mod format;
mod game;
mod matches;
mod player;
mod score;

pub use format::Format;
pub use game::{GameRecord, RatingSnapshot};
pub use matches::{Bracket, Match, Side, Sides};
pub use player::{Outcome, PlayerId, PlayerRecord};
pub use score::{CoreError, Score, TeamSide};
