//! Match and round generation for club events.
//!
//! This crate provides:
//! - [`generate_round_robin_matches`] - singles round robin with proper
//!   rounds, or doubles partner rotation
//! - [`partner_rotation`] - the greedy needs-based doubles rotation
//! - [`BoxLeague`] - fixed-size boxes, in-box rotation, standings, and
//!   promotion/relegation
//! - [`EliminationBracket`] - seeded first round and on-demand later rounds
//! - [`generate_matches`] - one entry point over a [`ScheduleRequest`]
//!
//! Every random step takes an injected [`rand::Rng`], so tests can seed it
//! and production can use `rand::thread_rng()`.
//!
//! # Example
//!
//! ```
//! use club_core::{Format, PlayerId};
//! use club_schedule::{generate_matches, ScheduleKind, ScheduleRequest};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let players: Vec<PlayerId> = ["a", "b", "c", "d"].into_iter().map(PlayerId::from).collect();
//! let request = ScheduleRequest::new(players, Format::Doubles, ScheduleKind::BoxLeague);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let matches = generate_matches(&request, &mut rng).unwrap();
//! assert_eq!(matches.len(), 3);
//! ```

mod box_league;
mod elimination;
mod error;
mod request;
mod rotation;
mod round_robin;

pub use box_league::{standings, BoxLeague, PlayedMatch, Standing, BOX_SIZE};
pub use elimination::{generate_elimination_matches, EliminationBracket, RoundPairing};
pub use error::ScheduleError;
pub use request::{generate_matches, ScheduleKind, ScheduleRequest};
pub use rotation::partner_rotation;
pub use round_robin::{generate_round_robin_matches, singles_round_robin};
