//! Chess opening trainer
//!
//! Drills a learner on a repertoire of memorized opening lines. The learner
//! plays one side; the computer answers from the lines still consistent
//! with the game so far. Deviations are taken back and counted, hints cost
//! time, and enough error-free completions in a row earn an achievement.
//!
//! # Modules
//!
//! - [`repertoire`] - PGN parsing, loading and training catalogs
//! - [`training`] - line tracking, timer, hints, stats and the session
//! - [`achievements`] - persisted record of reached objectives
//! - [`ui`] - rendering surfaces
//! - [`core`] - settings, errors and time sources
//!
//! Chess rules come from the `chess-rules` workspace crate.

pub mod achievements;
pub mod core;
pub mod repertoire;
pub mod training;
pub mod ui;

pub use chess_rules;
