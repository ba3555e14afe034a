//! Tennis Tournament - single-elimination engine
//!
//! This crate provides the tournament side of the simulator:
//! - Registration and one-off equipment assignment
//! - Positional pairing rounds with elimination bookkeeping
//! - Mid-tournament racket reassignment from the shared pool
//! - Match result broadcast to subscribers
//! - Read-only snapshots and the final report
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: TournamentEngine::run (orchestration)
//! - Level 2: assign_equipment, play_round (phases)
//! - Level 3: pairing, reassignment (steps)
//! - Level 4: snapshots, configuration

mod config;
mod engine;
mod error;
mod observer;
mod report;

pub use config::{LateRegistration, TournamentConfig};
pub use engine::{Phase, TournamentEngine};
pub use error::{Result, TournamentError};
pub use observer::{Broadcaster, MatchNotice, MatchObserver, ResultCollector, TranscriptWriter};
pub use report::{CompetitorSummary, MatchRecord, RoundSummary, Snapshot, TournamentReport};
