//! Tennis Core - equipment, competitors and the shared equipment pool
//!
//! This crate provides the data side of the tournament simulator:
//! - Rackets (power / control / balanced) with step-table metrics
//! - Footwear (cushioned / grippy) with quality-driven bonuses
//! - Competitors and the serve/return match scoring
//! - The scarce equipment pool (first-fit shoes, lowest-power-first rackets)
//! - Rosters: JSON load/save, the reference sample and seeded random fields

pub mod racket;
pub mod footwear;
pub mod competitor;
pub mod pool;
pub mod roster;

// Re-exports for convenient access
pub use racket::{Racket, RacketKind, Stringing};
pub use footwear::{Footwear, FootwearKind};
pub use competitor::{exchange, score_match, Competitor, CompetitorKind, Exchange, MatchPoints};
pub use pool::EquipmentPool;
pub use roster::{Roster, RosterError};
