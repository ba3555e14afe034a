//! Read-only views of tournament state
//!
//! Everything here is plain data and serializable; formatting belongs to
//! the caller.

use serde::Serialize;
use tennis_core::{Competitor, CompetitorKind};

use crate::engine::Phase;

/// Flattened view of a competitor
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompetitorSummary {
    pub name: String,
    pub country: String,
    pub kind: CompetitorKind,
    pub ranking: u32,
    pub serve_skill: f64,
    pub return_skill: f64,
    pub shoe_size: f64,
    pub round_score: f64,
    pub elimination_rank: Option<u32>,
    pub racket: Option<String>,
    pub racket_variant: Option<String>,
    pub footwear: Option<String>,
}

impl From<&Competitor> for CompetitorSummary {
    fn from(c: &Competitor) -> Self {
        Self {
            name: c.name.clone(),
            country: c.country.clone(),
            kind: c.kind,
            ranking: c.ranking,
            serve_skill: c.serve_skill,
            return_skill: c.return_skill,
            shoe_size: c.shoe_size,
            round_score: c.round_score(),
            elimination_rank: c.elimination_rank(),
            racket: c.racket().map(|r| r.model.clone()),
            racket_variant: c.racket().map(|r| r.kind.label().to_string()),
            footwear: c.footwear().map(|f| f.model.clone()),
        }
    }
}

/// One decided match
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchRecord {
    pub round: u32,
    /// Loop index the match was played at
    pub game: usize,
    pub winner: String,
    pub loser: String,
    pub winner_score: f64,
    pub loser_score: f64,
    /// Scores were level and the skill-sum rule decided
    pub tie_break: bool,
    /// The competitor was paired with itself at the tail of the field
    pub walkover: bool,
    pub elimination_rank: u32,
}

/// What happened in one call to `play_round`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundSummary {
    pub round: u32,
    pub matches: Vec<MatchRecord>,
    /// Competitors that received a fresh racket after the pass
    pub rackets_swapped: usize,
    /// Competitors that kept their racket because the pool ran dry
    pub rackets_kept: usize,
    pub remaining: usize,
}

/// Point-in-time view of the engine
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub round: u32,
    pub active: Vec<CompetitorSummary>,
    pub eliminated: Vec<CompetitorSummary>,
    pub champion: Option<CompetitorSummary>,
    pub footwear_in_pool: usize,
    pub rackets_in_pool: usize,
}

/// Final outcome of a finished tournament
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TournamentReport {
    pub name: String,
    pub champion: CompetitorSummary,
    /// Eliminated competitors, most recently eliminated first
    pub standings: Vec<CompetitorSummary>,
    pub rounds_played: u32,
    pub matches: Vec<MatchRecord>,
    /// Competitors that found no pool shoes in their size
    pub unmatched_footwear: usize,
    /// Times a survivor kept its racket because the pool was empty
    pub rackets_kept: usize,
}

impl TournamentReport {
    pub fn total_eliminations(&self) -> usize {
        self.standings.len()
    }

    pub fn runner_up(&self) -> Option<&CompetitorSummary> {
        self.standings.first()
    }
}
