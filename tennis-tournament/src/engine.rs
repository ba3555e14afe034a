//! Tournament engine - registration, equipment, rounds, elimination
//!
//! Level 1 - Orchestration (`run`) and Level 2 - Phases
//!
//! Pairing is positional. Each pass walks an index `i` upward while the
//! active list shrinks from the tail, and `active[i]` always meets whoever
//! is currently last. When `i` reaches the tail the competitor meets
//! itself and goes out through the tail-wins branch.

use std::fmt;

use serde::Serialize;
use tennis_core::{score_match, Competitor, EquipmentPool, Footwear, Racket, Roster};

use crate::config::{LateRegistration, TournamentConfig};
use crate::error::{Result, TournamentError};
use crate::observer::{Broadcaster, MatchObserver};
use crate::report::{CompetitorSummary, MatchRecord, RoundSummary, Snapshot, TournamentReport};

/// Lifecycle of a tournament. There is no way back from the last two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    Registering,
    AssigningEquipment,
    RoundInProgress,
    Finished,
    Cancelled,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Registering => "registering",
            Phase::AssigningEquipment => "assigning equipment",
            Phase::RoundInProgress => "in progress",
            Phase::Finished => "finished",
            Phase::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Single-elimination tournament with a shared equipment pool.
///
/// All mutation goes through `&mut self`; callers sharing an engine across
/// threads wrap the whole value in one lock.
pub struct TournamentEngine {
    config: TournamentConfig,
    phase: Phase,
    round: u32,
    active: Vec<Competitor>,
    eliminated: Vec<Competitor>,
    pool: EquipmentPool,
    observers: Broadcaster,
    matches: Vec<MatchRecord>,
    unmatched_footwear: usize,
    rackets_kept: usize,
}

impl TournamentEngine {
    pub fn new(config: TournamentConfig) -> Self {
        Self {
            config,
            phase: Phase::Registering,
            round: 0,
            active: Vec::new(),
            eliminated: Vec::new(),
            pool: EquipmentPool::new(),
            observers: Broadcaster::new(),
            matches: Vec::new(),
            unmatched_footwear: 0,
            rackets_kept: 0,
        }
    }

    /// Register a whole roster: its competitors, shoes and rackets
    pub fn from_roster(config: TournamentConfig, roster: Roster) -> Result<Self> {
        let mut engine = Self::new(config);
        for competitor in roster.competitors {
            engine.register(competitor)?;
        }
        for item in roster.footwear {
            engine.add_footwear(item);
        }
        for item in roster.rackets {
            engine.add_racket(item);
        }
        Ok(engine)
    }

    /// Drop every competitor, piece of equipment and result.
    /// Configuration and subscribers are kept.
    pub fn reset(&mut self) {
        self.phase = Phase::Registering;
        self.round = 0;
        self.active.clear();
        self.eliminated.clear();
        self.pool.clear();
        self.matches.clear();
        self.unmatched_footwear = 0;
        self.rackets_kept = 0;
    }

    pub fn subscribe(&mut self, observer: Box<dyn MatchObserver>) {
        self.observers.subscribe(observer);
    }

    /// Add a competitor to the field.
    ///
    /// Returns `Ok(false)` when the field is closed and the configured policy
    /// is to ignore late entries.
    /// Score, rank and racket left over from an earlier tournament are
    /// cleared; rackets only ever come from the pool.
    pub fn register(&mut self, mut competitor: Competitor) -> Result<bool> {
        if self.phase == Phase::Registering {
            if let Some(racket) = competitor.clear_tournament_state() {
                tracing::debug!("{} registers without carried racket {}", competitor.name, racket.model);
            }
            self.active.push(competitor);
            return Ok(true);
        }
        match self.config.late_registration {
            LateRegistration::Reject => Err(TournamentError::RegistrationClosed {
                name: competitor.name,
                phase: self.phase,
            }),
            LateRegistration::Ignore => {
                tracing::warn!("Ignoring late registration of {} ({})", competitor.name, self.phase);
                Ok(false)
            }
        }
    }

    pub fn add_footwear(&mut self, item: Footwear) {
        self.pool.add_footwear(item);
    }

    pub fn add_racket(&mut self, item: Racket) {
        self.pool.add_racket(item);
    }

    // ========================================================================
    // Level 1 - Orchestration
    // ========================================================================

    /// Assign equipment if needed, play rounds until one competitor is left,
    /// and return the final report
    pub fn run(&mut self) -> Result<TournamentReport> {
        if self.phase == Phase::Registering {
            tracing::info!(
                "Starting tournament: {} ({} competitors)",
                self.config.name,
                self.active.len()
            );
            self.assign_equipment()?;
        }
        if self.phase == Phase::Cancelled {
            return Err(self.cancellation());
        }
        while self.phase == Phase::RoundInProgress {
            self.play_round()?;
        }
        self.report().ok_or(TournamentError::NotStarted)
    }

    // ========================================================================
    // Level 2 - Phases
    // ========================================================================

    /// Close registration, hand out shoes, then rackets.
    ///
    /// A racket shortfall cancels the tournament before anything is handed
    /// out. Competitors without a shoe match keep what they arrived with.
    pub fn assign_equipment(&mut self) -> Result<()> {
        match self.phase {
            Phase::Registering => {}
            Phase::AssigningEquipment | Phase::RoundInProgress => return Ok(()),
            Phase::Finished => return Err(TournamentError::AlreadyOver(self.phase)),
            Phase::Cancelled => return Err(self.cancellation()),
        }
        if self.active.is_empty() {
            return Err(TournamentError::NoCompetitors);
        }

        self.phase = Phase::AssigningEquipment;

        if self.pool.racket_count() < self.active.len() {
            return Err(self.cancel());
        }

        for competitor in &mut self.active {
            if !self.pool.match_footwear(competitor) {
                self.unmatched_footwear += 1;
                tracing::warn!(
                    "No pool shoes in size {} for {}; keeping {}",
                    competitor.shoe_size,
                    competitor.name,
                    competitor.footwear().map_or("none", |f| f.model.as_str())
                );
            }
        }

        if !self.pool.assign_rackets(&mut self.active) {
            return Err(self.cancel());
        }
        for competitor in &self.active {
            tracing::debug!("{}", competitor.describe());
        }

        self.phase = Phase::RoundInProgress;
        if self.active.len() == 1 {
            self.finish();
        }
        Ok(())
    }

    /// Play one full pass over the active field.
    ///
    /// Survivors take a fresh racket afterwards when the pool still has one.
    pub fn play_round(&mut self) -> Result<RoundSummary> {
        match self.phase {
            Phase::RoundInProgress => {}
            Phase::Registering | Phase::AssigningEquipment => return Err(TournamentError::NotStarted),
            Phase::Finished => return Err(TournamentError::AlreadyOver(self.phase)),
            Phase::Cancelled => return Err(self.cancellation()),
        }

        self.round += 1;
        tracing::info!("Round {} ({} competitors)", self.round, self.active.len());

        let mut matches = Vec::new();
        let mut i = 0;
        while i < self.active.len() {
            let last = self.active.len() - 1;
            let record = self.play_pairing(i, last);
            matches.push(record);
            i += 1;
        }

        let (rackets_swapped, rackets_kept) = if self.active.len() > 1 {
            self.reassign_rackets()
        } else {
            (0, 0)
        };

        self.matches.extend(matches.iter().cloned());
        if self.active.len() <= 1 {
            self.finish();
        }

        Ok(RoundSummary {
            round: self.round,
            matches,
            rackets_swapped,
            rackets_kept,
            remaining: self.active.len(),
        })
    }

    // ========================================================================
    // Level 3 - Steps
    // ========================================================================

    /// Play `active[i]` against `active[last]` and remove the loser
    fn play_pairing(&mut self, i: usize, last: usize) -> MatchRecord {
        let walkover = i == last;
        tracing::debug!(
            "Game {}: {} vs {}",
            i,
            self.active[i].name,
            self.active[last].name
        );

        let points = score_match(&self.active[i], &self.active[last]);
        self.active[i].add_points(points.first);
        self.active[last].add_points(points.second);
        self.active[i].strike();
        if !walkover {
            self.active[last].strike();
        }

        let first_score = self.active[i].round_score();
        let last_score = self.active[last].round_score();
        let tie_break = first_score == last_score;
        let first_wins = if tie_break {
            self.active[i].combined_skill() < self.active[last].combined_skill()
        } else {
            first_score > last_score
        };

        // Either way the list loses its tail slot; a tail winner moves into `i`.
        let mut loser = if first_wins {
            self.active.swap_remove(last)
        } else {
            self.active.swap_remove(i)
        };
        let rank = self.eliminated.len() as u32 + 1;
        loser.mark_eliminated(rank);

        let winner = if walkover { &loser } else { &self.active[i] };

        if walkover {
            tracing::debug!(
                "{} has no opponent left and is eliminated ({:.2} points, eliminated #{})",
                loser.name,
                loser.round_score(),
                rank
            );
        } else {
            tracing::debug!(
                "{} beats {} ({:.2} - {:.2}{}), eliminated #{}",
                winner.name,
                loser.name,
                winner.round_score(),
                loser.round_score(),
                if tie_break { ", tie-break" } else { "" },
                rank
            );
        }

        let record = MatchRecord {
            round: self.round,
            game: i,
            winner: winner.name.clone(),
            loser: loser.name.clone(),
            winner_score: winner.round_score(),
            loser_score: loser.round_score(),
            tie_break,
            walkover,
            elimination_rank: rank,
        };

        self.observers.broadcast(winner, &loser, self.round);
        self.eliminated.push(loser);

        if !walkover {
            self.active[i].reset_round_score();
        }
        record
    }

    /// Give every survivor the lowest racket left in the pool.
    /// Returns (swapped, kept).
    fn reassign_rackets(&mut self) -> (usize, usize) {
        let mut swapped = 0;
        let mut kept = 0;
        for competitor in &mut self.active {
            match self.pool.take_lowest_racket() {
                Some(racket) => {
                    tracing::debug!("{} switches to {}", competitor.name, racket);
                    competitor.equip_racket(racket);
                    swapped += 1;
                }
                None => {
                    tracing::warn!(
                        "Racket pool exhausted; {} keeps {}",
                        competitor.name,
                        competitor.racket().map_or("no racket", |r| r.model.as_str())
                    );
                    kept += 1;
                }
            }
        }
        self.rackets_kept += kept;
        (swapped, kept)
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.eliminated
            .sort_by(|a, b| b.elimination_rank().cmp(&a.elimination_rank()));
        if let Some(champion) = self.active.first() {
            tracing::info!("Champion of {}: {}", self.config.name, champion.name);
        }
    }

    fn cancel(&mut self) -> TournamentError {
        self.phase = Phase::Cancelled;
        let err = self.cancellation();
        tracing::error!("{}", err);
        err
    }

    fn cancellation(&self) -> TournamentError {
        TournamentError::InsufficientEquipment {
            rackets: self.pool.racket_count(),
            competitors: self.active.len(),
        }
    }

    // ========================================================================
    // Level 4 - Read-only views
    // ========================================================================

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rounds started so far
    pub fn round_number(&self) -> u32 {
        self.round
    }

    pub fn active(&self) -> &[Competitor] {
        &self.active
    }

    /// Elimination order while playing; most recent first once finished
    pub fn eliminated(&self) -> &[Competitor] {
        &self.eliminated
    }

    pub fn champion(&self) -> Option<&Competitor> {
        if self.phase == Phase::Finished {
            self.active.first()
        } else {
            None
        }
    }

    pub fn pool(&self) -> &EquipmentPool {
        &self.pool
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            round: self.round,
            active: self.active.iter().map(CompetitorSummary::from).collect(),
            eliminated: self.eliminated.iter().map(CompetitorSummary::from).collect(),
            champion: self.champion().map(CompetitorSummary::from),
            footwear_in_pool: self.pool.footwear_count(),
            rackets_in_pool: self.pool.racket_count(),
        }
    }

    /// Final report; `None` until the tournament has finished
    pub fn report(&self) -> Option<TournamentReport> {
        let champion = self.champion()?;
        Some(TournamentReport {
            name: self.config.name.clone(),
            champion: CompetitorSummary::from(champion),
            standings: self.eliminated.iter().map(CompetitorSummary::from).collect(),
            rounds_played: self.round,
            matches: self.matches.clone(),
            unmatched_footwear: self.unmatched_footwear,
            rackets_kept: self.rackets_kept,
        })
    }
}
