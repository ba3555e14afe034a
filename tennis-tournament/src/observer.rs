//! Match result broadcast to external subscribers
//!
//! Subscribers are called synchronously, in subscription order, after each
//! match has been decided. Whatever a subscriber does (return an error,
//! panic) stays on its side of the boundary.

use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use serde::Serialize;
use tennis_core::Competitor;

/// Receives one call per decided match
pub trait MatchObserver: Send {
    fn on_match_result(&mut self, winner: &Competitor, loser: &Competitor, round: u32) -> anyhow::Result<()>;

    /// Name used when logging a failing subscriber
    fn name(&self) -> &str {
        "observer"
    }
}

/// Ordered list of subscribers
#[derive(Default)]
pub struct Broadcaster {
    observers: Vec<Box<dyn MatchObserver>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn MatchObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notify every subscriber. Returns how many of them failed.
    pub fn broadcast(&mut self, winner: &Competitor, loser: &Competitor, round: u32) -> usize {
        let mut failures = 0;
        for observer in &mut self.observers {
            let outcome = catch_unwind(AssertUnwindSafe(|| observer.on_match_result(winner, loser, round)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    failures += 1;
                    tracing::warn!("Subscriber '{}' failed on round {}: {:#}", observer.name(), round, e);
                }
                Err(_) => {
                    failures += 1;
                    tracing::warn!("Subscriber '{}' panicked on round {}", observer.name(), round);
                }
            }
        }
        failures
    }
}

/// Appends one human-readable line per match to a writer
pub struct TranscriptWriter<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TranscriptWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> MatchObserver for TranscriptWriter<W> {
    fn on_match_result(&mut self, winner: &Competitor, loser: &Competitor, round: u32) -> anyhow::Result<()> {
        if std::ptr::eq(winner, loser) {
            writeln!(
                self.out,
                "Round {}: {} has no opponent and is eliminated with {:.2} points",
                round,
                loser.name,
                loser.round_score()
            )?;
        } else {
            writeln!(
                self.out,
                "Round {}: {} beats {} ({:.2} - {:.2}), eliminated #{}",
                round,
                winner.name,
                loser.name,
                winner.round_score(),
                loser.round_score(),
                loser.elimination_rank().unwrap_or(0)
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "transcript"
    }
}

/// One delivered notification
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchNotice {
    pub round: u32,
    pub winner: String,
    pub loser: String,
}

/// Keeps every notification in memory; clones share the same store
#[derive(Clone, Default)]
pub struct ResultCollector {
    notices: Arc<Mutex<Vec<MatchNotice>>>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<MatchNotice> {
        match self.notices.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl MatchObserver for ResultCollector {
    fn on_match_result(&mut self, winner: &Competitor, loser: &Competitor, round: u32) -> anyhow::Result<()> {
        let mut guard = self.notices.lock().map_err(|_| anyhow!("collector store poisoned"))?;
        guard.push(MatchNotice {
            round,
            winner: winner.name.clone(),
            loser: loser.name.clone(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "collector"
    }
}
