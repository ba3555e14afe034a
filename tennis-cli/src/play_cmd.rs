//! Play command - run one tournament and report the outcome
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_roster(), open_transcript(), report_results()
//! - Level 3: print_text_results()
//! - Level 4: formatting utilities

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use tennis_core::Roster;
use tennis_tournament::{CompetitorSummary, TournamentConfig, TournamentEngine, TournamentReport, TranscriptWriter};

use crate::roster_cmd::create_rng;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Roster JSON file (defaults to the built-in sample)
    #[arg(long, value_name = "FILE", conflicts_with = "random")]
    pub roster: Option<PathBuf>,

    /// Play a random field of this many competitors
    #[arg(long, value_name = "N")]
    pub random: Option<usize>,

    /// Append a match transcript to this file
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Load the roster
/// 2. Build the engine and attach the transcript
/// 3. Play to the end
/// 4. Report results
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let roster = load_roster(&args, seed)?;
    let config = TournamentConfig::named(roster.name.clone());
    let mut engine = TournamentEngine::from_roster(config, roster)?;

    if let Some(path) = &args.log {
        let transcript = open_transcript(path, &engine.config().name)?;
        engine.subscribe(Box::new(TranscriptWriter::new(transcript)));
    }

    let report = engine.run()?;
    report_results(&report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_roster(args: &PlayArgs, seed: Option<u64>) -> Result<Roster> {
    if let Some(path) = &args.roster {
        return Roster::load(path).with_context(|| format!("Failed to load roster: {}", path.display()));
    }
    Ok(match args.random {
        Some(n) => Roster::random(&mut create_rng(seed), "Random Open", n),
        None => Roster::sample(),
    })
}

/// Open the transcript for appending and stamp a header line
fn open_transcript(path: &Path, name: &str) -> Result<File> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open transcript: {}", path.display()))?;
    writeln!(
        file,
        "=== {} - {} ===",
        name,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    Ok(file)
}

fn report_results(report: &TournamentReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_text_results(report);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn print_text_results(report: &TournamentReport) {
    println!("\n=== {} ===", report.name);
    println!("Rounds played: {}", report.rounds_played);

    println!("\nChampion:");
    println!("  {}", format_competitor(&report.champion));

    println!("\nStandings (most recently eliminated first):");
    for s in &report.standings {
        println!(
            "  #{:<3} {}  ({:.2} pts)",
            s.elimination_rank.unwrap_or(0),
            format_competitor(s),
            s.round_score
        );
    }

    println!("\nMatches:");
    for m in &report.matches {
        if m.walkover {
            println!("  R{} G{}: {} had no opponent and is out", m.round, m.game, m.loser);
        } else {
            println!(
                "  R{} G{}: {} beat {} ({:.2} - {:.2}){}",
                m.round,
                m.game,
                m.winner,
                m.loser,
                m.winner_score,
                m.loser_score,
                if m.tie_break { " [tie-break]" } else { "" }
            );
        }
    }

    println!(
        "\nEquipment: {} without pool shoes, {} racket keeps",
        report.unmatched_footwear, report.rackets_kept
    );
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_competitor(c: &CompetitorSummary) -> String {
    format!(
        "{} ({}, {}) racket={} shoes={}",
        c.name,
        c.country,
        c.kind.label(),
        c.racket.as_deref().unwrap_or("-"),
        c.footwear.as_deref().unwrap_or("-")
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_roster_defaults_to_sample() {
        let args = PlayArgs {
            roster: None,
            random: None,
            log: None,
            json: false,
        };
        let roster = load_roster(&args, None).unwrap();
        assert_eq!(roster, Roster::sample());
    }

    #[test]
    fn test_load_roster_missing_file() {
        let args = PlayArgs {
            roster: Some(PathBuf::from("/no/such/roster.json")),
            random: None,
            log: None,
            json: false,
        };
        let err = load_roster(&args, None).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load roster"));
    }

    #[test]
    fn test_transcript_appends() {
        let path = std::env::temp_dir().join(format!("tennis_transcript_{}.log", std::process::id()));
        std::fs::remove_file(&path).ok();
        drop(open_transcript(&path, "First").unwrap());
        drop(open_transcript(&path, "Second").unwrap());
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("=== First - "));
        assert!(lines[1].starts_with("=== Second - "));
    }

    #[test]
    fn test_format_competitor_without_equipment() {
        let summary = CompetitorSummary::from(&tennis_core::Competitor::new(
            "A",
            1.0,
            1.0,
            1,
            "X",
            42.0,
            tennis_core::CompetitorKind::Rusher,
        ));
        assert_eq!(format_competitor(&summary), "A (X, rusher) racket=- shoes=-");
    }
}
