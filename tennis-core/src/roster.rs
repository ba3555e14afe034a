//! Roster - everything a tournament needs before it starts

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::competitor::{Competitor, CompetitorKind};
use crate::footwear::{Footwear, FootwearKind};
use crate::racket::{Racket, RacketKind, Stringing, CONTROL_TABLE, POWER_TABLE, SPEED_TABLE};

/// Errors raised while reading or validating a roster
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("cannot access roster file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed roster: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid competitor '{name}': {reason}")]
    InvalidCompetitor { name: String, reason: String },
}

/// Competitors plus the equipment pool they will share
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub name: String,
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub footwear: Vec<Footwear>,
    #[serde(default)]
    pub rackets: Vec<Racket>,
}

impl Roster {
    /// Load and validate a JSON roster
    pub fn load(path: &Path) -> Result<Self, RosterError> {
        let content = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let roster: Roster = serde_json::from_str(&content)?;
        roster.validate()?;
        Ok(roster)
    }

    /// Save as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), RosterError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject competitors whose numbers would poison the scoring
    pub fn validate(&self) -> Result<(), RosterError> {
        for c in &self.competitors {
            let invalid = |reason: &str| RosterError::InvalidCompetitor {
                name: c.name.clone(),
                reason: reason.to_string(),
            };
            if c.name.trim().is_empty() {
                return Err(invalid("empty name"));
            }
            if !c.serve_skill.is_finite() || c.serve_skill < 0.0 {
                return Err(invalid("serve skill must be a non-negative number"));
            }
            if !c.return_skill.is_finite() || c.return_skill < 0.0 {
                return Err(invalid("return skill must be a non-negative number"));
            }
            if !c.shoe_size.is_finite() || c.shoe_size <= 0.0 {
                return Err(invalid("shoe size must be positive"));
            }
        }
        Ok(())
    }

    /// The reference data set: eight players, fifteen spare pairs, twelve rackets
    pub fn sample() -> Self {
        use CompetitorKind::{Rusher, Striker};

        let competitors = vec![
            Competitor::new("Novak Djokovic", 90.0, 80.0, 1, "Serbia", 42.0, Striker)
                .with_footwear(Footwear::cushioned("Air Zoom Vapor Pro", 42.0, 5.0)),
            Competitor::new("Ashleigh Barty", 70.0, 80.0, 1, "Australia", 40.0, Rusher)
                .with_footwear(Footwear::grippy("Court Vapor React", 40.0, 5.0)),
            Competitor::new("Stefanos Tsitsipas", 55.0, 48.0, 3, "Greece", 43.0, Striker)
                .with_footwear(Footwear::cushioned("Zoom GP Turbo", 43.0, 3.5)),
            Competitor::new("Karolina Pliskova", 67.0, 68.5, 3, "Czech Republic", 39.0, Rusher)
                .with_footwear(Footwear::grippy("Court Lite", 39.0, 3.0)),
            Competitor::new("Elina Svitolina", 55.5, 68.5, 4, "Ukraine", 40.0, Striker)
                .with_footwear(Footwear::cushioned("UberSonic 4K", 40.0, 6.0)),
            Competitor::new("Alexander Zverev", 59.0, 49.5, 4, "Germany", 42.0, Rusher)
                .with_footwear(Footwear::grippy("CourtJam Bounce", 42.0, 3.5)),
            Competitor::new("Aryna Sabalenka", 67.5, 79.5, 2, "Belarus", 40.0, Striker)
                .with_footwear(Footwear::grippy("Gel-Resolution 8 GS", 40.0, 4.0)),
            Competitor::new("Daniil Medvedev", 79.0, 68.0, 2, "Russia", 42.0, Rusher)
                .with_footwear(Footwear::cushioned("Vapor Lite", 42.0, 3.0)),
        ];

        let footwear = vec![
            Footwear::cushioned("Lotto Space", 40.0, 5.0),
            Footwear::cushioned("K-Swiss Express", 42.0, 3.0),
            Footwear::cushioned("Babolat Jet Tere", 42.0, 5.5),
            Footwear::cushioned("Lotto Mirage", 40.0, 6.0),
            Footwear::cushioned("K-Swiss Hypercourt", 40.0, 5.0),
            Footwear::cushioned("Wilson Rush", 42.0, 3.5),
            Footwear::cushioned("Head Revolt", 40.0, 5.0),
            Footwear::grippy("Joma Slam", 40.0, 3.0),
            Footwear::grippy("Adidas Gamecourt", 40.0, 5.0),
            Footwear::grippy("Asics Gel-Game", 42.0, 4.5),
            Footwear::grippy("Asics Solution", 42.0, 3.0),
            Footwear::grippy("Nike Air Zoom", 40.0, 5.0),
            Footwear::grippy("Nike Zoom Vapor", 42.0, 4.0),
            Footwear::grippy("Wilson Kaos", 41.0, 5.0),
            Footwear::grippy("Head Revolt Pro", 42.0, 4.5),
        ];

        let rackets = vec![
            Racket::power_frame("Head Radical", 260, 680, 680, Stringing::Open),
            Racket::power_frame("Wilson Blade", 260, 690, 680, Stringing::Open),
            Racket::power_frame("Dunlop CX200", 300, 700, 630, Stringing::Open),
            Racket::power_frame("Yonex Vcore", 300, 680, 650, Stringing::Closed),
            Racket::control_frame("Babolat Drive", 340, 740, 600, Stringing::Closed),
            Racket::control_frame("Pure Aero", 340, 680, 720, Stringing::Closed),
            Racket::control_frame("TFlash 300", 300, 680, 680, Stringing::Closed),
            Racket::control_frame("Wilson Silver", 220, 690, 650, Stringing::Open),
            Racket::balanced_frame("Prince Hornet 100", 220, 690, 600, Stringing::Closed, 2.5, 4.0),
            Racket::balanced_frame("Head Graphene", 320, 690, 630, Stringing::Open, 6.0, 2.0),
            Racket::balanced_frame("Prince TT Bandit", 220, 680, 680, Stringing::Closed, 6.0, 3.0),
            Racket::balanced_frame("Class 100L", 320, 680, 720, Stringing::Open, 8.0, 1.0),
        ];

        Self {
            name: "Extremadura Open".to_string(),
            competitors,
            footwear,
            rackets,
        }
    }

    /// Seeded random roster with `num_competitors` players.
    ///
    /// The pool always holds at least one racket per player, plus a spare
    /// half-field for reassignment, and two pairs of shoes per player drawn
    /// from the same size range.
    pub fn random<R: Rng>(rng: &mut R, name: &str, num_competitors: usize) -> Self {
        const SIZES: [f64; 5] = [39.0, 40.0, 41.0, 42.0, 43.0];
        const COUNTRIES: [&str; 8] = [
            "Spain", "France", "Italy", "Japan", "Chile", "Canada", "Norway", "Kenya",
        ];

        let competitors = (0..num_competitors)
            .map(|i| {
                let kind = if rng.gen_bool(0.5) {
                    CompetitorKind::Striker
                } else {
                    CompetitorKind::Rusher
                };
                Competitor::new(
                    format!("Player {:02}", i + 1),
                    rng.gen_range(40.0..95.0_f64).round(),
                    rng.gen_range(40.0..95.0_f64).round(),
                    rng.gen_range(1..=num_competitors.max(1) as u32),
                    *COUNTRIES.choose(rng).unwrap_or(&"Nowhere"),
                    *SIZES.choose(rng).unwrap_or(&42.0),
                    kind,
                )
            })
            .collect();

        let footwear = (0..num_competitors * 2)
            .map(|i| {
                let kind = if rng.gen_bool(0.5) {
                    FootwearKind::Cushioned
                } else {
                    FootwearKind::Grippy
                };
                let quality = (rng.gen_range(2.0..7.0_f64) * 2.0).round() / 2.0;
                Footwear::new(
                    format!("Shoe {:03}", i + 1),
                    *SIZES.choose(rng).unwrap_or(&42.0),
                    quality,
                    kind,
                )
            })
            .collect();

        let racket_count = num_competitors + num_competitors / 2;
        let rackets = (0..racket_count)
            .map(|i| {
                let kind = match rng.gen_range(0..3) {
                    0 => RacketKind::Power,
                    1 => RacketKind::Control,
                    _ => RacketKind::Balanced {
                        power_coefficient: rng.gen_range(1..=8) as f64,
                        control_coefficient: rng.gen_range(1..=4) as f64,
                    },
                };
                let stringing = if rng.gen_bool(0.5) {
                    Stringing::Open
                } else {
                    Stringing::Closed
                };
                Racket::new(
                    format!("Frame {:03}", i + 1),
                    pick_key(rng, &SPEED_TABLE),
                    pick_key(rng, &POWER_TABLE),
                    pick_key(rng, &CONTROL_TABLE),
                    stringing,
                    kind,
                )
            })
            .collect();

        Self {
            name: name.to_string(),
            competitors,
            footwear,
            rackets,
        }
    }

    /// Random roster from a seed
    pub fn seeded(seed: u64, num_competitors: usize) -> Self {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        Self::random(&mut rng, &format!("Random Open #{}", seed), num_competitors)
    }
}

fn pick_key<R: Rng>(rng: &mut R, table: &[(u32, f64)]) -> u32 {
    table.choose(rng).map_or(0, |&(k, _)| k)
}
