//! Competitors and match scoring
//!
//! A match is two exchanges: the first competitor serves and the second
//! returns, then the roles swap. Serve points always count. Return points
//! only count when the return beats the serve it answers.

use serde::{Deserialize, Serialize};

use crate::footwear::Footwear;
use crate::racket::Racket;

/// Multiplier used when a competitor has no footwear
pub const BAREFOOT_BONUS: f64 = 1.0;

/// Playing style. Only affects the strike that follows a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitorKind {
    /// Baseline striker
    #[default]
    Striker,
    /// Net rusher
    Rusher,
}

impl CompetitorKind {
    pub fn label(self) -> &'static str {
        match self {
            CompetitorKind::Striker => "striker",
            CompetitorKind::Rusher => "rusher",
        }
    }
}

/// A registered player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub serve_skill: f64,
    pub return_skill: f64,
    pub ranking: u32,
    pub country: String,
    pub shoe_size: f64,
    #[serde(default)]
    pub kind: CompetitorKind,
    #[serde(skip)]
    round_score: f64,
    #[serde(skip)]
    elimination_rank: Option<u32>,
    #[serde(skip)]
    racket: Option<Racket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    footwear: Option<Footwear>,
}

impl Competitor {
    pub fn new(
        name: impl Into<String>,
        serve_skill: f64,
        return_skill: f64,
        ranking: u32,
        country: impl Into<String>,
        shoe_size: f64,
        kind: CompetitorKind,
    ) -> Self {
        Self {
            name: name.into(),
            serve_skill,
            return_skill,
            ranking,
            country: country.into(),
            shoe_size,
            kind,
            round_score: 0.0,
            elimination_rank: None,
            racket: None,
            footwear: None,
        }
    }

    /// Arrive at the tournament already wearing a pair
    pub fn with_footwear(mut self, footwear: Footwear) -> Self {
        self.footwear = Some(footwear);
        self
    }

    pub fn round_score(&self) -> f64 {
        self.round_score
    }

    pub fn add_points(&mut self, points: f64) {
        self.round_score += points;
    }

    pub fn reset_round_score(&mut self) {
        self.round_score = 0.0;
    }

    pub fn elimination_rank(&self) -> Option<u32> {
        self.elimination_rank
    }

    /// Record the 1-based elimination order
    pub fn mark_eliminated(&mut self, rank: u32) {
        self.elimination_rank = Some(rank);
    }

    /// Drop everything left over from a previous tournament: score, rank
    /// and racket. Personal footwear stays. Returns the racket it carried.
    pub fn clear_tournament_state(&mut self) -> Option<Racket> {
        self.round_score = 0.0;
        self.elimination_rank = None;
        self.racket.take()
    }

    pub fn racket(&self) -> Option<&Racket> {
        self.racket.as_ref()
    }

    /// Hand over a racket, returning the one previously held
    pub fn equip_racket(&mut self, racket: Racket) -> Option<Racket> {
        self.racket.replace(racket)
    }

    pub fn footwear(&self) -> Option<&Footwear> {
        self.footwear.as_ref()
    }

    /// Put on a pair, returning the one previously worn
    pub fn equip_footwear(&mut self, footwear: Footwear) -> Option<Footwear> {
        self.footwear.replace(footwear)
    }

    /// Sum used by the tie-break
    pub fn combined_skill(&self) -> f64 {
        self.serve_skill + self.return_skill
    }

    fn racket_factor(&self) -> f64 {
        self.racket.as_ref().map_or(0.0, |r| r.power() * r.control())
    }

    pub fn serve_value(&self) -> f64 {
        let bonus = self.footwear.as_ref().map_or(BAREFOOT_BONUS, Footwear::serve_bonus);
        self.racket_factor() * bonus * self.serve_skill
    }

    pub fn return_value(&self) -> f64 {
        let bonus = self.footwear.as_ref().map_or(BAREFOOT_BONUS, Footwear::return_bonus);
        self.racket_factor() * bonus * self.return_skill
    }

    /// Post-exchange shot. Purely descriptive.
    pub fn strike(&self) {
        match self.kind {
            CompetitorKind::Striker => {
                tracing::debug!("{} drives a heavy groundstroke from the baseline", self.name)
            }
            CompetitorKind::Rusher => {
                tracing::debug!("{} charges the net and volleys", self.name)
            }
        }
    }

    /// One-line description for transcripts and listings
    pub fn describe(&self) -> String {
        let mut line = format!(
            "{} ({}, {}) serve={} return={} ranking={} shoe={}",
            self.name,
            self.country,
            self.kind.label(),
            self.serve_skill,
            self.return_skill,
            self.ranking,
            self.shoe_size
        );
        match &self.footwear {
            Some(f) => line.push_str(&format!("\n    shoes:  {}", f)),
            None => line.push_str("\n    shoes:  none"),
        }
        if let Some(r) = &self.racket {
            line.push_str(&format!("\n    racket: {}", r));
        }
        line
    }
}

/// Points earned in one serve/return exchange
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Exchange {
    pub server_points: f64,
    pub returner_points: f64,
}

/// Resolve one serve against one return
pub fn exchange(server: &Competitor, returner: &Competitor) -> Exchange {
    let serve = server.serve_value();
    let ret = returner.return_value();
    Exchange {
        server_points: serve,
        returner_points: if ret > serve { ret } else { 0.0 },
    }
}

/// Points earned by both sides of a match
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchPoints {
    pub first: f64,
    pub second: f64,
}

/// Score a full match without touching either competitor.
///
/// `first` serves first. Passing the same competitor twice is allowed and
/// yields the points that competitor would earn against itself.
pub fn score_match(first: &Competitor, second: &Competitor) -> MatchPoints {
    let opening = exchange(first, second);
    let reply = exchange(second, first);
    MatchPoints {
        first: opening.server_points + reply.returner_points,
        second: opening.returner_points + reply.server_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::racket::Stringing;

    const EPS: f64 = 1e-9;

    fn player(name: &str, serve: f64, ret: f64) -> Competitor {
        Competitor::new(name, serve, ret, 1, "Nowhere", 42.0, CompetitorKind::Striker)
    }

    #[test]
    fn test_unequipped_competitor_scores_nothing() {
        let c = player("a", 90.0, 80.0);
        assert_eq!(c.serve_value(), 0.0);
        assert_eq!(c.return_value(), 0.0);
    }

    #[test]
    fn test_serve_value_formula() {
        let mut c = player("a", 10.0, 20.0);
        let racket = Racket::control_frame("r", 300, 690, 650, Stringing::Closed);
        let expected_factor = racket.power() * racket.control();
        c.equip_racket(racket);
        assert!((c.serve_value() - expected_factor * 10.0).abs() < EPS);
        assert!((c.return_value() - expected_factor * 20.0).abs() < EPS);

        let shoes = Footwear::grippy("g", 42.0, 4.0);
        let (sb, rb) = (shoes.serve_bonus(), shoes.return_bonus());
        c.equip_footwear(shoes);
        assert!((c.serve_value() - expected_factor * sb * 10.0).abs() < EPS);
        assert!((c.return_value() - expected_factor * rb * 20.0).abs() < EPS);
    }

    #[test]
    fn test_return_only_scores_when_it_beats_the_serve() {
        let racket = Racket::control_frame("r", 300, 690, 650, Stringing::Closed);
        let mut server = player("server", 50.0, 10.0);
        let mut weak = player("weak", 10.0, 40.0);
        let mut strong = player("strong", 10.0, 60.0);
        server.equip_racket(racket.clone());
        weak.equip_racket(racket.clone());
        strong.equip_racket(racket);

        let e = exchange(&server, &weak);
        assert!(e.server_points > 0.0);
        assert_eq!(e.returner_points, 0.0);

        let e = exchange(&server, &strong);
        assert!((e.returner_points - strong.return_value()).abs() < EPS);
    }

    #[test]
    fn test_score_match_is_two_exchanges() {
        let racket = Racket::control_frame("r", 300, 700, 630, Stringing::Open);
        let mut a = player("a", 30.0, 70.0);
        let mut b = player("b", 40.0, 20.0);
        a.equip_racket(racket.clone());
        b.equip_racket(racket);

        let pts = score_match(&a, &b);
        let first = exchange(&a, &b);
        let second = exchange(&b, &a);
        assert!((pts.first - (first.server_points + second.returner_points)).abs() < EPS);
        assert!((pts.second - (first.returner_points + second.server_points)).abs() < EPS);
    }

    #[test]
    fn test_equip_returns_previous_items() {
        let mut c = player("a", 1.0, 1.0).with_footwear(Footwear::cushioned("own", 42.0, 2.0));
        let old = c.equip_footwear(Footwear::grippy("pool", 42.0, 5.0));
        assert_eq!(old.map(|f| f.model), Some("own".to_string()));

        assert!(c.equip_racket(Racket::power_frame("x", 260, 680, 680, Stringing::Open)).is_none());
        let old = c.equip_racket(Racket::power_frame("y", 260, 690, 680, Stringing::Open));
        assert_eq!(old.map(|r| r.model), Some("x".to_string()));
    }

    #[test]
    fn test_elimination_rank_takes_latest_mark() {
        let mut c = player("a", 1.0, 1.0);
        assert_eq!(c.elimination_rank(), None);
        c.mark_eliminated(3);
        c.mark_eliminated(5);
        assert_eq!(c.elimination_rank(), Some(5));
    }

    #[test]
    fn test_round_score_accumulates_and_resets() {
        let mut c = player("a", 1.0, 1.0);
        c.add_points(2.5);
        c.add_points(1.5);
        assert_eq!(c.round_score(), 4.0);
        c.reset_round_score();
        assert_eq!(c.round_score(), 0.0);
    }

    #[test]
    fn test_clear_tournament_state_keeps_own_shoes() {
        let mut c = player("a", 1.0, 1.0).with_footwear(Footwear::grippy("own", 42.0, 3.0));
        c.equip_racket(Racket::power_frame("x", 260, 680, 680, Stringing::Open));
        c.add_points(12.0);
        c.mark_eliminated(4);

        let carried = c.clear_tournament_state();
        assert_eq!(carried.map(|r| r.model), Some("x".to_string()));
        assert_eq!(c.round_score(), 0.0);
        assert_eq!(c.elimination_rank(), None);
        assert!(c.racket().is_none());
        assert_eq!(c.footwear().unwrap().model, "own");
    }

    #[test]
    fn test_tournament_state_is_not_read_from_json() {
        let json = r#"{
            "name": "B", "serve_skill": 10, "return_skill": 10, "ranking": 2,
            "country": "X", "shoe_size": 40,
            "round_score": 1000000.0,
            "elimination_rank": 9,
            "racket": {"model": "smuggled", "weight": 300, "length": 740, "head_size": 600,
                       "stringing": "open", "kind": {"variant": "power"}}
        }"#;
        let c: Competitor = serde_json::from_str(json).unwrap();
        assert_eq!(c.round_score(), 0.0);
        assert_eq!(c.elimination_rank(), None);
        assert!(c.racket().is_none());

        let back = serde_json::to_string(&c).unwrap();
        assert!(!back.contains("elimination_rank"));
        assert!(!back.contains("racket"));
    }
}
