//! Racket definitions
//!
//! Every racket derives three synthetic scalars from its physical attributes
//! through fixed step tables. The variant decides how the base values are
//! scaled; the stringing adds a second multiplier on top.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame length (mm) -> base power
pub const POWER_TABLE: [(u32, f64); 5] = [(680, 2.0), (690, 4.0), (700, 6.0), (720, 8.0), (740, 10.0)];

/// Head size (cm²) -> base control
pub const CONTROL_TABLE: [(u32, f64); 5] = [(600, 10.0), (630, 8.0), (650, 6.0), (680, 4.0), (720, 2.0)];

/// Weight (g) -> base speed
pub const SPEED_TABLE: [(u32, f64); 5] = [(220, 10.0), (260, 8.0), (300, 6.0), (320, 4.0), (340, 2.0)];

/// Power multiplier applied by power-biased frames
pub const POWER_FRAME_FACTOR: f64 = 1.5;

/// Control multiplier applied by control-biased frames
pub const CONTROL_FRAME_FACTOR: f64 = 1.5;

/// Speed multiplier applied by control-biased frames
pub const CONTROL_FRAME_SPEED_FACTOR: f64 = 1.2;

/// Exact-key lookup. Keys missing from the table map to 0, no interpolation.
fn step_lookup(table: &[(u32, f64)], key: u32) -> f64 {
    table
        .iter()
        .find(|&&(k, _)| k == key)
        .map(|&(_, v)| v)
        .unwrap_or(0.0)
}

/// String bed pattern
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stringing {
    Open,
    Closed,
}

impl Stringing {
    pub fn power_multiplier(self) -> f64 {
        match self {
            Stringing::Open => 1.2,
            Stringing::Closed => 0.8,
        }
    }

    pub fn control_multiplier(self) -> f64 {
        match self {
            Stringing::Open => 0.8,
            Stringing::Closed => 1.2,
        }
    }
}

impl fmt::Display for Stringing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stringing::Open => write!(f, "open"),
            Stringing::Closed => write!(f, "closed"),
        }
    }
}

/// Racket variant
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum RacketKind {
    /// Scales power up, control untouched
    Power,
    /// Power unscaled, control and speed scaled up
    Control,
    /// Caller-chosen coefficients for both axes
    Balanced {
        power_coefficient: f64,
        control_coefficient: f64,
    },
}

impl RacketKind {
    pub fn label(&self) -> &'static str {
        match self {
            RacketKind::Power => "power",
            RacketKind::Control => "control",
            RacketKind::Balanced { .. } => "balanced",
        }
    }
}

/// A racket as it sits in the pool or in a competitor's hand
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Racket {
    pub model: String,
    /// Grams
    pub weight: u32,
    /// Millimetres
    pub length: u32,
    /// Square centimetres
    pub head_size: u32,
    pub stringing: Stringing,
    pub kind: RacketKind,
}

impl Racket {
    pub fn new(
        model: impl Into<String>,
        weight: u32,
        length: u32,
        head_size: u32,
        stringing: Stringing,
        kind: RacketKind,
    ) -> Self {
        Self {
            model: model.into(),
            weight,
            length,
            head_size,
            stringing,
            kind,
        }
    }

    /// Power-biased frame
    pub fn power_frame(model: impl Into<String>, weight: u32, length: u32, head_size: u32, stringing: Stringing) -> Self {
        Self::new(model, weight, length, head_size, stringing, RacketKind::Power)
    }

    /// Control-biased frame
    pub fn control_frame(model: impl Into<String>, weight: u32, length: u32, head_size: u32, stringing: Stringing) -> Self {
        Self::new(model, weight, length, head_size, stringing, RacketKind::Control)
    }

    /// Balanced frame with explicit coefficients
    pub fn balanced_frame(
        model: impl Into<String>,
        weight: u32,
        length: u32,
        head_size: u32,
        stringing: Stringing,
        power_coefficient: f64,
        control_coefficient: f64,
    ) -> Self {
        Self::new(
            model,
            weight,
            length,
            head_size,
            stringing,
            RacketKind::Balanced {
                power_coefficient,
                control_coefficient,
            },
        )
    }

    pub fn base_power(&self) -> f64 {
        step_lookup(&POWER_TABLE, self.length)
    }

    pub fn base_control(&self) -> f64 {
        step_lookup(&CONTROL_TABLE, self.head_size)
    }

    pub fn base_speed(&self) -> f64 {
        step_lookup(&SPEED_TABLE, self.weight)
    }

    /// Power used for scoring and for pool ordering
    pub fn power(&self) -> f64 {
        let base = self.base_power();
        match self.kind {
            RacketKind::Power => base * POWER_FRAME_FACTOR * self.stringing.power_multiplier(),
            RacketKind::Control => base,
            RacketKind::Balanced { power_coefficient, .. } => base * power_coefficient,
        }
    }

    /// Control used for scoring
    pub fn control(&self) -> f64 {
        let base = self.base_control() * self.stringing.control_multiplier();
        match self.kind {
            RacketKind::Power => base,
            RacketKind::Control => base * CONTROL_FRAME_FACTOR,
            RacketKind::Balanced { control_coefficient, .. } => base * control_coefficient,
        }
    }

    /// Swing speed. Reported only; scoring does not read it.
    pub fn speed(&self) -> f64 {
        let base = self.base_speed();
        match self.kind {
            RacketKind::Control => base * CONTROL_FRAME_SPEED_FACTOR,
            _ => base,
        }
    }
}

impl fmt::Display for Racket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} racket, {} strings, {}g/{}mm/{}cm²) power={:.2} control={:.2} speed={:.2}",
            self.model,
            self.kind.label(),
            self.stringing,
            self.weight,
            self.length,
            self.head_size,
            self.power(),
            self.control(),
            self.speed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_step_tables() {
        let r = Racket::control_frame("probe", 300, 700, 650, Stringing::Closed);
        assert_eq!(r.base_power(), 6.0);
        assert_eq!(r.base_control(), 6.0);
        assert_eq!(r.base_speed(), 6.0);
    }

    #[test]
    fn test_unlisted_values_map_to_zero() {
        let r = Racket::power_frame("odd", 250, 685, 640, Stringing::Open);
        assert_eq!(r.base_power(), 0.0);
        assert_eq!(r.base_control(), 0.0);
        assert_eq!(r.base_speed(), 0.0);
        assert_eq!(r.power(), 0.0);
        assert_eq!(r.control(), 0.0);
    }

    #[test]
    fn test_control_frame_power_is_unscaled() {
        let a = Racket::control_frame("a", 340, 680, 720, Stringing::Closed);
        let b = Racket::control_frame("b", 220, 690, 650, Stringing::Open);
        assert_eq!(a.power(), 2.0);
        assert_eq!(b.power(), 4.0);
    }

    #[test]
    fn test_variant_multipliers() {
        let power = Racket::power_frame("p", 260, 690, 680, Stringing::Open);
        assert!((power.power() - 4.0 * 1.5 * 1.2).abs() < EPS);
        assert!((power.control() - 4.0 * 0.8).abs() < EPS);

        let control = Racket::control_frame("c", 340, 740, 600, Stringing::Closed);
        assert!((control.power() - 10.0).abs() < EPS);
        assert!((control.control() - 10.0 * 1.2 * 1.5).abs() < EPS);
        assert!((control.speed() - 2.0 * 1.2).abs() < EPS);

        let balanced = Racket::balanced_frame("b", 220, 690, 600, Stringing::Closed, 2.5, 4.0);
        assert!((balanced.power() - 4.0 * 2.5).abs() < EPS);
        assert!((balanced.control() - 10.0 * 1.2 * 4.0).abs() < EPS);
        assert!((balanced.speed() - 10.0).abs() < EPS);
    }

    #[test]
    fn test_stringing_multipliers_differ() {
        assert!(Stringing::Open.power_multiplier() > Stringing::Closed.power_multiplier());
        assert!(Stringing::Closed.control_multiplier() > Stringing::Open.control_multiplier());
    }

    #[test]
    fn test_serde_kind_tagging() {
        let r = Racket::balanced_frame("Head Graphene", 320, 690, 630, Stringing::Open, 6.0, 2.0);
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"variant\":\"balanced\""));
        assert!(json.contains("\"stringing\":\"open\""));
        let back: Racket = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
