//! Footwear definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bonus gained per quality point on the favoured stroke
pub const FAVOURED_SLOPE: f64 = 0.15;

/// Bonus gained per quality point on the other stroke
pub const SECONDARY_SLOPE: f64 = 0.05;

/// Shoe variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootwearKind {
    /// Favours the return
    Cushioned,
    /// Favours the serve
    Grippy,
}

impl FootwearKind {
    pub fn label(self) -> &'static str {
        match self {
            FootwearKind::Cushioned => "cushioned",
            FootwearKind::Grippy => "grippy",
        }
    }
}

/// A pair of shoes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footwear {
    pub model: String,
    /// EU size; matched exactly against a competitor's shoe size
    pub size: f64,
    /// Price/quality rating
    pub quality: f64,
    pub kind: FootwearKind,
}

impl Footwear {
    pub fn new(model: impl Into<String>, size: f64, quality: f64, kind: FootwearKind) -> Self {
        Self {
            model: model.into(),
            size,
            quality,
            kind,
        }
    }

    pub fn cushioned(model: impl Into<String>, size: f64, quality: f64) -> Self {
        Self::new(model, size, quality, FootwearKind::Cushioned)
    }

    pub fn grippy(model: impl Into<String>, size: f64, quality: f64) -> Self {
        Self::new(model, size, quality, FootwearKind::Grippy)
    }

    fn rating(&self) -> f64 {
        self.quality.max(0.0)
    }

    /// Serve multiplier, never below 1.0
    pub fn serve_bonus(&self) -> f64 {
        let slope = match self.kind {
            FootwearKind::Cushioned => SECONDARY_SLOPE,
            FootwearKind::Grippy => FAVOURED_SLOPE,
        };
        1.0 + slope * self.rating()
    }

    /// Return multiplier, never below 1.0
    pub fn return_bonus(&self) -> f64 {
        let slope = match self.kind {
            FootwearKind::Cushioned => FAVOURED_SLOPE,
            FootwearKind::Grippy => SECONDARY_SLOPE,
        };
        1.0 + slope * self.rating()
    }

    pub fn fits(&self, shoe_size: f64) -> bool {
        self.size == shoe_size
    }
}

impl fmt::Display for Footwear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} shoes, size {}, quality {}) serve={:.2} return={:.2}",
            self.model,
            self.kind.label(),
            self.size,
            self.quality,
            self.serve_bonus(),
            self.return_bonus()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_bias() {
        let cushioned = Footwear::cushioned("Lotto Space", 40.0, 5.0);
        let grippy = Footwear::grippy("Adidas Gamecourt", 40.0, 5.0);

        assert!(cushioned.return_bonus() > cushioned.serve_bonus());
        assert!(grippy.serve_bonus() > grippy.return_bonus());
        assert_eq!(cushioned.return_bonus(), grippy.serve_bonus());
    }

    #[test]
    fn test_quality_is_monotonic() {
        for kind in [FootwearKind::Cushioned, FootwearKind::Grippy] {
            let mut last = (0.0, 0.0);
            for q in 0..10 {
                let shoe = Footwear::new("m", 42.0, q as f64, kind);
                let now = (shoe.serve_bonus(), shoe.return_bonus());
                assert!(now.0 >= last.0 && now.1 >= last.1);
                last = now;
            }
        }
    }

    #[test]
    fn test_negative_quality_is_floored() {
        let shoe = Footwear::grippy("worn", 41.0, -3.0);
        assert_eq!(shoe.serve_bonus(), 1.0);
        assert_eq!(shoe.return_bonus(), 1.0);
    }

    #[test]
    fn test_fits_exact_size_only() {
        let shoe = Footwear::cushioned("Wilson Rush", 42.0, 3.5);
        assert!(shoe.fits(42.0));
        assert!(!shoe.fits(42.5));
    }
}
