use std::f64::consts::TAU;
use std::str::FromStr;

use crate::foundation::error::NodeweaveError;

/// Easing functions used to map normalized tween progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    #[default]
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Overshoots the target slightly, then settles.
    OutBack,
    /// Decaying oscillation around the target.
    OutElastic,
}

impl Ease {
    /// Every easing curve, in declaration order.
    pub const ALL: [Ease; 9] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::OutBack,
        Ease::OutElastic,
    ];

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    ///
    /// `OutBack` and `OutElastic` leave `[0, 1]` between the endpoints.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::OutBack => {
                const C1: f64 = 1.70158;
                const C3: f64 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
            Self::OutElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                const C4: f64 = TAU / 3.0;
                2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
            }
        }
    }

    /// Canonical name, as accepted by [`Ease::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "in-quad",
            Self::OutQuad => "out-quad",
            Self::InOutQuad => "in-out-quad",
            Self::InCubic => "in-cubic",
            Self::OutCubic => "out-cubic",
            Self::InOutCubic => "in-out-cubic",
            Self::OutBack => "out-back",
            Self::OutElastic => "out-elastic",
        }
    }
}

impl FromStr for Ease {
    type Err = NodeweaveError;

    /// Accepts kebab-case names plus the common camelCase spellings (`easeOutCubic`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .trim_start_matches("ease")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|e| e.name().replace('-', "") == norm)
            .ok_or_else(|| NodeweaveError::validation(format!("unknown easing '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
