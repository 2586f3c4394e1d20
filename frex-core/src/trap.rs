//! Orbit trap shapes.
//!
//! A trap shape measures how far an orbit point, already translated relative
//! to the trap center, lies from the shape. Zero means the point sits on it.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrapShape {
    /// Distance to the nearer of the two axes: `min(|x|, |y|)`.
    #[default]
    Stings,
    /// Distance to the nearer of the two diagonals.
    Diagonals,
    /// Axes and diagonals combined.
    Star,
    /// Unit circle, measured on the squared radius.
    Ring,
    /// Circles of squared radius 1 and 2.
    DoubleRing,
    /// Zero set of `x^3 - x`, measured along y.
    Cubic,
}

impl TrapShape {
    #[inline]
    pub fn distance(self, x: f32, y: f32) -> f32 {
        match self {
            TrapShape::Stings => x.abs().min(y.abs()),
            TrapShape::Diagonals => (y - x).abs().min((y + x).abs()),
            TrapShape::Star => x
                .abs()
                .min((y - x).abs())
                .min(y.abs().min((y + x).abs())),
            TrapShape::Ring => (x * x + y * y - 1.0).abs(),
            TrapShape::DoubleRing => {
                let r = x * x + y * y;
                (r - 1.0).abs().min((r - 2.0).abs())
            }
            TrapShape::Cubic => ((x + 1.0) * x * (x - 1.0)).abs(),
        }
    }
}
