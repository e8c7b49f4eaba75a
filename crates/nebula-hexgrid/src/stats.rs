//! Grid-wide cell area statistics.

use serde::{Deserialize, Serialize};

use crate::cell::HexCell;

/// Summary of cell areas on the unit sphere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl AreaStatistics {
    /// Aggregate a sequence of areas, skipping non-finite values. A sequence
    /// with no finite area yields all zeros.
    pub fn from_areas(areas: &[f64]) -> Self {
        let finite = || areas.iter().copied().filter(|a| a.is_finite());
        let count = finite().count();
        if count == 0 {
            return Self::default();
        }

        let (min, max, sum) = finite().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), a| (min.min(a), max.max(a), sum + a),
        );
        let n = count as f64;
        // Rounding can push the mean of near-identical values a ulp outside the range.
        let mean = (sum / n).clamp(min, max);
        let variance = finite().map(|a| (a - mean) * (a - mean)).sum::<f64>() / n;

        Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Statistics over the unit-sphere area of every cell.
    pub fn compute(cells: &[HexCell]) -> Self {
        let areas: Vec<f64> = cells.iter().map(|c| c.area(1.0)).collect();
        Self::from_areas(&areas)
    }

    /// `max / min`, or 0 for an empty grid. 1.0 means perfectly uniform cells.
    pub fn max_to_min_ratio(&self) -> f64 {
        if self.min > 0.0 { self.max / self.min } else { 0.0 }
    }
}
