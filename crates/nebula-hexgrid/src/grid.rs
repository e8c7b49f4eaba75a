//! The finished grid: owned cells plus derived counts and statistics.

use std::ops::Range;
use std::sync::LazyLock;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::cell::{CellId, CellKind, HexCell};
use crate::level::{SubdivisionLevel, expected_cell_count};
use crate::stats::AreaStatistics;
use crate::validate::{ValidationReport, validate_grid};

static INVALID_CELL: LazyLock<HexCell> = LazyLock::new(HexCell::invalid);

/// Cell tallies by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    pub total: usize,
    pub hexagons: usize,
    pub pentagons: usize,
}

impl CellCounts {
    pub fn tally(cells: &[HexCell]) -> Self {
        let pentagons = cells
            .iter()
            .filter(|c| c.kind == CellKind::Pentagon)
            .count();
        Self {
            total: cells.len(),
            hexagons: cells.len() - pentagons,
            pentagons,
        }
    }
}

/// Compact description of a grid for logs and reports.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSummary {
    pub level: u32,
    pub counts: CellCounts,
    pub statistics: AreaStatistics,
}

/// A spherical grid of hexagons and twelve pentagons.
///
/// Cells are stored in id order and are read-only once the grid is built.
/// Neighbor relations are plain [`CellId`]s resolved through the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexGrid {
    level: SubdivisionLevel,
    cells: Vec<HexCell>,
    counts: CellCounts,
    pentagon_ids: Vec<CellId>,
    statistics: AreaStatistics,
}

impl HexGrid {
    /// Wrap fully built cells, deriving counts, pentagon ids and statistics.
    pub(crate) fn assemble(level: SubdivisionLevel, cells: Vec<HexCell>) -> Self {
        let counts = CellCounts::tally(&cells);
        let pentagon_ids = cells
            .iter()
            .filter(|c| c.is_pentagon())
            .map(|c| c.id)
            .collect();
        let statistics = AreaStatistics::compute(&cells);
        Self {
            level,
            cells,
            counts,
            pentagon_ids,
            statistics,
        }
    }

    /// `10·4^level + 2`. Usable without a grid instance.
    pub const fn expected_cell_count(level: u32) -> u64 {
        expected_cell_count(level)
    }

    pub fn level(&self) -> SubdivisionLevel {
        self.level
    }

    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    #[cfg(test)]
    pub(crate) fn cells_mut(&mut self) -> &mut Vec<HexCell> {
        &mut self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn counts(&self) -> CellCounts {
        self.counts
    }

    pub fn total_cell_count(&self) -> usize {
        self.counts.total
    }

    pub fn hexagon_count(&self) -> usize {
        self.counts.hexagons
    }

    pub fn pentagon_count(&self) -> usize {
        self.counts.pentagons
    }

    /// Ids of the twelve pentagons, ascending.
    pub fn pentagon_ids(&self) -> &[CellId] {
        &self.pentagon_ids
    }

    pub fn statistics(&self) -> AreaStatistics {
        self.statistics
    }

    /// Recompute area statistics from the current cells.
    pub fn recompute_statistics(&mut self) {
        self.statistics = AreaStatistics::compute(&self.cells);
    }

    pub fn summary(&self) -> GridSummary {
        GridSummary {
            level: self.level.get(),
            counts: self.counts,
            statistics: self.statistics,
        }
    }

    /// Re-run every invariant check.
    pub fn validate(&self) -> ValidationReport {
        validate_grid(self)
    }

    /// The cell with `id`, or `None` if out of range.
    pub fn get(&self, id: CellId) -> Option<&HexCell> {
        self.cells.get(id.index())
    }

    /// The cell with `id`, or an invalid placeholder cell if out of range.
    pub fn cell(&self, id: CellId) -> &HexCell {
        self.get(id).unwrap_or(&*INVALID_CELL)
    }

    /// Neighbor ids of `id`; empty if out of range.
    pub fn neighbors(&self, id: CellId) -> &[CellId] {
        self.get(id).map(|c| c.neighbors.as_slice()).unwrap_or(&[])
    }

    /// Ids of the cells tagged with icosahedron face `face`.
    pub fn cells_on_face(&self, face: u8) -> Vec<CellId> {
        self.cells
            .iter()
            .filter(|c| c.face == face)
            .map(|c| c.id)
            .collect()
    }

    /// Cells whose id lies in `range`, clipped to the grid.
    pub fn cells_in_id_range(&self, range: Range<u32>) -> &[HexCell] {
        let end = (range.end as usize).min(self.cells.len());
        let start = (range.start as usize).min(end);
        &self.cells[start..end]
    }

    /// Cell whose center is closest to `direction`.
    ///
    /// Brute-force scan. Returns `None` for an empty grid or a zero direction.
    /// Ties resolve to the lower id.
    pub fn nearest_cell(&self, direction: DVec3) -> Option<CellId> {
        let dir = direction.try_normalize()?;
        let mut best = None;
        let mut best_dist = f64::INFINITY;
        for cell in &self.cells {
            let dist = dir.distance_squared(cell.position);
            if dist < best_dist {
                best_dist = dist;
                best = Some(cell.id);
            }
        }
        best
    }

    /// The `k` cells closest to `direction`, nearest first.
    ///
    /// Sorts the distance to every cell, then truncates; ties keep id order.
    /// Returns every cell when the grid has fewer than `k`.
    pub fn nearest_cells(&self, direction: DVec3, k: usize) -> Vec<CellId> {
        let Some(dir) = direction.try_normalize() else {
            return Vec::new();
        };
        if k == 0 {
            return Vec::new();
        }
        let mut by_distance: Vec<(f64, CellId)> = self
            .cells
            .iter()
            .map(|c| (dir.distance_squared(c.position), c.id))
            .collect();
        by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
        by_distance.truncate(k);
        by_distance.into_iter().map(|(_, id)| id).collect()
    }

    /// Cells whose great-circle angle from `direction` is at most `radius` radians.
    ///
    /// Ascending id order.
    pub fn cells_within_angular_radius(&self, direction: DVec3, radius: f64) -> Vec<CellId> {
        let Some(dir) = direction.try_normalize() else {
            return Vec::new();
        };
        self.cells
            .iter()
            .filter(|c| angle_between(dir, c.position) <= radius)
            .map(|c| c.id)
            .collect()
    }

    /// Cells whose straight-line distance from the normalized `direction` is at
    /// most `chord`.
    ///
    /// This is the squared-linear-distance comparison older callers relied on
    /// when asking for a "radius"; it differs from the angular query for
    /// larger radii. Ascending id order.
    pub fn cells_within_chord_distance(&self, direction: DVec3, chord: f64) -> Vec<CellId> {
        let Some(dir) = direction.try_normalize() else {
            return Vec::new();
        };
        let chord_sq = chord * chord;
        self.cells
            .iter()
            .filter(|c| dir.distance_squared(c.position) <= chord_sq)
            .map(|c| c.id)
            .collect()
    }
}

/// Great-circle angle between two unit vectors, robust near 0 and π.
pub(crate) fn angle_between(a: DVec3, b: DVec3) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}
