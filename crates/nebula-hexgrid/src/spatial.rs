//! Accelerated spatial queries over a [`HexGrid`].
//!
//! [`CubeBucketIndex`] projects every cell center onto the cube that encloses
//! the sphere and buckets it into an N×N grid per face. Each bucket keeps a
//! bounding cap (center direction plus angular radius), which gives a
//! conservative lower bound on the distance from any query to the bucket's
//! cells. Queries visit buckets nearest-bound first and stop once no remaining
//! bucket can improve the answer, so results match the brute-force scan.

use glam::DVec3;

use crate::cell::CellId;
use crate::grid::{HexGrid, angle_between};

/// Default number of buckets along each cube-face edge.
pub const DEFAULT_BUCKET_RESOLUTION: usize = 8;

/// Slack added to bucket bounds to absorb floating-point error.
const BOUND_EPSILON: f64 = 1e-9;

/// The query contract shared by the brute-force grid and accelerated indexes.
///
/// Every implementation returns identical results: nearest-first ordering with
/// ties broken by lower id, and ascending ids for radius queries.
pub trait CellLocator {
    /// Cell closest to `direction`, or `None` for an empty grid or zero direction.
    fn nearest_cell(&self, direction: DVec3) -> Option<CellId>;

    /// Up to `k` closest cells, nearest first.
    fn nearest_cells(&self, direction: DVec3, k: usize) -> Vec<CellId>;

    /// Cells within `radius` radians of great-circle angle.
    fn cells_within_angular_radius(&self, direction: DVec3, radius: f64) -> Vec<CellId>;

    /// Cells within straight-line distance `chord`.
    fn cells_within_chord_distance(&self, direction: DVec3, chord: f64) -> Vec<CellId>;
}

impl CellLocator for HexGrid {
    fn nearest_cell(&self, direction: DVec3) -> Option<CellId> {
        HexGrid::nearest_cell(self, direction)
    }

    fn nearest_cells(&self, direction: DVec3, k: usize) -> Vec<CellId> {
        HexGrid::nearest_cells(self, direction, k)
    }

    fn cells_within_angular_radius(&self, direction: DVec3, radius: f64) -> Vec<CellId> {
        HexGrid::cells_within_angular_radius(self, direction, radius)
    }

    fn cells_within_chord_distance(&self, direction: DVec3, chord: f64) -> Vec<CellId> {
        HexGrid::cells_within_chord_distance(self, direction, chord)
    }
}

/// Cells of one sphere patch and the cap enclosing them.
#[derive(Clone, Debug)]
struct Bucket {
    cells: Vec<CellId>,
    center: DVec3,
    /// Largest angle from `center` to any member cell.
    radius: f64,
}

impl Bucket {
    /// Lower bound on the angle from `dir` to any cell in this bucket.
    fn min_angle(&self, dir: DVec3) -> f64 {
        (angle_between(dir, self.center) - self.radius - BOUND_EPSILON).max(0.0)
    }
}

/// Squared chord length subtending `angle` on the unit sphere.
fn chord_sq_for_angle(angle: f64) -> f64 {
    2.0 - 2.0 * angle.cos()
}

/// Map a direction to `(face, u, v)` with `face` in 0..6 and `u, v` in [0, 1].
///
/// The face is picked by the dominant axis (X before Y before Z, positive
/// before negative on ties); `u, v` come from projecting onto that face plane.
fn cube_face_uv(dir: DVec3) -> (usize, f64, f64) {
    let a = dir.abs();
    let (face, major, s, t) = if a.x >= a.y && a.x >= a.z {
        if dir.x >= 0.0 {
            (0, dir.x, -dir.z, dir.y)
        } else {
            (1, -dir.x, dir.z, dir.y)
        }
    } else if a.y >= a.z {
        if dir.y >= 0.0 {
            (2, dir.y, dir.x, -dir.z)
        } else {
            (3, -dir.y, dir.x, dir.z)
        }
    } else if dir.z >= 0.0 {
        (4, dir.z, dir.x, dir.y)
    } else {
        (5, -dir.z, -dir.x, dir.y)
    };

    if major <= 0.0 {
        return (face, 0.5, 0.5);
    }
    let u = ((s / major + 1.0) * 0.5).clamp(0.0, 1.0);
    let v = ((t / major + 1.0) * 0.5).clamp(0.0, 1.0);
    (face, u, v)
}

/// Bucketed sphere index borrowing a grid.
#[derive(Clone, Debug)]
pub struct CubeBucketIndex<'a> {
    grid: &'a HexGrid,
    resolution: usize,
    /// Non-empty buckets only.
    buckets: Vec<Bucket>,
}

impl<'a> CubeBucketIndex<'a> {
    /// Index `grid` with `resolution` buckets along each cube-face edge.
    ///
    /// A resolution of 0 is treated as 1.
    pub fn new(grid: &'a HexGrid, resolution: usize) -> Self {
        let resolution = resolution.max(1);
        let mut slots: Vec<Vec<CellId>> = vec![Vec::new(); 6 * resolution * resolution];

        for cell in grid.cells() {
            let (face, u, v) = cube_face_uv(cell.position);
            let i = ((u * resolution as f64) as usize).min(resolution - 1);
            let j = ((v * resolution as f64) as usize).min(resolution - 1);
            slots[(face * resolution + j) * resolution + i].push(cell.id);
        }

        let buckets = slots
            .into_iter()
            .filter(|cells| !cells.is_empty())
            .map(|cells| {
                let sum: DVec3 = cells.iter().map(|id| grid.cell(*id).position).sum();
                let center = sum
                    .try_normalize()
                    .unwrap_or_else(|| grid.cell(cells[0]).position);
                let radius = cells
                    .iter()
                    .map(|id| angle_between(center, grid.cell(*id).position))
                    .fold(0.0, f64::max);
                Bucket {
                    cells,
                    center,
                    radius,
                }
            })
            .collect();

        Self {
            grid,
            resolution,
            buckets,
        }
    }

    /// Index `grid` with [`DEFAULT_BUCKET_RESOLUTION`].
    pub fn with_default_resolution(grid: &'a HexGrid) -> Self {
        Self::new(grid, DEFAULT_BUCKET_RESOLUTION)
    }

    pub fn grid(&self) -> &'a HexGrid {
        self.grid
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Number of buckets holding at least one cell.
    pub fn occupied_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Ids of every cell within `angle` of `dir` (unit), ascending.
    fn collect_within_angle(&self, dir: DVec3, angle: f64, keep: impl Fn(DVec3) -> bool) -> Vec<CellId> {
        let mut found: Vec<CellId> = self
            .buckets
            .iter()
            .filter(|b| b.min_angle(dir) <= angle)
            .flat_map(|b| b.cells.iter().copied())
            .filter(|id| keep(self.grid.cell(*id).position))
            .collect();
        found.sort_unstable();
        found
    }
}

impl CellLocator for CubeBucketIndex<'_> {
    fn nearest_cell(&self, direction: DVec3) -> Option<CellId> {
        self.nearest_cells(direction, 1).first().copied()
    }

    fn nearest_cells(&self, direction: DVec3, k: usize) -> Vec<CellId> {
        let Some(dir) = direction.try_normalize() else {
            return Vec::new();
        };
        if k == 0 {
            return Vec::new();
        }

        let mut order: Vec<(f64, usize)> = self
            .buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (chord_sq_for_angle(b.min_angle(dir)), i))
            .collect();
        order.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut candidates: Vec<(f64, CellId)> = Vec::new();
        for (bound, bucket) in order {
            if candidates.len() >= k {
                candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
                candidates.truncate(k);
                // Equal bounds can still hold a tie with a lower id.
                if bound > candidates[k - 1].0 {
                    break;
                }
            }
            candidates.extend(
                self.buckets[bucket]
                    .cells
                    .iter()
                    .map(|&id| (dir.distance_squared(self.grid.cell(id).position), id)),
            );
        }

        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        candidates.truncate(k);
        candidates.into_iter().map(|(_, id)| id).collect()
    }

    fn cells_within_angular_radius(&self, direction: DVec3, radius: f64) -> Vec<CellId> {
        let Some(dir) = direction.try_normalize() else {
            return Vec::new();
        };
        self.collect_within_angle(dir, radius, |p| angle_between(dir, p) <= radius)
    }

    fn cells_within_chord_distance(&self, direction: DVec3, chord: f64) -> Vec<CellId> {
        let Some(dir) = direction.try_normalize() else {
            return Vec::new();
        };
        let angle = if chord >= 2.0 {
            std::f64::consts::PI
        } else if chord < 0.0 {
            return Vec::new();
        } else {
            2.0 * (chord * 0.5).asin()
        };
        let chord_sq = chord * chord;
        self.collect_within_angle(dir, angle + BOUND_EPSILON, |p| {
            dir.distance_squared(p) <= chord_sq
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate;

    fn sample_directions() -> Vec<DVec3> {
        let mut dirs = vec![
            DVec3::X,
            DVec3::NEG_Y,
            DVec3::Z,
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(-1.0, 1.0, 0.0),
            DVec3::new(1.0, -1.0, 1.0e-9),
        ];
        // Deterministic spiral over the sphere.
        let n = 64;
        let golden = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
        for i in 0..n {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
            let r = (1.0 - y * y).sqrt();
            let theta = golden * i as f64;
            dirs.push(DVec3::new(r * theta.cos(), y, r * theta.sin()));
        }
        dirs
    }

    #[test]
    fn test_cube_face_uv_ranges() {
        for dir in sample_directions() {
            let (face, u, v) = cube_face_uv(dir.normalize());
            assert!(face < 6);
            assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v));
        }
        assert_eq!(cube_face_uv(DVec3::X), (0, 0.5, 0.5));
        assert_eq!(cube_face_uv(DVec3::NEG_Z).0, 5);
    }

    #[test]
    fn test_every_cell_is_indexed_once() {
        let grid = generate(3).unwrap();
        let index = CubeBucketIndex::new(&grid, 4);
        let total: usize = index.buckets.iter().map(|b| b.cells.len()).sum();
        assert_eq!(total, grid.len());
        assert!(index.occupied_buckets() <= 6 * 16);
        assert_eq!(index.resolution(), 4);
    }

    #[test]
    fn test_zero_resolution_is_clamped() {
        let grid = generate(1).unwrap();
        let index = CubeBucketIndex::new(&grid, 0);
        assert_eq!(index.resolution(), 1);
        assert_eq!(index.nearest_cell(DVec3::Y), grid.nearest_cell(DVec3::Y));
    }

    #[test]
    fn test_nearest_matches_brute_force() {
        let grid = generate(4).unwrap();
        let index = CubeBucketIndex::with_default_resolution(&grid);
        for dir in sample_directions() {
            assert_eq!(index.nearest_cell(dir), grid.nearest_cell(dir), "{dir:?}");
        }
    }

    #[test]
    fn test_nearest_at_cell_positions() {
        let grid = generate(3).unwrap();
        let index = CubeBucketIndex::new(&grid, 6);
        for cell in grid.cells().iter().step_by(13) {
            assert_eq!(index.nearest_cell(cell.position), Some(cell.id));
        }
    }

    #[test]
    fn test_k_nearest_matches_brute_force() {
        let grid = generate(3).unwrap();
        let index = CubeBucketIndex::new(&grid, 5);
        for dir in sample_directions() {
            for k in [1, 3, 7, 20] {
                assert_eq!(
                    index.nearest_cells(dir, k),
                    grid.nearest_cells(dir, k),
                    "{dir:?} k={k}"
                );
            }
        }
    }

    #[test]
    fn test_k_larger_than_grid() {
        let grid = generate(0).unwrap();
        let index = CubeBucketIndex::new(&grid, 3);
        assert_eq!(index.nearest_cells(DVec3::X, 100), grid.nearest_cells(DVec3::X, 100));
        assert_eq!(index.nearest_cells(DVec3::X, 100).len(), 12);
    }

    #[test]
    fn test_radius_queries_match_brute_force() {
        let grid = generate(3).unwrap();
        let index = CubeBucketIndex::with_default_resolution(&grid);
        for dir in sample_directions().into_iter().step_by(5) {
            for radius in [0.0, 0.05, 0.3, 1.2, 3.2] {
                assert_eq!(
                    index.cells_within_angular_radius(dir, radius),
                    grid.cells_within_angular_radius(dir, radius)
                );
            }
            for chord in [-1.0, 0.0, 0.1, 0.8, 1.9, 2.5] {
                assert_eq!(
                    index.cells_within_chord_distance(dir, chord),
                    grid.cells_within_chord_distance(dir, chord)
                );
            }
        }
    }

    #[test]
    fn test_locator_trait_objects_agree() {
        let grid = generate(2).unwrap();
        let index = CubeBucketIndex::new(&grid, 2);
        let locators: [&dyn CellLocator; 2] = [&grid, &index];
        let dir = DVec3::new(0.4, -0.2, 0.9);
        let answers: Vec<_> = locators.iter().map(|l| l.nearest_cells(dir, 4)).collect();
        assert_eq!(answers[0], answers[1]);
        assert!(locators.iter().all(|l| l.nearest_cell(DVec3::ZERO).is_none()));
    }
}
