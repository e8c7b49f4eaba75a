//! Cell adjacency from shared boundary points.
//!
//! Two cells are neighbors when at least two of their boundary points coincide
//! within the merge tolerance, i.e. when they share a polygon edge.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::cell::{CellId, HexCell, NeighborList};
use crate::weld::{VertexWelder, positions_equal};

/// Boundary points two cells must share to count as neighbors.
const SHARED_POINTS_FOR_EDGE: u32 = 2;

/// How neighbor sets are computed. Both strategies produce identical results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeighborStrategy {
    /// Weld all boundary points into shared ids through a spatial hash and
    /// count co-occurrences. Linear in the number of cells.
    #[default]
    Hashed,
    /// Compare the boundary points of every ordered pair of cells.
    ///
    /// Quadratic in the number of cells; only practical up to level 4 or so.
    Exhaustive,
}

/// Fill in the neighbor list of every cell and return how many cells ended up
/// with a neighbor count that disagrees with their kind.
///
/// Mismatches are logged, never fatal here; the validator decides.
pub(crate) fn resolve_neighbors(
    cells: &mut [HexCell],
    tolerance: f64,
    strategy: NeighborStrategy,
) -> usize {
    let neighbor_sets = match strategy {
        NeighborStrategy::Hashed => hashed_neighbors(cells, tolerance),
        NeighborStrategy::Exhaustive => exhaustive_neighbors(cells, tolerance),
    };

    let mut mismatches = 0;
    for (cell, neighbors) in cells.iter_mut().zip(neighbor_sets) {
        let expected = cell.expected_neighbor_count();
        if neighbors.len() != expected {
            mismatches += 1;
            warn!(
                cell = cell.id.0,
                expected,
                found = neighbors.len(),
                "neighbor count does not match cell kind"
            );
        }
        cell.neighbors = neighbors;
    }
    mismatches
}

/// Number of points in `a` that coincide with some point in `b`.
fn shared_point_count(a: &[DVec3], b: &[DVec3], tolerance: f64) -> u32 {
    a.iter()
        .filter(|&&pa| b.iter().any(|&pb| positions_equal(pa, pb, tolerance)))
        .count() as u32
}

fn exhaustive_neighbors(cells: &[HexCell], tolerance: f64) -> Vec<NeighborList> {
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            cells
                .iter()
                .enumerate()
                .filter(|&(j, other)| {
                    j != i
                        && shared_point_count(&cell.boundary, &other.boundary, tolerance)
                            >= SHARED_POINTS_FOR_EDGE
                })
                .map(|(j, _)| CellId::from_index(j))
                .collect()
        })
        .collect()
}

fn hashed_neighbors(cells: &[HexCell], tolerance: f64) -> Vec<NeighborList> {
    // Each dual vertex is shared by three cells; start with that estimate.
    let estimated_points = cells.len() * 2;
    let mut welder = VertexWelder::with_capacity(tolerance, estimated_points);
    let mut points: Vec<DVec3> = Vec::with_capacity(estimated_points);
    let mut point_cells: Vec<SmallVec<[u32; 3]>> = Vec::with_capacity(estimated_points);
    let mut cell_points: Vec<SmallVec<[u32; 6]>> = Vec::with_capacity(cells.len());

    for (i, cell) in cells.iter().enumerate() {
        let owner = i as u32;
        let mut ids = SmallVec::new();
        for &p in &cell.boundary {
            let (pid, created) = welder.find_or_insert(&mut points, p);
            if created {
                point_cells.push(SmallVec::new());
            }
            let owners = &mut point_cells[pid as usize];
            if !owners.contains(&owner) {
                owners.push(owner);
                ids.push(pid);
            }
        }
        cell_points.push(ids);
    }

    cell_points
        .iter()
        .enumerate()
        .map(|(i, pids)| {
            let mut tally: SmallVec<[(u32, u32); 12]> = SmallVec::new();
            for &pid in pids {
                for &other in &point_cells[pid as usize] {
                    if other as usize == i {
                        continue;
                    }
                    match tally.iter_mut().find(|(c, _)| *c == other) {
                        Some((_, count)) => *count += 1,
                        None => tally.push((other, 1)),
                    }
                }
            }
            let mut neighbors: NeighborList = tally
                .into_iter()
                .filter(|&(_, count)| count >= SHARED_POINTS_FOR_EDGE)
                .map(|(c, _)| CellId::new(c))
                .collect();
            neighbors.sort_unstable();
            neighbors
        })
        .collect()
}
