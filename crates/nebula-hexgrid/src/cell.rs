//! Cells of the dual grid: one hexagon or pentagon per subdivided-mesh vertex.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Stable identifier of a cell.
///
/// Equal to the cell's index in the owning grid and to the index of the
/// triangle-mesh vertex the cell was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub u32);

impl CellId {
    /// Sentinel id carried by the invalid cell returned for out-of-range lookups.
    pub const INVALID: CellId = CellId(u32::MAX);

    /// Create a cell id from a raw `u32`.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Create a cell id from a vector index.
    ///
    /// The largest supported grid (level 10) has ~10.5M cells, far below `u32::MAX`.
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize, "cell index {index} overflows u32");
        Self(index as u32)
    }

    /// The id as an index into the grid's cell vector.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns `false` for [`CellId::INVALID`].
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("INVALID")
        }
    }
}

/// Neighbor ids of a cell. Five or six entries for every valid cell, stored inline.
pub type NeighborList = SmallVec<[CellId; 6]>;

/// Shape of a cell, derived from how many triangles touched its source vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Six neighbors. Every cell except the twelve icosahedron corners.
    #[default]
    Hexagon,
    /// Five neighbors. Exactly twelve per grid, one per icosahedron vertex.
    Pentagon,
}

impl CellKind {
    /// Number of neighbors (and boundary points) a well-formed cell of this kind has.
    pub const fn expected_degree(self) -> usize {
        match self {
            CellKind::Hexagon => 6,
            CellKind::Pentagon => 5,
        }
    }

    /// Classify a vertex by its triangle incidence count.
    ///
    /// Returns `None` for counts other than 5 or 6, which a correct icosahedral
    /// subdivision never produces.
    pub const fn from_incidence(count: usize) -> Option<CellKind> {
        match count {
            5 => Some(CellKind::Pentagon),
            6 => Some(CellKind::Hexagon),
            _ => None,
        }
    }
}

/// A single cell of the spherical hex grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexCell {
    /// Id of this cell; equal to its index in the grid.
    pub id: CellId,
    /// Hexagon or pentagon.
    pub kind: CellKind,
    /// Cell center on the unit sphere.
    pub position: DVec3,
    /// Polygon outline on the unit sphere, counter-clockwise seen from outside.
    pub boundary: Vec<DVec3>,
    /// Ids of the cells sharing an edge with this one, ascending.
    pub neighbors: NeighborList,
    /// Index (0..20) of the nearest base icosahedron face.
    pub face: u8,
}

impl HexCell {
    /// The placeholder returned by lookups with an out-of-range id.
    pub fn invalid() -> Self {
        Self {
            id: CellId::INVALID,
            kind: CellKind::Hexagon,
            position: DVec3::ZERO,
            boundary: Vec::new(),
            neighbors: NeighborList::new(),
            face: 0,
        }
    }

    /// Returns `false` for the invalid placeholder cell.
    pub fn is_valid(&self) -> bool {
        self.id.is_valid()
    }

    pub fn is_pentagon(&self) -> bool {
        self.kind == CellKind::Pentagon
    }

    pub fn is_hexagon(&self) -> bool {
        self.kind == CellKind::Hexagon
    }

    /// Neighbor count implied by the cell kind (5 or 6), independent of the
    /// neighbor list actually stored.
    pub fn expected_neighbor_count(&self) -> usize {
        self.kind.expected_degree()
    }

    /// The neighbor stored at `index`, if any.
    pub fn neighbor_at(&self, index: usize) -> Option<CellId> {
        self.neighbors.get(index).copied()
    }

    pub fn has_neighbor(&self, id: CellId) -> bool {
        self.neighbors.contains(&id)
    }

    /// Approximate area of the cell on a sphere of the given radius.
    ///
    /// Fans triangles out from the scaled center to each consecutive pair of
    /// boundary points and sums half the cross-product magnitudes. Requires the
    /// boundary to be in rotational order; returns 0 for fewer than 3 points.
    pub fn area(&self, radius: f64) -> f64 {
        if self.boundary.len() < 3 {
            return 0.0;
        }

        let center = self.position * radius;
        let next = self.boundary.iter().cycle().skip(1);
        self.boundary
            .iter()
            .zip(next)
            .map(|(&a, &b)| {
                let edge1 = a * radius - center;
                let edge2 = b * radius - center;
                edge1.cross(edge2).length() * 0.5
            })
            .sum()
    }

    /// Mean of the boundary points pushed back onto the unit sphere.
    ///
    /// Falls back to the cell position when the boundary is empty or the mean
    /// is degenerate.
    pub fn vertex_centroid(&self) -> DVec3 {
        if self.boundary.is_empty() {
            return self.position;
        }
        let sum: DVec3 = self.boundary.iter().copied().sum();
        (sum / self.boundary.len() as f64)
            .try_normalize()
            .unwrap_or(self.position)
    }
}
