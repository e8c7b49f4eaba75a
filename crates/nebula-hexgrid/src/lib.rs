//! Geodesic hexagonal grids: a subdivided icosahedron turned into its dual of
//! hexagonal cells plus exactly 12 pentagons, with adjacency, face tags, area
//! statistics, validation and nearest-cell queries on the unit sphere.

mod adjacency;
mod cell;
mod dual;
mod error;
mod face_tag;
mod generator;
mod grid;
mod icosahedron;
mod level;
mod mesh;
mod neighbors;
mod spatial;
mod stats;
mod subdivide;
mod validate;
mod weld;
mod winding;

pub use cell::{CellId, CellKind, HexCell, NeighborList};
pub use error::GenerateError;
pub use face_tag::nearest_face;
pub use generator::{GeneratorOptions, HexGridGenerator, generate};
pub use grid::{CellCounts, GridSummary, HexGrid};
pub use icosahedron::{FACE_COUNT, Icosahedron, VERTEX_COUNT};
pub use level::{LevelTier, SubdivisionLevel, expected_cell_count};
pub use mesh::{BuildMesh, NO_TRIANGLE};
pub use neighbors::NeighborStrategy;
pub use spatial::{CellLocator, CubeBucketIndex, DEFAULT_BUCKET_RESOLUTION};
pub use stats::AreaStatistics;
pub use subdivide::MAX_SUBDIVISIONS;
pub use validate::{UNIT_LENGTH_TOLERANCE, ValidationIssue, ValidationReport};
pub use weld::{
    DEFAULT_MERGE_TOLERANCE, MAX_MERGE_TOLERANCE, MIN_MERGE_TOLERANCE, VertexWelder,
    positions_equal,
};
pub use winding::{order_counter_clockwise, winds_counter_clockwise};

pub use glam::DVec3;
