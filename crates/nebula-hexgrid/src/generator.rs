//! The generation pipeline: icosahedron, subdivision, dual, neighbors, ordering,
//! face tags, statistics and validation.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dual::convert_to_dual;
use crate::error::GenerateError;
use crate::face_tag::tag_faces;
use crate::grid::HexGrid;
use crate::level::SubdivisionLevel;
use crate::mesh::BuildMesh;
use crate::neighbors::{NeighborStrategy, resolve_neighbors};
use crate::weld::{DEFAULT_MERGE_TOLERANCE, MAX_MERGE_TOLERANCE, MIN_MERGE_TOLERANCE};
use crate::winding::order_boundaries;

/// Tunables for [`HexGridGenerator`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Euclidean distance under which two points on the unit sphere are the same.
    pub merge_tolerance: f64,
    pub neighbor_strategy: NeighborStrategy,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            merge_tolerance: DEFAULT_MERGE_TOLERANCE,
            neighbor_strategy: NeighborStrategy::default(),
        }
    }
}

/// Builds validated [`HexGrid`]s. Stateless between calls.
#[derive(Clone, Debug, Default)]
pub struct HexGridGenerator {
    options: GeneratorOptions,
}

impl HexGridGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate a grid at a raw `level`, rejecting anything outside `0..=10`.
    pub fn generate(&self, level: i64) -> Result<HexGrid, GenerateError> {
        let level = SubdivisionLevel::new(level)?;
        self.generate_level(level)
    }

    /// Generate a grid at an already validated level.
    ///
    /// The finished grid is always validated; a grid that breaks any invariant
    /// is discarded and its report returned as [`GenerateError::Validation`].
    pub fn generate_level(&self, level: SubdivisionLevel) -> Result<HexGrid, GenerateError> {
        let tolerance = self.options.merge_tolerance;
        if !(MIN_MERGE_TOLERANCE..=MAX_MERGE_TOLERANCE).contains(&tolerance) {
            return Err(GenerateError::InvalidTolerance { tolerance });
        }

        let tier = level.tier();
        info!(
            %level,
            expected_cells = level.expected_cell_count(),
            tier = tier.recommendation(),
            strategy = ?self.options.neighbor_strategy,
            "generating hex grid"
        );
        if tier.is_heavy() {
            warn!(%level, "high subdivision level; generation will be slow and memory hungry");
        }
        let start = Instant::now();

        let mut cells = {
            let mut mesh = timed("icosahedron", || BuildMesh::icosahedron(tolerance));
            timed("subdivide", || mesh.subdivide(level.get()));
            debug!(
                vertices = mesh.vertex_count(),
                triangles = mesh.triangle_count(),
                "mesh subdivided"
            );
            timed("adjacency", || mesh.build_adjacency());
            timed("dual", || convert_to_dual(&mesh))
        };

        let mismatches = timed("neighbors", || {
            resolve_neighbors(&mut cells, tolerance, self.options.neighbor_strategy)
        });
        if mismatches > 0 {
            warn!(mismatches, "cells with unexpected neighbor counts");
        }
        timed("winding", || order_boundaries(&mut cells));
        timed("face tags", || tag_faces(&mut cells));

        let grid = timed("statistics", || HexGrid::assemble(level, cells));
        let report = timed("validation", || grid.validate());
        if !report.is_valid() {
            for issue in report.issues() {
                warn!(%issue, "grid validation failed");
            }
            return Err(GenerateError::Validation(report));
        }

        let counts = grid.counts();
        info!(
            total = counts.total,
            hexagons = counts.hexagons,
            pentagons = counts.pentagons,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "hex grid generated"
        );
        Ok(grid)
    }
}

/// Generate a grid at `level` with default options.
pub fn generate(level: i64) -> Result<HexGrid, GenerateError> {
    HexGridGenerator::default().generate(level)
}

fn timed<T>(stage: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    debug!(stage, elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "stage done");
    out
}
