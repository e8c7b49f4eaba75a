//! Triangle mesh → hexagon/pentagon dual.
//!
//! Every mesh vertex becomes a cell; every triangle touching that vertex
//! contributes its (renormalized) centroid as one boundary point.

use tracing::warn;

use crate::cell::{CellId, CellKind, HexCell, NeighborList};
use crate::mesh::BuildMesh;

/// Build one cell per vertex of `mesh`.
///
/// `mesh` must have had [`BuildMesh::build_adjacency`] run. Boundary points are
/// emitted in incidence order and still need rotational ordering; neighbors and
/// face tags are left empty for later stages.
pub(crate) fn convert_to_dual(mesh: &BuildMesh) -> Vec<HexCell> {
    debug_assert_eq!(
        mesh.vertex_triangles.len(),
        mesh.vertex_count(),
        "adjacency must be built before dual conversion"
    );

    let mut anomalies = 0usize;
    let cells: Vec<HexCell> = mesh
        .vertices
        .iter()
        .zip(&mesh.vertex_triangles)
        .enumerate()
        .map(|(index, (&position, incident))| {
            let boundary = incident
                .iter()
                .map(|&t| mesh.triangle_center(t as usize))
                .collect();

            let kind = CellKind::from_incidence(incident.len()).unwrap_or_else(|| {
                anomalies += 1;
                warn!(
                    cell = index,
                    incident = incident.len(),
                    "vertex is touched by neither 5 nor 6 triangles; emitting degraded cell"
                );
                CellKind::Hexagon
            });

            HexCell {
                id: CellId::from_index(index),
                kind,
                position,
                boundary,
                neighbors: NeighborList::new(),
                face: 0,
            }
        })
        .collect();

    if anomalies > 0 {
        warn!(anomalies, "dual conversion produced degraded cells");
    }
    cells
}
