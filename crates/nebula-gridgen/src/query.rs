//! `--nearest` lookups against a generated grid.

use glam::DVec3;
use nebula_hexgrid::{CellId, CellKind, CellLocator, CubeBucketIndex, HexGrid};
use serde::Serialize;

/// Reasons a `--nearest` argument is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("expected 3 components (x,y,z), got {0}")]
    WrongArity(usize),

    #[error("direction must be finite and non-zero")]
    DegenerateDirection,
}

/// Parse `x,y,z` components into a unit direction.
pub fn parse_direction(components: &[f64]) -> Result<DVec3, QueryError> {
    let [x, y, z] = components else {
        return Err(QueryError::WrongArity(components.len()));
    };
    DVec3::new(*x, *y, *z)
        .try_normalize()
        .ok_or(QueryError::DegenerateDirection)
}

/// One cell returned by a nearest query.
#[derive(Debug, Clone, Serialize)]
pub struct NearestHit {
    pub id: CellId,
    pub kind: CellKind,
    pub face: u8,
    /// Great-circle angle from the query direction, in degrees.
    pub angle_deg: f64,
    pub position: DVec3,
}

/// Result of a nearest query.
#[derive(Debug, Clone, Serialize)]
pub struct NearestReport {
    pub direction: DVec3,
    pub hits: Vec<NearestHit>,
}

/// Find the `k` cells nearest `direction` through a bucketed index.
pub fn nearest(grid: &HexGrid, direction: DVec3, k: usize, resolution: usize) -> NearestReport {
    let index = CubeBucketIndex::new(grid, resolution);
    let hits = index
        .nearest_cells(direction, k)
        .into_iter()
        .map(|id| {
            let cell = grid.cell(id);
            NearestHit {
                id,
                kind: cell.kind,
                face: cell.face,
                angle_deg: direction.dot(cell.position).clamp(-1.0, 1.0).acos().to_degrees(),
                position: cell.position,
            }
        })
        .collect();
    NearestReport { direction, hits }
}

impl NearestReport {
    pub fn to_text(&self) -> String {
        let d = self.direction;
        let mut lines = vec![format!(
            "Nearest {} cell(s) to ({:.4}, {:.4}, {:.4}):",
            self.hits.len(),
            d.x,
            d.y,
            d.z
        )];
        lines.extend(self.hits.iter().map(|hit| {
            format!(
                "  #{:<8} {:<8} face {:>2}  {:.4} deg",
                hit.id.to_string(),
                format!("{:?}", hit.kind),
                hit.face,
                hit.angle_deg
            )
        }));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        let dir = parse_direction(&[0.0, 3.0, 4.0]).unwrap();
        assert!((dir - DVec3::new(0.0, 0.6, 0.8)).length() < 1e-12);
        assert_eq!(parse_direction(&[1.0, 0.0]), Err(QueryError::WrongArity(2)));
        assert_eq!(
            parse_direction(&[0.0, 0.0, 0.0]),
            Err(QueryError::DegenerateDirection)
        );
        assert_eq!(
            parse_direction(&[f64::NAN, 1.0, 0.0]),
            Err(QueryError::DegenerateDirection)
        );
    }

    #[test]
    fn test_nearest_matches_grid() {
        let grid = nebula_hexgrid::generate(3).unwrap();
        let dir = parse_direction(&[0.2, -0.5, 0.9]).unwrap();
        let report = nearest(&grid, dir, 3, 8);
        let ids: Vec<_> = report.hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, grid.nearest_cells(dir, 3));
        assert!(report.hits.windows(2).all(|w| w[0].angle_deg <= w[1].angle_deg));
    }

    #[test]
    fn test_nearest_at_pentagon() {
        let grid = nebula_hexgrid::generate(2).unwrap();
        let pentagon = grid.cell(grid.pentagon_ids()[0]);
        let report = nearest(&grid, pentagon.position, 1, 4);
        assert_eq!(report.hits[0].id, pentagon.id);
        assert_eq!(report.hits[0].kind, CellKind::Pentagon);
        assert!(report.hits[0].angle_deg < 1e-4);
        assert!(report.to_text().contains("Pentagon"));
    }
}
