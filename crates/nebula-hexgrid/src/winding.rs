//! Rotational ordering of cell boundaries.
//!
//! Boundaries leave dual conversion in incidence order. Sorting them by angle in
//! the tangent plane gives a counter-clockwise polygon when viewed from outside
//! the sphere, which is what area computation and rendering expect.

use glam::DVec3;

use crate::cell::HexCell;

/// Sort `points` counter-clockwise around `center` as seen from outside the sphere.
///
/// The tangent axis points from the center toward the first point, projected
/// into the tangent plane; the bitangent is `normal × tangent`. Each point is
/// keyed by `atan2(p·bitangent, p·tangent)` and the points are sorted ascending.
/// Fewer than three points, or a degenerate first point, leave the slice as is.
pub fn order_counter_clockwise(center: DVec3, points: &mut [DVec3]) {
    if points.len() < 3 {
        return;
    }
    let Some(normal) = center.try_normalize() else {
        return;
    };

    let to_plane = |p: DVec3| {
        let d = p - center;
        d - normal * d.dot(normal)
    };

    let Some(tangent) = to_plane(points[0]).try_normalize() else {
        return;
    };
    let bitangent = normal.cross(tangent);

    let mut keyed: Vec<(f64, DVec3)> = points
        .iter()
        .map(|&p| {
            let proj = to_plane(p);
            (proj.dot(bitangent).atan2(proj.dot(tangent)), p)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (slot, (_, p)) in points.iter_mut().zip(keyed) {
        *slot = p;
    }
}

/// Returns true if `points` wind counter-clockwise around `center` seen from outside.
pub fn winds_counter_clockwise(center: DVec3, points: &[DVec3]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let next = points.iter().cycle().skip(1);
    points
        .iter()
        .zip(next)
        .all(|(&a, &b)| (a - center).cross(b - center).dot(center) > 0.0)
}

/// Order every cell's boundary in place.
pub(crate) fn order_boundaries(cells: &mut [HexCell]) {
    for cell in cells {
        order_counter_clockwise(cell.position, &mut cell.boundary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dual::convert_to_dual;
    use crate::mesh::BuildMesh;
    use crate::weld::DEFAULT_MERGE_TOLERANCE;
    use std::f64::consts::TAU;

    fn ring(center: DVec3, n: usize, order: &[usize]) -> Vec<DVec3> {
        let normal = center.normalize();
        let tangent = normal.any_orthonormal_vector();
        let bitangent = normal.cross(tangent);
        order
            .iter()
            .map(|&i| {
                let a = TAU * (i % n) as f64 / n as f64;
                (normal + (tangent * a.cos() + bitangent * a.sin()) * 0.1).normalize()
            })
            .collect()
    }

    #[test]
    fn test_orders_shuffled_hexagon() {
        let center = DVec3::new(0.3, -0.5, 0.8).normalize();
        let mut points = ring(center, 6, &[3, 0, 5, 1, 4, 2]);
        assert!(!winds_counter_clockwise(center, &points));
        order_counter_clockwise(center, &mut points);
        assert!(winds_counter_clockwise(center, &points));
    }

    #[test]
    fn test_reverses_clockwise_pentagon() {
        let center = DVec3::NEG_Y;
        let mut points = ring(center, 5, &[4, 3, 2, 1, 0]);
        order_counter_clockwise(center, &mut points);
        assert!(winds_counter_clockwise(center, &points));
    }

    #[test]
    fn test_degenerate_inputs_are_untouched() {
        let center = DVec3::Z;
        let mut two = vec![DVec3::X, DVec3::Y];
        order_counter_clockwise(center, &mut two);
        assert_eq!(two, vec![DVec3::X, DVec3::Y]);

        // First point coincides with the center: no tangent can be derived.
        let mut collapsed = vec![DVec3::Z, DVec3::Y, DVec3::X];
        order_counter_clockwise(center, &mut collapsed);
        assert_eq!(collapsed, vec![DVec3::Z, DVec3::Y, DVec3::X]);
    }

    #[test]
    fn test_every_dual_cell_winds_ccw_after_ordering() {
        let mut mesh = BuildMesh::icosahedron(DEFAULT_MERGE_TOLERANCE);
        mesh.subdivide(3);
        mesh.build_adjacency();
        let mut cells = convert_to_dual(&mesh);
        order_boundaries(&mut cells);
        for cell in &cells {
            assert!(
                winds_counter_clockwise(cell.position, &cell.boundary),
                "cell {} is not counter-clockwise",
                cell.id
            );
        }
    }
}
