//! Loop-style 1-to-4 triangle subdivision on the unit sphere.

use crate::mesh::BuildMesh;

/// Highest subdivision count the generator accepts.
pub const MAX_SUBDIVISIONS: u32 = 10;

impl BuildMesh {
    /// Replace every triangle with four children, `times` times.
    ///
    /// Each split of `(v0, v1, v2)` creates the three edge midpoints (normalized
    /// and welded against existing vertices, so shared edges produce a single
    /// vertex) and emits the three corner triangles plus the center triangle:
    ///
    /// ```text
    ///       v0
    ///       /\
    ///      /  \
    ///   m01----m20
    ///    /\    /\
    ///   /  \  /  \
    /// v1----m12---v2
    /// ```
    ///
    /// Children keep the parent's winding. Any adjacency computed before the
    /// call is cleared. `times == 0` leaves the mesh unchanged.
    pub fn subdivide(&mut self, times: u32) {
        debug_assert!(times <= MAX_SUBDIVISIONS, "subdivision count {times} too high");
        if times == 0 {
            return;
        }
        self.vertex_triangles.clear();
        self.triangle_neighbors.clear();

        for _ in 0..times {
            self.subdivide_once();
        }
    }

    fn subdivide_once(&mut self) {
        // V' = V + E, and E = 3F/2 on a closed triangle mesh.
        let new_vertex_count = self.vertices.len() + self.triangles.len() * 3 / 2;
        self.vertices.reserve(new_vertex_count - self.vertices.len());

        let parents = std::mem::take(&mut self.triangles);
        let mut children = Vec::with_capacity(parents.len() * 4);

        for [v0, v1, v2] in parents {
            let p0 = self.vertices[v0 as usize];
            let p1 = self.vertices[v1 as usize];
            let p2 = self.vertices[v2 as usize];

            let m01 = self.get_or_add_vertex(p0 + p1);
            let m12 = self.get_or_add_vertex(p1 + p2);
            let m20 = self.get_or_add_vertex(p2 + p0);

            children.push([v0, m01, m20]);
            children.push([v1, m12, m01]);
            children.push([v2, m20, m12]);
            children.push([m01, m12, m20]);
        }

        self.triangles = children;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weld::DEFAULT_MERGE_TOLERANCE;

    fn expected_vertices(level: u32) -> usize {
        10 * 4usize.pow(level) + 2
    }

    #[test]
    fn test_zero_subdivisions_is_identity() {
        let mut mesh = BuildMesh::icosahedron(DEFAULT_MERGE_TOLERANCE);
        let before = mesh.triangles.clone();
        mesh.subdivide(0);
        assert_eq!(mesh.triangles, before);
        assert_eq!(mesh.vertex_count(), 12);
    }

    #[test]
    fn test_counts_per_level() {
        for level in 0..=4 {
            let mut mesh = BuildMesh::icosahedron(DEFAULT_MERGE_TOLERANCE);
            mesh.subdivide(level);
            assert_eq!(mesh.triangle_count(), 20 * 4usize.pow(level), "level {level}");
            assert_eq!(mesh.vertex_count(), expected_vertices(level), "level {level}");
        }
    }

    #[test]
    fn test_vertices_stay_on_unit_sphere() {
        let mut mesh = BuildMesh::icosahedron(DEFAULT_MERGE_TOLERANCE);
        mesh.subdivide(3);
        for v in &mesh.vertices {
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_children_wind_outward() {
        let mut mesh = BuildMesh::icosahedron(DEFAULT_MERGE_TOLERANCE);
        mesh.subdivide(2);
        for tri in &mesh.triangles {
            let [a, b, c] = tri.map(|v| mesh.vertices[v as usize]);
            assert!((b - a).cross(c - a).dot(a + b + c) > 0.0);
        }
    }

    #[test]
    fn test_original_vertices_keep_their_indices() {
        let seed = BuildMesh::icosahedron(DEFAULT_MERGE_TOLERANCE);
        let mut mesh = seed.clone();
        mesh.subdivide(2);
        assert_eq!(&mesh.vertices[..12], &seed.vertices[..]);
    }

    #[test]
    fn test_no_duplicate_vertices() {
        let mut mesh = BuildMesh::icosahedron(DEFAULT_MERGE_TOLERANCE);
        mesh.subdivide(2);
        for (i, a) in mesh.vertices.iter().enumerate() {
            for b in &mesh.vertices[i + 1..] {
                assert!(a.distance(*b) > DEFAULT_MERGE_TOLERANCE);
            }
        }
    }
}
