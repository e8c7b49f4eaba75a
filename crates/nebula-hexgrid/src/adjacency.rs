//! Vertex-to-triangle and triangle-to-triangle indexes over a [`BuildMesh`].

use smallvec::SmallVec;

use crate::mesh::{BuildMesh, NO_TRIANGLE};

impl BuildMesh {
    /// Build both adjacency maps for the current triangle list.
    ///
    /// `vertex_triangles[v]` lists the triangles referencing `v` in ascending
    /// order. `triangle_neighbors[t][e]` is the other triangle sharing edge `e`
    /// of `t`, found by intersecting the incidence lists of the edge's two
    /// vertices.
    pub fn build_adjacency(&mut self) {
        let mut vertex_triangles: Vec<SmallVec<[u32; 6]>> =
            vec![SmallVec::new(); self.vertices.len()];
        for (t, tri) in self.triangles.iter().enumerate() {
            for &v in tri {
                vertex_triangles[v as usize].push(t as u32);
            }
        }

        let triangle_neighbors = self
            .triangles
            .iter()
            .enumerate()
            .map(|(t, &[v0, v1, v2])| {
                [(v0, v1), (v1, v2), (v2, v0)].map(|(a, b)| {
                    let from_b = &vertex_triangles[b as usize];
                    vertex_triangles[a as usize]
                        .iter()
                        .copied()
                        .find(|&other| other as usize != t && from_b.contains(&other))
                        .unwrap_or(NO_TRIANGLE)
                })
            })
            .collect();

        self.vertex_triangles = vertex_triangles;
        self.triangle_neighbors = triangle_neighbors;
    }

    /// Triangles sharing edge `(a, b)`.
    pub fn edge_triangles(&self, a: u32, b: u32) -> SmallVec<[u32; 2]> {
        let Some(from_a) = self.vertex_triangles.get(a as usize) else {
            return SmallVec::new();
        };
        let Some(from_b) = self.vertex_triangles.get(b as usize) else {
            return SmallVec::new();
        };
        from_a
            .iter()
            .copied()
            .filter(|t| from_b.contains(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::mesh::{BuildMesh, NO_TRIANGLE};
    use crate::weld::DEFAULT_MERGE_TOLERANCE;

    fn mesh(level: u32) -> BuildMesh {
        let mut mesh = BuildMesh::icosahedron(DEFAULT_MERGE_TOLERANCE);
        mesh.subdivide(level);
        mesh.build_adjacency();
        mesh
    }

    #[test]
    fn test_icosahedron_incidence_is_five() {
        let mesh = mesh(0);
        assert_eq!(mesh.vertex_triangles.len(), 12);
        assert!(mesh.vertex_triangles.iter().all(|t| t.len() == 5));
    }

    #[test]
    fn test_subdivided_incidence_is_five_or_six() {
        let mesh = mesh(3);
        let fives = mesh.vertex_triangles.iter().filter(|t| t.len() == 5).count();
        let sixes = mesh.vertex_triangles.iter().filter(|t| t.len() == 6).count();
        assert_eq!(fives, 12);
        assert_eq!(fives + sixes, mesh.vertex_count());
    }

    #[test]
    fn test_every_triangle_has_three_neighbors() {
        let mesh = mesh(2);
        for (t, neighbors) in mesh.triangle_neighbors.iter().enumerate() {
            assert!(
                neighbors.iter().all(|&n| n != NO_TRIANGLE && n as usize != t),
                "triangle {t}: {neighbors:?}"
            );
        }
    }

    #[test]
    fn test_triangle_adjacency_is_symmetric() {
        let mesh = mesh(2);
        for (t, neighbors) in mesh.triangle_neighbors.iter().enumerate() {
            for &n in neighbors {
                assert!(mesh.triangle_neighbors[n as usize].contains(&(t as u32)));
            }
        }
    }

    #[test]
    fn test_each_edge_has_two_triangles() {
        let mesh = mesh(1);
        for &[a, b, c] in &mesh.triangles {
            for (x, y) in [(a, b), (b, c), (c, a)] {
                assert_eq!(mesh.edge_triangles(x, y).len(), 2);
            }
        }
        assert!(mesh.edge_triangles(0, u32::MAX).is_empty());
    }
}
