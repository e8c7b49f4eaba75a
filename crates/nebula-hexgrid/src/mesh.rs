//! Transient triangle mesh used while building a grid.
//!
//! A [`BuildMesh`] is seeded from the icosahedron, subdivided in place, indexed
//! for adjacency, and dropped once the dual grid has been produced.

use glam::DVec3;
use smallvec::SmallVec;

use crate::icosahedron::Icosahedron;
use crate::weld::VertexWelder;

/// Marker for a missing entry in [`BuildMesh::triangle_neighbors`].
pub const NO_TRIANGLE: u32 = u32::MAX;

/// Triangle mesh on the unit sphere with derived adjacency maps.
#[derive(Clone, Debug)]
pub struct BuildMesh {
    /// Vertex positions, all unit length. The index is the vertex identity.
    pub vertices: Vec<DVec3>,
    /// Triangles as vertex index triples.
    pub triangles: Vec<[u32; 3]>,
    /// For each vertex, the triangles that reference it.
    ///
    /// Empty until [`BuildMesh::build_adjacency`] runs.
    pub vertex_triangles: Vec<SmallVec<[u32; 6]>>,
    /// For each triangle, the triangle across each of its three edges
    /// (`v0-v1`, `v1-v2`, `v2-v0`), or [`NO_TRIANGLE`].
    ///
    /// Empty until [`BuildMesh::build_adjacency`] runs.
    pub triangle_neighbors: Vec<[u32; 3]>,
    pub(crate) welder: VertexWelder,
}

impl BuildMesh {
    /// Seed a mesh with the 12 vertices and 20 faces of the base icosahedron.
    pub fn icosahedron(merge_tolerance: f64) -> Self {
        let ico = Icosahedron::new();
        let mut mesh = Self {
            vertices: Vec::with_capacity(ico.vertices.len()),
            triangles: ico.faces.to_vec(),
            vertex_triangles: Vec::new(),
            triangle_neighbors: Vec::new(),
            welder: VertexWelder::new(merge_tolerance),
        };
        // Seed vertices are distinct by construction; register them unconditionally
        // so face indices stay valid whatever the tolerance.
        for (i, v) in ico.vertices.into_iter().enumerate() {
            mesh.vertices.push(v);
            mesh.welder.insert(i as u32, v);
        }
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Normalize `position` onto the unit sphere and return the index of the
    /// vertex there, creating it if no vertex lies within the merge tolerance.
    pub fn get_or_add_vertex(&mut self, position: DVec3) -> u32 {
        let p = position.normalize();
        self.welder.find_or_insert(&mut self.vertices, p).0
    }

    /// Centroid of triangle `tri`, pushed back onto the unit sphere.
    pub fn triangle_center(&self, tri: usize) -> DVec3 {
        let [a, b, c] = self.triangles[tri];
        let sum = self.vertices[a as usize] + self.vertices[b as usize] + self.vertices[c as usize];
        (sum / 3.0).normalize()
    }
}
