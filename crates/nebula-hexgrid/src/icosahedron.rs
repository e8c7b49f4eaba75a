//! The regular icosahedron that seeds every grid.

use glam::DVec3;

/// Number of faces of the base icosahedron, and of distinct face tags.
pub const FACE_COUNT: usize = 20;

/// Number of vertices of the base icosahedron, and of pentagons in every grid.
pub const VERTEX_COUNT: usize = 12;

/// Face winding table. Every face is counter-clockwise seen from outside.
const FACES: [[u32; 3]; FACE_COUNT] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// A unit icosahedron: 12 golden-ratio vertices and 20 triangular faces.
#[derive(Clone, Debug, PartialEq)]
pub struct Icosahedron {
    /// Vertex positions on the unit sphere.
    pub vertices: [DVec3; VERTEX_COUNT],
    /// Faces as vertex index triples.
    pub faces: [[u32; 3]; FACE_COUNT],
}

impl Default for Icosahedron {
    fn default() -> Self {
        Self::new()
    }
}

impl Icosahedron {
    /// Build the canonical icosahedron with every vertex normalized.
    pub fn new() -> Self {
        let phi = (1.0 + 5.0_f64.sqrt()) * 0.5;
        let vertices = [
            DVec3::new(-1.0, phi, 0.0),
            DVec3::new(1.0, phi, 0.0),
            DVec3::new(-1.0, -phi, 0.0),
            DVec3::new(1.0, -phi, 0.0),
            DVec3::new(0.0, -1.0, phi),
            DVec3::new(0.0, 1.0, phi),
            DVec3::new(0.0, -1.0, -phi),
            DVec3::new(0.0, 1.0, -phi),
            DVec3::new(phi, 0.0, -1.0),
            DVec3::new(phi, 0.0, 1.0),
            DVec3::new(-phi, 0.0, -1.0),
            DVec3::new(-phi, 0.0, 1.0),
        ]
        .map(DVec3::normalize);

        Self {
            vertices,
            faces: FACES,
        }
    }

    /// Corner positions of face `face`.
    pub fn face_corners(&self, face: usize) -> [DVec3; 3] {
        self.faces[face].map(|v| self.vertices[v as usize])
    }

    /// Centroid of every face, pushed back onto the unit sphere.
    pub fn face_centroids(&self) -> [DVec3; FACE_COUNT] {
        std::array::from_fn(|face| {
            let [a, b, c] = self.face_corners(face);
            ((a + b + c) / 3.0).normalize()
        })
    }
}
