//! Partition tags: which base icosahedron face each cell sits on.

use glam::DVec3;

use crate::cell::HexCell;
use crate::icosahedron::{FACE_COUNT, Icosahedron};

/// Index of the centroid in `centroids` closest to `position`.
///
/// Ties resolve to the lower face index.
pub fn nearest_face(centroids: &[DVec3; FACE_COUNT], position: DVec3) -> u8 {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (face, centroid) in centroids.iter().enumerate() {
        let dist = centroid.distance_squared(position);
        if dist < best_dist {
            best_dist = dist;
            best = face;
        }
    }
    best as u8
}

/// Tag every cell with its nearest base-icosahedron face.
pub(crate) fn tag_faces(cells: &mut [HexCell]) {
    let centroids = Icosahedron::new().face_centroids();
    for cell in cells {
        cell.face = nearest_face(&centroids, cell.position);
    }
}
