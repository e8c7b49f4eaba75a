//! Tolerance-based point deduplication backed by a spatial hash.
//!
//! Points are bucketed by their position quantised to the merge tolerance, so
//! any point within `tolerance` of a query lies in the query's bucket or one of
//! its 26 neighbours. Lookup is O(1) on average instead of a scan over every
//! stored point, with the same "distance squared ≤ tolerance squared" merge rule.

use glam::DVec3;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Default merge tolerance (Euclidean distance on the unit sphere).
pub const DEFAULT_MERGE_TOLERANCE: f64 = 1e-4;

/// Smallest accepted merge tolerance. Below this, unit-sphere coordinates
/// divided by the tolerance no longer fit a bucket key.
pub const MIN_MERGE_TOLERANCE: f64 = 1e-12;

/// Largest accepted merge tolerance, roughly half the closest spacing between
/// boundary points of a level 10 grid.
pub const MAX_MERGE_TOLERANCE: f64 = 2.5e-4;

type BucketKey = [i64; 3];

/// Returns true if two points are within `tolerance` of each other.
#[inline]
pub fn positions_equal(a: DVec3, b: DVec3, tolerance: f64) -> bool {
    a.distance_squared(b) <= tolerance * tolerance
}

/// Spatial hash that maps positions to indices in an external point list.
#[derive(Clone, Debug)]
pub struct VertexWelder {
    tolerance_sq: f64,
    inv_cell_size: f64,
    buckets: FxHashMap<BucketKey, SmallVec<[u32; 2]>>,
}

impl VertexWelder {
    /// Create an empty welder. `tolerance` must be finite and positive.
    pub fn new(tolerance: f64) -> Self {
        debug_assert!(
            tolerance.is_finite() && tolerance > 0.0,
            "merge tolerance must be finite and positive, got {tolerance}"
        );
        Self {
            tolerance_sq: tolerance * tolerance,
            inv_cell_size: 1.0 / tolerance,
            buckets: FxHashMap::default(),
        }
    }

    /// Create a welder sized for roughly `capacity` points.
    pub fn with_capacity(tolerance: f64, capacity: usize) -> Self {
        let mut welder = Self::new(tolerance);
        welder.buckets.reserve(capacity);
        welder
    }

    fn key(&self, p: DVec3) -> BucketKey {
        let q = (p * self.inv_cell_size).floor();
        [q.x as i64, q.y as i64, q.z as i64]
    }

    /// Find the lowest stored index whose position lies within tolerance of `p`.
    pub fn find(&self, points: &[DVec3], p: DVec3) -> Option<u32> {
        let [kx, ky, kz] = self.key(p);
        let mut best: Option<u32> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.buckets.get(&[
                        kx.saturating_add(dx),
                        ky.saturating_add(dy),
                        kz.saturating_add(dz),
                    ]) else {
                        continue;
                    };
                    for &index in bucket {
                        if points[index as usize].distance_squared(p) <= self.tolerance_sq
                            && best.is_none_or(|b| index < b)
                        {
                            best = Some(index);
                        }
                    }
                }
            }
        }
        best
    }

    /// Register `points[index]` with the hash.
    pub fn insert(&mut self, index: u32, p: DVec3) {
        let key = self.key(p);
        self.buckets.entry(key).or_default().push(index);
    }

    /// Return the index of an existing point within tolerance of `p`, or append
    /// `p` to `points` and return its new index.
    ///
    /// The boolean is `true` when a new point was appended.
    pub fn find_or_insert(&mut self, points: &mut Vec<DVec3>, p: DVec3) -> (u32, bool) {
        if let Some(existing) = self.find(points, p) {
            return (existing, false);
        }
        let index = points.len() as u32;
        points.push(p);
        self.insert(index, p);
        (index, true)
    }

    /// Number of occupied buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
