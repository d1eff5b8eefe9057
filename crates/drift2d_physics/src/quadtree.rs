//! Region quadtree spatial index
//!
//! The quadtree answers "which bodies overlap region R" in better than O(n)
//! per query. It holds no state across frames: the physics engine calls
//! [`Quadtree::clear`] and re-inserts every body at the start of each update,
//! which sidesteps stale-position and removal invariants entirely.
//!
//! Entries are `(BodyKey, Rect)` pairs: the key gives reference identity (so
//! a body never collides with itself), the rectangle is the body's bounding
//! box at insert time. A body whose box spans multiple child quadrants is
//! stored in every overlapping child, so queries may legitimately report the
//! same key more than once; callers must tolerate duplicate hits.

use drift2d_math::Rect;

use crate::body::BodyKey;

/// Default number of entries a node holds before subdividing
pub const DEFAULT_CAPACITY: usize = 4;

/// Default minimum edge length below which subdivision is refused
pub const DEFAULT_MIN_SIZE: f32 = 10.0;

/// A region quadtree over rectangular bodies
///
/// Each node either stores entries directly in its bucket or has exactly
/// four children (NW, NE, SW, SE) that tile its boundary. Nodes at the
/// minimum-size floor keep accepting entries past capacity rather than
/// dropping them; query cost within such a bucket degrades toward linear,
/// which is a degradation, not a fault.
#[derive(Clone, Debug)]
pub struct Quadtree {
    boundary: Rect,
    capacity: usize,
    min_size: f32,
    entries: Vec<(BodyKey, Rect)>,
    children: Option<Box<[Quadtree; 4]>>,
}

impl Quadtree {
    /// Create a new quadtree covering the given region
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            boundary: Rect::new(x, y, width, height),
            capacity: DEFAULT_CAPACITY,
            min_size: DEFAULT_MIN_SIZE,
            entries: Vec::new(),
            children: None,
        }
    }

    /// Set the per-node bucket capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Set the minimum edge length below which nodes refuse to subdivide
    pub fn set_min_size(&mut self, min_size: f32) {
        self.min_size = min_size;
    }

    /// The region this node covers
    #[inline]
    pub fn boundary(&self) -> Rect {
        self.boundary
    }

    /// Insert a body's bounding box, keyed by its identity
    ///
    /// Returns false (with no mutation) when `rect` does not intersect this
    /// node's boundary; the caller's recursive insert uses that to route the
    /// body to sibling quadrants. A spanning rectangle is accepted by every
    /// child it overlaps.
    pub fn insert(&mut self, key: BodyKey, rect: Rect) -> bool {
        if !rect.intersects(&self.boundary) {
            return false;
        }

        if self.children.is_none() {
            if self.entries.len() < self.capacity {
                self.entries.push((key, rect));
                return true;
            }
            self.subdivide();
        }

        match self.children.as_mut() {
            Some(children) => {
                let mut accepted = false;
                for child in children.iter_mut() {
                    accepted |= child.insert(key, rect);
                }
                accepted
            }
            // Subdivision refused at the min-size floor: overflow the bucket
            // instead of losing the body.
            None => {
                self.entries.push((key, rect));
                true
            }
        }
    }

    /// Split this node into four children tiling its boundary
    ///
    /// No-op when either resulting half-dimension would fall below
    /// `min_size`; the node then accumulates entries in its own bucket.
    fn subdivide(&mut self) {
        let half_w = self.boundary.w / 2.0;
        let half_h = self.boundary.h / 2.0;

        if half_w < self.min_size || half_h < self.min_size {
            return;
        }

        let x = self.boundary.x;
        let y = self.boundary.y;
        let child = |cx: f32, cy: f32| Quadtree {
            boundary: Rect::new(cx, cy, half_w, half_h),
            capacity: self.capacity,
            min_size: self.min_size,
            entries: Vec::new(),
            children: None,
        };

        self.children = Some(Box::new([
            child(x, y),                  // NW
            child(x + half_w, y),         // NE
            child(x, y + half_h),         // SW
            child(x + half_w, y + half_h), // SE
        ]));
    }

    /// Collect the keys of all stored bodies whose rectangle intersects
    /// `region`
    ///
    /// Result order is unspecified, and a body stored in several children
    /// appears once per child.
    pub fn query(&self, region: &Rect) -> Vec<BodyKey> {
        let mut found = Vec::new();
        self.query_into(region, &mut found);
        found
    }

    /// As [`Quadtree::query`], appending into a caller-owned buffer
    pub fn query_into(&self, region: &Rect, found: &mut Vec<BodyKey>) {
        if !region.intersects(&self.boundary) {
            return;
        }

        for (key, rect) in &self.entries {
            if rect.intersects(region) {
                found.push(*key);
            }
        }

        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.query_into(region, found);
            }
        }
    }

    /// Empty all buckets and discard all children
    pub fn clear(&mut self) {
        self.entries.clear();
        self.children = None;
    }

    /// Total number of stored entries, counting spanning duplicates
    pub fn len(&self) -> usize {
        let mut count = self.entries.len();
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                count += child.len();
            }
        }
        count
    }

    /// True when the tree stores nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth of the tree in nodes (a lone root has depth 1)
    pub fn depth(&self) -> usize {
        match self.children.as_ref() {
            Some(children) => 1 + children.iter().map(Quadtree::depth).max().unwrap_or(0),
            None => 1,
        }
    }

    /// Visit every node boundary, parents before children
    ///
    /// This is the seam an external renderer uses to draw the tree.
    pub fn visit_boundaries(&self, visit: &mut impl FnMut(Rect)) {
        visit(self.boundary);
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.visit_boundaries(visit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    /// Mint `n` distinct keys without building bodies
    fn keys(n: usize) -> Vec<BodyKey> {
        let mut map: SlotMap<BodyKey, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    fn square(x: f32, y: f32, size: f32) -> Rect {
        Rect::new(x, y, size, size)
    }

    #[test]
    fn test_insert_inside_boundary() {
        let mut tree = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        let k = keys(1)[0];
        assert!(tree.insert(k, square(10.0, 10.0, 5.0)));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_insert_outside_boundary_fails_without_mutation() {
        let mut tree = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        let k = keys(1)[0];
        assert!(!tree.insert(k, square(200.0, 200.0, 5.0)));
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_insert_overlapping_boundary_edge_succeeds() {
        // A rect straddling the root boundary intersects it and is kept
        let mut tree = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        let k = keys(1)[0];
        assert!(tree.insert(k, square(-2.0, -2.0, 5.0)));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_subdivision_past_capacity() {
        let mut tree = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        // Five small bodies, one per region corner plus center: the fifth
        // insert forces a split.
        let positions = [
            (5.0, 5.0),
            (80.0, 5.0),
            (5.0, 80.0),
            (80.0, 80.0),
            (45.0, 45.0),
        ];
        for (k, (x, y)) in keys(5).into_iter().zip(positions) {
            assert!(tree.insert(k, square(x, y, 4.0)));
        }
        assert!(tree.depth() > 1);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_spanning_rect_inserted_into_every_overlapping_child() {
        let mut tree = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        let ks = keys(6);
        // Fill capacity with corner bodies, then insert one spanning the
        // center cross: it lands in all four children.
        for (k, (x, y)) in ks[..4]
            .iter()
            .zip([(1.0, 1.0), (90.0, 1.0), (1.0, 90.0), (90.0, 90.0)])
        {
            assert!(tree.insert(*k, square(x, y, 4.0)));
        }
        let spanning = ks[4];
        assert!(tree.insert(spanning, square(40.0, 40.0, 20.0)));

        // Querying any single quadrant finds the spanning body
        for region in [
            Rect::new(0.0, 0.0, 50.0, 50.0),
            Rect::new(50.0, 0.0, 50.0, 50.0),
            Rect::new(0.0, 50.0, 50.0, 50.0),
            Rect::new(50.0, 50.0, 50.0, 50.0),
        ] {
            let found = tree.query(&region);
            assert!(found.contains(&spanning));
        }
    }

    #[test]
    fn test_query_completeness_against_brute_force() {
        let mut tree = Quadtree::new(0.0, 0.0, 200.0, 200.0);
        // Deterministic pseudo-random scatter
        let mut rects = Vec::new();
        let mut seed = 0x2545_f491u64;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((seed >> 33) % 1000) as f32 / 1000.0
        };
        for _ in 0..60 {
            let x = next() * 180.0;
            let y = next() * 180.0;
            let s = 2.0 + next() * 18.0;
            rects.push(Rect::new(x, y, s, s));
        }
        let ks = keys(rects.len());
        for (k, r) in ks.iter().zip(&rects) {
            assert!(tree.insert(*k, *r));
        }

        for region in [
            Rect::new(0.0, 0.0, 50.0, 50.0),
            Rect::new(25.0, 25.0, 100.0, 10.0),
            Rect::new(150.0, 150.0, 60.0, 60.0),
            Rect::new(0.0, 0.0, 200.0, 200.0),
        ] {
            let found = tree.query(&region);
            for (k, r) in ks.iter().zip(&rects) {
                if r.intersects(&region) {
                    assert!(found.contains(k), "missing body for region {region:?}");
                } else {
                    assert!(!found.contains(k), "spurious body for region {region:?}");
                }
            }
        }
    }

    #[test]
    fn test_rebuild_answers_queries_identically() {
        let mut tree = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        let ks = keys(12);
        let rects: Vec<Rect> = (0..12)
            .map(|i| square(7.0 * i as f32, 5.0 * i as f32, 6.0))
            .collect();
        for (k, r) in ks.iter().zip(&rects) {
            tree.insert(*k, *r);
        }

        let region = Rect::new(10.0, 10.0, 40.0, 40.0);
        let mut before = tree.query(&region);
        before.sort();
        before.dedup();

        tree.clear();
        assert!(tree.is_empty());
        for (k, r) in ks.iter().zip(&rects) {
            tree.insert(*k, *r);
        }

        let mut after = tree.query(&region);
        after.sort();
        after.dedup();
        assert_eq!(before, after);
    }

    #[test]
    fn test_subdivision_partitions_parent_exactly() {
        let mut tree = Quadtree::new(10.0, 20.0, 80.0, 40.0);
        tree.set_min_size(1.0);
        tree.subdivide();

        let mut boundaries = Vec::new();
        tree.visit_boundaries(&mut |b| boundaries.push(b));
        assert_eq!(boundaries.len(), 5);

        let parent = boundaries[0];
        let children = &boundaries[1..];
        let mut area = 0.0;
        for child in children {
            assert_eq!(child.w, parent.w / 2.0);
            assert_eq!(child.h, parent.h / 2.0);
            // Each child corner lies on the parent's quadrant grid
            assert!(child.x == parent.x || child.x == parent.x + parent.w / 2.0);
            assert!(child.y == parent.y || child.y == parent.y + parent.h / 2.0);
            area += child.w * child.h;
        }
        // No gaps and no overlaps: areas sum exactly, corners are distinct
        assert_eq!(area, parent.w * parent.h);
        for i in 0..children.len() {
            for j in (i + 1)..children.len() {
                assert!(!children[i].intersects(&children[j]));
            }
        }
    }

    #[test]
    fn test_min_size_floor_overflows_bucket() {
        // Region smaller than 2 * min_size: subdivision is refused, the
        // bucket grows without bound, and the tree never deepens.
        let mut tree = Quadtree::new(0.0, 0.0, 15.0, 15.0);
        let ks = keys(20);
        for k in &ks {
            assert!(tree.insert(*k, square(2.0, 2.0, 3.0)));
        }
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.len(), 20);

        let found = tree.query(&Rect::new(0.0, 0.0, 15.0, 15.0));
        assert_eq!(found.len(), 20);
    }

    #[test]
    fn test_min_size_caps_depth_of_crowded_corner() {
        let mut tree = Quadtree::new(0.0, 0.0, 160.0, 160.0);
        // All bodies confined to one 10x10 corner cell; depth can halve
        // 160 -> 80 -> 40 -> 20 and must stop there (half would be 10 < min).
        for k in keys(64) {
            assert!(tree.insert(k, square(1.0, 1.0, 2.0)));
        }
        assert!(tree.depth() <= 5);
    }

    #[test]
    fn test_clear_returns_to_leaf_state() {
        let mut tree = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        for k in keys(10) {
            tree.insert(k, square(40.0, 40.0, 5.0));
        }
        assert!(tree.len() > 0);

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 1);
        assert!(tree.query(&Rect::new(0.0, 0.0, 100.0, 100.0)).is_empty());
    }

    #[test]
    fn test_query_prunes_disjoint_region() {
        let mut tree = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        for k in keys(8) {
            tree.insert(k, square(10.0, 10.0, 5.0));
        }
        assert!(tree.query(&Rect::new(500.0, 500.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_nan_rect_degrades_to_rejection() {
        let mut tree = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        let k = keys(1)[0];
        // NaN comparisons are all false, so the rect never intersects the
        // boundary and insert reports failure instead of corrupting the tree.
        assert!(!tree.insert(k, Rect::new(f32::NAN, 0.0, 10.0, 10.0)));
        assert!(tree.is_empty());
        assert!(tree.query(&Rect::new(f32::NAN, f32::NAN, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_with_capacity() {
        let mut tree = Quadtree::new(0.0, 0.0, 100.0, 100.0).with_capacity(1);
        let ks = keys(2);
        tree.insert(ks[0], square(10.0, 10.0, 5.0));
        tree.insert(ks[1], square(80.0, 80.0, 5.0));
        // Capacity 1 splits on the second insert
        assert!(tree.depth() > 1);
    }
}
