use std::collections::VecDeque;

use chase_core::{Point, Range};

/// Marks a tile with no parent (a search root).
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// SearchRange
// ---------------------------------------------------------------------------

/// Reusable scratch space for breadth-first searches on a grid rectangle.
///
/// `SearchRange` owns the visited marks, parent links, distances and queue so
/// that repeated queries incur no allocations after the first use. Visited
/// marks are generation-stamped: starting a new search only bumps a counter
/// instead of clearing the arrays.
#[derive(Debug, Clone)]
pub struct SearchRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) stamp: Vec<u32>,
    pub(crate) generation: u32,
    pub(crate) parent: Vec<usize>,
    pub(crate) dist: Vec<u32>,
    pub(crate) queue: VecDeque<usize>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl SearchRange {
    /// Create a new `SearchRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            width: rng.width().max(0) as usize,
            stamp: vec![0; len],
            generation: 0,
            parent: vec![NO_PARENT; len],
            dist: vec![0; len],
            queue: VecDeque::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range, reallocating caches as needed.
    ///
    /// If the new size fits within existing capacity, caches are preserved
    /// and only the generation counter is bumped. Otherwise caches are
    /// reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        self.queue.clear();

        if new_len <= self.stamp.len() {
            self.next_generation();
            return;
        }

        self.stamp.clear();
        self.stamp.resize(new_len, 0);
        self.generation = 0;
        self.parent.clear();
        self.parent.resize(new_len, NO_PARENT);
        self.dist.clear();
        self.dist.resize(new_len, 0);
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Start a fresh search: every tile becomes unvisited.
    pub(crate) fn next_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Stamps from 2^32 searches ago would look current again.
            self.stamp.fill(0);
            self.generation = 1;
        }
        self.queue.clear();
    }

    /// Whether `i` was reached by the current search.
    #[inline]
    pub(crate) fn seen(&self, i: usize) -> bool {
        self.stamp[i] == self.generation
    }

    /// Mark `i` as reached from `parent` at distance `d`.
    #[inline]
    pub(crate) fn visit(&mut self, i: usize, parent: usize, d: u32) {
        self.stamp[i] = self.generation;
        self.parent[i] = parent;
        self.dist[i] = d;
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}
