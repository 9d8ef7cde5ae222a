use chase_core::Point;

use crate::graph::NavGraph;
use crate::search::{NO_PARENT, SearchRange};
use crate::traits::Pather;

impl SearchRange {
    /// Closest graph node to `from`, by tile steps.
    ///
    /// Returns `from` itself when it is already a node. Otherwise the first
    /// BFS layer containing a node wins, and within that layer the node
    /// discovered first in neighbor order (right, left, down, up). `from`
    /// need not be walkable: a search started inside a wall expands into its
    /// walkable neighbors. Returns `None` when no node is reachable.
    pub fn nearest_node<P: Pather>(
        &mut self,
        pather: &P,
        graph: &NavGraph,
        from: Point,
    ) -> Option<Point> {
        if graph.is_node(from) {
            return Some(from);
        }
        let found = self.bfs_until(pather, from, |p| graph.is_node(p))?;
        Some(self.point(found))
    }

    /// First tile on the way from `from` to its nearest node.
    ///
    /// `None` when `from` is already a node or no node is reachable.
    pub fn first_step_to_nearest_node<P: Pather>(
        &mut self,
        pather: &P,
        graph: &NavGraph,
        from: Point,
    ) -> Option<Point> {
        if graph.is_node(from) {
            return None;
        }
        let found = self.bfs_until(pather, from, |p| graph.is_node(p))?;
        self.first_hop(found)
    }

    /// First tile on a shortest tile path from `from` to `to`.
    ///
    /// `None` when `from == to` or `to` is unreachable.
    pub fn first_step_toward<P: Pather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Point> {
        let found = self.bfs_until(pather, from, |p| p == to)?;
        self.first_hop(found)
    }

    /// Tile distance from `from` to `to`, or `None` if unreachable.
    pub fn distance<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> Option<u32> {
        let found = self.bfs_until(pather, from, |p| p == to)?;
        Some(self.dist[found])
    }

    /// Breadth-first search from `from` until `is_goal` accepts a tile.
    ///
    /// Tiles are tested as they are discovered, so the first goal found
    /// lies in the shallowest layer holding any goal.
    fn bfs_until<P, F>(&mut self, pather: &P, from: Point, is_goal: F) -> Option<usize>
    where
        P: Pather,
        F: Fn(Point) -> bool,
    {
        let root = self.idx(from)?;
        self.next_generation();
        self.visit(root, NO_PARENT, 0);
        if is_goal(from) {
            return Some(root);
        }
        self.queue.push_back(root);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = None;

        'search: while let Some(ci) = self.queue.pop_front() {
            let cp = self.point(ci);
            let d = self.dist[ci] + 1;

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.seen(ni) {
                    continue;
                }
                self.visit(ni, ci, d);
                if is_goal(np) {
                    found = Some(ni);
                    break 'search;
                }
                self.queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;
        found
    }

    /// Walk the parent chain back from `i` to the child of the root.
    fn first_hop(&self, mut i: usize) -> Option<Point> {
        loop {
            let parent = self.parent[i];
            if parent == NO_PARENT {
                // `i` is the root itself.
                return None;
            }
            if self.parent[parent] == NO_PARENT {
                return Some(self.point(i));
            }
            i = parent;
        }
    }
}
