use std::collections::{BTreeMap, BinaryHeap};

use chase_core::Point;

use crate::graph::NavGraph;

/// Heap entry ordered so that `BinaryHeap` (a max-heap) pops the cheapest
/// node first, ties going to the smaller point.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    cost: u32,
    p: Point,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.cost.cmp(&self.cost).then_with(|| other.p.cmp(&self.p))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl NavGraph {
    /// Minimum-weight node path from `start` to `goal`, both included.
    ///
    /// Returns `[start]` when `start == goal` and also when `goal` cannot be
    /// reached (or either end is not a node); callers treat a single-element
    /// path toward a different goal as "no route".
    pub fn shortest_path(&self, start: Point, goal: Point) -> Vec<Point> {
        if start == goal || !self.is_node(start) || !self.is_node(goal) {
            return vec![start];
        }

        let mut best: BTreeMap<Point, u32> = BTreeMap::new();
        let mut prev: BTreeMap<Point, Point> = BTreeMap::new();
        let mut open = BinaryHeap::new();
        best.insert(start, 0);
        open.push(NodeRef { cost: 0, p: start });

        while let Some(NodeRef { cost, p }) = open.pop() {
            if best.get(&p).is_some_and(|&b| cost > b) {
                continue; // stale
            }
            if p == goal {
                break;
            }
            for e in self.edges(p) {
                let tentative = cost + e.weight;
                if best.get(&e.to).is_some_and(|&b| tentative >= b) {
                    continue;
                }
                best.insert(e.to, tentative);
                prev.insert(e.to, p);
                open.push(NodeRef {
                    cost: tentative,
                    p: e.to,
                });
            }
        }

        if !prev.contains_key(&goal) {
            log::trace!("no route from {start} to {goal}");
            return vec![start];
        }
        let mut path = vec![goal];
        let mut cur = goal;
        while let Some(&p) = prev.get(&cur) {
            path.push(p);
            cur = p;
        }
        path.reverse();
        path
    }

    /// Total weight of a node path, or `None` if some hop is not an edge.
    pub fn route_weight(&self, path: &[Point]) -> Option<u32> {
        path.windows(2)
            .map(|w| self.weight(w[0], w[1]))
            .sum::<Option<u32>>()
    }
}
