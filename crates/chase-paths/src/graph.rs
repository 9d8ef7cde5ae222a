//! Sparse navigation graph extracted from a maze.

use std::collections::{BTreeMap, BTreeSet};

use chase_core::{Maze, Point};

/// A directed half of an undirected corridor edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: Point,
    /// Corridor length in tiles.
    pub weight: u32,
}

/// Decision points of a maze joined by straight-corridor edges.
///
/// Nodes are dead-ends, corners and junctions, plus both ends of the tunnel
/// row. The graph is immutable once built: a new maze layout means a new
/// graph. Adjacency lives in ordered maps so iteration (and therefore every
/// search over the graph) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavGraph {
    pub(crate) adj: BTreeMap<Point, Vec<Edge>>,
}

impl NavGraph {
    /// Scan `maze` once and build its navigation graph.
    pub fn build(maze: &Maze) -> Self {
        let mut nodes: BTreeSet<Point> = maze
            .bounds()
            .iter()
            .filter(|&p| is_decision_point(maze, p))
            .collect();
        if let Some(row) = maze.tunnel_row() {
            for x in [0, maze.width() - 1] {
                let p = Point::new(x, row);
                if maze.is_walkable(p) {
                    nodes.insert(p);
                }
            }
        }

        let mut graph = Self {
            adj: nodes.iter().map(|&n| (n, Vec::new())).collect(),
        };
        for &n in &nodes {
            for dir in Point::CARDINALS {
                if let Some((hit, weight)) = raycast(maze, &nodes, n, dir) {
                    graph.insert_directed(n, hit, weight);
                }
            }
        }
        graph.symmetrize();

        log::debug!(
            "navigation graph built: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// A copy of this graph with `tile` added as an extra node.
    ///
    /// The new node is ray-cast to the existing nodes in the four cardinal
    /// directions. Existing edges passing through `tile` are kept as they
    /// are. Returns an unchanged copy when `tile` is already a node or is
    /// not walkable.
    pub fn with_waypoint(&self, maze: &Maze, tile: Point) -> Self {
        let mut graph = self.clone();
        if self.is_node(tile) || !maze.is_walkable(tile) {
            return graph;
        }
        let nodes: BTreeSet<Point> = self.adj.keys().copied().collect();
        graph.adj.insert(tile, Vec::new());
        for dir in Point::CARDINALS {
            if let Some((hit, weight)) = raycast(maze, &nodes, tile, dir) {
                graph.insert_directed(tile, hit, weight);
                graph.insert_directed(hit, tile, weight);
            }
        }
        graph
    }

    /// Whether `p` is a node of the graph.
    #[inline]
    pub fn is_node(&self, p: Point) -> bool {
        self.adj.contains_key(&p)
    }

    /// All nodes in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = Point> + '_ {
        self.adj.keys().copied()
    }

    /// Outgoing edges of `p` (empty for non-nodes).
    pub fn edges(&self, p: Point) -> &[Edge] {
        self.adj.get(&p).map_or(&[], Vec::as_slice)
    }

    /// Weight of the edge `a → b`, if present.
    pub fn weight(&self, a: Point, b: Point) -> Option<u32> {
        self.edges(a).iter().find(|e| e.to == b).map(|e| e.weight)
    }

    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Whether every edge `a → b` has a twin `b → a` of the same weight.
    pub fn is_symmetric(&self) -> bool {
        self.adj.iter().all(|(&a, edges)| {
            edges
                .iter()
                .all(|e| self.weight(e.to, a) == Some(e.weight))
        })
    }

    /// Insert `from → to`, keeping the shorter weight on duplicates.
    fn insert_directed(&mut self, from: Point, to: Point, weight: u32) {
        let edges = self.adj.entry(from).or_default();
        match edges.iter_mut().find(|e| e.to == to) {
            Some(e) => e.weight = e.weight.min(weight),
            None => edges.push(Edge { to, weight }),
        }
    }

    /// Add the missing reverse of every one-way edge. Twins that disagree
    /// on weight both take the shorter one.
    fn symmetrize(&mut self) {
        let missing: Vec<(Point, Point, u32)> = self
            .adj
            .iter()
            .flat_map(|(&a, edges)| edges.iter().map(move |e| (a, *e)))
            .filter_map(|(a, e)| match self.weight(e.to, a) {
                Some(w) if w == e.weight => None,
                Some(w) => Some((a, e.to, w.min(e.weight))),
                None => Some((a, e.to, e.weight)),
            })
            .collect();
        for (a, b, weight) in missing {
            self.insert_directed(a, b, weight);
            self.insert_directed(b, a, weight);
        }
    }
}

/// Dead-ends, junctions and corners. Isolated tiles are not nodes.
fn is_decision_point(maze: &Maze, p: Point) -> bool {
    if !maze.is_walkable(p) {
        return false;
    }
    let mut nbs = [Point::ZERO; 4];
    let mut n = 0;
    for q in maze.neighbors(p) {
        nbs[n] = q;
        n += 1;
    }
    match n {
        0 => false,
        2 => {
            let (a, b) = (nbs[0], nbs[1]);
            let straight = (a.y == p.y && b.y == p.y) || (a.x == p.x && b.x == p.x);
            !straight
        }
        _ => true,
    }
}

/// Walk from `from` along `dir` until a node (hit) or a wall (none).
fn raycast(
    maze: &Maze,
    nodes: &BTreeSet<Point>,
    from: Point,
    dir: Point,
) -> Option<(Point, u32)> {
    let mut cur = from;
    // A fully open tunnel row could otherwise loop forever.
    for steps in 1..=maze.bounds().len() as u32 {
        cur = maze.step(cur, dir);
        if !maze.is_walkable(cur) || cur == from {
            return None;
        }
        if nodes.contains(&cur) {
            return Some((cur, steps));
        }
    }
    None
}
