//! Stepwise-degrading route planning.
//!
//! A hunter at a decision point asks for its next move. The planner tries
//! each [`Attempt`] of [`FALLBACK_CHAIN`] in order and reports which one
//! produced the move, so an unreachable goal degrades gracefully down to a
//! greedy step instead of leaving the hunter frozen.

use std::fmt;

use chase_core::{Maze, Point};
use chase_paths::{NavGraph, SearchRange, manhattan};

/// One way of choosing the next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attempt {
    /// Dijkstra over the graph from the current node to the goal node.
    ShortestPath,
    /// Tile BFS straight toward the raw goal tile.
    StepTowardGoal,
    /// Tile BFS toward the node nearest the raw goal tile.
    StepTowardGoalNode,
    /// The walkable neighbor closest (Manhattan) to the raw goal tile.
    GreedyNeighbor,
}

/// Attempts in the order they are tried.
pub const FALLBACK_CHAIN: [Attempt; 4] = [
    Attempt::ShortestPath,
    Attempt::StepTowardGoal,
    Attempt::StepTowardGoalNode,
    Attempt::GreedyNeighbor,
];

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attempt::ShortestPath => "shortest path",
            Attempt::StepTowardGoal => "step toward goal",
            Attempt::StepTowardGoalNode => "step toward goal node",
            Attempt::GreedyNeighbor => "greedy neighbor",
        };
        f.write_str(name)
    }
}

/// The outcome of a successful planning round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub attempt: Attempt,
    /// Tile or node to head for next.
    pub next: Point,
    /// Full node route for [`Attempt::ShortestPath`], otherwise the single
    /// hop `[from, next]`.
    pub route: Vec<Point>,
}

/// Inputs of a planning round.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Query<'a> {
    pub(crate) maze: &'a Maze,
    pub(crate) graph: &'a NavGraph,
    pub(crate) from: Point,
    /// Goal resolved to a graph node, when one exists.
    pub(crate) goal_node: Option<Point>,
    pub(crate) goal_tile: Point,
}

/// Run the fallback chain. `None` only when `from` has no walkable
/// neighbor at all.
pub(crate) fn plan(search: &mut SearchRange, q: &Query<'_>) -> Option<Plan> {
    for attempt in FALLBACK_CHAIN {
        if let Some(plan) = try_attempt(search, q, attempt) {
            return Some(plan);
        }
        log::trace!("{attempt} failed from {} toward {}", q.from, q.goal_tile);
    }
    None
}

fn try_attempt(search: &mut SearchRange, q: &Query<'_>, attempt: Attempt) -> Option<Plan> {
    let hop = |next: Point| Plan {
        attempt,
        next,
        route: vec![q.from, next],
    };
    match attempt {
        Attempt::ShortestPath => {
            let goal = q.goal_node?;
            let route = q.graph.shortest_path(q.from, goal);
            let next = *route.get(1)?;
            Some(Plan {
                attempt,
                next,
                route,
            })
        }
        Attempt::StepTowardGoal => search.first_step_toward(q.maze, q.from, q.goal_tile).map(hop),
        Attempt::StepTowardGoalNode => {
            let node = search.nearest_node(q.maze, q.graph, q.goal_tile)?;
            search.first_step_toward(q.maze, q.from, node).map(hop)
        }
        Attempt::GreedyNeighbor => greedy_step(q.maze, q.from, q.goal_tile).map(hop),
    }
}

/// The walkable neighbor of `from` closest to `goal` by Manhattan distance,
/// ties going to the first in neighbor order.
pub(crate) fn greedy_step(maze: &Maze, from: Point, goal: Point) -> Option<Point> {
    maze.neighbors(from).min_by_key(|&n| manhattan(n, goal))
}

/// Unit heading that moves from `from` toward `to`.
///
/// `to` is expected on the same row or column. Between the two edge tiles
/// of the tunnel row the heading points through the tunnel. Unaligned
/// targets get the dominant axis.
pub(crate) fn heading_toward(maze: &Maze, from: Point, to: Point) -> Point {
    let d = to - from;
    if d.y == 0 && d.x != 0 {
        let last = maze.width() - 1;
        if maze.tunnel_row() == Some(from.y) {
            if from.x == 0 && to.x == last {
                return Point::LEFT;
            }
            if from.x == last && to.x == 0 {
                return Point::RIGHT;
            }
        }
        return Point::new(d.x.signum(), 0);
    }
    if d.x.abs() > d.y.abs() {
        Point::new(d.x.signum(), 0)
    } else {
        Point::new(0, d.y.signum())
    }
}
