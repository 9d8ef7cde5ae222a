//! Navigation over grid mazes.
//!
//! This crate turns a dense [`Maze`](chase_core::Maze) into a sparse weighted
//! graph of decision points and answers the queries a pursuing agent needs:
//!
//! - **Graph building** ([`NavGraph::build`]): dead-ends, corners and
//!   junctions become nodes, straight corridors become weighted edges.
//! - **Nearest node** ([`SearchRange::nearest_node`]): breadth-first search
//!   from any tile to the closest node, or just its first hop.
//! - **Shortest path** ([`NavGraph::shortest_path`]): Dijkstra between nodes.
//!
//! Tile searches run through [`SearchRange`], which owns and reuses its
//! buffers so repeated queries incur no allocations after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, graph building |

mod bfs;
mod dijkstra;
mod distance;
mod graph;
mod search;
mod traits;

pub use distance::{euclidean, manhattan};
pub use graph::{Edge, NavGraph};
pub use search::SearchRange;
pub use traits::Pather;
