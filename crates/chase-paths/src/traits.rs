use chase_core::{Maze, Point};

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    ///
    /// Order matters: searches break ties by enumeration order.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

impl Pather for Maze {
    /// Walkable neighbours with the tunnel wrap, right, left, down, up.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(Maze::neighbors(self, p));
    }
}
