//! **chase-core**: foundational types for grid-maze pursuit.
//!
//! This crate provides the geometry primitives shared by the rest of the
//! workspace (integer tile [`Point`]s, half-open [`Range`]s and continuous
//! [`PixelPoint`]s) and the immutable tile [`Maze`] with its single
//! wraparound row.

pub mod geom;
pub mod maze;

pub use geom::{PixelPoint, Point, Range};
pub use maze::{Cell, Maze, MazeError};
