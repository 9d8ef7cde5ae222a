//! The pursued agent as hunters see it.

use chase_core::{Maze, PixelPoint, Point};

/// Read-only view of the agent being chased. Its own movement happens
/// elsewhere; hunters only look.
pub trait Pursued {
    /// Continuous pixel position.
    fn position(&self) -> PixelPoint;
    /// Unit heading, zero when standing still.
    fn heading(&self) -> Point;
}

/// Plain snapshot of a pursued agent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PursuedState {
    pub position: PixelPoint,
    pub heading: Point,
}

impl PursuedState {
    pub fn new(position: PixelPoint, heading: Point) -> Self {
        Self { position, heading }
    }

    /// Standing on the center of `tile`.
    pub fn at_tile(maze: &Maze, tile: Point, heading: Point) -> Self {
        Self::new(maze.tile_center(tile), heading)
    }
}

impl Pursued for PursuedState {
    fn position(&self) -> PixelPoint {
        self.position
    }

    fn heading(&self) -> Point {
        self.heading
    }
}

/// What one hunter observes at the start of its tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sighting {
    /// Tile of the pursued agent. May lie just outside the grid while it
    /// crosses the tunnel.
    pub pursued_tile: Point,
    pub pursued_heading: Point,
    /// Current tile of this hunter's partner.
    pub partner_tile: Option<Point>,
}

impl Sighting {
    /// Observe `pursued` in `maze`, with no partner.
    pub fn of<P: Pursued + ?Sized>(maze: &Maze, pursued: &P) -> Self {
        Self {
            pursued_tile: maze.tile_of(pursued.position()),
            pursued_heading: pursued.heading(),
            partner_tile: None,
        }
    }

    pub fn with_partner(mut self, partner_tile: Option<Point>) -> Self {
        self.partner_tile = partner_tile;
        self
    }
}
