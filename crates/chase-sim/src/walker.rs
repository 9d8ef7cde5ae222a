//! A wandering stand-in for the player.

use chase_core::{Maze, PixelPoint, Point};
use chase_hunt::Pursued;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// Walks tile to tile, picking a random open direction at every tile
/// center and only turning back at dead ends.
#[derive(Debug, Clone)]
pub struct Walker {
    start: Point,
    pos: PixelPoint,
    heading: Point,
    speed: f32,
    rng: SmallRng,
}

impl Walker {
    pub fn new(maze: &Maze, start: Point, speed: f32, rng: SmallRng) -> Self {
        Self {
            start,
            pos: maze.tile_center(start),
            heading: Point::ZERO,
            speed,
            rng,
        }
    }

    /// Back to the start tile, stopped.
    pub fn reset(&mut self, maze: &Maze) {
        self.pos = maze.tile_center(self.start);
        self.heading = Point::ZERO;
    }

    pub fn tile(&self, maze: &Maze) -> Point {
        maze.tile_of(self.pos)
    }

    /// Move for one tick.
    pub fn advance(&mut self, maze: &Maze) {
        let tile = self.tile(maze);
        let center = maze.tile_center(tile);
        if self.pos == center {
            self.choose_heading(maze, tile);
        }
        if self.heading.is_zero() {
            return;
        }
        let ahead = (center - self.pos).along(self.heading);
        self.pos = if ahead > 0.0 && ahead <= self.speed {
            center
        } else {
            self.pos.advanced(self.heading, self.speed)
        };
        if let Some(p) = maze.wrap_pixel(self.pos, self.heading) {
            self.pos = p;
        }
    }

    fn choose_heading(&mut self, maze: &Maze, tile: Point) {
        let back = -self.heading;
        let open: Vec<Point> = Point::CARDINALS
            .into_iter()
            .filter(|&d| maze.is_walkable(maze.step(tile, d)))
            .collect();
        let forward: Vec<Point> = open.iter().copied().filter(|&d| d != back).collect();
        let pool = if forward.is_empty() { &open } else { &forward };
        self.heading = pool.choose(&mut self.rng).copied().unwrap_or(Point::ZERO);
    }
}

impl Pursued for Walker {
    fn position(&self) -> PixelPoint {
        self.pos
    }

    fn heading(&self) -> Point {
        self.heading
    }
}
