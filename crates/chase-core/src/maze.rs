//! The tile maze: an immutable integer-cell grid with one optional
//! wraparound row.
//!
//! [`Cell`] is a newtype over `i32`; only the maze's wall value blocks
//! movement, every other value (pellets, spawn markers, ...) is walkable.
//! The wraparound ("tunnel") row joins its leftmost and rightmost columns:
//! [`Maze::neighbors`] is the single place where that rule lives.

use std::fmt;

use crate::geom::{PixelPoint, Point, Range};

/// A maze cell value, wrapping an `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell(pub i32);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const WALL: Cell = Cell(1);
    pub const PELLET: Cell = Cell(2);
    pub const POWER: Cell = Cell(3);

    /// Get the underlying integer value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl From<Cell> for i32 {
    fn from(c: Cell) -> Self {
        c.0
    }
}

/// Errors produced while building a [`Maze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Width or height is not positive.
    InvalidDimensions { width: i32, height: i32 },
    /// Tile size in pixels is not positive.
    InvalidTileSize(i32),
    /// A text row does not have the same width as the first one.
    InconsistentWidth { row: i32, expected: i32, found: i32 },
    /// A character with no cell mapping was found.
    InvalidChar { ch: char, pos: Point },
    /// The wraparound row lies outside the grid.
    TunnelRowOutOfRange { row: i32, height: i32 },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "maze: invalid dimensions {width}x{height}")
            }
            Self::InvalidTileSize(size) => write!(f, "maze: invalid tile size {size}"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "maze: row {row} is {found} tiles wide, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "maze: invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::TunnelRowOutOfRange { row, height } => {
                write!(f, "maze: tunnel row {row} outside 0..{height}")
            }
        }
    }
}

impl std::error::Error for MazeError {}

const CLASSIC_LAYOUT: &str = include_str!("../data/classic.txt");
const CLASSIC_TUNNEL_ROW: i32 = 9;

/// An immutable snapshot of the maze layout.
///
/// Mutation is only offered while building a layout ([`set`](Self::set));
/// consumers share it read-only and rebuild navigation data when a new
/// snapshot replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    cells: Vec<Cell>,
    bounds: Range,
    tunnel_row: Option<i32>,
    tile_size: i32,
    wall: Cell,
}

impl Maze {
    /// Create a maze filled with [`Cell::EMPTY`].
    pub fn new(width: i32, height: i32, tile_size: i32) -> Result<Self, MazeError> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        if tile_size <= 0 {
            return Err(MazeError::InvalidTileSize(tile_size));
        }
        Ok(Self {
            cells: vec![Cell::EMPTY; (width * height) as usize],
            bounds: Range::new(0, 0, width, height),
            tunnel_row: None,
            tile_size,
            wall: Cell::WALL,
        })
    }

    /// The bundled 21x15 layout: power pellets in two corners, a spawn pen
    /// holding markers 5 to 8, and the tunnel on row 9.
    pub fn classic(tile_size: i32) -> Result<Self, MazeError> {
        Self::parse(CLASSIC_LAYOUT, tile_size)?.with_tunnel_row(CLASSIC_TUNNEL_ROW)
    }

    /// Parse a maze from ASCII art.
    ///
    /// `#` is a wall, a space is empty floor, `.` a pellet, `o` a power
    /// pellet and a digit `d` the literal cell value `d` (spawn markers).
    /// Leading and trailing blank lines are ignored; spaces are not trimmed
    /// since they are floor.
    pub fn parse(s: &str, tile_size: i32) -> Result<Self, MazeError> {
        let rows: Vec<&str> = s.trim_matches(|c| c == '\n' || c == '\r').lines().collect();
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.chars().count() as i32);
        let mut maze = Self::new(width, height, tile_size)?;

        for (y, row) in rows.iter().enumerate() {
            let y = y as i32;
            let found = row.chars().count() as i32;
            if found != width {
                return Err(MazeError::InconsistentWidth {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y);
                let cell = match ch {
                    '#' => Cell::WALL,
                    ' ' => Cell::EMPTY,
                    '.' => Cell::PELLET,
                    'o' => Cell::POWER,
                    d if d.is_ascii_digit() => Cell(d as i32 - '0' as i32),
                    _ => return Err(MazeError::InvalidChar { ch, pos }),
                };
                maze.set(pos, cell);
            }
        }
        Ok(maze)
    }

    /// Designate the wraparound row.
    pub fn with_tunnel_row(mut self, row: i32) -> Result<Self, MazeError> {
        if row < 0 || row >= self.height() {
            return Err(MazeError::TunnelRowOutOfRange {
                row,
                height: self.height(),
            });
        }
        self.tunnel_row = Some(row);
        Ok(self)
    }

    /// Use a different cell value as the wall marker.
    pub fn with_wall(mut self, wall: Cell) -> Self {
        self.wall = wall;
        self
    }

    /// Set the cell at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.idx(p) {
            self.cells[i] = cell;
        }
    }

    /// Get the cell at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.idx(p).map(|i| self.cells[i])
    }

    /// The tile rectangle `[0, width) × [0, height)`.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Edge length of a tile in pixels.
    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// The wraparound row, if any.
    pub fn tunnel_row(&self) -> Option<i32> {
        self.tunnel_row
    }

    /// The value treated as wall.
    pub fn wall(&self) -> Cell {
        self.wall
    }

    /// Bounds check plus non-wall test.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.at(p).is_some_and(|c| c != self.wall)
    }

    /// One step from `from` along `dir`, applying the wraparound rule.
    ///
    /// The result is not checked for walkability and may lie outside the
    /// grid when no wrap applies.
    #[inline]
    pub fn step(&self, from: Point, dir: Point) -> Point {
        let mut next = from + dir;
        if Some(next.y) == self.tunnel_row && from.y == next.y {
            if next.x < 0 {
                next.x = self.width() - 1;
            } else if next.x >= self.width() {
                next.x = 0;
            }
        }
        next
    }

    /// Walkable orthogonal neighbours of `p` in right, left, down, up order,
    /// wrapping across the tunnel row edges.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        Point::CARDINALS
            .into_iter()
            .map(move |d| self.step(p, d))
            .filter(move |&n| self.is_walkable(n))
    }

    /// All tiles whose value is one of `values`, in row-major order.
    pub fn find(&self, values: &[i32]) -> Vec<Point> {
        self.bounds
            .iter()
            .filter(|&p| self.at(p).is_some_and(|c| values.contains(&c.0)))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Pixel helpers
    // -----------------------------------------------------------------------

    /// Half a tile in pixels: the in-tile offset of a tile center.
    #[inline]
    pub fn half_tile(&self) -> f32 {
        self.tile_size as f32 / 2.0
    }

    /// Width of the whole grid in pixels.
    #[inline]
    pub fn pixel_width(&self) -> f32 {
        (self.width() * self.tile_size) as f32
    }

    /// Tile containing a pixel position.
    #[inline]
    pub fn tile_of(&self, pos: PixelPoint) -> Point {
        let ts = self.tile_size as f32;
        Point::new((pos.x / ts).floor() as i32, (pos.y / ts).floor() as i32)
    }

    /// Pixel position of a tile center.
    #[inline]
    pub fn tile_center(&self, tile: Point) -> PixelPoint {
        let ts = self.tile_size as f32;
        PixelPoint::new(
            tile.x as f32 * ts + self.half_tile(),
            tile.y as f32 * ts + self.half_tile(),
        )
    }

    /// Offset of `pos` from its tile's center, per axis.
    #[inline]
    pub fn center_offset(&self, pos: PixelPoint) -> PixelPoint {
        let c = self.tile_center(self.tile_of(pos));
        PixelPoint::new(pos.x - c.x, pos.y - c.y)
    }

    /// Teleport across the tunnel row.
    ///
    /// Heading left past the center of the leftmost tile (or right past the
    /// center of the rightmost tile) maps `x` to the mirrored offset
    /// `pixel_width - x` on the opposite edge. Returns `None` when no wrap
    /// applies.
    pub fn wrap_pixel(&self, pos: PixelPoint, heading: Point) -> Option<PixelPoint> {
        let row = self.tunnel_row?;
        let tile = self.tile_of(pos);
        if tile.y != row {
            return None;
        }
        let width = self.pixel_width();
        let half = self.half_tile();
        let leaving_left = tile.x <= 0 && heading.x < 0 && pos.x < half;
        let leaving_right = tile.x >= self.width() - 1 && heading.x > 0 && pos.x > width - half;
        if !leaving_left && !leaving_right {
            return None;
        }
        // Land at least half a pixel inside the grid.
        let x = if leaving_left {
            (width - pos.x).min(width - 0.5)
        } else {
            (width - pos.x).max(0.5)
        };
        Some(PixelPoint::new(x, pos.y))
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.width() + p.x) as usize)
    }
}

impl fmt::Display for Maze {
    /// Renders the maze back to the ASCII form accepted by
    /// [`Maze::parse`]. Values above 9 are shown as `?`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let cell = self.cells[(y * self.width() + x) as usize];
                let ch = match cell {
                    c if c == self.wall => '#',
                    Cell::EMPTY => ' ',
                    Cell::PELLET => '.',
                    Cell::POWER => 'o',
                    Cell(v @ 0..=9) => char::from(b'0' + v as u8),
                    _ => '?',
                };
                write!(f, "{ch}")?;
            }
            if y + 1 < self.height() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TUNNEL: &str = "\
#####
#...#
..#..
#...#
#####";

    fn tunnel() -> Maze {
        Maze::parse(TUNNEL, 10).unwrap().with_tunnel_row(2).unwrap()
    }

    #[test]
    fn parse_and_size() {
        let m = tunnel();
        assert_eq!(m.width(), 5);
        assert_eq!(m.height(), 5);
        assert_eq!(m.at(Point::new(0, 0)), Some(Cell::WALL));
        assert_eq!(m.at(Point::new(1, 1)), Some(Cell::PELLET));
        assert_eq!(m.at(Point::new(9, 9)), None);
        assert_eq!(m.to_string(), TUNNEL);
    }

    #[test]
    fn parse_spawn_digits() {
        let m = Maze::parse("#5 6#", 8).unwrap();
        assert_eq!(m.at(Point::new(1, 0)), Some(Cell(5)));
        assert_eq!(m.at(Point::new(2, 0)), Some(Cell::EMPTY));
        assert_eq!(m.find(&[5, 6]), vec![Point::new(1, 0), Point::new(3, 0)]);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Maze::parse("###\n##", 8),
            Err(MazeError::InconsistentWidth {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Maze::parse("#x#", 8),
            Err(MazeError::InvalidChar {
                ch: 'x',
                pos: Point::new(1, 0)
            })
        );
        assert_eq!(Maze::parse("###", 0), Err(MazeError::InvalidTileSize(0)));
        assert!(matches!(
            Maze::parse("", 8),
            Err(MazeError::InvalidDimensions { .. })
        ));
        assert_eq!(
            tunnel().with_tunnel_row(5).unwrap_err(),
            MazeError::TunnelRowOutOfRange { row: 5, height: 5 }
        );
    }

    #[test]
    fn walkable_respects_bounds_and_wall() {
        let m = tunnel();
        assert!(m.is_walkable(Point::new(1, 1)));
        assert!(!m.is_walkable(Point::new(2, 2)));
        assert!(!m.is_walkable(Point::new(-1, 2)));
        let custom = Maze::parse("#1#", 8).unwrap().with_wall(Cell(2));
        assert!(custom.is_walkable(Point::new(0, 0)));
    }

    #[test]
    fn neighbors_wrap_only_on_tunnel_row() {
        let m = tunnel();
        let left_edge: Vec<_> = m.neighbors(Point::new(0, 2)).collect();
        // right, left (wrapped), down/up are walls
        assert_eq!(left_edge, vec![Point::new(1, 2), Point::new(4, 2)]);
        let right_edge: Vec<_> = m.neighbors(Point::new(4, 2)).collect();
        assert_eq!(right_edge, vec![Point::new(0, 2), Point::new(3, 2)]);

        let flat = Maze::parse(TUNNEL, 10).unwrap();
        let no_wrap: Vec<_> = flat.neighbors(Point::new(0, 2)).collect();
        assert_eq!(no_wrap, vec![Point::new(1, 2)]);
    }

    #[test]
    fn neighbor_order_is_right_left_down_up() {
        let m = Maze::new(3, 3, 10).unwrap();
        let n: Vec<_> = m.neighbors(Point::new(1, 1)).collect();
        assert_eq!(
            n,
            vec![
                Point::new(2, 1),
                Point::new(0, 1),
                Point::new(1, 2),
                Point::new(1, 0)
            ]
        );
    }

    #[test]
    fn pixel_tile_conversion() {
        let m = tunnel();
        assert_eq!(m.tile_of(PixelPoint::new(15.0, 29.9)), Point::new(1, 2));
        assert_eq!(m.tile_of(PixelPoint::new(-0.5, 5.0)), Point::new(-1, 0));
        assert_eq!(m.tile_center(Point::new(2, 1)), PixelPoint::new(25.0, 15.0));
        assert_eq!(
            m.center_offset(PixelPoint::new(27.0, 14.0)),
            PixelPoint::new(2.0, -1.0)
        );
    }

    #[test]
    fn wrap_round_trip_mirrors_offset() {
        let m = tunnel();
        let y = m.tile_center(Point::new(0, 2)).y;

        let out = m.wrap_pixel(PixelPoint::new(3.0, y), Point::LEFT).unwrap();
        assert_eq!(out, PixelPoint::new(47.0, y));
        assert_eq!(m.tile_of(out), Point::new(4, 2));

        let back = m.wrap_pixel(out, Point::RIGHT).unwrap();
        assert_eq!(back, PixelPoint::new(3.0, y));
        assert_eq!(m.tile_of(back), Point::new(0, 2));
    }

    #[test]
    fn classic_layout() {
        let m = Maze::classic(16).unwrap();
        assert_eq!((m.width(), m.height()), (21, 15));
        assert_eq!(m.tunnel_row(), Some(9));
        assert_eq!(m.find(&[Cell::POWER.value()]).len(), 2);
        for marker in 5..=8 {
            assert_eq!(m.find(&[marker]).len(), 1);
        }
        assert!(m.is_walkable(Point::new(0, 9)));
    }

    #[test]
    fn wrap_lands_inside_grid() {
        let m = tunnel();
        let y = m.tile_center(Point::new(0, 2)).y;
        let out = m.wrap_pixel(PixelPoint::new(0.0, y), Point::LEFT).unwrap();
        assert_eq!(m.tile_of(out), Point::new(4, 2));
        let out = m.wrap_pixel(PixelPoint::new(51.0, y), Point::RIGHT).unwrap();
        assert_eq!(m.tile_of(out), Point::new(0, 2));
    }

    #[test]
    fn wrap_requires_heading_and_row() {
        let m = tunnel();
        let y = m.tile_center(Point::new(0, 2)).y;
        // Before the center, or heading inward: no wrap.
        assert!(m.wrap_pixel(PixelPoint::new(7.0, y), Point::LEFT).is_none());
        assert!(m.wrap_pixel(PixelPoint::new(3.0, y), Point::RIGHT).is_none());
        // Not on the tunnel row.
        assert!(m.wrap_pixel(PixelPoint::new(3.0, 15.0), Point::LEFT).is_none());
        // No tunnel at all.
        let flat = Maze::parse(TUNNEL, 10).unwrap();
        assert!(flat.wrap_pixel(PixelPoint::new(3.0, y), Point::LEFT).is_none());
    }
}
