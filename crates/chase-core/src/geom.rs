//! Geometry primitives: [`Point`], [`Range`] and [`PixelPoint`].
//!
//! Tiles are addressed by integer [`Point`]s; agents move in continuous pixel
//! space described by [`PixelPoint`].

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A tile coordinate or a unit heading. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// No heading.
    pub const ZERO: Self = Self::new(0, 0);
    pub const RIGHT: Self = Self::new(1, 0);
    pub const LEFT: Self = Self::new(-1, 0);
    pub const DOWN: Self = Self::new(0, 1);
    pub const UP: Self = Self::new(0, -1);

    /// Headings in neighbor order. Every search breaks ties by this order.
    pub const CARDINALS: [Self; 4] = [Self::RIGHT, Self::LEFT, Self::DOWN, Self::UP];

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Pull each axis into `r`. Empty ranges leave the point as is.
    pub fn clamp(self, r: Range) -> Self {
        if r.is_empty() {
            return self;
        }
        Self::new(
            self.x.clamp(r.min.x, r.max.x - 1),
            self.y.clamp(r.min.y, r.max.y - 1),
        )
    }
}

/// Row-major: by row, then by column. Graph maps iterate in this order.
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Scaling a heading into a tile offset.
impl Mul<i32> for Point {
    type Output = Self;
    fn mul(self, k: i32) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

/// The tile rectangle `[min, max)` of a maze.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Rectangle spanned by two corners, in either order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Number of tiles.
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width() as usize * self.height() as usize
        }
    }

    pub fn is_empty(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// `(min + width / 2, min + height / 2)`.
    pub fn center(self) -> Point {
        Point::new(
            self.min.x + self.width() / 2,
            self.min.y + self.height() / 2,
        )
    }

    /// Every tile, row by row.
    pub fn iter(self) -> impl Iterator<Item = Point> {
        (self.min.y..self.max.y)
            .flat_map(move |y| (self.min.x..self.max.x).map(move |x| Point::new(x, y)))
    }
}

/// A continuous position, or offset, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Moved `speed` pixels along a unit heading.
    #[inline]
    pub fn advanced(self, heading: Point, speed: f32) -> Self {
        Self::new(
            self.x + heading.x as f32 * speed,
            self.y + heading.y as f32 * speed,
        )
    }

    /// Signed length of this offset along a unit heading.
    #[inline]
    pub fn along(self, heading: Point) -> f32 {
        self.x * heading.x as f32 + self.y * heading.y as f32
    }

    pub fn distance(self, other: PixelPoint) -> f32 {
        let d = self - other;
        (d.x * d.x + d.y * d.y).sqrt()
    }
}

impl Sub for PixelPoint {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn point_round_trip() {
        let p = Point::new(3, -7);
        let json = serde_json::to_string(&p).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
