use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::DashError;

type Coord = i32;

/// A point `(x, y)` on the unbounded grid, doubling as a 2D integer vector.
///
/// `x` grows to the right and `y` grows downwards, so row 0 of an ASCII map is the top row.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: Coord,
    /// Vertical coordinate.
    pub y: Coord,
}

/// The origin `(0, 0)`, also the default spawn point.
pub const ORIGIN: Point = Point { x: 0, y: 0 };

impl Point {
    /// Construct a point from its coordinates.
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Reduce an axis-aligned vector to its unit direction.
    ///
    /// Every dash moves along a cardinal direction, so a vector with zero or two nonzero components is an error:
    /// [`NonOrthogonalVector`](DashError::NonOrthogonalVector).
    pub fn normalize(self) -> Result<Self, DashError> {
        let normalized = Self::new(self.x.signum(), self.y.signum());

        if normalized.x.abs() + normalized.y.abs() != 1 {
            return Err(DashError::NonOrthogonalVector(self));
        }

        Ok(normalized)
    }

    /// Manhattan length of this vector; equal to the number of steps for axis-aligned vectors.
    pub const fn manhattan_length(self) -> Coord {
        self.x.abs() + self.y.abs()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<Coord> for Point {
    type Output = Self;

    fn mul(self, rhs: Coord) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(Coord, Coord)> for Point {
    fn from(value: (Coord, Coord)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// An axis-aligned rectangle of tiles with its top left corner at `(x, y)`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: Coord,
    /// Top edge (inclusive).
    pub y: Coord,
    /// Number of columns.
    pub width: Coord,
    /// Number of rows.
    pub height: Coord,
}

impl Rect {
    /// Construct a rect from its top left corner and dimensions.
    pub const fn new(x: Coord, y: Coord, width: Coord, height: Coord) -> Self {
        Self { x, y, width, height }
    }

    /// Whether both dimensions are positive.
    pub const fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Fail with [`InvalidRect`](DashError::InvalidRect) unless this rect has a positive area.
    pub fn validate(&self) -> Result<(), DashError> {
        match self.has_area() {
            true => Ok(()),
            false => Err(DashError::InvalidRect(*self)),
        }
    }

    /// Whether `point` lies within this rect. Membership is undefined for rects without area.
    pub fn contains(&self, point: Point) -> Result<bool, DashError> {
        self.validate()?;

        Ok(point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height)
    }

    /// The row-major index of `point` in a flat array covering this rect.
    pub fn index_of(&self, point: Point) -> Result<usize, DashError> {
        if !self.contains(point)? {
            return Err(DashError::OutOfBounds { point, rect: *self });
        }

        // both offsets are non-negative after the membership check
        Ok((self.width * (point.y - self.y) + point.x - self.x) as usize)
    }

    /// Number of tiles covered, zero for rects without area.
    pub fn area(&self) -> usize {
        match self.has_area() {
            true => self.width as usize * self.height as usize,
            false => 0,
        }
    }

    /// Every point in this rect in row-major order. Yields nothing for rects without area.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let Self { x, y, width, height } = *self;
        let (width, height) = (width.max(0), height.max(0));

        (y..y + height).flat_map(move |row| (x..x + width).map(move |col| Point::new(col, row)))
    }

    /// Shrink by `margin` on every side.
    pub const fn inset(&self, margin: Coord) -> Self {
        Self::new(self.x + margin, self.y + margin, self.width - 2 * margin, self.height - 2 * margin)
    }

    /// The top left corner.
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{} {}x{}", self.x, self.y, self.width, self.height)
    }
}
