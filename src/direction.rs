use strum::{Display, EnumString, VariantArray};

use crate::error::DashError;
use crate::geometry::Point;

/// The four cardinal directions a dash can take.
///
/// [`VARIANTS`](VariantArray::VARIANTS) lists them in the order the engine explores them: right, down, left, up.
/// Directions parse from and print as their lowercase names, e.g. `"left".parse::<Direction>()`.
#[derive(Copy, Clone, VariantArray, Display, EnumString, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Positive x.
    Right,
    /// Positive y.
    Down,
    /// Negative x.
    Left,
    /// Negative y.
    Up,
}

impl Direction {
    /// The unit vector of this direction.
    pub const fn offset(self) -> Point {
        match self {
            Self::Right => Point::new(1, 0),
            Self::Down => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
            Self::Up => Point::new(0, -1),
        }
    }

    /// Take one step from `point` in this direction.
    pub fn attempt_from(self, point: Point) -> Point {
        point + self.offset()
    }

    /// The opposite direction.
    pub const fn invert(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
        }
    }

    /// The direction an axis-aligned `vector` points in, regardless of its length.
    ///
    /// Fails with [`NonOrthogonalVector`](DashError::NonOrthogonalVector) for diagonal or zero vectors.
    pub fn from_vector(vector: Point) -> Result<Self, DashError> {
        let unit = vector.normalize()?;

        Self::VARIANTS.iter()
            .copied()
            .find(|dir| dir.offset() == unit)
            .ok_or(DashError::NonOrthogonalVector(vector))
    }

    /// Determine the direction from `a` to the adjacent point `b`, or [`None`] if they are not 4-neighbors.
    pub fn direction_to(a: Point, b: Point) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|dir| dir.attempt_from(a) == b)
    }

    /// All four neighbors of `point`, each paired with the direction leading to it.
    pub fn neighbors_of(point: Point) -> impl Iterator<Item = (Self, Point)> {
        Self::VARIANTS.iter().map(move |dir| (*dir, dir.attempt_from(point)))
    }
}
