use thiserror::Error;

use crate::direction::Direction;
use crate::engine::MAX_DASH_LENGTH;
use crate::geometry::{Point, Rect};

/// Reasons an engine, map or geometry operation may fail.
///
/// Every failure is fatal for the call that raised it; nothing in this crate retries.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum DashError {
    /// A dash graph was requested from, or a map rendered with, a spawn point that is a wall.
    #[error("spawn point {point} is a wall")]
    InvalidSpawn {
        /// The walled spawn point.
        point: Point,
    },
    /// A straight slide ran further than [`MAX_DASH_LENGTH`] tiles, which only happens on degenerate maps.
    #[error("dash from {from} going {direction} is longer than {} tiles", MAX_DASH_LENGTH)]
    DashTooLong {
        /// Where the slide started.
        from: Point,
        /// Which way it was sliding.
        direction: Direction,
    },
    /// A rect with a non-positive width or height was used where an area is required.
    #[error("rect {0} has no area")]
    InvalidRect(Rect),
    /// A point outside a rect was converted to an index into that rect.
    #[error("point {point} is outside rect {rect}")]
    OutOfBounds {
        /// The offending point.
        point: Point,
        /// The rect it was expected in.
        rect: Rect,
    },
    /// A vector that is not axis-aligned was used as a direction.
    #[error("vector {0} is not axis-aligned")]
    NonOrthogonalVector(Point),
    /// An ASCII map contained no `S` tile.
    #[error("map has no spawn point")]
    MissingSpawn,
    /// [`apply_best_fix`](crate::DashEngine::apply_best_fix) found nothing to apply.
    #[error("no fixes available")]
    NoFixesAvailable,
    /// The spawn point was missing from every component while scoring a map.
    /// This should never happen, since the dash graph is built from the spawn point.
    #[error("spawn point component not found")]
    SpawnComponentNotFound,
    /// Map generation produced a dash graph without components.
    #[error("map has no components")]
    NoComponents,
}
