use std::collections::HashMap;

use crate::geometry::Point;

/// Sparse storage of values keyed by grid point. Points never written read back as [`None`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridStorage<T> {
    cells: HashMap<Point, T>,
}

impl<T> Default for GridStorage<T> {
    fn default() -> Self {
        Self {
            cells: Default::default(),
        }
    }
}

impl<T> GridStorage<T> {
    /// Construct empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` at `point`, returning what was there before.
    pub fn set_at(&mut self, point: Point, value: T) -> Option<T> {
        self.cells.insert(point, value)
    }

    /// The value at `point`, if one was ever stored.
    pub fn get_at(&self, point: Point) -> Option<&T> {
        self.cells.get(&point)
    }

    /// Forget the value at `point`, returning it.
    pub fn remove_at(&mut self, point: Point) -> Option<T> {
        self.cells.remove(&point)
    }

    /// Every stored point and its value, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.cells.iter().map(|(point, value)| (*point, value))
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
