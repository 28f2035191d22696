use std::collections::hash_map::DefaultHasher;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::DashError;
use crate::geometry::{Point, Rect};
use crate::storage::GridStorage;
use crate::tile::Tile;

const WALL_CHAR: char = '#';
const OPEN_CHAR: char = '.';
const SPAWN_CHAR: char = 'S';

/// Seed for [`WallMap::fill_random`]. The same seed always yields the same layout.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Seed {
    /// A numeric seed, used as is.
    Number(u64),
    /// A text seed, hashed down to a number.
    Text(String),
}

impl Seed {
    fn to_u64(&self) -> u64 {
        match self {
            Self::Number(number) => *number,
            Self::Text(text) => {
                let mut hasher = DefaultHasher::new();
                text.hash(&mut hasher);
                hasher.finish()
            }
        }
    }

    fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.to_u64())
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Walls and open tiles on an unbounded grid.
///
/// The grid starts out as solid wall in every direction; content is carved out of it by opening tiles.
/// Only tiles that were explicitly written are stored.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WallMap {
    tiles: GridStorage<Tile>,
}

impl WallMap {
    /// Construct a map that is wall everywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the tile at `point` a wall or open it.
    pub fn set_wall_at(&mut self, point: Point, is_wall: bool) {
        self.tiles.set_at(point, Tile::from_wall(is_wall));
    }

    /// Whether the tile at `point` is a wall. Tiles never written are walls.
    pub fn get_wall_at(&self, point: Point) -> bool {
        self.tiles.get_at(point).copied().unwrap_or_default().is_wall()
    }

    /// The explicitly stored state at `point`, [`None`] if it was never written.
    pub fn tile_at(&self, point: Point) -> Option<Tile> {
        self.tiles.get_at(point).copied()
    }

    /// Put back a state previously read with [`Self::tile_at`], including the unwritten state.
    pub fn restore_tile(&mut self, point: Point, tile: Option<Tile>) {
        match tile {
            Some(tile) => self.tiles.set_at(point, tile),
            None => self.tiles.remove_at(point),
        };
    }

    /// Write every tile in `rect`.
    pub fn fill_wall_at(&mut self, rect: Rect, is_wall: bool) {
        for point in rect.points() {
            self.set_wall_at(point, is_wall);
        }
    }

    /// Write every tile in `rect`, each becoming a wall with probability `wall_probability`.
    ///
    /// With a [`Seed`] the layout is reproducible; without one the generator is seeded from the OS.
    pub fn fill_random(&mut self, rect: Rect, wall_probability: f64, seed: Option<Seed>) {
        let mut rng = match seed {
            Some(seed) => seed.rng(),
            None => StdRng::from_os_rng(),
        };

        for point in rect.points() {
            let is_wall = rng.random::<f64>() < wall_probability;
            self.set_wall_at(point, is_wall);
        }
    }

    /// The smallest rect covering every open tile, or an empty rect at the origin if nothing is open.
    pub fn get_bounds(&self) -> Rect {
        let open = self.tiles.iter()
            .filter(|(_, tile)| !tile.is_wall())
            .map(|(point, _)| point);

        let mut bounds: Option<(Point, Point)> = None;
        for point in open {
            bounds = Some(match bounds {
                None => (point, point),
                Some((min, max)) => (
                    Point::new(min.x.min(point.x), min.y.min(point.y)),
                    Point::new(max.x.max(point.x), max.y.max(point.y)),
                ),
            });
        }

        match bounds {
            None => Rect::new(0, 0, 0, 0),
            Some((min, max)) => Rect::new(min.x, min.y, max.x - min.x + 1, max.y - min.y + 1),
        }
    }

    /// Render `rect` with `#` for walls and `.` for open tiles, one line per row and no trailing newline.
    ///
    /// If `spawn_point` is given it is drawn as `S`; a walled spawn point fails with [`InvalidSpawn`](DashError::InvalidSpawn).
    pub fn get_rect_as_string(&self, rect: Rect, spawn_point: Option<Point>) -> Result<String, DashError> {
        if let Some(point) = spawn_point.filter(|point| self.get_wall_at(*point)) {
            return Err(DashError::InvalidSpawn { point });
        }

        if !rect.has_area() {
            return Ok(String::new());
        }

        let chars = Array2::from_shape_fn((rect.height as usize, rect.width as usize), |(row, col)| {
            let point = rect.origin() + Point::new(col as i32, row as i32);

            if spawn_point == Some(point) {
                SPAWN_CHAR
            } else if self.get_wall_at(point) {
                WALL_CHAR
            } else {
                OPEN_CHAR
            }
        });

        Ok(print(chars))
    }

    /// Render the bounds of this map with the spawn point marked. See [`Self::get_rect_as_string`].
    pub fn to_display_string(&self, spawn_point: Point) -> Result<String, DashError> {
        self.get_rect_as_string(self.get_bounds(), Some(spawn_point))
    }

    /// Parse rows of `#`, `.` and `S` into a map and its spawn point. Row `n`, column `m` is the point `(m, n)`.
    ///
    /// Anything other than `.` and `S` stays wall. The first `S` found is the spawn point; fails with
    /// [`MissingSpawn`](DashError::MissingSpawn) if there is none.
    pub fn from_ascii(text: &str) -> Result<(Self, Point), DashError> {
        let mut map = Self::new();
        let mut spawn_point = None;

        for (row, line) in text.lines().enumerate() {
            for (col, char) in line.chars().enumerate() {
                let point = Point::new(col as i32, row as i32);
                match char {
                    OPEN_CHAR => map.set_wall_at(point, false),
                    SPAWN_CHAR => {
                        map.set_wall_at(point, false);
                        spawn_point.get_or_insert(point);
                    }
                    _ => {}
                }
            }
        }

        let spawn_point = spawn_point.ok_or(DashError::MissingSpawn)?;
        Ok((map, spawn_point))
    }
}

fn print(board: Array2<char>) -> String {
    let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

    for (index, row) in board.rows().into_iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.extend(row.iter());
    }

    out
}

impl Display for WallMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // without a spawn point rendering cannot fail
        match self.get_rect_as_string(self.get_bounds(), None) {
            Ok(rendered) => write!(f, "{}", rendered),
            Err(_) => Err(std::fmt::Error),
        }
    }
}
