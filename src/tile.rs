use crate::geometry::Point;

/// The explicit state of a tile on a [`WallMap`](crate::WallMap). Tiles never written are walls.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Tile {
    /// The player can occupy this tile.
    Open,
    /// The player collides with this tile.
    #[default]
    Wall,
}

impl Tile {
    /// The tile state for a wall flag.
    pub const fn from_wall(is_wall: bool) -> Self {
        match is_wall {
            true => Self::Wall,
            false => Self::Open,
        }
    }

    /// Whether this tile blocks movement.
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// A tile, frozen after analysis of the map it belongs to.
///
/// Analysed tiles are derived data: they are recomputed on every analysis call and go stale as soon as the map changes.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysedTile {
    /// The analysed location.
    pub point: Point,
    /// Whether the tile is a wall.
    pub is_wall: bool,
    /// Whether the player can slide into this wall, i.e. some reachable dash ends against it.
    pub can_collide: bool,
    /// Whether a dash reachable from spawn ends on this tile.
    pub can_stop: bool,
    /// How many reachable dashes sweep over this tile, counting both of their endpoints.
    pub number_of_dashes_passing_over: usize,
    /// The strongly connected component this tile belongs to, if the player can stop here.
    pub component_id: Option<usize>,
    /// Normalized score of the best fix touching this tile, if the tile was considered for a fix.
    pub fix_score: Option<f64>,
}
