use std::collections::HashSet;
use std::str::FromStr;

use itertools::Itertools;
use log::{debug, info, trace};
use strum::VariantArray;

use crate::builder::{EngineBuilder, GenerationOptions};
use crate::direction::Direction;
use crate::error::DashError;
use crate::fix::{Fix, FixTile};
use crate::geometry::{Point, Rect};
use crate::graph::{find_strongly_connected_components, DirectedGraph};
use crate::map::{Seed, WallMap};
use crate::path::PathFinder;

/// The longest straight slide allowed before [`DashTooLong`](DashError::DashTooLong) is raised.
pub const MAX_DASH_LENGTH: usize = 100;

/// Graph of every point the player can stop on, with an edge per dash between them.
pub type DashGraph = DirectedGraph<Point>;

/// A maximal straight slide from one stoppable point to another.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Dash {
    /// Where the slide starts.
    pub from: Point,
    /// Where it is stopped by a wall.
    pub to: Point,
}

impl Dash {
    /// The direction this dash moves in.
    pub fn direction(&self) -> Result<Direction, DashError> {
        Direction::from_vector(self.to - self.from)
    }

    /// Every point the dash sweeps over, both ends included.
    pub fn points(&self) -> Result<impl Iterator<Item = Point>, DashError> {
        let vector = self.to - self.from;
        let step = vector.normalize()?;
        let from = self.from;

        Ok((0..=vector.manhattan_length()).map(move |distance| from + step * distance))
    }
}

impl From<(Point, Point)> for Dash {
    fn from(value: (Point, Point)) -> Self {
        Self { from: value.0, to: value.1 }
    }
}

/// Owns a [`WallMap`] and a spawn point, and analyses, repairs and generates maps around them.
///
/// Nothing derived from the map is cached: graphs, components and scores are rebuilt by every call,
/// so the engine can be freely edited between calls.
#[derive(Clone, Debug)]
pub struct DashEngine {
    /// Where the player starts. Always open.
    pub spawn_point: Point,
    /// Where the player currently is, moved by [`Self::dash`].
    pub player_position: Point,
    pub(crate) map: WallMap,
}

impl Default for DashEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DashEngine {
    /// An engine spawning at the origin on an otherwise all-wall map.
    pub fn new() -> Self {
        EngineBuilder::new().build()
    }

    /// Start configuring an engine. See [`EngineBuilder`].
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(crate) fn from_parts(map: WallMap, spawn_point: Point) -> Self {
        let mut engine = Self {
            spawn_point,
            player_position: spawn_point,
            map,
        };
        engine.set_wall_at(spawn_point, false);

        engine
    }

    /// Read access to the underlying map.
    pub fn wall_map(&self) -> &WallMap {
        &self.map
    }

    /// See [`WallMap::set_wall_at`].
    pub fn set_wall_at(&mut self, point: Point, is_wall: bool) {
        self.map.set_wall_at(point, is_wall);
    }

    /// See [`WallMap::get_wall_at`].
    pub fn get_wall_at(&self, point: Point) -> bool {
        self.map.get_wall_at(point)
    }

    /// See [`WallMap::fill_wall_at`].
    pub fn fill_wall_at(&mut self, rect: Rect, is_wall: bool) {
        self.map.fill_wall_at(rect, is_wall);
    }

    /// See [`WallMap::fill_random`].
    pub fn fill_random(&mut self, rect: Rect, wall_probability: f64, seed: Option<Seed>) {
        self.map.fill_random(rect, wall_probability, seed);
    }

    /// See [`WallMap::get_rect_as_string`]. The spawn point is not marked.
    pub fn get_rect_as_string(&self, rect: Rect) -> Result<String, DashError> {
        self.map.get_rect_as_string(rect, None)
    }

    /// See [`WallMap::to_display_string`], with this engine's spawn point.
    pub fn to_display_string(&self) -> Result<String, DashError> {
        self.map.to_display_string(self.spawn_point)
    }

    /// Move the player a single tile in `direction` if that tile is open, returning the new position.
    ///
    /// A full dash is this step repeated until the position stops changing.
    pub fn dash(&mut self, direction: Direction) -> Point {
        let next = direction.attempt_from(self.player_position);

        if !self.get_wall_at(next) {
            self.player_position = next;
        }

        self.player_position
    }

    /// Slide from `point` in `direction` until the next tile is a wall and return the last open tile.
    ///
    /// Returns `point` itself if the adjacent tile is already a wall.
    /// Fails with [`DashTooLong`](DashError::DashTooLong) after [`MAX_DASH_LENGTH`] steps.
    pub fn move_along_dash(&self, point: Point, direction: Direction) -> Result<Point, DashError> {
        let mut current = point;

        for _ in 0..=MAX_DASH_LENGTH {
            let next = direction.attempt_from(current);
            if self.get_wall_at(next) {
                return Ok(current);
            }
            current = next;
        }

        Err(DashError::DashTooLong { from: point, direction })
    }

    /// The distinct end points of every dash starting at `point`, explored right, down, left, up.
    pub fn dash_neighbors(&self, point: Point) -> Result<Vec<Point>, DashError> {
        let mut neighbors = Vec::with_capacity(Direction::VARIANTS.len());

        for direction in Direction::VARIANTS {
            let neighbor = self.move_along_dash(point, *direction)?;
            if neighbor != point {
                neighbors.push(neighbor);
            }
        }

        Ok(neighbors)
    }

    /// Build the graph of every stoppable point reachable from `start` and every dash between them.
    ///
    /// Fails with [`InvalidSpawn`](DashError::InvalidSpawn) if `start` is a wall.
    pub fn create_dash_graph(&self, start: Point) -> Result<DashGraph, DashError> {
        if self.get_wall_at(start) {
            return Err(DashError::InvalidSpawn { point: start });
        }

        let mut graph = DashGraph::new();
        graph.add_node(start, ());

        let mut visited = HashSet::from([start]);
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            for neighbor in self.dash_neighbors(current)? {
                graph.add_edge(current, neighbor);
                if visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        Ok(graph)
    }

    /// Number of strongly connected components among the points reachable from spawn.
    /// A map where the player can never get stuck has exactly one.
    pub fn get_component_count(&self) -> Result<usize, DashError> {
        let graph = self.create_dash_graph(self.spawn_point)?;
        Ok(find_strongly_connected_components(&graph).node_count())
    }

    /// Score the current map; higher is better.
    ///
    /// Each component contributes its tile count, weighted by how far it is from the spawn component:
    /// `+1` at distance 0 (the spawn component itself, or a component the spawn can never reach),
    /// otherwise `-(distance - 1)`, distance being the node count of the path between the two.
    /// The sum is averaged over the number of components, favouring large maps in few pieces.
    pub fn map_score(&self) -> Result<f64, DashError> {
        let graph = self.create_dash_graph(self.spawn_point)?;
        let components = find_strongly_connected_components(&graph);

        let spawn_component = components.component_of(self.spawn_point)
            .ok_or(DashError::SpawnComponentNotFound)?;
        let path_finder = PathFinder::new(&components);

        let score: f64 = components.nodes_with_data()
            .map(|(component, data)| {
                let tile_count = data.members.len() as f64;
                let distance = path_finder.distance(spawn_component, component);

                let distance_points = match distance {
                    0 => 1.,
                    _ => -(distance as f64 - 1.),
                };

                tile_count * distance_points
            })
            .sum();

        Ok(score / components.node_count() as f64)
    }

    /// Score every single-tile toggle near the reachable part of the map.
    ///
    /// Candidates are the tiles swept by any dash plus the 4-neighbors of every stoppable point, excluding the spawn.
    /// Each candidate is toggled, the map rescored with [`Self::map_score`], and the tile restored exactly as it was.
    /// Scores are raw; see [`normalize_fix_scores`](crate::fix::normalize_fix_scores).
    pub fn suggest_fixes(&mut self, graph: Option<&DashGraph>) -> Result<Vec<Fix>, DashError> {
        let built;
        let graph = match graph {
            Some(graph) => graph,
            None => {
                built = self.create_dash_graph(self.spawn_point)?;
                &built
            }
        };

        let mut candidates = Vec::new();
        for (from, to) in graph.edges() {
            candidates.extend(Dash { from, to }.points()?);
        }
        for node in graph.nodes() {
            candidates.extend(Direction::neighbors_of(node).map(|(_, neighbor)| neighbor));
        }

        let spawn = self.spawn_point;
        let mut fixes = Vec::new();
        for point in candidates.into_iter().unique().filter(|point| *point != spawn) {
            let previous = self.map.tile_at(point);
            let suggest_wall = !self.get_wall_at(point);

            self.set_wall_at(point, suggest_wall);
            let score = self.map_score();
            self.map.restore_tile(point, previous);

            let score = score?;
            trace!("toggling {} to wall={} scores {}", point, suggest_wall, score);
            fixes.push(Fix {
                score,
                tiles: vec![FixTile { point, suggest_wall }],
            });
        }

        debug!("suggested {} fixes over {} stoppable points", fixes.len(), graph.node_count());
        Ok(fixes)
    }

    /// Apply the fix with the highest raw score, the first one on ties, and return it.
    ///
    /// Fails with [`NoFixesAvailable`](DashError::NoFixesAvailable) if nothing can be fixed.
    pub fn apply_best_fix(&mut self) -> Result<Fix, DashError> {
        let best = self.suggest_fixes(None)?
            .into_iter()
            .reduce(|best, fix| if fix.score > best.score { fix } else { best })
            .ok_or(DashError::NoFixesAvailable)?;

        for tile in &best.tiles {
            self.set_wall_at(tile.point, tile.suggest_wall);
        }
        debug!("applied fix {:?} scoring {}", best.tiles, best.score);

        Ok(best)
    }

    /// Generate a map in a `size` x `size` square using the default [`GenerationOptions`].
    pub fn generate_map(&mut self, size: i32, seed: Option<Seed>) -> Result<(), DashError> {
        self.generate_map_with(&GenerationOptions {
            size,
            seed,
            ..Default::default()
        })
    }

    /// Generate a map around the spawn point, then repair and polish it with [`Self::apply_best_fix`].
    ///
    /// The square is walled in and its interior filled at random; the spawn point sits at the interior's top left
    /// corner with the tile to its right opened too. Fixes are applied while the map has more than one component,
    /// up to [`max_repair_iterations`](GenerationOptions::max_repair_iterations), then
    /// [`polish_passes`](GenerationOptions::polish_passes) more unconditionally. The player is moved back to spawn.
    pub fn generate_map_with(&mut self, options: &GenerationOptions) -> Result<(), DashError> {
        let spawn = self.spawn_point;
        let bounds = Rect::new(spawn.x - 1, spawn.y - 1, options.size, options.size);

        self.fill_wall_at(bounds, true);
        self.fill_random(bounds.inset(1), options.wall_probability, options.seed.clone());
        self.fill_wall_at(Rect::new(spawn.x, spawn.y, 2, 1), false);

        let mut component_count = self.get_component_count()?;
        if component_count == 0 {
            return Err(DashError::NoComponents);
        }
        info!("generated {} map with {} components", bounds, component_count);

        let mut iterations = 0;
        while component_count > 1 && iterations < options.max_repair_iterations {
            self.apply_best_fix()?;
            component_count = self.get_component_count()?;
            iterations += 1;
        }
        info!("repaired to {} components in {} iterations", component_count, iterations);

        for _ in 0..options.polish_passes {
            self.apply_best_fix()?;
        }

        self.player_position = self.spawn_point;
        Ok(())
    }
}

/// Parses the ASCII format of [`WallMap::from_ascii`], spawning at its `S`.
impl FromStr for DashEngine {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (map, spawn_point) = WallMap::from_ascii(s)?;
        Ok(Self::builder().map(map).spawn_point(spawn_point).build())
    }
}
