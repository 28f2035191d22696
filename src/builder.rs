use crate::engine::DashEngine;
use crate::geometry::{Point, ORIGIN};
use crate::map::{Seed, WallMap};

/// A builder for [`DashEngine`]s.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug, Default)]
pub struct EngineBuilder {
    spawn_point: Option<Point>,
    map: Option<WallMap>,
}

impl EngineBuilder {
    /// Construct a builder with no spawn point or map set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spawn point. Defaults to [`ORIGIN`].
    pub fn spawn_point(&mut self, spawn_point: Point) -> &mut Self {
        self.spawn_point = Some(spawn_point);
        self
    }

    /// Start from an existing map instead of an all-wall one.
    pub fn map(&mut self, map: WallMap) -> &mut Self {
        self.map = Some(map);
        self
    }

    /// Convert the state of this builder into a [`DashEngine`].
    ///
    /// The spawn point is opened on the engine's map regardless of what the given map had there.
    pub fn build(&self) -> DashEngine {
        DashEngine::from_parts(self.map.clone().unwrap_or_default(), self.spawn_point.unwrap_or(ORIGIN))
    }
}

/// Parameters of [`DashEngine::generate_map_with`].
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationOptions {
    /// Side length of the square the map is generated in, border included.
    pub size: i32,
    /// Seed for the random fill; [`None`] draws a fresh layout every time.
    pub seed: Option<Seed>,
    /// Probability that an interior tile starts out as a wall.
    pub wall_probability: f64,
    /// Upper bound on fixes applied while the map still has more than one component.
    pub max_repair_iterations: usize,
    /// Fixes applied unconditionally once repairing is done.
    pub polish_passes: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            size: 20,
            seed: None,
            wall_probability: 0.65,
            max_repair_iterations: 10,
            polish_passes: 3,
        }
    }
}
