#![warn(missing_docs)]

//! # `dashpaint`
//!
//! Analysis, repair and generation of maps for slide puzzles in the style of Dash Paint:
//! the player moves in one of four directions and keeps sliding until the next tile is a wall.
//! Begin by building a [`DashEngine`], either with [`DashEngine::builder`] or by parsing an ASCII map,
//! then query it with [`DashEngine::analyse_rect`] or let it make a map with [`DashEngine::generate_map`].
//!
//! # Internals
//! Maps live on an unbounded grid that is wall everywhere until tiles are opened.
//! A map is judged by the set of points the player can come to rest on:
//!
//! 1. Starting from the spawn point, every reachable rest point becomes a node of the dash graph,
//! with an edge for each dash between two of them.
//! 2. The dash graph is condensed into its strongly connected components.
//! A map where the player can always get back to everywhere they have been has exactly one; any more and
//! the player can get stuck.
//! 3. The map score weighs each component's size by its distance from the spawn component, so large maps with few
//! far-off components score best.
//! 4. Toggling a single tile near the reachable area and rescoring yields a fix; repairing a map means
//! repeatedly applying the best fix.
//!
//! Nothing derived from the map is cached. Every query rebuilds what it needs, so maps can be edited between calls.

pub use analysis::AnalysedRect;
pub use builder::{EngineBuilder, GenerationOptions};
pub use direction::Direction;
pub use engine::{Dash, DashEngine, DashGraph, MAX_DASH_LENGTH};
pub use error::DashError;
pub use fix::{normalize_fix_scores, Fix, FixTile};
pub use geometry::{Point, Rect, ORIGIN};
pub use graph::{find_strongly_connected_components, AdjacencyList, Component, ComponentGraph, DirectedGraph};
pub use map::{Seed, WallMap};
pub use path::PathFinder;
pub use tile::{AnalysedTile, Tile};

pub(crate) mod analysis;
pub mod builder;
pub(crate) mod direction;
pub(crate) mod engine;
pub(crate) mod error;
pub mod fix;
pub mod geometry;
pub mod graph;
pub(crate) mod map;
pub(crate) mod path;
pub mod storage;
pub(crate) mod tile;
mod tests;
