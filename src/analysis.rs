use std::collections::HashMap;

use itertools::Itertools;
use log::debug;

use crate::direction::Direction;
use crate::engine::{Dash, DashEngine, DashGraph};
use crate::error::DashError;
use crate::fix::{normalize_fix_scores, Fix};
use crate::geometry::{Point, Rect};
use crate::graph::{find_strongly_connected_components, ComponentGraph};
use crate::tile::AnalysedTile;

/// The result of [`DashEngine::analyse_rect`].
#[derive(Clone, Debug)]
pub struct AnalysedRect {
    /// The analysed area.
    pub rect: Rect,
    /// One tile per point of `rect`, in row-major order.
    pub tiles: Vec<AnalysedTile>,
    /// The component graph the tiles' `component_id`s refer to.
    pub components: ComponentGraph<Point>,
}

impl AnalysedRect {
    /// The analysed tile at `point`, if it lies within the rect.
    pub fn tile_at(&self, point: Point) -> Option<&AnalysedTile> {
        self.rect.index_of(point).ok().and_then(|index| self.tiles.get(index))
    }
}

impl DashEngine {
    /// Analyse a single tile, building the dash graph, components and normalized fixes from scratch.
    ///
    /// Probing fixes toggles tiles temporarily, hence `&mut self`; the map is left as it was.
    pub fn analyse_point(&mut self, point: Point) -> Result<AnalysedTile, DashError> {
        let graph = self.create_dash_graph(self.spawn_point)?;
        let components = find_strongly_connected_components(&graph);
        let fixes = normalize_fix_scores(&self.suggest_fixes(Some(&graph))?);

        self.analyse_point_with(point, &graph, &components, &fixes)
    }

    /// Analyse a single tile against precomputed artifacts, amortizing their cost over many tiles.
    pub fn analyse_point_with(
        &self,
        point: Point,
        graph: &DashGraph,
        components: &ComponentGraph<Point>,
        fixes: &[Fix],
    ) -> Result<AnalysedTile, DashError> {
        let mut tile = self.analyse_tile(point, graph, &components.membership(), fixes);

        for dash in graph.edges().map(Dash::from) {
            tile.number_of_dashes_passing_over += dash.points()?.filter(|swept| *swept == point).count();
        }

        self.verify_post_conditions(&tile, graph);
        Ok(tile)
    }

    /// Analyse every tile in `rect` against one dash graph, component graph and set of normalized fixes.
    ///
    /// Fails with [`InvalidRect`](DashError::InvalidRect) if `rect` has no area.
    pub fn analyse_rect(&mut self, rect: Rect) -> Result<AnalysedRect, DashError> {
        rect.validate()?;

        let graph = self.create_dash_graph(self.spawn_point)?;
        let components = find_strongly_connected_components(&graph);
        let fixes = normalize_fix_scores(&self.suggest_fixes(Some(&graph))?);
        let membership = components.membership();

        let mut tiles = rect.points()
            .map(|point| self.analyse_tile(point, &graph, &membership, &fixes))
            .collect_vec();

        for dash in graph.edges().map(Dash::from) {
            for point in dash.points()? {
                if !rect.contains(point)? {
                    continue;
                }
                if let Some(tile) = tiles.get_mut(rect.index_of(point)?) {
                    tile.number_of_dashes_passing_over += 1;
                }
            }
        }

        for tile in &tiles {
            self.verify_post_conditions(tile, &graph);
        }
        debug!("analysed {} tiles over {} components", tiles.len(), components.node_count());

        Ok(AnalysedRect { rect, tiles, components })
    }

    // everything but the dash count, which callers accumulate
    fn analyse_tile(
        &self,
        point: Point,
        graph: &DashGraph,
        membership: &HashMap<Point, usize>,
        fixes: &[Fix],
    ) -> AnalysedTile {
        let is_wall = self.get_wall_at(point);

        AnalysedTile {
            point,
            is_wall,
            can_collide: is_wall && self.can_collide(point, graph),
            can_stop: graph.contains_node(point),
            number_of_dashes_passing_over: 0,
            component_id: membership.get(&point).copied(),
            fix_score: fixes.iter().find(|fix| fix.touches(point)).map(|fix| fix.score),
        }
    }

    fn can_collide(&self, wall: Point, graph: &DashGraph) -> bool {
        // nowhere to dash to; every wall around spawn still counts as bumped into
        if graph.node_count() == 1 {
            return Direction::neighbors_of(self.spawn_point).any(|(_, neighbor)| neighbor == wall);
        }

        Direction::neighbors_of(wall).any(|(direction, neighbor)| {
            graph.incoming(neighbor).any(|from| {
                Dash { from, to: neighbor }.direction().ok() == Some(direction.invert())
            })
        })
    }

    fn verify_post_conditions(&self, tile: &AnalysedTile, graph: &DashGraph) {
        debug_assert!(!tile.can_collide || tile.is_wall, "{} can be collided with but is open", tile.point);
        debug_assert!(
            tile.number_of_dashes_passing_over == 0 || !tile.is_wall,
            "{} is a wall but dashes pass over it",
            tile.point,
        );

        if tile.can_stop {
            debug_assert!(!tile.is_wall, "{} is a wall but can be stopped on", tile.point);
            debug_assert!(tile.component_id.is_some(), "{} can be stopped on but has no component", tile.point);

            let isolated_spawn = tile.point == self.spawn_point && graph.outgoing(tile.point).next().is_none();
            debug_assert!(
                (tile.number_of_dashes_passing_over == 0) == isolated_spawn,
                "{} has {} dashes passing over it",
                tile.point,
                tile.number_of_dashes_passing_over,
            );
        } else {
            debug_assert!(tile.component_id.is_none(), "{} has a component but cannot be stopped on", tile.point);
        }
    }
}
