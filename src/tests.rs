#[cfg(test)]
mod tests {
    use std::iter;

    use rstest::rstest;

    use crate::fix::{map_range, median};
    use crate::storage::GridStorage;
    use crate::{
        find_strongly_connected_components, normalize_fix_scores, DashEngine, DashError, DirectedGraph, Direction, Fix,
        FixTile, PathFinder, Point, Rect, Seed, WallMap, ORIGIN,
    };

    fn fix(score: f64) -> Fix {
        Fix {
            score,
            tiles: vec![FixTile { point: Point::new(0, 0), suggest_wall: true }],
        }
    }

    // a 1x2 vertical strip at the origin and a 3 wide strip at (-1, 1)
    fn two_component_engine() -> DashEngine {
        let mut engine = DashEngine::new();
        engine.fill_wall_at(Rect::new(0, 0, 1, 2), false);
        engine.fill_wall_at(Rect::new(-1, 1, 3, 1), false);
        engine
    }

    fn corridor_engine(length: i32) -> DashEngine {
        let mut engine = DashEngine::new();
        engine.fill_wall_at(Rect::new(0, 0, length, 1), false);
        engine
    }

    #[rstest]
    #[case(Point::new(3, 0), Point::new(1, 0))]
    #[case(Point::new(0, -5), Point::new(0, -1))]
    #[case(Point::new(-1, 0), Point::new(-1, 0))]
    fn normalize_axis_aligned(#[case] vector: Point, #[case] expected: Point) {
        assert_eq!(vector.normalize(), Ok(expected));
    }

    #[rstest]
    #[case(Point::new(1, 1))]
    #[case(Point::new(0, 0))]
    fn normalize_rejects_non_orthogonal(#[case] vector: Point) {
        assert_eq!(vector.normalize(), Err(DashError::NonOrthogonalVector(vector)));
    }

    #[test]
    fn rect_membership_and_indexing() {
        let rect = Rect::new(-1, -1, 3, 3);

        assert_eq!(rect.contains(Point::new(1, 1)), Ok(true));
        assert_eq!(rect.contains(Point::new(2, 1)), Ok(false));
        assert_eq!(rect.index_of(Point::new(-1, -1)), Ok(0));
        assert_eq!(rect.index_of(Point::new(1, 1)), Ok(8));
        assert_eq!(
            rect.index_of(Point::new(2, 0)),
            Err(DashError::OutOfBounds { point: Point::new(2, 0), rect })
        );
        assert_eq!(rect.points().count(), rect.area());
    }

    #[test]
    fn rect_without_area() {
        let rect = Rect::new(0, 0, 0, 3);

        assert_eq!(rect.contains(ORIGIN), Err(DashError::InvalidRect(rect)));
        assert_eq!(rect.points().count(), 0);
        assert_eq!(rect.area(), 0);
    }

    #[test]
    fn directions() {
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(Direction::Down.to_string(), "down");
        assert_eq!(Direction::from_vector(Point::new(0, -3)), Ok(Direction::Up));
        assert_eq!(Direction::Right.invert(), Direction::Left);
        assert_eq!(Direction::direction_to(ORIGIN, Point::new(0, 1)), Some(Direction::Down));
        assert_eq!(Direction::direction_to(ORIGIN, Point::new(1, 1)), None);
    }

    #[test]
    fn storage_is_sparse() {
        let mut storage = GridStorage::new();
        assert!(storage.is_empty());

        assert_eq!(storage.set_at(Point::new(2, -7), 'a'), None);
        assert_eq!(storage.set_at(Point::new(2, -7), 'b'), Some('a'));
        assert_eq!(storage.get_at(Point::new(2, -7)), Some(&'b'));
        assert_eq!(storage.get_at(Point::new(-7, 2)), None);
        assert_eq!(storage.len(), 1);

        assert_eq!(storage.remove_at(Point::new(2, -7)), Some('b'));
        assert!(storage.is_empty());
    }

    #[test]
    fn map_defaults_to_wall() {
        let mut map = WallMap::new();
        assert!(map.get_wall_at(Point::new(12345, -6789)));

        map.set_wall_at(Point::new(1, 1), false);
        assert!(!map.get_wall_at(Point::new(1, 1)));
        assert!(map.get_wall_at(Point::new(1, 2)));
    }

    #[test]
    fn map_rendering() {
        let mut map = WallMap::new();
        map.fill_wall_at(Rect::new(1, 1, 2, 1), false);

        assert_eq!(map.get_rect_as_string(Rect::new(0, 0, 4, 3), None).unwrap(), "####
#..#
####");
        assert_eq!(map.get_bounds(), Rect::new(1, 1, 2, 1));
        assert_eq!(format!("{}", map), "..");
    }

    #[test]
    fn map_display_marks_spawn() {
        let mut map = WallMap::new();
        map.set_wall_at(ORIGIN, false);
        map.set_wall_at(Point::new(2, 3), false);

        assert_eq!(map.to_display_string(ORIGIN).unwrap(), "S##
###
###
##.");
        assert_eq!(
            map.to_display_string(Point::new(5, 5)),
            Err(DashError::InvalidSpawn { point: Point::new(5, 5) })
        );
    }

    #[test]
    fn empty_map_bounds() {
        assert_eq!(WallMap::new().get_bounds(), Rect::new(0, 0, 0, 0));
        assert_eq!(WallMap::new().get_rect_as_string(Rect::new(0, 0, 0, 0), None).unwrap(), "");
    }

    #[test]
    fn parse_ascii_map() {
        let engine: DashEngine = "#####
#S..#
#####".parse().unwrap();

        assert_eq!(engine.spawn_point, Point::new(1, 1));
        assert!(!engine.get_wall_at(Point::new(3, 1)));
        assert!(engine.get_wall_at(Point::new(4, 1)));
        assert_eq!(engine.to_display_string().unwrap(), "S..");

        assert_eq!("###\n#.#".parse::<DashEngine>().err(), Some(DashError::MissingSpawn));
    }

    #[test]
    fn ascii_round_trip() {
        let engine: DashEngine = "S.#
#..".parse().unwrap();
        let rendered = engine.to_display_string().unwrap();
        assert_eq!(rendered, "S.#
#..");

        let reparsed: DashEngine = rendered.parse().unwrap();
        assert_eq!(reparsed.spawn_point, engine.spawn_point);
        assert_eq!(reparsed.wall_map(), engine.wall_map());
    }

    #[test]
    fn seeded_fill_is_reproducible() {
        let rect = Rect::new(0, 0, 8, 8);
        let (mut a, mut b) = (WallMap::new(), WallMap::new());

        a.fill_random(rect, 0.5, Some(Seed::from("dash")));
        b.fill_random(rect, 0.5, Some(Seed::from("dash")));
        assert_eq!(a, b);

        let mut open = WallMap::new();
        open.fill_random(rect, 0., Some(Seed::Number(3)));
        assert!(rect.points().all(|point| !open.get_wall_at(point)));

        let mut walled = WallMap::new();
        walled.fill_random(rect, 1., None);
        assert!(rect.points().all(|point| walled.get_wall_at(point)));
    }

    #[test]
    fn components_display() {
        let mut graph = DirectedGraph::<char>::new();
        graph.add_edge('a', 'b');
        graph.add_edge('b', 'a');
        graph.add_edge('b', 'c');

        assert_eq!(format!("{}", find_strongly_connected_components(&graph)), "1(a b)->0(c)");

        graph.add_edge('d', 'e');
        graph.add_edge('e', 'd');

        let components = find_strongly_connected_components(&graph);
        assert_eq!(format!("{}", components), "2(d e)
1(a b)->0(c)");
        assert_eq!(components.component_of('e'), Some(2));
        assert_eq!(components.membership().len(), 5);
    }

    #[test]
    fn remove_node_removes_edges() {
        let mut graph = DirectedGraph::<char, String>::new();
        graph.add_edge('a', 'b');
        graph.add_edge('b', 'c');

        assert!(graph.remove_node('b'));
        assert!(!graph.remove_node('b'));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(format!("{}", graph), "a
c");
    }

    #[test]
    fn adjacency_lists() {
        let mut graph = DirectedGraph::<char>::new();
        graph.add_edge('x', 'y');
        graph.add_edge('y', 'z');

        let list = graph.to_adjacency_list();
        assert_eq!(list.ids, vec!['x', 'y', 'z']);
        assert_eq!(list.adjacency, vec![vec![1], vec![2], vec![]]);

        let indexed = DirectedGraph::<usize>::from_indexed_adjacency_list(&[vec![1], vec![0], vec![]], iter::empty());
        assert_eq!(indexed.node_count(), 3);
        assert!(indexed.contains_edge(0, 1));
        assert!(indexed.contains_edge(1, 0));
        assert_eq!(find_strongly_connected_components(&indexed).node_count(), 2);
    }

    #[test]
    fn path_finding() {
        let mut graph = DirectedGraph::<usize>::new();
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 4);
        graph.add_edge(4, 1);
        graph.add_node(5, ());

        let path_finder = PathFinder::new(&graph);
        assert_eq!(path_finder.find(1, 4), vec![1, 2, 3, 4]);
        assert_eq!(path_finder.find(4, 2), vec![4, 1, 2]);
        assert!(path_finder.find(1, 5).is_empty());
        assert!(path_finder.find(1, 6).is_empty());
        assert!(path_finder.find(1, 1).is_empty());
        assert_eq!(path_finder.distance(2, 1), 4);

        graph.add_edge(1, 1);
        assert_eq!(PathFinder::new(&graph).find(1, 1), vec![1, 1]);
    }

    #[rstest]
    #[case(vec![3., 1., 2.], Some(2.))]
    #[case(vec![4., 1., 3., 2.], Some(2.5))]
    #[case(vec![], None)]
    fn medians(#[case] values: Vec<f64>, #[case] expected: Option<f64>) {
        assert_eq!(median(values), expected);
    }

    #[rstest]
    #[case(5., 0., 10., 0.5)]
    #[case(20., 0., 10., 1.)]
    #[case(-3., 0., 10., 0.)]
    #[case(7., 2., 2., 0.5)]
    fn ranges(#[case] value: f64, #[case] in_min: f64, #[case] in_max: f64, #[case] expected: f64) {
        assert_eq!(map_range(value, in_min, in_max, 0., 1.), expected);
    }

    #[test]
    fn normalization_ranges_over_upper_half() {
        let normalized = normalize_fix_scores(&[fix(0.), fix(1.), fix(2.), fix(3.)]);
        let scores: Vec<f64> = normalized.iter().map(|fix| fix.score).collect();

        assert_eq!(scores, vec![0., 0., 0., 1.]);
        assert!(normalize_fix_scores(&[]).is_empty());
    }

    #[test]
    fn fresh_engine_renders_spawn() {
        let engine = DashEngine::new();

        assert_eq!(engine.get_rect_as_string(Rect::new(-1, -1, 3, 3)).unwrap(), "###
#.#
###");
    }

    #[test]
    fn single_step_dash() {
        let mut engine = DashEngine::new();
        engine.set_wall_at(Point::new(1, 0), false);

        assert_eq!(engine.dash(Direction::Right), Point::new(1, 0));
        assert_eq!(engine.player_position, Point::new(1, 0));
        assert_eq!(engine.dash(Direction::Right), Point::new(1, 0));
    }

    #[test]
    fn builder_opens_spawn() {
        let engine = DashEngine::builder().spawn_point(Point::new(4, -2)).build();

        assert_eq!(engine.spawn_point, Point::new(4, -2));
        assert_eq!(engine.player_position, Point::new(4, -2));
        assert!(!engine.get_wall_at(Point::new(4, -2)));
        assert_eq!(engine.get_component_count(), Ok(1));
    }

    #[test]
    fn two_components() {
        let mut engine = two_component_engine();

        let graph = engine.create_dash_graph(engine.spawn_point).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(engine.get_component_count(), Ok(2));

        let tile = engine.analyse_point(Point::new(1, 1)).unwrap();
        assert_eq!(tile.component_id, Some(0));
        assert_eq!(tile.number_of_dashes_passing_over, 3);
        assert!(tile.can_stop);
        assert!(!tile.is_wall);

        // each component holds 2 tiles, the far one at a path distance of 2
        assert_eq!(engine.map_score(), Ok(0.));
    }

    #[test]
    fn analyse_two_components() {
        let mut engine = two_component_engine();
        let analysed = engine.analyse_rect(Rect::new(-2, -1, 5, 4)).unwrap();

        assert_eq!(analysed.tiles.len(), 20);
        assert_eq!(analysed.components.node_count(), 2);

        let spawn = analysed.tile_at(ORIGIN).unwrap();
        assert_eq!(spawn.component_id, Some(1));
        assert_eq!(spawn.number_of_dashes_passing_over, 2);

        let far = analysed.tile_at(Point::new(1, 1)).unwrap();
        assert_eq!(far, &engine.analyse_point(Point::new(1, 1)).unwrap());

        let wall = analysed.tile_at(Point::new(2, 1)).unwrap();
        assert!(wall.is_wall);
        assert!(wall.can_collide);
        assert!(!wall.can_stop);
        assert_eq!(wall.component_id, None);
        assert_eq!(wall.number_of_dashes_passing_over, 0);

        assert!(analysed.tile_at(Point::new(3, 3)).is_none());
    }

    #[test]
    fn analyse_empty_rect() {
        let rect = Rect::new(0, 0, 3, 0);
        assert_eq!(DashEngine::new().analyse_rect(rect).err(), Some(DashError::InvalidRect(rect)));
    }

    #[test]
    fn corridor() {
        let mut engine = corridor_engine(3);

        let graph = engine.create_dash_graph(engine.spawn_point).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert!(graph.contains_edge(Point::new(0, 0), Point::new(2, 0)));
        assert!(graph.contains_edge(Point::new(2, 0), Point::new(0, 0)));

        let middle = engine.analyse_point(Point::new(1, 0)).unwrap();
        assert!(!middle.can_stop);
        assert_eq!(middle.number_of_dashes_passing_over, 2);
        assert_eq!(middle.component_id, None);

        assert!(engine.analyse_point(Point::new(3, 0)).unwrap().can_collide);
        assert!(!engine.analyse_point(Point::new(0, 1)).unwrap().can_collide);
        assert!(!engine.analyse_point(Point::new(1, 1)).unwrap().can_collide);

        assert_eq!(engine.map_score(), Ok(2.));
    }

    #[test]
    fn isolated_spawn() {
        let mut engine = DashEngine::new();

        let wall = engine.analyse_point(Point::new(1, 0)).unwrap();
        assert!(wall.is_wall);
        assert!(wall.can_collide);
        assert_eq!(wall.fix_score, Some(0.5));

        let spawn = engine.analyse_point(ORIGIN).unwrap();
        assert!(spawn.can_stop);
        assert_eq!(spawn.number_of_dashes_passing_over, 0);
        assert_eq!(spawn.component_id, Some(0));
        assert_eq!(spawn.fix_score, None);

        assert!(!engine.analyse_point(Point::new(1, 1)).unwrap().can_collide);
    }

    #[test]
    fn dash_too_long() {
        assert!(corridor_engine(101).create_dash_graph(ORIGIN).is_ok());
        assert_eq!(
            corridor_engine(102).create_dash_graph(ORIGIN).err(),
            Some(DashError::DashTooLong { from: ORIGIN, direction: Direction::Right })
        );
    }

    #[test]
    fn walled_start() {
        let engine = DashEngine::new();
        assert_eq!(
            engine.create_dash_graph(Point::new(1, 0)).err(),
            Some(DashError::InvalidSpawn { point: Point::new(1, 0) })
        );
    }

    #[test]
    fn probing_leaves_map_untouched() {
        let mut engine = two_component_engine();
        let before = engine.wall_map().clone();

        let fixes = engine.suggest_fixes(None).unwrap();
        assert!(!fixes.is_empty());
        assert!(fixes.iter().all(|fix| !fix.touches(engine.spawn_point)));
        assert_eq!(engine.wall_map(), &before);

        engine.map_score().unwrap();
        assert_eq!(engine.wall_map(), &before);
    }

    #[test]
    fn best_fix_opens_first_neighbor() {
        let mut engine = DashEngine::new();

        let best = engine.apply_best_fix().unwrap();
        assert_eq!(best.tiles, vec![FixTile { point: Point::new(1, 0), suggest_wall: false }]);
        assert_eq!(best.score, 2.);
        assert!(!engine.get_wall_at(Point::new(1, 0)));
    }

    #[test]
    fn best_fix_matches_probe() {
        let mut engine = two_component_engine();
        let best_probe = engine.suggest_fixes(None).unwrap()
            .into_iter()
            .map(|fix| fix.score)
            .fold(f64::NEG_INFINITY, f64::max);

        let best = engine.apply_best_fix().unwrap();
        assert_eq!(best.score, best_probe);
        assert_eq!(engine.map_score(), Ok(best.score));
    }

    #[rstest]
    #[case(Seed::Number(7))]
    #[case(Seed::from("paint"))]
    fn seeded_generation(#[case] seed: Seed) {
        let mut a = DashEngine::new();
        a.generate_map(10, Some(seed.clone())).unwrap();

        let mut b = DashEngine::new();
        b.generate_map(10, Some(seed)).unwrap();

        assert_eq!(a.wall_map(), b.wall_map());
        assert!(a.get_component_count().unwrap() >= 1);
        assert!(!a.get_wall_at(a.spawn_point));
        assert_eq!(a.player_position, a.spawn_point);
        assert!(a.to_display_string().unwrap().contains('S'));
    }

    #[test]
    fn generated_tiles_are_consistent() {
        let mut engine = DashEngine::builder().spawn_point(Point::new(3, -4)).build();
        engine.generate_map(8, Some(Seed::Number(42))).unwrap();

        let bounds = engine.wall_map().get_bounds();
        let analysed = engine.analyse_rect(bounds).unwrap();
        assert_eq!(analysed.tiles.len(), bounds.area());

        for tile in &analysed.tiles {
            assert!(!tile.can_collide || tile.is_wall, "{:?}", tile);
            assert!(tile.number_of_dashes_passing_over == 0 || !tile.is_wall, "{:?}", tile);
            assert_eq!(tile.can_stop, tile.component_id.is_some(), "{:?}", tile);
            assert!(!tile.can_stop || !tile.is_wall, "{:?}", tile);
            if let Some(score) = tile.fix_score {
                assert!((0. ..=1.).contains(&score), "{:?}", tile);
            }
        }
    }
}
