//! City layout validation tests
//!
//! Buildings, trees and cars are generated from the default road grid and
//! checked against the placement rules.

use rand::rngs::StdRng;
use rand::SeedableRng;

use city_sim::simulation::{
    block_capacity, check_collision, create_cars, generate_city, place_buildings, place_trees,
    PathType, RoadNetwork, SimBuilding, CAR_LANE_OFFSET, COLLISION_BUFFER, TREE_ROAD_GAP,
};

fn overlaps(a: &SimBuilding, b: &SimBuilding) -> bool {
    (a.x - b.x).abs() < (a.width + b.width) / 2.0 + COLLISION_BUFFER
        && (a.z - b.z).abs() < (a.depth + b.depth) / 2.0 + COLLISION_BUFFER
}

#[test]
fn test_default_network_blocks() {
    let network = RoadNetwork::default();
    let blocks = network.blocks();

    // Four free spans per axis: fringe, two between roads, fringe
    assert_eq!(blocks.len(), 16);
    for block in &blocks {
        assert!(block.is_valid());
        for &road in network.vertical() {
            assert!(
                block.max_x <= road - network.clearance() || block.min_x >= road + network.clearance(),
                "Block {:?} crosses the road at x={}",
                block,
                road
            );
        }
    }
}

#[test]
fn test_road_offsets_are_sorted() {
    let network = RoadNetwork::new(vec![20.0, -20.0, 20.0], vec![5.0], 6.0, 100.0, 2.0).unwrap();
    assert_eq!(network.horizontal(), &[-20.0, 20.0]);
    assert_eq!(network.vertical(), &[5.0]);
    assert_eq!(network.road_count(), 3);
    assert_eq!(network.intersections(), vec![(5.0, -20.0), (5.0, 20.0)]);
}

#[test]
fn test_invalid_road_network_rejected() {
    assert!(RoadNetwork::grid(vec![0.0], 0.0, 100.0, 5.0).is_err());
    assert!(RoadNetwork::grid(vec![0.0], 8.0, -1.0, 5.0).is_err());
    assert!(RoadNetwork::grid(vec![0.0], 8.0, 100.0, -2.0).is_err());
    assert!(RoadNetwork::grid(vec![f32::NAN], 8.0, 100.0, 5.0).is_err());
    assert!(RoadNetwork::grid(vec![], 8.0, 100.0, 5.0).is_err());
    assert!(RoadNetwork::new(vec![0.0], vec![], 8.0, 100.0, 5.0).is_err());
    assert!(RoadNetwork::new(vec![], vec![0.0], 8.0, 100.0, 5.0).is_err());
}

#[test]
fn test_collision_needs_both_axes() {
    let existing = vec![SimBuilding::random(&mut StdRng::seed_from_u64(1), 0.0, 0.0)];
    let b = &existing[0];

    assert!(check_collision(0.0, 0.0, 2.0, 2.0, &existing));
    // Far apart on X alone is enough to be clear
    let far_x = (b.width + 2.0) / 2.0 + COLLISION_BUFFER + 0.1;
    assert!(!check_collision(far_x, 0.0, 2.0, 2.0, &existing));
    let far_z = (b.depth + 2.0) / 2.0 + COLLISION_BUFFER + 0.1;
    assert!(!check_collision(0.0, far_z, 2.0, 2.0, &existing));
    assert!(!check_collision(0.0, 0.0, 2.0, 2.0, &[]));
}

#[test]
fn test_buildings_do_not_overlap() {
    let network = RoadNetwork::default();
    let mut rng = StdRng::seed_from_u64(42);
    let (buildings, attempts) = place_buildings(&mut rng, 60, &network);

    assert!(!buildings.is_empty());
    assert!(buildings.len() <= 60);
    assert!(attempts <= 60 * 30);

    for (i, a) in buildings.iter().enumerate() {
        for b in &buildings[i + 1..] {
            assert!(!overlaps(a, b), "Buildings {:?} and {:?} overlap", a, b);
        }
    }
}

#[test]
fn test_buildings_stay_inside_blocks() {
    let network = RoadNetwork::default();
    let blocks = network.blocks();
    let mut rng = StdRng::seed_from_u64(7);
    let (buildings, _) = place_buildings(&mut rng, 60, &network);

    for building in &buildings {
        assert!(
            blocks.iter().any(|block| block.contains(building.x, building.z)),
            "Building centre ({}, {}) is outside every block",
            building.x,
            building.z
        );
        assert!((2.0..=5.0).contains(&building.width));
        assert!((2.0..=5.0).contains(&building.depth));
        assert!((5.0..=20.0).contains(&building.height));
        let grey = building.color.0;
        assert!((0.5..=0.8).contains(&grey));
        assert_eq!(building.color.1, grey);
        assert_eq!(building.color.2, grey);
    }
}

#[test]
fn test_trees_are_deterministic() {
    let network = RoadNetwork::default();
    assert_eq!(place_trees(&network), place_trees(&network));
}

#[test]
fn test_trees_avoid_intersections() {
    let network = RoadNetwork::default();
    let exclusion = network.road_width / 2.0 + TREE_ROAD_GAP;

    for tree in place_trees(&network) {
        for (x, z) in network.intersections() {
            let chebyshev = (tree.x - x).abs().max((tree.z - z).abs());
            assert!(
                chebyshev > exclusion,
                "Tree at ({}, {}) is too close to the crossing at ({}, {})",
                tree.x,
                tree.z,
                x,
                z
            );
        }
    }
}

#[test]
fn test_trees_line_the_roads() {
    let network = RoadNetwork::default();
    let offset = network.road_width / 2.0 + TREE_ROAD_GAP;

    for tree in place_trees(&network) {
        let beside_horizontal = network
            .horizontal()
            .iter()
            .any(|&z| ((tree.z - z).abs() - offset).abs() < 1e-4);
        let beside_vertical = network
            .vertical()
            .iter()
            .any(|&x| ((tree.x - x).abs() - offset).abs() < 1e-4);
        assert!(beside_horizontal || beside_vertical);
    }
}

/// Default grid: 37 steps per row, 9 of them near a crossing
#[test]
fn test_city_scenario() {
    let network = RoadNetwork::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let layout = generate_city(&mut rng, 60, 40, &network);

    assert!(!layout.buildings.is_empty());
    assert!(layout.buildings.len() <= 60);
    for (i, a) in layout.buildings.iter().enumerate() {
        for b in &layout.buildings[i + 1..] {
            assert!(!overlaps(a, b));
        }
    }

    let steps = (network.road_length / 4.0) as usize;
    assert_eq!(steps, 37);
    assert_eq!(layout.trees.len(), 4 * 3 * (steps - 9));
    assert_eq!(layout.trees.len(), 336);
}

#[test]
fn test_no_blocks_means_no_buildings() {
    // Margins wider than the gaps between roads leave no buildable land
    let network = RoadNetwork::grid(vec![-20.0, 0.0, 20.0], 8.0, 40.0, 20.0).unwrap();
    assert!(network.blocks().is_empty());

    let mut rng = StdRng::seed_from_u64(3);
    let (buildings, attempts) = place_buildings(&mut rng, 10, &network);
    assert!(buildings.is_empty());
    assert_eq!(attempts, 0);
}

#[test]
fn test_crowded_blocks_return_fewer_buildings() {
    let network = RoadNetwork::grid(vec![0.0], 8.0, 30.0, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let capacity = block_capacity(&network.blocks());
    assert_eq!(capacity, 4 * 4 * 4);

    let (buildings, attempts) = place_buildings(&mut rng, 500, &network);
    assert!(buildings.len() <= capacity);
    assert!(attempts <= capacity * 30);
}

#[test]
fn test_default_block_capacity() {
    // Spans of 18, 36, 36 and 18 units hold 7, 13, 13 and 7 cells of 3 units
    let network = RoadNetwork::default();
    assert_eq!(block_capacity(&network.blocks()), 40 * 40);
    assert_eq!(block_capacity(&[]), 0);
}

#[test]
fn test_huge_building_request() {
    let network = RoadNetwork::default();
    let capacity = block_capacity(&network.blocks());
    let mut rng = StdRng::seed_from_u64(1);

    let (buildings, attempts) = place_buildings(&mut rng, usize::MAX / 16, &network);
    assert!(!buildings.is_empty());
    assert!(buildings.len() <= capacity);
    assert!(attempts <= capacity * 30);

    let layout = generate_city(&mut rng, usize::MAX, 0, &network);
    assert!(layout.buildings.len() <= capacity);
    assert_eq!(layout.trees.len(), 336);
}

#[test]
fn test_cars_alternate_and_spread() {
    let network = RoadNetwork::default();
    let mut rng = StdRng::seed_from_u64(5);
    let cars = create_cars(&mut rng, 8, &network);

    assert_eq!(cars.len(), 8);
    for (i, car) in cars.iter().enumerate() {
        let expected = if i % 2 == 0 {
            PathType::Horizontal
        } else {
            PathType::Vertical
        };
        assert_eq!(car.path_type, expected);
        assert_eq!(car.path_start, -75.0);
        assert_eq!(car.path_end, 75.0);
        assert!(car.position >= car.path_start && car.position <= car.path_end);

        let road = network.roads(car.path_type)[(i / 2) % 3];
        assert_eq!(car.lane_offset, road + CAR_LANE_OFFSET);
    }
    assert_ne!(cars[0].position, cars[2].position);
}
