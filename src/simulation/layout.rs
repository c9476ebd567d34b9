//! Procedural city layout
//!
//! Buildings are scattered over the blocks between roads by rejection
//! sampling against an axis-aligned footprint test. Trees line every road at
//! a fixed spacing and depend on nothing but the road geometry.

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::building::{SimBuilding, SimTree, RANDOM_FOOTPRINT_RANGE};
use super::car::{SimCar, CAR_PALETTE};
use super::road_network::{Block, RoadNetwork};
use super::types::{PathType, CAR_LANE_OFFSET, COLLISION_BUFFER, TREE_SPACING};

/// Placement attempts allowed per requested building
pub const ATTEMPTS_PER_BUILDING: usize = 30;

/// Distance between the staggered starting points of consecutive cars
pub const CAR_START_STAGGER: f32 = 15.0;

/// Result of one city generation
#[derive(Debug, Clone, Default)]
pub struct CityLayout {
    pub buildings: Vec<SimBuilding>,
    pub trees: Vec<SimTree>,
    /// Placement attempts consumed by the building pass
    pub attempts: usize,
}

/// Whether a footprint at `(x, z)` comes within the buffer of any existing one
///
/// Footprints collide only when they are too close on both axes at once.
pub fn check_collision(
    x: f32,
    z: f32,
    width: f32,
    depth: f32,
    existing: &[SimBuilding],
) -> bool {
    existing.iter().any(|building| {
        let dx = (x - building.x).abs();
        let dz = (z - building.z).abs();
        dx < (width + building.width) / 2.0 + COLLISION_BUFFER
            && dz < (depth + building.depth) / 2.0 + COLLISION_BUFFER
    })
}

/// Generate buildings and roadside trees for `network`
///
/// `num_trees` is advisory: the avenue is fully determined by the roads.
pub fn generate_city<R: Rng + ?Sized>(
    rng: &mut R,
    num_buildings: usize,
    num_trees: usize,
    network: &RoadNetwork,
) -> CityLayout {
    let (buildings, attempts) = place_buildings(rng, num_buildings, network);
    let trees = place_trees(network);

    if trees.len() != num_trees {
        debug!(
            "Requested {} trees; the road avenue holds {}",
            num_trees,
            trees.len()
        );
    }

    CityLayout {
        buildings,
        trees,
        attempts,
    }
}

/// Upper bound on how many random buildings `blocks` can hold
///
/// Two accepted centres are at least the smallest footprint plus the buffer
/// apart on some axis, so each cell of that size holds at most one building.
pub fn block_capacity(blocks: &[Block]) -> usize {
    let spacing = RANDOM_FOOTPRINT_RANGE.0 + COLLISION_BUFFER;
    blocks
        .iter()
        .map(|block| {
            let columns = (((block.max_x - block.min_x) / spacing) as usize).saturating_add(1);
            let rows = (((block.max_z - block.min_z) / spacing) as usize).saturating_add(1);
            columns.saturating_mul(rows)
        })
        .fold(0, usize::saturating_add)
}

/// Rejection-sample up to `num_buildings` non-overlapping buildings
///
/// Returns the accepted buildings and the number of attempts used. Running
/// out of attempts is not an error; fewer buildings are returned. Requests
/// beyond what the blocks can hold are cut down to [`block_capacity`].
pub fn place_buildings<R: Rng + ?Sized>(
    rng: &mut R,
    num_buildings: usize,
    network: &RoadNetwork,
) -> (Vec<SimBuilding>, usize) {
    let blocks = network.blocks();
    let mut buildings: Vec<SimBuilding> = Vec::new();

    if blocks.is_empty() {
        debug!("No buildable blocks in road network");
        return (buildings, 0);
    }

    let capacity = block_capacity(&blocks);
    let num_buildings = if num_buildings > capacity {
        debug!(
            "Requested {} buildings; the blocks hold at most {}",
            num_buildings, capacity
        );
        capacity
    } else {
        num_buildings
    };

    let max_attempts = num_buildings.saturating_mul(ATTEMPTS_PER_BUILDING);
    let mut attempts = 0;

    while buildings.len() < num_buildings && attempts < max_attempts {
        attempts += 1;

        let Some(block) = blocks.choose(rng) else {
            break;
        };
        let (x, z) = block.sample(rng);
        let candidate = SimBuilding::random(rng, x, z);

        if !check_collision(x, z, candidate.width, candidate.depth, &buildings) {
            buildings.push(candidate);
        }
    }

    (buildings, attempts)
}

/// Two rows of trees along every road, skipping the crossings
pub fn place_trees(network: &RoadNetwork) -> Vec<SimTree> {
    let mut trees = Vec::new();
    let steps = (network.road_length / TREE_SPACING) as usize;
    let half_length = network.half_length();
    let offset = network.tree_offset();
    let exclusion = network.intersection_exclusion();

    for path_type in [PathType::Horizontal, PathType::Vertical] {
        let crossing = match path_type {
            PathType::Horizontal => network.vertical(),
            PathType::Vertical => network.horizontal(),
        };

        for &road in network.roads(path_type) {
            for side in [offset, -offset] {
                for i in 0..steps {
                    let along = -half_length + i as f32 * TREE_SPACING;
                    if crossing.iter().any(|c| (along - c).abs() <= exclusion) {
                        continue;
                    }
                    trees.push(match path_type {
                        PathType::Horizontal => SimTree::new(along, road + side),
                        PathType::Vertical => SimTree::new(road + side, along),
                    });
                }
            }
        }
    }

    trees
}

/// Cars alternating between horizontal and vertical roads
///
/// Each orientation's cars are spread over its roads round-robin and their
/// starting points are staggered along the path.
pub fn create_cars<R: Rng + ?Sized>(
    rng: &mut R,
    num_cars: usize,
    network: &RoadNetwork,
) -> Vec<SimCar> {
    let half_length = network.half_length();
    let mut cars = Vec::with_capacity(num_cars);

    for i in 0..num_cars {
        let path_type = if i % 2 == 0 {
            PathType::Horizontal
        } else {
            PathType::Vertical
        };
        let roads = network.roads(path_type);
        // The network never holds an empty road list
        let road = roads[(i / 2) % roads.len()];
        let color = CAR_PALETTE.choose(rng).copied().unwrap_or(CAR_PALETTE[0]);

        let car = SimCar::new(
            path_type,
            road + CAR_LANE_OFFSET,
            -half_length,
            half_length,
            color,
        )
        .with_position(-half_length + i as f32 * CAR_START_STAGGER);
        cars.push(car);
    }

    cars
}
