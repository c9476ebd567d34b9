//! City generation settings

use super::road_network::RoadNetwork;

pub const DEFAULT_BUILDINGS: usize = 60;
pub const DEFAULT_TREES: usize = 40;
pub const DEFAULT_CARS: usize = 8;
pub const DEFAULT_FPS: u32 = 60;

/// Everything needed to (re)generate a city
#[derive(Debug, Clone, PartialEq)]
pub struct CityConfig {
    pub num_buildings: usize,
    /// Advisory only; the road avenue decides the real tree count
    pub num_trees: usize,
    pub num_cars: usize,
    /// Seed for reproducible buildings and car colours
    pub seed: Option<u64>,
    pub road_network: RoadNetwork,
    /// Target frame rate; `0` runs unthrottled
    pub fps: u32,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            num_buildings: DEFAULT_BUILDINGS,
            num_trees: DEFAULT_TREES,
            num_cars: DEFAULT_CARS,
            seed: None,
            road_network: RoadNetwork::default(),
            fps: DEFAULT_FPS,
        }
    }
}
