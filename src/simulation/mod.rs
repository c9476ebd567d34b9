//! Standalone city simulation module
//!
//! This module contains the layout generator, camera, cars and the world
//! loop. It runs independently of the Bevy game engine and can be tested
//! without booting up a window.

mod building;
mod camera;
mod car;
mod command;
mod config;
mod geometry;
mod layout;
mod render;
mod road_network;
mod types;
mod world;

pub use building::{
    BuildingSpec, SimBuilding, SimTree, MAX_USER_COORDINATE, MAX_USER_FOOTPRINT, MAX_USER_HEIGHT,
    RANDOM_FOOTPRINT_RANGE, RANDOM_HEIGHT_RANGE, TREE_FOLIAGE_RADIUS, TREE_TRUNK_HEIGHT,
    TREE_TRUNK_RADIUS,
};
pub use camera::{OrbitCamera, ViewPreset, ViewTransform, MAX_PITCH, MIN_PITCH};
pub use car::{SimCar, CAR_BASE_SPEED, CAR_HEIGHT, CAR_LENGTH, CAR_PALETTE, CAR_WIDTH};
pub use command::{ControlQueue, SimCommand, SimKey};
pub use config::{CityConfig, DEFAULT_BUILDINGS, DEFAULT_CARS, DEFAULT_FPS, DEFAULT_TREES};
pub use geometry::{
    box_batch, building_batch, car_batches, cylinder_batch, ground_batch, road_batches,
    sphere_batch, tree_batches, Topology, VertexBatch,
};
pub use layout::{
    block_capacity, check_collision, create_cars, generate_city, place_buildings, place_trees,
    CityLayout, ATTEMPTS_PER_BUILDING,
};
pub use render::{DrawLayer, FrameStats, SceneRenderer};
pub use road_network::{Block, RoadNetwork};
pub use types::{
    PathType, Placement, Position, Rgb, CAR_LANE_OFFSET, COLLISION_BUFFER, LINE_ELEVATION,
    ROAD_ELEVATION, TREE_ROAD_GAP, TREE_SPACING,
};
pub use world::{
    SimWorld, DRAG_SENSITIVITY, KEY_PAN_STEP, KEY_ROTATE_STEP, MAX_SPEED_MULTIPLIER,
    WHEEL_ZOOM_STEP,
};
