//! Buildings and trees
//!
//! Both are immutable once created; a regeneration replaces them wholesale.

use anyhow::{ensure, Result};
use rand::Rng;

use super::types::Rgb;

/// Largest footprint side a user may request
pub const MAX_USER_FOOTPRINT: f32 = 10.0;
/// Tallest building a user may request
pub const MAX_USER_HEIGHT: f32 = 30.0;
/// User-placed buildings must sit within this distance of the origin on each axis
pub const MAX_USER_COORDINATE: f32 = 30.0;

/// Ranges used for randomly generated buildings
pub const RANDOM_FOOTPRINT_RANGE: (f32, f32) = (2.0, 5.0);
pub const RANDOM_HEIGHT_RANGE: (f32, f32) = (5.0, 20.0);
const RANDOM_GREY_RANGE: (f32, f32) = (0.5, 0.8);

/// An axis-aligned box building resting on the ground
#[derive(Debug, Clone, PartialEq)]
pub struct SimBuilding {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub color: Rgb,
}

impl SimBuilding {
    pub fn new(x: f32, z: f32, width: f32, height: f32, depth: f32, color: Rgb) -> Self {
        Self {
            x,
            z,
            width,
            height,
            depth,
            color,
        }
    }

    /// A building at `(x, z)` with random extents and a random grey
    pub fn random<R: Rng + ?Sized>(rng: &mut R, x: f32, z: f32) -> Self {
        let (min_side, max_side) = RANDOM_FOOTPRINT_RANGE;
        let (min_height, max_height) = RANDOM_HEIGHT_RANGE;
        let width = rng.random_range(min_side..=max_side);
        let height = rng.random_range(min_height..=max_height);
        let depth = rng.random_range(min_side..=max_side);
        Self::new(x, z, width, height, depth, random_grey(rng))
    }

    /// Box centre; buildings stand on `y = 0`
    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}

pub(crate) fn random_grey<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let (min, max) = RANDOM_GREY_RANGE;
    Rgb::grey(rng.random_range(min..=max))
}

/// A building requested by the user through the control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingSpec {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

impl BuildingSpec {
    pub fn new(x: f32, z: f32, width: f32, depth: f32, height: f32) -> Self {
        Self {
            x,
            z,
            width,
            depth,
            height,
        }
    }

    /// Reject out-of-range dimensions or positions
    pub fn validate(&self) -> Result<()> {
        check_extent("width", self.width, MAX_USER_FOOTPRINT)?;
        check_extent("depth", self.depth, MAX_USER_FOOTPRINT)?;
        check_extent("height", self.height, MAX_USER_HEIGHT)?;
        check_coordinate("x", self.x)?;
        check_coordinate("z", self.z)?;
        Ok(())
    }

    pub fn into_building(self, color: Rgb) -> SimBuilding {
        SimBuilding::new(self.x, self.z, self.width, self.height, self.depth, color)
    }
}

fn check_extent(name: &str, value: f32, max: f32) -> Result<()> {
    ensure!(
        value.is_finite() && value > 0.0 && value <= max,
        "{name} must be in (0, {max}], got {value}"
    );
    Ok(())
}

fn check_coordinate(name: &str, value: f32) -> Result<()> {
    ensure!(
        value.is_finite() && value.abs() <= MAX_USER_COORDINATE,
        "{name} must be within ±{MAX_USER_COORDINATE}, got {value}"
    );
    Ok(())
}

pub const TREE_TRUNK_HEIGHT: f32 = 2.0;
pub const TREE_TRUNK_RADIUS: f32 = 0.2;
pub const TREE_FOLIAGE_RADIUS: f32 = 1.0;
pub const TREE_TRUNK_COLOR: Rgb = Rgb(0.4, 0.25, 0.1);
pub const TREE_FOLIAGE_COLOR: Rgb = Rgb(0.1, 0.6, 0.1);

/// A roadside tree: a cylinder trunk with a sphere of foliage on top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimTree {
    pub x: f32,
    pub z: f32,
}

impl SimTree {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Height of the foliage sphere's centre
    pub fn foliage_center_y(&self) -> f32 {
        TREE_TRUNK_HEIGHT + TREE_FOLIAGE_RADIUS * 0.5
    }
}
