//! Road network geometry
//!
//! The single source of truth for where roads are. Both the layout generator
//! and the renderer read from the same `RoadNetwork` value.

use anyhow::{ensure, Result};
use ordered_float::OrderedFloat;
use rand::Rng;

use super::types::{PathType, TREE_ROAD_GAP};

/// A rectangular area of buildable land between road margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Block {
    pub fn is_valid(&self) -> bool {
        self.min_x < self.max_x && self.min_z < self.max_z
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    /// Uniformly sample a point inside the block
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (f32, f32) {
        let x = rng.random_range(self.min_x..=self.max_x);
        let z = rng.random_range(self.min_z..=self.max_z);
        (x, z)
    }
}

/// A fixed grid of straight roads
///
/// Horizontal roads run along X at the listed Z offsets; vertical roads run
/// along Z at the listed X offsets. Every road is centred on the origin along
/// its own axis and spans `road_length`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadNetwork {
    horizontal: Vec<f32>,
    vertical: Vec<f32>,
    pub road_width: f32,
    pub road_length: f32,
    /// Extra clearance between the road edge and buildable land
    pub margin: f32,
}

impl Default for RoadNetwork {
    fn default() -> Self {
        Self {
            horizontal: vec![-50.0, 0.0, 50.0],
            vertical: vec![-50.0, 0.0, 50.0],
            road_width: 8.0,
            road_length: 150.0,
            margin: 7.0,
        }
    }
}

impl RoadNetwork {
    /// Validated network; both offset lists must be non-empty
    pub fn new(
        horizontal: Vec<f32>,
        vertical: Vec<f32>,
        road_width: f32,
        road_length: f32,
        margin: f32,
    ) -> Result<Self> {
        ensure!(
            road_width > 0.0 && road_width.is_finite(),
            "road width must be positive, got {road_width}"
        );
        ensure!(
            road_length > 0.0 && road_length.is_finite(),
            "road length must be positive, got {road_length}"
        );
        ensure!(
            margin >= 0.0 && margin.is_finite(),
            "road margin must not be negative, got {margin}"
        );
        ensure!(
            !horizontal.is_empty() && !vertical.is_empty(),
            "road network needs at least one horizontal and one vertical road"
        );
        ensure!(
            horizontal.iter().chain(vertical.iter()).all(|p| p.is_finite()),
            "road offsets must be finite"
        );

        Ok(Self {
            horizontal: normalize_offsets(horizontal),
            vertical: normalize_offsets(vertical),
            road_width,
            road_length,
            margin,
        })
    }

    /// Square grid with the same offsets in both directions
    pub fn grid(
        road_positions: Vec<f32>,
        road_width: f32,
        road_length: f32,
        margin: f32,
    ) -> Result<Self> {
        Self::new(
            road_positions.clone(),
            road_positions,
            road_width,
            road_length,
            margin,
        )
    }

    /// Z offsets of the roads running along X, ascending
    pub fn horizontal(&self) -> &[f32] {
        &self.horizontal
    }

    /// X offsets of the roads running along Z, ascending
    pub fn vertical(&self) -> &[f32] {
        &self.vertical
    }

    pub fn roads(&self, path_type: PathType) -> &[f32] {
        match path_type {
            PathType::Horizontal => &self.horizontal,
            PathType::Vertical => &self.vertical,
        }
    }

    pub fn road_count(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    pub fn half_length(&self) -> f32 {
        self.road_length / 2.0
    }

    /// Distance from a centerline to the nearest buildable land
    pub fn clearance(&self) -> f32 {
        self.road_width / 2.0 + self.margin
    }

    /// Perpendicular distance from a centerline to its row of trees
    pub fn tree_offset(&self) -> f32 {
        self.road_width / 2.0 + TREE_ROAD_GAP
    }

    /// No tree is placed closer than this to a crossing road
    pub fn intersection_exclusion(&self) -> f32 {
        self.road_width / 2.0 + TREE_ROAD_GAP
    }

    /// Centres of every crossing, as `(x, z)`
    pub fn intersections(&self) -> Vec<(f32, f32)> {
        self.vertical
            .iter()
            .flat_map(|&x| self.horizontal.iter().map(move |&z| (x, z)))
            .collect()
    }

    /// Buildable blocks between consecutive roads and on the outer fringes
    ///
    /// Only blocks with a non-empty interior are returned.
    pub fn blocks(&self) -> Vec<Block> {
        let x_spans = self.free_spans(&self.vertical);
        let z_spans = self.free_spans(&self.horizontal);

        x_spans
            .iter()
            .flat_map(|&(min_x, max_x)| {
                z_spans.iter().map(move |&(min_z, max_z)| Block {
                    min_x,
                    max_x,
                    min_z,
                    max_z,
                })
            })
            .filter(Block::is_valid)
            .collect()
    }

    /// Intervals along one axis that are clear of every road crossing it
    fn free_spans(&self, offsets: &[f32]) -> Vec<(f32, f32)> {
        let half = self.half_length();
        let clearance = self.clearance();

        let mut bounds = Vec::with_capacity(offsets.len() + 1);
        let mut lower = -half;
        for &offset in offsets {
            bounds.push((lower, offset - clearance));
            lower = offset + clearance;
        }
        bounds.push((lower, half));
        bounds
    }
}

fn normalize_offsets(mut offsets: Vec<f32>) -> Vec<f32> {
    offsets.sort_by_key(|p| OrderedFloat(*p));
    offsets.dedup_by_key(|p| OrderedFloat(*p));
    offsets
}
