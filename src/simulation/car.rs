//! Car movement logic for the city simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use std::f32::consts::FRAC_PI_2;

use super::types::{PathType, Placement, Position, Rgb, ROAD_ELEVATION};

/// Distance travelled per frame at a speed multiplier of 1.0
pub const CAR_BASE_SPEED: f32 = 0.05;

pub const CAR_WIDTH: f32 = 1.0;
pub const CAR_HEIGHT: f32 = 0.8;
pub const CAR_LENGTH: f32 = 2.0;

/// Colours a generated car can take
pub const CAR_PALETTE: [Rgb; 5] = [
    Rgb(1.0, 0.0, 0.0),
    Rgb(0.0, 0.0, 1.0),
    Rgb(1.0, 1.0, 0.0),
    Rgb(0.0, 1.0, 0.0),
    Rgb(1.0, 0.5, 0.0),
];

/// A car looping along one straight road
#[derive(Debug, Clone, PartialEq)]
pub struct SimCar {
    pub path_type: PathType,
    /// Distance along the path, always within `[path_start, path_end]`
    pub position: f32,
    /// Perpendicular offset selecting the road and lane
    pub lane_offset: f32,
    pub speed: f32,
    pub path_start: f32,
    pub path_end: f32,
    pub color: Rgb,
}

impl SimCar {
    pub fn new(
        path_type: PathType,
        lane_offset: f32,
        path_start: f32,
        path_end: f32,
        color: Rgb,
    ) -> Self {
        Self {
            path_type,
            position: path_start,
            lane_offset,
            speed: CAR_BASE_SPEED,
            path_start,
            path_end,
            color,
        }
    }

    /// Start somewhere along the path; out-of-range values wrap back in
    pub fn with_position(mut self, position: f32) -> Self {
        let span = self.path_end - self.path_start;
        self.position = if span > 0.0 {
            self.path_start + (position - self.path_start).rem_euclid(span)
        } else {
            self.path_start
        };
        self
    }

    /// Advance one frame
    ///
    /// Passing the end of the path teleports the car back to `path_start`;
    /// any overshoot is discarded.
    pub fn update(&mut self, speed_multiplier: f32) {
        self.position += self.speed * speed_multiplier;

        if self.position > self.path_end {
            self.position = self.path_start;
        }
    }

    /// World placement of the car's body centre
    pub fn placement(&self) -> Placement {
        let y = ROAD_ELEVATION + CAR_HEIGHT / 2.0;
        match self.path_type {
            PathType::Horizontal => Placement {
                translation: Position::new(self.position, y, self.lane_offset),
                yaw: FRAC_PI_2,
            },
            PathType::Vertical => Placement {
                translation: Position::new(self.lane_offset, y, self.position),
                yaw: 0.0,
            },
        }
    }
}
