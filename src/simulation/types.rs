//! Core types for the city simulation
//!
//! These are standalone types that don't depend on Bevy.

/// Height of the road surface above the ground plane
pub const ROAD_ELEVATION: f32 = 0.35;

/// Height of lane markings, just above the road surface
pub const LINE_ELEVATION: f32 = 0.36;

/// Gap between the road edge and a roadside tree
pub const TREE_ROAD_GAP: f32 = 2.0;

/// Distance between consecutive trees along a road
pub const TREE_SPACING: f32 = 4.0;

/// Minimum clearance kept between building footprints
pub const COLLISION_BUFFER: f32 = 1.0;

/// Offset from the road centerline to the driving lane
pub const CAR_LANE_OFFSET: f32 = 1.0;

/// A 3D position in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn offset(&self, dx: f32, dy: f32, dz: f32) -> Position {
        Position::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Rotate around the Y axis by `angle` radians
    pub fn rotated_y(&self, angle: f32) -> Position {
        let (sin, cos) = angle.sin_cos();
        Position {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// An RGB colour with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub fn grey(value: f32) -> Self {
        Self(value, value, value)
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self(self.0 * factor, self.1 * factor, self.2 * factor)
    }

    pub fn to_rgba(self) -> [f32; 4] {
        [self.0, self.1, self.2, 1.0]
    }
}

/// Where a locally-defined shape sits in the world
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub translation: Position,
    /// Rotation around the Y axis in radians
    pub yaw: f32,
}

impl Placement {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn apply(&self, local: Position) -> Position {
        let rotated = local.rotated_y(self.yaw);
        rotated.offset(self.translation.x, self.translation.y, self.translation.z)
    }

    pub fn apply_direction(&self, local: Position) -> Position {
        local.rotated_y(self.yaw)
    }
}

/// Which family of roads a car drives along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathType {
    /// Runs along the X axis, on a road at a fixed Z offset
    Horizontal,
    /// Runs along the Z axis, on a road at a fixed X offset
    Vertical,
}
