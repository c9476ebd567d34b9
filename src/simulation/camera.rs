//! Orbital camera model
//!
//! The eye is never stored: it is derived from yaw, pitch and zoom around a
//! movable target, so the camera can't roll and clamping pitch short of ±90°
//! keeps the look-at basis well defined.

use std::str::FromStr;

use anyhow::{bail, Error};

use super::types::Position;

pub const MIN_PITCH: f32 = -89.0;
pub const MAX_PITCH: f32 = 89.0;
pub const DEFAULT_MIN_ZOOM: f32 = 10.0;
pub const DEFAULT_MAX_ZOOM: f32 = 200.0;

/// Named framings the user can jump to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPreset {
    /// Near-vertical view looking down on the whole city
    Top,
    /// Eye-level view from just above the street
    Street,
    /// Oblique overview at 45° yaw
    Oblique,
}

impl ViewPreset {
    pub const ALL: [ViewPreset; 3] = [ViewPreset::Top, ViewPreset::Street, ViewPreset::Oblique];

    /// `(yaw, pitch, zoom)` in degrees and world units
    pub fn parameters(self) -> (f32, f32, f32) {
        match self {
            ViewPreset::Top => (0.0, -89.0, 150.0),
            ViewPreset::Street => (0.0, -5.0, 25.0),
            ViewPreset::Oblique => (45.0, -30.0, 100.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewPreset::Top => "top",
            ViewPreset::Street => "street",
            ViewPreset::Oblique => "45",
        }
    }
}

impl FromStr for ViewPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(ViewPreset::Top),
            "street" => Ok(ViewPreset::Street),
            "45" | "oblique" => Ok(ViewPreset::Oblique),
            other => bail!("unknown view preset `{other}` (expected top, street or 45)"),
        }
    }
}

/// Everything needed to build a look-at transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub eye: Position,
    pub target: Position,
    pub up: Position,
}

/// Camera orbiting a target on a sphere of radius `zoom`
///
/// `pitch` is the pitch of the viewing direction: negative values look down
/// on the target from above.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Degrees, unbounded
    pub yaw: f32,
    /// Degrees, always within `[MIN_PITCH, MAX_PITCH]`
    pitch: f32,
    /// Always within `[min_zoom, max_zoom]`
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
    pub target: Position,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: -20.0,
            zoom: 100.0,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            target: Position::default(),
        }
    }
}

impl OrbitCamera {
    /// Camera with a custom zoom range; `zoom` is clamped into it
    pub fn new(yaw: f32, pitch: f32, zoom: f32, min_zoom: f32, max_zoom: f32) -> Self {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        Self {
            yaw,
            pitch: pitch.clamp(MIN_PITCH, MAX_PITCH),
            zoom: zoom.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            target: Position::default(),
        }
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_range(&self) -> (f32, f32) {
        (self.min_zoom, self.max_zoom)
    }

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Positive deltas move the eye away from the target
    pub fn zoom_by(&mut self, delta: f32) {
        self.zoom = (self.zoom + delta).clamp(self.min_zoom, self.max_zoom);
    }

    pub fn pan_target(&mut self, dx: f32, dz: f32) {
        self.target.x += dx;
        self.target.z += dz;
    }

    pub fn apply_preset(&mut self, preset: ViewPreset) {
        let (yaw, pitch, zoom) = preset.parameters();
        self.yaw = yaw;
        self.pitch = pitch.clamp(MIN_PITCH, MAX_PITCH);
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Eye on the sphere of radius `zoom` around the target
    ///
    /// `pitch` is the pitch of the viewing direction, not of the eye, so the
    /// height term is `-zoom * sin(pitch)`: this mirrors the usual elevation
    /// form `target + zoom * (cos p sin y, sin p, cos p cos y)`, and a
    /// negative pitch places the eye above the target looking down.
    pub fn eye_position(&self) -> Position {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let horizontal = self.zoom * pitch.cos();
        self.target.offset(
            horizontal * yaw.sin(),
            -self.zoom * pitch.sin(),
            horizontal * yaw.cos(),
        )
    }

    pub fn view_transform(&self) -> ViewTransform {
        ViewTransform {
            eye: self.eye_position(),
            target: self.target,
            up: Position::new(0.0, 1.0, 0.0),
        }
    }
}
