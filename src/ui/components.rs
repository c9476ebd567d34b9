//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;

use crate::simulation::{ControlQueue, SimWorld, ViewPreset};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

impl Default for SimWorldResource {
    fn default() -> Self {
        Self(SimWorld::default())
    }
}

/// Resource wrapper for the queue every input source writes to
#[derive(Resource, Clone, Default)]
pub struct ControlQueueResource(pub ControlQueue);

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for entities rebuilt whenever the city changes
#[derive(Component)]
pub struct SceneEntity;

/// Links a Bevy entity to a simulation car by index
#[derive(Component)]
pub struct CarLink(pub usize);

/// Scene version currently represented by spawned entities
#[derive(Resource, Default)]
pub struct RenderedScene {
    pub version: Option<u64>,
}

/// Control panel buttons
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum PanelButton {
    ToggleAnimation,
    SlowDown,
    SpeedUp,
    View(ViewPreset),
    Regenerate,
}

/// Control panel text that tracks simulation state
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelText {
    /// Label of the start/stop button
    ToggleLabel,
    Speed,
    City,
}
