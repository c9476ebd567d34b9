//! UI module that visualizes the city using Bevy
//!
//! This module is purely for visualization - all layout, camera and car logic is in the
//! `simulation` module. The UI turns input into `SimCommand`s, lets `SimWorld` draw itself
//! into a mesh collector and keeps Bevy entities in step with the simulated state.

mod components;
mod input;
mod panel;
pub mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{ControlQueueResource, SimWorldResource};

use components::RenderedScene;
use input::{handle_camera_mouse, handle_input};
use panel::{handle_panel_buttons, setup_control_panel, update_panel_text};
use spawner::respawn_scene;
use sync::{exit_on_quit, sync_camera, sync_cars, tick_simulation};
use world::{setup_world, SKY_COLOR};

use crate::simulation::{CityConfig, ControlQueue, Placement, Position, SimWorld, DEFAULT_FPS};

pub(crate) fn vec3(p: Position) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

pub(crate) fn placement_transform(placement: &Placement) -> Transform {
    Transform::from_translation(vec3(placement.translation))
        .with_rotation(Quat::from_rotation_y(placement.yaw))
}

/// Plugin to register all UI systems
pub struct CitySimUIPlugin {
    config: CityConfig,
    queue: ControlQueue,
}

impl CitySimUIPlugin {
    /// `queue` is shared with any other command source, such as the console panel
    pub fn new(config: CityConfig, queue: ControlQueue) -> Self {
        Self { config, queue }
    }
}

impl Plugin for CitySimUIPlugin {
    fn build(&self, app: &mut App) {
        let fps = if self.config.fps > 0 {
            self.config.fps
        } else {
            DEFAULT_FPS
        };

        app.insert_resource(SimWorldResource(SimWorld::new(self.config.clone())))
            .insert_resource(ControlQueueResource(self.queue.clone()))
            .init_resource::<RenderedScene>()
            .insert_resource(ClearColor(SKY_COLOR))
            .insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 400.0,
                ..default()
            })
            .insert_resource(Time::<Fixed>::from_hz(f64::from(fps)))
            .add_systems(Startup, (setup_world, setup_control_panel))
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    handle_input,
                    handle_camera_mouse,
                    handle_panel_buttons,
                    respawn_scene,
                    sync_cars.after(respawn_scene),
                    sync_camera,
                    update_panel_text,
                    exit_on_quit,
                ),
            );
    }
}
