//! World setup systems for camera and lighting

use bevy::prelude::*;

use super::components::{MainCamera, SimWorldResource};
use super::vec3;

pub const SKY_COLOR: Color = Color::srgb(0.53, 0.81, 0.92);

/// System to setup the world environment (lighting, camera)
pub fn setup_world(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    let view = sim_world.0.camera.view_transform();

    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 45.0_f32.to_radians(),
            near: 0.1,
            far: 500.0,
            ..default()
        }),
        Transform::from_translation(vec3(view.eye)).looking_at(vec3(view.target), vec3(view.up)),
    ));

    // Sun-like light from above and to the side
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
