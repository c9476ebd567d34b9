//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;

use super::components::{CarLink, ControlQueueResource, MainCamera, SimWorldResource};
use super::{placement_transform, vec3};

/// System to drain queued commands and run one simulation tick
pub fn tick_simulation(
    mut sim_world: ResMut<SimWorldResource>,
    queue: Res<ControlQueueResource>,
) {
    sim_world.0.process_commands(&queue.0);
    sim_world.0.tick();
}

/// System to move car entities to their simulated placement
pub fn sync_cars(
    sim_world: Res<SimWorldResource>,
    mut car_query: Query<(&CarLink, &mut Transform)>,
) {
    for (link, mut transform) in car_query.iter_mut() {
        if let Some(car) = sim_world.0.cars.get(link.0) {
            *transform = placement_transform(&car.placement());
        }
    }
}

/// System to point the Bevy camera where the orbit camera says
pub fn sync_camera(
    sim_world: Res<SimWorldResource>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let view = sim_world.0.camera.view_transform();
    for mut transform in camera_query.iter_mut() {
        *transform = Transform::from_translation(vec3(view.eye))
            .looking_at(vec3(view.target), vec3(view.up));
    }
}

/// System to close the app once the simulation has been asked to quit
pub fn exit_on_quit(sim_world: Res<SimWorldResource>, mut exit: MessageWriter<AppExit>) {
    if sim_world.0.quit_requested() {
        exit.write(AppExit::Success);
    }
}
