//! World behaviour tests
//!
//! Commands, animation and the draw sequence are exercised through the
//! public `SimWorld` API without any window.

use city_sim::simulation::{
    BuildingSpec, CityConfig, ControlQueue, DrawLayer, FrameStats, PathType, Rgb, SimCar,
    SimCommand, SimKey, SimWorld, ViewPreset, CAR_BASE_SPEED, CAR_HEIGHT, KEY_PAN_STEP,
    KEY_ROTATE_STEP, ROAD_ELEVATION,
};

fn seeded_world() -> SimWorld {
    SimWorld::new_with_seed(12345)
}

#[test]
fn test_car_wraps_with_hard_reset() {
    let mut car = SimCar::new(PathType::Horizontal, 0.0, -30.0, 30.0, Rgb(1.0, 0.0, 0.0));
    assert_eq!(car.speed, 0.05);
    assert_eq!(car.position, -30.0);

    let mut previous = car.position;
    let mut wrapped = false;
    for _ in 0..2000 {
        car.update(1.0);
        if car.position < previous {
            // The overshoot is discarded rather than carried over
            assert_eq!(car.position, -30.0);
            assert!(previous > 29.9 && previous <= 30.0);
            wrapped = true;
            break;
        }
        assert!(car.position <= 30.0);
        previous = car.position;
    }
    assert!(wrapped, "car never wrapped");
}

#[test]
fn test_car_speed_multiplier() {
    let mut car = SimCar::new(PathType::Vertical, 1.0, -75.0, 75.0, Rgb(0.0, 0.0, 1.0));
    car.update(2.0);
    assert!((car.position - (-75.0 + 2.0 * CAR_BASE_SPEED)).abs() < 1e-6);
    car.update(0.0);
    assert!((car.position - (-75.0 + 2.0 * CAR_BASE_SPEED)).abs() < 1e-6);
}

#[test]
fn test_car_start_wraps_into_path() {
    let car = SimCar::new(PathType::Horizontal, 0.0, -75.0, 75.0, Rgb(1.0, 1.0, 0.0))
        .with_position(90.0);
    assert!((car.position - (-60.0)).abs() < 1e-4);
}

#[test]
fn test_car_placement() {
    let horizontal = SimCar::new(PathType::Horizontal, 51.0, -75.0, 75.0, Rgb(1.0, 0.0, 0.0))
        .with_position(10.0);
    let placement = horizontal.placement();
    assert_eq!(placement.translation.x, 10.0);
    assert_eq!(placement.translation.z, 51.0);
    assert_eq!(placement.translation.y, ROAD_ELEVATION + CAR_HEIGHT / 2.0);
    // Car length runs along +Z locally and along X once placed
    let nose = placement.apply_direction(city_sim::simulation::Position::new(0.0, 0.0, 1.0));
    assert!((nose.x.abs() - 1.0).abs() < 1e-5);

    let vertical = SimCar::new(PathType::Vertical, -49.0, -75.0, 75.0, Rgb(1.0, 0.0, 0.0))
        .with_position(-20.0);
    let placement = vertical.placement();
    assert_eq!(placement.translation.x, -49.0);
    assert_eq!(placement.translation.z, -20.0);
    assert_eq!(placement.yaw, 0.0);
}

#[test]
fn test_world_generation() {
    let world = seeded_world();
    assert!(!world.buildings.is_empty());
    assert!(world.buildings.len() <= 60);
    assert_eq!(world.trees.len(), 336);
    assert_eq!(world.cars.len(), 8);
    assert_eq!(world.scene_version(), 1);
    assert_eq!(world.frame, 0);
    assert!(!world.paused);
    assert_eq!(world.speed_multiplier(), 1.0);
}

#[test]
fn test_same_seed_same_city() {
    let a = seeded_world();
    let b = seeded_world();
    assert_eq!(a.buildings, b.buildings);
    assert_eq!(a.cars, b.cars);
}

#[test]
fn test_tick_moves_cars_unless_paused() {
    let mut world = seeded_world();
    let start: Vec<f32> = world.cars.iter().map(|c| c.position).collect();

    world.tick();
    assert_eq!(world.frame, 1);
    assert!(world
        .cars
        .iter()
        .zip(&start)
        .all(|(car, &before)| car.position != before));

    world.toggle_animation();
    let frozen: Vec<f32> = world.cars.iter().map(|c| c.position).collect();
    world.tick();
    world.tick();
    assert_eq!(world.frame, 3);
    assert_eq!(
        world.cars.iter().map(|c| c.position).collect::<Vec<_>>(),
        frozen
    );
}

#[test]
fn test_speed_is_clamped() {
    let mut world = seeded_world();
    world.set_speed(5.0).unwrap();
    assert_eq!(world.speed_multiplier(), 3.0);
    world.set_speed(-1.0).unwrap();
    assert_eq!(world.speed_multiplier(), 0.0);
    world.set_speed(1.5).unwrap();
    assert_eq!(world.speed_multiplier(), 1.5);
    assert!(world.set_speed(f32::NAN).is_err());
    assert_eq!(world.speed_multiplier(), 1.5);
}

#[test]
fn test_invalid_building_rejected() {
    let mut world = seeded_world();
    let before = world.buildings.clone();
    let version = world.scene_version();

    let err = world
        .add_building(BuildingSpec::new(0.0, 0.0, 15.0, 3.0, 10.0))
        .unwrap_err();
    assert!(err.to_string().contains("width"), "unexpected error: {err}");
    assert_eq!(world.buildings, before);
    assert_eq!(world.scene_version(), version);

    assert!(world
        .add_building(BuildingSpec::new(31.0, 0.0, 3.0, 3.0, 10.0))
        .is_err());
    assert!(world
        .add_building(BuildingSpec::new(0.0, 0.0, 3.0, 3.0, 31.0))
        .is_err());
    assert_eq!(world.buildings, before);
}

#[test]
fn test_building_limits_are_inclusive() {
    let mut world = seeded_world();
    let count = world.buildings.len();

    for spec in [
        BuildingSpec::new(30.0, -30.0, 10.0, 10.0, 30.0),
        BuildingSpec::new(-30.0, 30.0, 0.01, 0.01, 0.01),
    ] {
        assert!(spec.validate().is_ok(), "{:?} should be accepted", spec);
        world.add_building(spec).unwrap();
    }
    assert_eq!(world.buildings.len(), count + 2);
}

#[test]
fn test_building_limits_reject_edges() {
    let mut world = seeded_world();
    let before = world.buildings.clone();

    for (spec, field) in [
        (BuildingSpec::new(0.0, 0.0, 0.0, 3.0, 10.0), "width"),
        (BuildingSpec::new(0.0, 0.0, -2.0, 3.0, 10.0), "width"),
        (BuildingSpec::new(0.0, 0.0, 10.01, 3.0, 10.0), "width"),
        (BuildingSpec::new(0.0, 0.0, 3.0, 0.0, 10.0), "depth"),
        (BuildingSpec::new(0.0, 0.0, 3.0, -1.0, 10.0), "depth"),
        (BuildingSpec::new(0.0, 0.0, 3.0, 10.5, 10.0), "depth"),
        (BuildingSpec::new(0.0, 0.0, 3.0, 3.0, 0.0), "height"),
        (BuildingSpec::new(0.0, 0.0, 3.0, 3.0, -5.0), "height"),
        (BuildingSpec::new(0.0, 0.0, 3.0, 3.0, 30.01), "height"),
        (BuildingSpec::new(30.01, 0.0, 3.0, 3.0, 10.0), "x"),
        (BuildingSpec::new(-30.01, 0.0, 3.0, 3.0, 10.0), "x"),
        (BuildingSpec::new(0.0, 30.01, 3.0, 3.0, 10.0), "z"),
        (BuildingSpec::new(0.0, -30.01, 3.0, 3.0, 10.0), "z"),
        (BuildingSpec::new(0.0, 0.0, f32::INFINITY, 3.0, 10.0), "width"),
    ] {
        let err = world.add_building(spec).unwrap_err();
        assert!(
            err.to_string().starts_with(field),
            "{:?} rejected with unexpected error: {err}",
            spec
        );
    }
    assert_eq!(world.buildings, before);
}

#[test]
fn test_valid_building_added() {
    let mut world = seeded_world();
    let count = world.buildings.len();

    world
        .add_building(BuildingSpec::new(10.0, -5.0, 4.0, 6.0, 25.0))
        .unwrap();

    assert_eq!(world.buildings.len(), count + 1);
    let added = world.buildings.last().unwrap();
    assert_eq!((added.x, added.z), (10.0, -5.0));
    assert_eq!((added.width, added.depth, added.height), (4.0, 6.0, 25.0));
    assert_eq!(world.scene_version(), 2);
}

#[test]
fn test_regenerate_replaces_city() {
    let mut world = seeded_world();
    world.apply(SimCommand::Regenerate).unwrap();
    assert_eq!(world.scene_version(), 2);
    assert_eq!(world.trees.len(), 336);
    assert_eq!(world.cars.len(), 8);

    world.apply(SimCommand::Key(SimKey::R)).unwrap();
    assert_eq!(world.scene_version(), 3);
}

#[test]
fn test_keyboard_commands() {
    let mut world = seeded_world();
    let yaw = world.camera.yaw;
    let pitch = world.camera.pitch();

    world.apply(SimCommand::Key(SimKey::Right)).unwrap();
    assert_eq!(world.camera.yaw, yaw + KEY_ROTATE_STEP);
    world.apply(SimCommand::Key(SimKey::Left)).unwrap();
    assert_eq!(world.camera.yaw, yaw);
    world.apply(SimCommand::Key(SimKey::Up)).unwrap();
    assert_eq!(world.camera.pitch(), pitch + KEY_ROTATE_STEP);

    world.apply(SimCommand::Key(SimKey::D)).unwrap();
    world.apply(SimCommand::Key(SimKey::S)).unwrap();
    assert_eq!(world.camera.target.x, KEY_PAN_STEP);
    assert_eq!(world.camera.target.z, KEY_PAN_STEP);
    world.apply(SimCommand::Key(SimKey::A)).unwrap();
    world.apply(SimCommand::Key(SimKey::W)).unwrap();
    assert_eq!(world.camera.target.x, 0.0);
    assert_eq!(world.camera.target.z, 0.0);

    let zoom = world.camera.zoom();
    world.apply(SimCommand::Key(SimKey::Plus)).unwrap();
    assert!(world.camera.zoom() < zoom);
    world.apply(SimCommand::Key(SimKey::Minus)).unwrap();
    assert_eq!(world.camera.zoom(), zoom);

    world.apply(SimCommand::Key(SimKey::Digit1)).unwrap();
    assert_eq!(world.camera.pitch(), -89.0);
    world.apply(SimCommand::Key(SimKey::Digit2)).unwrap();
    assert_eq!(world.camera.zoom(), 25.0);
    world.apply(SimCommand::Key(SimKey::Digit3)).unwrap();
    assert_eq!(world.camera.yaw, 45.0);

    world.apply(SimCommand::Key(SimKey::Space)).unwrap();
    assert!(world.paused);

    assert!(!world.quit_requested());
    world.apply(SimCommand::Key(SimKey::Escape)).unwrap();
    assert!(world.quit_requested());
}

#[test]
fn test_mouse_commands() {
    let mut world = seeded_world();

    world.apply(SimCommand::Drag { dx: 10.0, dy: 4.0 }).unwrap();
    assert_eq!(world.camera.yaw, 5.0);
    assert_eq!(world.camera.pitch(), -22.0);

    world.apply(SimCommand::Wheel(3.0)).unwrap();
    assert_eq!(world.camera.zoom(), 98.0);
    world.apply(SimCommand::Wheel(-1.0)).unwrap();
    assert_eq!(world.camera.zoom(), 100.0);
    world.apply(SimCommand::Wheel(0.0)).unwrap();
    assert_eq!(world.camera.zoom(), 100.0);
}

#[test]
fn test_queued_commands_apply_in_order() {
    let mut world = seeded_world();
    let queue = ControlQueue::new();

    queue.push(SimCommand::SetSpeed(2.0));
    queue.push(SimCommand::AddBuilding(BuildingSpec::new(0.0, 0.0, 15.0, 3.0, 10.0)));
    queue.push(SimCommand::SetView(ViewPreset::Top));
    queue.push(SimCommand::ToggleAnimation);
    assert_eq!(queue.len(), 4);

    let applied = world.process_commands(&queue);
    assert_eq!(applied, 3);
    assert!(queue.is_empty());
    assert_eq!(world.speed_multiplier(), 2.0);
    assert_eq!(world.camera.zoom(), 150.0);
    assert!(world.paused);
}

#[test]
fn test_quit_command() {
    let mut world = seeded_world();
    world.apply(SimCommand::Quit).unwrap();
    assert!(world.quit_requested());

    let mut world = seeded_world();
    world.apply(SimCommand::Key(SimKey::Escape)).unwrap();
    assert!(world.quit_requested());
}

#[test]
fn test_render_order() {
    let world = seeded_world();
    let mut stats = FrameStats::new();
    world.render(&mut stats);

    assert_eq!(stats.frames_presented, 1);
    assert_eq!(stats.view, Some(world.camera.view_transform()));
    assert_eq!(stats.draws.first(), Some(&DrawLayer::Ground));

    let rank = |layer: &DrawLayer| match layer {
        DrawLayer::Ground => 0,
        DrawLayer::Road => 1,
        DrawLayer::Building => 2,
        DrawLayer::Tree => 3,
        DrawLayer::Car(_) => 4,
    };
    assert!(stats
        .draws
        .windows(2)
        .all(|pair| rank(&pair[0]) <= rank(&pair[1])));

    assert_eq!(stats.count(|l| *l == DrawLayer::Road), 3);
    assert_eq!(
        stats.count(|l| *l == DrawLayer::Building),
        world.buildings.len()
    );
    assert_eq!(stats.count(|l| *l == DrawLayer::Tree), world.trees.len() * 2);
    assert_eq!(stats.count(|l| !l.is_static()), world.cars.len() * 2);
    assert!(stats.vertices > 0);
}

#[test]
fn test_render_clears_between_frames() {
    let world = seeded_world();
    let mut stats = FrameStats::new();
    world.render(&mut stats);
    let calls = stats.draw_calls();
    let vertices = stats.vertices;

    world.render(&mut stats);
    assert_eq!(stats.frames_presented, 2);
    assert_eq!(stats.draw_calls(), calls);
    assert_eq!(stats.vertices, vertices);
}

#[test]
fn test_custom_config() {
    let world = SimWorld::new(CityConfig {
        num_buildings: 5,
        num_cars: 3,
        seed: Some(9),
        ..CityConfig::default()
    });
    assert!(world.buildings.len() <= 5);
    assert_eq!(world.cars.len(), 3);
    assert_eq!(world.config().num_cars, 3);
}
