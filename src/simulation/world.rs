//! Main simulation world that ties everything together
//!
//! This is the entry point for running the city simulation
//! without any Bevy dependencies.

use anyhow::{bail, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::building::{random_grey, BuildingSpec, SimBuilding, SimTree};
use super::camera::{OrbitCamera, ViewPreset};
use super::car::SimCar;
use super::command::{ControlQueue, SimCommand, SimKey};
use super::config::CityConfig;
use super::geometry::{
    building_batch, car_batches, ground_batch, road_batches, tree_batches, GROUND_COLOR,
    GROUND_HALF_SIZE,
};
use super::layout::{create_cars, generate_city};
use super::render::{DrawLayer, SceneRenderer};
use super::road_network::RoadNetwork;
use super::types::Placement;

/// Camera degrees per dragged pixel
pub const DRAG_SENSITIVITY: f32 = 0.5;
/// Zoom change per wheel notch
pub const WHEEL_ZOOM_STEP: f32 = 2.0;
/// Camera degrees per arrow key press
pub const KEY_ROTATE_STEP: f32 = 5.0;
/// Target movement per WASD key press
pub const KEY_PAN_STEP: f32 = 2.0;
pub const MAX_SPEED_MULTIPLIER: f32 = 3.0;

/// The main simulation world
pub struct SimWorld {
    /// Road geometry shared by layout and rendering
    pub road_network: RoadNetwork,

    pub camera: OrbitCamera,

    pub buildings: Vec<SimBuilding>,

    pub trees: Vec<SimTree>,

    pub cars: Vec<SimCar>,

    /// Cars only move while this is false
    pub paused: bool,

    speed_multiplier: f32,

    /// Bumped whenever buildings, trees or cars are replaced or added
    scene_version: u64,

    /// Frames simulated so far
    pub frame: u64,

    quit_requested: bool,

    config: CityConfig,

    rng: StdRng,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new(CityConfig::default())
    }
}

impl SimWorld {
    /// Create a world and generate its first city
    pub fn new(config: CityConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut world = Self {
            road_network: config.road_network.clone(),
            camera: OrbitCamera::default(),
            buildings: Vec::new(),
            trees: Vec::new(),
            cars: Vec::new(),
            paused: false,
            speed_multiplier: 1.0,
            scene_version: 0,
            frame: 0,
            quit_requested: false,
            config,
            rng,
        };
        world.generate_city();
        world
    }

    /// Create a world with a seeded RNG for reproducible cities
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new(CityConfig {
            seed: Some(seed),
            ..CityConfig::default()
        })
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn scene_version(&self) -> u64 {
        self.scene_version
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Discard buildings, trees and cars and generate new ones
    pub fn generate_city(&mut self) {
        let layout = generate_city(
            &mut self.rng,
            self.config.num_buildings,
            self.config.num_trees,
            &self.road_network,
        );
        let cars = create_cars(&mut self.rng, self.config.num_cars, &self.road_network);

        info!(
            "Generated city: {}/{} buildings in {} attempts, {} trees, {} cars",
            layout.buildings.len(),
            self.config.num_buildings,
            layout.attempts,
            layout.trees.len(),
            cars.len()
        );

        self.buildings = layout.buildings;
        self.trees = layout.trees;
        self.cars = cars;
        self.scene_version += 1;
    }

    /// Validate and append a user-requested building
    ///
    /// On error the building list is left untouched.
    pub fn add_building(&mut self, spec: BuildingSpec) -> Result<()> {
        spec.validate()?;
        let color = random_grey(&mut self.rng);
        self.buildings.push(spec.into_building(color));
        self.scene_version += 1;
        info!(
            "Added building at ({:.1}, {:.1}) size {:.1}x{:.1}x{:.1}",
            spec.x, spec.z, spec.width, spec.depth, spec.height
        );
        Ok(())
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        if !speed.is_finite() {
            bail!("speed must be a finite number, got {speed}");
        }
        let clamped = speed.clamp(0.0, MAX_SPEED_MULTIPLIER);
        if clamped != speed {
            warn!("Speed {speed} out of range, using {clamped}");
        }
        self.speed_multiplier = clamped;
        Ok(())
    }

    pub fn toggle_animation(&mut self) {
        self.paused = !self.paused;
        info!("Animation {}", if self.paused { "paused" } else { "running" });
    }

    /// Apply one external command
    pub fn apply(&mut self, command: SimCommand) -> Result<()> {
        match command {
            SimCommand::Drag { dx, dy } => self
                .camera
                .rotate(dx * DRAG_SENSITIVITY, -dy * DRAG_SENSITIVITY),
            SimCommand::Wheel(notches) => {
                if notches != 0.0 {
                    self.camera.zoom_by(-notches.signum() * WHEEL_ZOOM_STEP);
                }
            }
            SimCommand::Key(key) => self.apply_key(key),
            SimCommand::ToggleAnimation => self.toggle_animation(),
            SimCommand::SetSpeed(speed) => self.set_speed(speed)?,
            SimCommand::SetView(preset) => {
                debug!("Switching to {} view", preset.label());
                self.camera.apply_preset(preset);
            }
            SimCommand::AddBuilding(spec) => self.add_building(spec)?,
            SimCommand::Regenerate => self.generate_city(),
            SimCommand::Quit => self.request_quit(),
        }
        Ok(())
    }

    fn apply_key(&mut self, key: SimKey) {
        match key {
            SimKey::Left => self.camera.rotate(-KEY_ROTATE_STEP, 0.0),
            SimKey::Right => self.camera.rotate(KEY_ROTATE_STEP, 0.0),
            SimKey::Up => self.camera.rotate(0.0, KEY_ROTATE_STEP),
            SimKey::Down => self.camera.rotate(0.0, -KEY_ROTATE_STEP),
            SimKey::W => self.camera.pan_target(0.0, -KEY_PAN_STEP),
            SimKey::S => self.camera.pan_target(0.0, KEY_PAN_STEP),
            SimKey::A => self.camera.pan_target(-KEY_PAN_STEP, 0.0),
            SimKey::D => self.camera.pan_target(KEY_PAN_STEP, 0.0),
            SimKey::Digit1 => self.camera.apply_preset(ViewPreset::Top),
            SimKey::Digit2 => self.camera.apply_preset(ViewPreset::Street),
            SimKey::Digit3 => self.camera.apply_preset(ViewPreset::Oblique),
            SimKey::Space => self.toggle_animation(),
            SimKey::R => self.generate_city(),
            SimKey::Plus => self.camera.zoom_by(-WHEEL_ZOOM_STEP),
            SimKey::Minus => self.camera.zoom_by(WHEEL_ZOOM_STEP),
            SimKey::Escape => self.request_quit(),
        }
    }

    /// Shared by the quit command and the Escape key
    fn request_quit(&mut self) {
        info!("Quit requested");
        self.quit_requested = true;
    }

    /// Apply everything queued since the last call
    ///
    /// Rejected commands are logged and skipped. Returns how many were applied.
    pub fn process_commands(&mut self, queue: &ControlQueue) -> usize {
        let mut applied = 0;
        for command in queue.drain() {
            match self.apply(command) {
                Ok(()) => applied += 1,
                Err(e) => warn!("Rejected {:?}: {:#}", command, e),
            }
        }
        applied
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self) {
        self.frame += 1;
        if self.paused {
            return;
        }
        for car in &mut self.cars {
            car.update(self.speed_multiplier);
        }
    }

    /// Draw one frame: ground, road, buildings, trees, then cars
    pub fn render(&self, renderer: &mut dyn SceneRenderer) {
        let identity = Placement::identity();

        renderer.clear();
        renderer.set_view(&self.camera.view_transform());

        renderer.draw(
            DrawLayer::Ground,
            &ground_batch(GROUND_HALF_SIZE, GROUND_COLOR),
            &identity,
        );
        for batch in road_batches(&self.road_network) {
            renderer.draw(DrawLayer::Road, &batch, &identity);
        }
        for building in &self.buildings {
            renderer.draw(DrawLayer::Building, &building_batch(building), &identity);
        }
        for tree in &self.trees {
            for batch in tree_batches(tree) {
                renderer.draw(DrawLayer::Tree, &batch, &identity);
            }
        }
        for (index, car) in self.cars.iter().enumerate() {
            let placement = car.placement();
            for batch in car_batches(car) {
                renderer.draw(DrawLayer::Car(index), &batch, &placement);
            }
        }

        renderer.present();
    }

    /// Log a summary of the world state
    pub fn print_summary(&self) {
        info!("=== City Simulation Summary ===");
        info!(
            "Frame: {}, {}",
            self.frame,
            if self.paused { "paused" } else { "running" }
        );
        info!(
            "Roads: {}, Buildings: {}, Trees: {}, Cars: {}",
            self.road_network.road_count(),
            self.buildings.len(),
            self.trees.len(),
            self.cars.len()
        );
        info!("Speed multiplier: {:.1}", self.speed_multiplier);

        let eye = self.camera.eye_position();
        info!(
            "Camera: yaw={:.1} pitch={:.1} zoom={:.1} eye=({:.1}, {:.1}, {:.1})",
            self.camera.yaw,
            self.camera.pitch(),
            self.camera.zoom(),
            eye.x,
            eye.y,
            eye.z
        );

        for (index, car) in self.cars.iter().enumerate() {
            debug!(
                "  Car {}: {:?} lane={:.1} position={:.2}",
                index, car.path_type, car.lane_offset, car.position
            );
        }
    }
}
