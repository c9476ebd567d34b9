use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use log::info;

use city_sim::console;
use city_sim::simulation::{
    CityConfig, ControlQueue, FrameStats, SimWorld, DEFAULT_BUILDINGS, DEFAULT_CARS, DEFAULT_FPS,
    DEFAULT_TREES,
};

#[derive(Parser)]
#[command(name = "city_sim")]
#[command(about = "Procedural 3D city with an orbiting camera and optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Target frame rate; 0 runs as fast as possible
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Buildings requested from the layout generator
    #[arg(long, default_value_t = DEFAULT_BUILDINGS)]
    buildings: usize,

    /// Requested trees (advisory; roads decide the real count)
    #[arg(long, default_value_t = DEFAULT_TREES)]
    trees: usize,

    /// Number of looping cars
    #[arg(long, default_value_t = DEFAULT_CARS)]
    cars: usize,

    /// Seed for a reproducible city
    #[arg(long)]
    seed: Option<u64>,

    /// Read control commands from stdin
    #[arg(long)]
    panel: bool,
}

impl Cli {
    fn city_config(&self) -> CityConfig {
        CityConfig {
            num_buildings: self.buildings,
            num_trees: self.trees,
            num_cars: self.cars,
            seed: self.seed,
            fps: self.fps,
            ..CityConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.city_config();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            return run_with_ui(config, cli.panel);
        }
        #[cfg(not(feature = "ui"))]
        {
            anyhow::bail!("UI feature is not enabled. Rebuild with --features ui");
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run_headless(config, cli.frames, cli.panel)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(config: CityConfig, frames: u64, panel: bool) -> Result<()> {
    info!("Running city simulation in headless mode...");
    info!("Frames: {}, target fps: {}", frames, config.fps);

    let queue = ControlQueue::new();
    if panel {
        console::spawn_control_panel(queue.clone())?;
    }

    let frame_budget = (config.fps > 0).then(|| Duration::from_secs_f64(1.0 / config.fps as f64));
    // Summaries once per simulated second
    let summary_interval = u64::from(if config.fps > 0 { config.fps } else { DEFAULT_FPS });

    let mut world = SimWorld::new(config);
    let mut renderer = FrameStats::new();

    info!("Initial state:");
    world.print_summary();

    while world.frame < frames && !world.quit_requested() {
        let started = Instant::now();

        world.process_commands(&queue);
        world.tick();
        world.render(&mut renderer);

        if world.frame % summary_interval == 0 {
            world.print_summary();
        }

        if let Some(rest) = frame_budget.and_then(|budget| budget.checked_sub(started.elapsed())) {
            thread::sleep(rest);
        }
    }

    info!("=== SIMULATION COMPLETE ===");
    info!("Frames simulated: {}", world.frame);
    info!("Frames presented: {}", renderer.frames_presented);
    info!("Buildings: {}", world.buildings.len());
    info!("Trees: {}", world.trees.len());
    info!("Cars: {}", world.cars.len());
    info!("Draw calls per frame: {}", renderer.draw_calls());
    info!("Vertices per frame: {}", renderer.vertices);

    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(config: CityConfig, panel: bool) -> Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting City Sim UI...");
    println!();
    println!("Controls:");
    println!("  Mouse Drag  - Rotate camera");
    println!("  Mouse Wheel - Zoom in/out");
    println!("  Arrow Keys  - Rotate camera");
    println!("  W/A/S/D     - Move view target");
    println!("  +/-         - Zoom in/out");
    println!("  1/2/3       - Top / street / 45° view");
    println!("  Space       - Pause/resume animation");
    println!("  R           - Regenerate city");
    println!("  ESC         - Exit");
    println!();

    let queue = ControlQueue::new();
    if panel {
        console::spawn_control_panel(queue.clone())?;
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,city_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "3D City Simulation".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(city_sim::ui::CitySimUIPlugin::new(config, queue))
        .run();

    Ok(())
}
