//! drift2d - 2D particle sandbox engine
//!
//! Headless frame-loop runner: loads configuration and a scene, then steps
//! the simulation at a fixed frame rate, logging periodic statistics. The
//! renderer and OS input wiring are external collaborators; this binary is
//! the frame driver only.

mod config;

use std::thread;
use std::time::{Duration, Instant};

use drift2d_core::{Scene, SpawnTemplate, Vec2, World};

use config::AppConfig;

/// Build the fallback scene used when no scene file can be loaded
fn fallback_scene(config: &AppConfig) -> Scene {
    let mut scene = Scene::new("scattered boxes").with_seed(0);
    scene.add_spawn(SpawnTemplate::Scatter {
        count: config.scene.fallback_count,
        min_size: config.scene.fallback_min_size,
        max_size: config.scene.fallback_max_size,
    });
    scene
}

/// Log one statistics line for the current frame
fn log_stats(world: &World, frame: u64) {
    let moving = world
        .bodies()
        .filter(|(_, b)| b.velocity != Vec2::ZERO)
        .count();
    let grounded = world.bodies().filter(|(_, b)| b.on_ground).count();
    log::info!(
        "frame {}: {} bodies ({} moving, {} grounded), index depth {} holding {}",
        frame,
        world.body_count(),
        moving,
        grounded,
        world.index().depth(),
        world.index().len(),
    );
}

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting drift2d");

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // Load the scene, falling back to a generated scatter
    let scene = if config.scene.path.is_empty() {
        fallback_scene(&config)
    } else {
        Scene::load(&config.scene.path).unwrap_or_else(|e| {
            log::warn!(
                "Failed to load scene '{}': {}. Using fallback scene.",
                config.scene.path,
                e
            );
            fallback_scene(&config)
        })
    };

    let mut world = scene.instantiate(
        config.bounds.to_vec2(),
        config.physics.to_physics_config(),
        config.quadtree.to_index_config(),
    );
    log::info!(
        "Scene '{}' running at {}x{} with {} bodies",
        scene.name,
        config.bounds.width,
        config.bounds.height,
        world.body_count()
    );

    let frame_budget = Duration::from_secs_f64(1.0 / config.sim.frame_rate.max(1) as f64);
    let stats_every = config.debug.stats_every.max(1);
    let started = Instant::now();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();

        world.step();
        frame += 1;

        if config.debug.show_stats && frame % stats_every == 0 {
            log_stats(&world, frame);
        }

        if config.sim.frames > 0 && frame >= config.sim.frames {
            break;
        }

        // Hold the configured frame rate
        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }

    log::info!(
        "Finished {} frames in {:.2}s",
        frame,
        started.elapsed().as_secs_f64()
    );
}
