//! 01 - Free Fall
//!
//! Demonstrates a single body falling under gravity and coming to rest on
//! the lower boundary.
//!
//! This example shows:
//! - Creating a World with default physics
//! - Adding a body and stepping the simulation
//! - The on_ground flag latching once the body lands
//!
//! Run with: `cargo run --example 01_free_fall`

use drift2d_core::{Body, Vec2, World};

fn main() {
    env_logger::init();

    let bounds = Vec2::new(400.0, 300.0);
    let mut world = World::new(bounds);
    let key = world.add_body(Body::cube(Vec2::new(190.0, 0.0), 20.0));

    for frame in 1..=120 {
        world.step();
        let body = world.get_body(key).expect("body should exist");

        if frame % 10 == 0 {
            log::info!(
                "frame {:3}: y = {:6.1}, vy = {:5.2}, on_ground = {}",
                frame,
                body.position.y,
                body.velocity.y,
                body.on_ground
            );
        }

        if body.on_ground {
            log::info!("landed after {} frames at y = {}", frame, body.position.y);
            break;
        }
    }
}
