//! 02 - Box Pile
//!
//! Demonstrates a few hundred boxes scattered mid-air colliding and piling
//! up on the floor.
//!
//! This example shows:
//! - Seeded random scatter spawning
//! - The quadtree index rebuilt every frame to keep collision queries cheap
//! - Piles settling under friction and the velocity deadzone
//!
//! Run with: `cargo run --example 02_box_pile`

use drift2d_core::{spawn, Vec2, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    env_logger::init();

    let bounds = Vec2::new(1280.0, 720.0);
    let mut world = World::new(bounds);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    spawn::scatter_boxes(&mut world, &mut rng, 200, 15.0, 25.0);

    for frame in 1..=600u32 {
        world.step();

        if frame % 60 == 0 {
            let grounded = world.bodies().filter(|(_, b)| b.on_ground).count();
            let moving = world
                .bodies()
                .filter(|(_, b)| b.velocity != Vec2::ZERO)
                .count();
            log::info!(
                "frame {:3}: {} grounded, {} still moving, index depth {}",
                frame,
                grounded,
                moving,
                world.index().depth()
            );
        }
    }
}
