//! 03 - Text Rain
//!
//! Demonstrates text laid out as glyph particles raining to the floor, plus
//! the composer staging frozen characters and releasing them.
//!
//! This example shows:
//! - layout_text turning a string into falling glyph bodies
//! - Composer staging typed characters as frozen bodies
//! - release() dropping the staged batch into the simulation
//!
//! Run with: `cargo run --example 03_text_rain`

use drift2d_core::{spawn, Composer, Vec2, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    env_logger::init();

    let bounds = Vec2::new(800.0, 600.0);
    let mut world = World::new(bounds);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    spawn::layout_text(&mut world, &mut rng, "Hello World!", 16.0);
    log::info!("{} glyphs raining", world.body_count());

    // Type a word while the rain falls, then let it go
    let mut composer = Composer::new(bounds);
    for ch in "drift".chars() {
        composer.push_char(&mut world, ch);
    }

    for frame in 1..=300u32 {
        world.step();
        if frame == 150 {
            composer.release(&mut world);
            log::info!("released staged text at frame {}", frame);
        }
    }

    let grounded = world.bodies().filter(|(_, b)| b.on_ground).count();
    log::info!(
        "done: {} bodies, {} resting on the floor",
        world.body_count(),
        grounded
    );
}
