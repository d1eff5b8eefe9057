//! Particle factories
//!
//! Scene setup helpers that populate a [`World`] with bodies: random box
//! scatters and text laid out as one glyph particle per character. All
//! randomness flows through a caller-supplied RNG so runs are reproducible
//! from a seed.

use drift2d_math::Vec2;
use drift2d_physics::{Body, BodyKey};
use rand::Rng;

use crate::world::World;

/// Horizontal advance of a glyph cell relative to its height
///
/// Approximates a monospace aspect ratio; glyphs are `GLYPH_ASPECT * cell`
/// wide and `cell` tall.
pub const GLYPH_ASPECT: f32 = 0.6;

/// Uniform sample in `[min, max)`
#[inline]
fn random_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

/// Scatter `count` box particles across the world at random positions and
/// sizes, returning their keys
///
/// Sizes are uniform in `[min_size, max_size)`; positions keep the largest
/// possible box clear of the right and bottom edges.
pub fn scatter_boxes<R: Rng>(
    world: &mut World,
    rng: &mut R,
    count: usize,
    min_size: f32,
    max_size: f32,
) -> Vec<BodyKey> {
    let bounds = world.bounds();
    let mut keys = Vec::with_capacity(count);

    for _ in 0..count {
        let size = random_range(rng, min_size, max_size);
        let x = random_range(rng, 0.0, (bounds.x - max_size).max(0.0));
        let y = random_range(rng, max_size.min(bounds.y), (bounds.y - max_size).max(0.0));
        keys.push(world.add_body(Body::cube(Vec2::new(x, y), size)));
    }

    log::debug!("scattered {} boxes ({}..{} units)", count, min_size, max_size);
    keys
}

/// Spawn one box particle at an explicit position with a random size in
/// `[min_size, max_size)`, e.g. from a mouse click
pub fn spawn_box_at<R: Rng>(
    world: &mut World,
    rng: &mut R,
    position: Vec2,
    min_size: f32,
    max_size: f32,
) -> BodyKey {
    let size = random_range(rng, min_size, max_size);
    world.add_body(Body::cube(position, size))
}

/// Lay out a block of text as falling glyph particles, one per non-space
/// character, returning their keys
///
/// Rows advance by `cell` vertically starting one cell down from the top;
/// spaces advance the cursor without spawning. Each glyph starts with a
/// small random downward velocity so a block of text breaks apart as it
/// falls instead of dropping as a slab.
pub fn layout_text<R: Rng>(
    world: &mut World,
    rng: &mut R,
    text: &str,
    cell: f32,
) -> Vec<BodyKey> {
    let glyph_size = Vec2::new(cell * GLYPH_ASPECT, cell);
    let mut keys = Vec::new();
    let mut y = cell;

    for line in text.lines() {
        let mut x = 0.0;
        for ch in line.chars() {
            if ch == ' ' {
                x += glyph_size.x;
                continue;
            }

            let velocity = Vec2::new(0.0, random_range(rng, 1.0, 6.0));
            let body = Body::glyph(ch, Vec2::new(x, y), glyph_size).with_velocity(velocity);
            keys.push(world.add_body(body));
            x += glyph_size.x;
        }
        y += cell;
    }

    log::debug!("laid out {} glyphs from {} bytes of text", keys.len(), text.len());
    keys
}
