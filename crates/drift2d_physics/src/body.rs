//! Particle body types for the 2D simulation

use drift2d_math::{Rect, Vec2};
use slotmap::new_key_type;

// Define generational key type for bodies
new_key_type! {
    /// Key to a body in the particle collection
    ///
    /// Uses generational indexing so a handle to a removed body can never
    /// alias a body that later reuses the same slot: stale keys resolve to
    /// None instead of the wrong particle. Two bodies are "the same" only by
    /// key, never by value.
    pub struct BodyKey;
}

/// Render-only tag distinguishing particle flavors
///
/// The physics pipeline never branches on this; it exists so a renderer can
/// decide between drawing a filled box and drawing a character glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// A plain filled box
    Box,
    /// A box that renders as a single character
    Glyph(char),
}

/// Default number of sub-steps when sweeping a body along its motion path
pub const DEFAULT_PATH_STEPS: u32 = 8;

/// Sub-step count for box particles (larger bodies need fewer steps)
pub const BOX_PATH_STEPS: u32 = 3;

/// A simulated rectangular particle with position, velocity, and flags
#[derive(Clone, Debug)]
pub struct Body {
    /// Top-left position (mutated every frame)
    pub position: Vec2,
    /// Velocity in units per frame
    pub velocity: Vec2,
    /// Fixed extents, set at creation
    pub size: Vec2,
    /// Reserved mass scalar; collision resolution is symmetric and does not
    /// read it yet
    pub weight: f32,
    /// Render tag (box vs. glyph)
    pub kind: BodyKind,
    /// Number of interpolation steps for the swept collision test
    pub path_steps: u32,
    /// Frozen bodies accumulate forces and take part in collisions, but
    /// their position is never committed
    pub frozen: bool,
    /// Set while the body rests on the lower boundary; suppresses further
    /// gravity accumulation
    pub on_ground: bool,
}

impl Body {
    /// Create a new body at rest
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            weight: 1.0,
            kind: BodyKind::Box,
            path_steps: DEFAULT_PATH_STEPS,
            frozen: false,
            on_ground: false,
        }
    }

    /// Create a square box particle; weight scales with its edge length
    pub fn cube(position: Vec2, size: f32) -> Self {
        let mut body = Self::new(position, Vec2::new(size, size));
        body.weight = size;
        body.path_steps = BOX_PATH_STEPS;
        body
    }

    /// Create a glyph-bearing particle
    pub fn glyph(ch: char, position: Vec2, size: Vec2) -> Self {
        let mut body = Self::new(position, size);
        body.kind = BodyKind::Glyph(ch);
        body
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the weight of this body
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Set the swept-path sub-step count (clamped to at least 1)
    pub fn with_path_steps(mut self, steps: u32) -> Self {
        self.path_steps = steps.max(1);
        self
    }

    /// Set whether this body is frozen in place
    pub fn with_frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    /// The body's current bounding box
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// The body's bounding box as if it were at `position`
    #[inline]
    pub fn rect_at(&self, position: Vec2) -> Rect {
        Rect::from_pos_size(position, self.size)
    }

    /// Strict AABB overlap with another body
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        self.rect().intersects(&other.rect())
    }

    /// Test for overlap with `other` at any of `steps + 1` interpolated
    /// positions along this body's velocity
    ///
    /// This is a fixed-sub-step approximation of continuous collision
    /// detection: position `i` is `position + velocity * (i / steps)`, so
    /// step 0 tests the current overlap and step `steps` tests the full
    /// displacement. Fast, small bodies can tunnel between sub-steps; that
    /// is an accepted trade for real-time cost.
    pub fn collides_along_path(&self, other: &Body, steps: u32) -> bool {
        let steps = steps.max(1);
        let step = self.velocity * (1.0 / steps as f32);
        let other_rect = other.rect();

        for i in 0..=steps {
            let probe = self.rect_at(self.position + step * i as f32);
            if probe.intersects(&other_rect) {
                return true;
            }
        }

        false
    }
}
