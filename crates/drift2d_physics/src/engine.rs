//! Frame-driven physics pipeline
//!
//! [`PhysicsEngine::update`] is the per-frame entry point. It rebuilds the
//! spatial index from the live body collection, then walks each body in
//! collection order applying gravity, friction, a swept collision query with
//! at most one resolved collision per body per frame, the velocity deadzone,
//! the position commit, and boundary containment.
//!
//! The engine owns no bodies: it receives the collection and the index each
//! call and mutates bodies in place. Single-threaded, synchronous, one
//! `update` completes fully before the next begins.

use drift2d_math::Vec2;
use serde::{Serialize, Deserialize};
use slotmap::SlotMap;

use crate::body::{Body, BodyKey};
use crate::quadtree::Quadtree;

/// Containment strategy applied at the frame bounds after the commit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Clamp position into bounds, zero the contacting velocity component,
    /// and track `on_ground` against the lower bound
    #[default]
    Clamp,
    /// Restore the previous coordinate on the exiting axis. Only one axis is
    /// ever restored, vertical first; a body exiting through a corner keeps
    /// its horizontal motion. Intentional simplification, not a bug.
    Revert,
}

/// Tunable parameters for the physics pipeline
///
/// All fields are plain data set by the owner between frames (e.g. keyboard
/// input nudging gravity); nothing here is global state.
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// Acceleration added to every body's velocity each frame
    pub gravity: Vec2,
    /// Multiplicative per-axis velocity decay applied each frame
    pub friction: Vec2,
    /// Speed ceiling per axis; a component exceeding it snaps to zero
    /// (not to the ceiling), killing runaway jitter outright
    pub max_velocity: Option<f32>,
    /// Velocity components below this magnitude snap to exactly zero
    pub velocity_epsilon: f32,
    /// Speed divisor applied when resolving a swept (not yet overlapping)
    /// collision
    pub swept_damping: f32,
    /// Speed divisor applied when the pair still overlaps after separation;
    /// smaller than `swept_damping` so resting stacks settle instead of
    /// jittering
    pub overlap_damping: f32,
    /// Containment strategy at the frame bounds
    pub boundary: BoundaryPolicy,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 1.0),
            friction: Vec2::new(0.9, 0.9),
            max_velocity: Some(100.0),
            velocity_epsilon: 0.3,
            swept_damping: 3.0,
            overlap_damping: 0.75,
            boundary: BoundaryPolicy::Clamp,
        }
    }
}

impl PhysicsConfig {
    /// Create a config with the given gravity and default tuning
    pub fn new(gravity_x: f32, gravity_y: f32) -> Self {
        Self {
            gravity: Vec2::new(gravity_x, gravity_y),
            ..Self::default()
        }
    }
}

/// The per-frame physics pipeline
pub struct PhysicsEngine {
    /// Tunables, mutable between frames
    pub config: PhysicsConfig,
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::with_config(PhysicsConfig::default())
    }
}

impl PhysicsEngine {
    /// Create an engine with the given gravity and default tuning
    pub fn new(gravity_x: f32, gravity_y: f32) -> Self {
        Self::with_config(PhysicsConfig::new(gravity_x, gravity_y))
    }

    /// Create an engine with a full configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Accumulate gravity into the body's velocity
    ///
    /// A grounded body stops accumulating vertical gravity; horizontal
    /// gravity applies unconditionally.
    pub fn apply_gravity(&self, body: &mut Body) {
        if !body.on_ground {
            body.velocity.y += self.config.gravity.y;
        }
        body.velocity.x += self.config.gravity.x;
    }

    /// Decay the body's velocity, snapping runaway components to zero
    pub fn apply_friction(&self, body: &mut Body) {
        body.velocity = body.velocity.component_mul(self.config.friction);

        if let Some(max) = self.config.max_velocity {
            if body.velocity.x.abs() > max {
                body.velocity.x = 0.0;
            }
            if body.velocity.y.abs() > max {
                body.velocity.y = 0.0;
            }
        }
    }

    /// Snap residual per-axis motion below the epsilon to exactly zero
    fn apply_deadzone(&self, body: &mut Body) {
        if body.velocity.x.abs() < self.config.velocity_epsilon {
            body.velocity.x = 0.0;
        }
        if body.velocity.y.abs() < self.config.velocity_epsilon {
            body.velocity.y = 0.0;
        }
    }

    /// Resolve a detected collision between a pair of bodies
    ///
    /// If the pair currently overlaps, they are first pushed apart along the
    /// axis of least overlap, half the overlap each way (frozen bodies hold
    /// their ground). Both velocities are then reassigned along the angle
    /// between box centers, scaled by each body's damped speed: an
    /// elastic-style exchange along the contact direction, not an exact
    /// impulse solve.
    fn resolve_collision(&self, p: &mut Body, o: &mut Body) {
        let delta = p.rect().center() - o.rect().center();

        if p.overlaps(o) {
            let overlap_x = (p.size.x + o.size.x) / 2.0 - delta.x.abs();
            let overlap_y = (p.size.y + o.size.y) / 2.0 - delta.y.abs();
            let push = overlap_x.min(overlap_y) / 2.0;

            if overlap_x < overlap_y {
                let dir = if delta.x > 0.0 { 1.0 } else { -1.0 };
                if !p.frozen {
                    p.position.x += dir * push;
                }
                if !o.frozen {
                    o.position.x -= dir * push;
                }
            } else {
                let dir = if delta.y > 0.0 { 1.0 } else { -1.0 };
                if !p.frozen {
                    p.position.y += dir * push;
                }
                if !o.frozen {
                    o.position.y -= dir * push;
                }
            }
        }

        let angle = delta.y.atan2(delta.x);

        // A pair still overlapping after separation is damped less than a
        // swept-only pair.
        let damping = if p.overlaps(o) {
            self.config.overlap_damping
        } else {
            self.config.swept_damping
        };

        let magnitude_p = p.velocity.length() / damping;
        let magnitude_o = o.velocity.length() / damping;
        let direction = Vec2::new(angle.cos(), angle.sin());

        p.velocity = direction * magnitude_p;
        o.velocity = direction * magnitude_o;
    }

    /// Clamp-policy containment of the committed position
    fn contain_clamped(&self, body: &mut Body, bounds: Vec2) {
        if body.position.x < 0.0 {
            body.position.x = 0.0;
            body.velocity.x = 0.0;
        } else if body.position.x + body.size.x > bounds.x {
            body.position.x = bounds.x - body.size.x;
            body.velocity.x = 0.0;
        }

        if body.position.y < 0.0 {
            body.position.y = 0.0;
            body.velocity.y = 0.0;
        } else if body.position.y + body.size.y > bounds.y {
            body.position.y = bounds.y - body.size.y;
            body.velocity.y = 0.0;
            body.on_ground = true;
        } else if body.position.y + body.size.y < bounds.y {
            body.on_ground = false;
        }
    }

    /// Revert-policy containment: restore the previous coordinate on the
    /// exiting axis, vertical taking priority
    fn contain_reverted(&self, body: &mut Body, previous: Vec2, bounds: Vec2) {
        if body.position.y < 0.0 || body.position.y + body.size.y > bounds.y {
            body.position.y = previous.y;
        } else if body.position.x < 0.0 || body.position.x + body.size.x > bounds.x {
            body.position.x = previous.x;
        }
    }

    /// Advance the simulation by one frame
    ///
    /// `bounds` is the containment region `[0, bounds.x] x [0, bounds.y]`,
    /// supplied fresh every call so the owner can resize between frames.
    ///
    /// Iteration follows collection order; in a multi-way contact that order
    /// decides which collision resolves first (accepted nondeterminism). Each
    /// body resolves at most one collision per frame.
    pub fn update(
        &self,
        bodies: &mut SlotMap<BodyKey, Body>,
        index: &mut Quadtree,
        bounds: Vec2,
    ) {
        // Phase 1: rebuild the index from scratch at current positions
        index.clear();
        for (key, body) in bodies.iter() {
            index.insert(key, body.rect());
        }

        // Phase 2: integrate, collide, and contain each body
        let keys: Vec<BodyKey> = bodies.keys().collect();
        let mut candidates: Vec<BodyKey> = Vec::new();

        for key in keys {
            let swept = {
                let body = &mut bodies[key];
                self.apply_gravity(body);
                self.apply_friction(body);
                body.rect().swept(body.velocity)
            };

            candidates.clear();
            index.query_into(&swept, &mut candidates);

            for &other in candidates.iter() {
                if other == key {
                    continue;
                }
                // Disjoint borrow of the pair; a stale key degrades to a skip
                let Some([p, o]) = bodies.get_disjoint_mut([key, other]) else {
                    continue;
                };
                let steps = p.path_steps;
                if p.collides_along_path(o, steps) {
                    self.resolve_collision(p, o);
                    break;
                }
            }

            let body = &mut bodies[key];
            self.apply_deadzone(body);

            let previous = body.position;
            if !body.frozen {
                body.position += body.velocity;
                match self.config.boundary {
                    BoundaryPolicy::Clamp => self.contain_clamped(body, bounds),
                    BoundaryPolicy::Revert => self.contain_reverted(body, previous, bounds),
                }
            }
        }

        // Phase 3: a body already walked above can be pushed out of bounds
        // by a later pair's separation; a final clamp pass restores the
        // containment invariant before the frame is observed. Idempotent
        // for bodies that are already inside.
        if self.config.boundary == BoundaryPolicy::Clamp {
            for (_key, body) in bodies.iter_mut() {
                if !body.frozen {
                    self.contain_clamped(body, bounds);
                }
            }
        }
    }
}
