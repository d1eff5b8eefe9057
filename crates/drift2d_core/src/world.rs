//! World container for the particle simulation
//!
//! The World owns the live body collection, the quadtree index, and the
//! physics engine, and drives them once per frame. External layers (input,
//! rendering) mutate and read bodies between frames through the accessors
//! here; during [`World::step`] the collection belongs to the engine alone.

use drift2d_math::Vec2;
use drift2d_physics::{Body, BodyKey, PhysicsConfig, PhysicsEngine, Quadtree};
use slotmap::SlotMap;

/// How the per-frame quadtree is constructed
#[derive(Clone, Copy, Debug)]
pub struct IndexConfig {
    /// Per-node bucket capacity before subdividing
    pub capacity: usize,
    /// Minimum node edge length; below it subdivision is refused
    pub min_size: f32,
    /// Outer margin added around the bounds so bodies nudged slightly
    /// outside still land in the index
    pub margin: f32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            capacity: drift2d_physics::DEFAULT_CAPACITY,
            min_size: drift2d_physics::DEFAULT_MIN_SIZE,
            margin: 5.0,
        }
    }
}

/// The simulation world: bodies, spatial index, physics engine, bounds
pub struct World {
    bodies: SlotMap<BodyKey, Body>,
    index: Quadtree,
    engine: PhysicsEngine,
    bounds: Vec2,
    index_config: IndexConfig,
    paused: bool,
}

impl World {
    /// Create a world with the given frame bounds and default physics
    pub fn new(bounds: Vec2) -> Self {
        Self::with_engine(bounds, PhysicsConfig::default())
    }

    /// Create a world with a custom physics configuration
    pub fn with_engine(bounds: Vec2, config: PhysicsConfig) -> Self {
        let index_config = IndexConfig::default();
        Self {
            bodies: SlotMap::with_key(),
            index: Self::build_index(bounds, &index_config),
            engine: PhysicsEngine::with_config(config),
            bounds,
            index_config,
            paused: false,
        }
    }

    /// Set the quadtree construction parameters
    pub fn with_index(mut self, index_config: IndexConfig) -> Self {
        self.index_config = index_config;
        self.index = Self::build_index(self.bounds, &index_config);
        self
    }

    fn build_index(bounds: Vec2, config: &IndexConfig) -> Quadtree {
        let mut index = Quadtree::new(
            -config.margin,
            -config.margin,
            bounds.x + 2.0 * config.margin,
            bounds.y + 2.0 * config.margin,
        )
        .with_capacity(config.capacity);
        index.set_min_size(config.min_size);
        index
    }

    /// Add a body, returning its key
    pub fn add_body(&mut self, body: Body) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body, returning it if the key was live
    pub fn remove_body(&mut self, key: BodyKey) -> Option<Body> {
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.bodies.get_mut(key)
    }

    /// Number of bodies in the world
    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// True when the world holds no bodies
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterate over all bodies with their keys
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &Body)> {
        self.bodies.iter()
    }

    /// Iterate mutably over all bodies with their keys
    pub fn bodies_mut(&mut self) -> impl Iterator<Item = (BodyKey, &mut Body)> {
        self.bodies.iter_mut()
    }

    /// The physics engine (read access for its config)
    pub fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    /// Mutable engine access; the input layer adjusts gravity and friction
    /// here between frames
    pub fn engine_mut(&mut self) -> &mut PhysicsEngine {
        &mut self.engine
    }

    /// The spatial index (a renderer can visualize node boundaries from it)
    pub fn index(&self) -> &Quadtree {
        &self.index
    }

    /// Current frame bounds
    #[inline]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Change the frame bounds (e.g. on window resize) and rebuild the
    /// index region to match
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        self.index = Self::build_index(bounds, &self.index_config);
        log::debug!("world resized to {}x{}", bounds.x, bounds.y);
    }

    /// Whether stepping is currently suspended
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Suspend or resume stepping; rendering can continue while paused
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Advance the simulation by one frame, unless paused
    pub fn step(&mut self) {
        if self.paused {
            return;
        }
        self.engine
            .update(&mut self.bodies, &mut self.index, self.bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_is_empty() {
        let world = World::new(Vec2::new(800.0, 600.0));
        assert_eq!(world.body_count(), 0);
        assert!(world.is_empty());
        assert!(!world.is_paused());
        assert_eq!(world.bounds(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_add_get_remove_body() {
        let mut world = World::new(Vec2::new(800.0, 600.0));
        let key = world.add_body(Body::new(Vec2::new(10.0, 10.0), Vec2::new(5.0, 5.0)));

        assert_eq!(world.body_count(), 1);
        assert_eq!(
            world.get_body(key).map(|b| b.position),
            Some(Vec2::new(10.0, 10.0))
        );

        let removed = world.remove_body(key);
        assert!(removed.is_some());
        assert!(world.is_empty());
        // Stale key resolves to None, never to another body
        assert!(world.get_body(key).is_none());
    }

    #[test]
    fn test_step_applies_physics() {
        let mut world = World::new(Vec2::new(800.0, 600.0));
        let key = world.add_body(Body::new(Vec2::new(100.0, 0.0), Vec2::new(10.0, 10.0)));

        for _ in 0..5 {
            world.step();
        }

        let body = world.get_body(key).expect("body should exist");
        assert!(body.position.y > 0.0, "gravity should pull the body down");
    }

    #[test]
    fn test_paused_world_does_not_step() {
        let mut world = World::new(Vec2::new(800.0, 600.0));
        let key = world.add_body(Body::new(Vec2::new(100.0, 0.0), Vec2::new(10.0, 10.0)));

        world.set_paused(true);
        for _ in 0..5 {
            world.step();
        }
        assert_eq!(world.get_body(key).map(|b| b.position), Some(Vec2::new(100.0, 0.0)));

        world.set_paused(false);
        world.step();
        assert!(world.get_body(key).is_some_and(|b| b.position.y > 0.0));
    }

    #[test]
    fn test_index_rebuilt_each_step() {
        let mut world = World::new(Vec2::new(800.0, 600.0));
        world.add_body(Body::new(Vec2::new(100.0, 100.0), Vec2::new(10.0, 10.0)));
        world.add_body(Body::new(Vec2::new(400.0, 400.0), Vec2::new(10.0, 10.0)));

        world.step();
        assert_eq!(world.index().len(), 2);
    }

    #[test]
    fn test_index_margin_extends_boundary() {
        let world = World::new(Vec2::new(800.0, 600.0));
        let boundary = world.index().boundary();
        assert_eq!(boundary.x, -5.0);
        assert_eq!(boundary.y, -5.0);
        assert_eq!(boundary.w, 810.0);
        assert_eq!(boundary.h, 610.0);
    }

    #[test]
    fn test_resize_rebuilds_index_region() {
        let mut world = World::new(Vec2::new(800.0, 600.0));
        world.add_body(Body::new(Vec2::new(100.0, 100.0), Vec2::new(10.0, 10.0)));

        world.resize(Vec2::new(400.0, 300.0));
        assert_eq!(world.bounds(), Vec2::new(400.0, 300.0));
        assert_eq!(world.index().boundary().w, 410.0);

        // The rebuilt index repopulates on the next step
        world.step();
        assert_eq!(world.index().len(), 1);
    }

    #[test]
    fn test_engine_mut_adjusts_gravity_between_frames() {
        let mut world = World::new(Vec2::new(800.0, 600.0));
        let key = world.add_body(Body::new(Vec2::new(100.0, 300.0), Vec2::new(10.0, 10.0)));

        // Flip gravity upward, the way the keyboard layer would
        world.engine_mut().config.gravity = Vec2::new(0.0, -1.0);
        for _ in 0..5 {
            world.step();
        }

        assert!(world.get_body(key).is_some_and(|b| b.position.y < 300.0));
    }
}
