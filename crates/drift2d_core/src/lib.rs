//! Core types for the drift2d engine
//!
//! This crate ties the physics core to its surroundings:
//!
//! - [`World`] - Container owning the body collection, spatial index, and
//!   physics engine, stepped once per frame
//! - [`IndexConfig`] - Quadtree construction parameters
//! - [`Scene`] / [`SpawnTemplate`] - Loadable/saveable scene descriptions
//! - [`Composer`] - Staged typing that becomes frozen glyph particles
//! - [`spawn`] - Particle factories (box scatter, text layout)

mod compose;
mod scene;
pub mod spawn;
mod world;

pub use compose::{Composer, DEFAULT_CELL};
pub use scene::{Scene, SceneLoadError, SceneSaveError, SpawnTemplate};
pub use world::{IndexConfig, World};

// Re-export commonly used types from the lower crates for convenience
pub use drift2d_math::{Rect, Vec2};
pub use drift2d_physics::{
    Body, BodyKey, BodyKind, BoundaryPolicy, PhysicsConfig, PhysicsEngine, Quadtree,
};
