//! 2D particle physics for drift2d
//!
//! This crate provides the simulation core, including:
//! - Rectangular particle bodies with position, velocity, and flags
//! - A region quadtree spatial index rebuilt fresh every frame
//! - The per-frame physics pipeline: gravity, friction, swept collision
//!   detection and resolution, and boundary containment

pub mod body;
pub mod engine;
pub mod quadtree;

// Re-export commonly used types
pub use body::{Body, BodyKey, BodyKind, BOX_PATH_STEPS, DEFAULT_PATH_STEPS};
pub use engine::{BoundaryPolicy, PhysicsConfig, PhysicsEngine};
pub use quadtree::{Quadtree, DEFAULT_CAPACITY, DEFAULT_MIN_SIZE};
