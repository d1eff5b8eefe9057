//! drift2d - 2D particle sandbox engine
//!
//! A real-time 2D particle simulation: rectangular bodies under gravity,
//! friction, pairwise collisions, and boundary containment, with a quadtree
//! spatial index rebuilt every frame.

pub mod config;

pub use drift2d_core::{
    Body, BodyKey, BodyKind, BoundaryPolicy, Composer, IndexConfig, PhysicsConfig,
    PhysicsEngine, Quadtree, Rect, Scene, SpawnTemplate, Vec2, World,
};
