//! 2D Mathematics Library
//!
//! This crate provides the vector and rectangle types for the drift2d engine.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components
//! - [`Rect`] - Axis-aligned rectangle with top-left origin and full extents

mod vec2;
mod rect;

pub use vec2::Vec2;
pub use rect::Rect;
