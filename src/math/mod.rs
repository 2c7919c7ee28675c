//! Math utilities module
//!
//! Angle wraparound helpers and convenient re-exports from glam.

pub mod angle;

pub use angle::{constrain_angle, constrain_distance, normalize, relative_angle_diff};

// Re-export commonly used glam types
pub use glam::{DVec2, Vec2};
