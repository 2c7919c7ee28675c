//! # creature-ik
//!
//! Procedurally animated 2D creatures driven by kinematic chains, with WebGPU
//! rendering.
//!
//! ## Features
//! - Angle-constrained follow-the-leader resolution for spines
//! - Single-sweep (or iterated) FABRIK for anchored limbs
//! - Fish, snake and lizard bodies described as vector shapes
//! - Foot planting with hysteresis for the lizard's legs
//! - Cross-platform: Native + WASM support
//!
//! ## Example
//! ```rust
//! use creature_ik::ik::{AngleConstraint, Chain};
//! use glam::DVec2;
//!
//! let mut spine = Chain::builder(DVec2::new(100.0, 100.0), 10, 64.0)
//!     .angle_constraint(AngleConstraint::new(22.5))
//!     .build()
//!     .unwrap();
//!
//! spine.resolve(DVec2::new(140.0, 90.0));
//! assert_eq!(spine.head(), DVec2::new(140.0, 90.0));
//! ```

pub mod creature;
pub mod ik;
pub mod math;
pub mod render;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use creature::{Creature, CreatureKind, Fish, Lizard, Shape, Snake};
pub use ik::{AngleConstraint, Chain, ChainBuilder, ChainError, FabrikSolver, FollowSolver, Joint, SolveResult};
pub use scene::{FrameClock, Scene};
