//! Kinematic chains
//!
//! This module contains the chain type and its two resolution algorithms:
//! angle-constrained following for spines and FABRIK for limbs.

pub mod chain;
pub mod constraint;
pub mod error;
pub mod joint;
pub mod solver;

pub use chain::{Chain, ChainBuilder};
pub use constraint::AngleConstraint;
pub use error::ChainError;
pub use joint::Joint;
pub use solver::{FabrikSolver, FollowSolver, SolveResult};
