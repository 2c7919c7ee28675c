use super::constraint::AngleConstraint;
use super::error::ChainError;
use super::joint::Joint;
use super::solver::{FabrikSolver, FollowSolver, SolveResult};
use glam::DVec2;

/// A run of joints joined by rigid links of one shared length.
///
/// Index 0 is the head (the end that gets pulled toward a target), the last
/// index is the tail. After every resolve call, each pair of neighbours is
/// exactly `link_size` apart.
#[derive(Debug, Clone)]
pub struct Chain {
    pub(crate) joints: Vec<Joint>,
    pub(crate) link_size: f64,
    pub(crate) angle_constraint: AngleConstraint,
    pub(crate) tolerance: f64,
    pub(crate) max_iterations: u32,
}

impl Chain {
    pub fn builder(origin: DVec2, joint_count: usize, link_size: f64) -> ChainBuilder {
        ChainBuilder::new(origin, joint_count, link_size)
    }

    /// Unconstrained chain hanging straight down from `origin`.
    pub fn new(origin: DVec2, joint_count: usize, link_size: f64) -> Result<Self, ChainError> {
        ChainBuilder::new(origin, joint_count, link_size).build()
    }

    /// Pulls the head onto `target` and drags the rest along, keeping every
    /// bend within the angle constraint.
    pub fn resolve(&mut self, target: DVec2) {
        FollowSolver::solve(self, target);
    }

    /// Pins the head to `target` and the tail to `anchor`.
    pub fn fabrik_resolve(&mut self, target: DVec2, anchor: DVec2) -> SolveResult {
        FabrikSolver::solve(self, target, anchor)
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    pub fn link_size(&self) -> f64 {
        self.link_size
    }

    pub fn angle_constraint(&self) -> AngleConstraint {
        self.angle_constraint
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Head-to-tail length when fully stretched.
    pub fn total_length(&self) -> f64 {
        self.link_size * self.joints.len().saturating_sub(1) as f64
    }

    pub fn head(&self) -> DVec2 {
        self.joints[0].position
    }

    pub fn tail(&self) -> DVec2 {
        self.joints[self.joints.len() - 1].position
    }

    pub fn positions(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.joints.iter().map(|j| j.position)
    }

    pub fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        self.joints.iter().map(|j| j.angle)
    }

    /// Whether head target and tail anchor can both be met at once.
    pub fn can_span(&self, target: DVec2, anchor: DVec2) -> bool {
        target.distance(anchor) <= self.total_length()
    }
}

pub struct ChainBuilder {
    origin: DVec2,
    joint_count: usize,
    link_size: f64,
    angle_constraint: AngleConstraint,
    tolerance: f64,
    max_iterations: u32,
}

impl ChainBuilder {
    pub fn new(origin: DVec2, joint_count: usize, link_size: f64) -> Self {
        Self {
            origin,
            joint_count,
            link_size,
            angle_constraint: AngleConstraint::UNCONSTRAINED,
            tolerance: 0.001,
            max_iterations: 1,
        }
    }

    pub fn angle_constraint(mut self, constraint: AngleConstraint) -> Self {
        self.angle_constraint = constraint;
        self
    }

    /// How close the head must land to its target for FABRIK to stop early.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// FABRIK sweeps per resolve. One sweep is the default.
    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn build(self) -> Result<Chain, ChainError> {
        if self.joint_count == 0 {
            return Err(ChainError::NoJoints);
        }
        if !(self.link_size.is_finite() && self.link_size > 0.0) {
            return Err(ChainError::InvalidLinkSize(self.link_size));
        }
        if !self.angle_constraint.is_valid() {
            return Err(ChainError::InvalidAngleConstraint(
                self.angle_constraint.max_angle,
            ));
        }
        if self.max_iterations == 0 {
            return Err(ChainError::NoIterations);
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(ChainError::InvalidTolerance(self.tolerance));
        }

        let joints = self.rest_pose();
        Ok(Chain {
            joints,
            link_size: self.link_size,
            angle_constraint: self.angle_constraint,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        })
    }

    fn rest_pose(&self) -> Vec<Joint> {
        (0..self.joint_count)
            .map(|i| Joint::new(self.origin + DVec2::Y * (self.link_size * i as f64)))
            .collect()
    }
}
