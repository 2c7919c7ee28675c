use crate::math::angle;
use std::f64::consts::TAU;

/// Maximum turn allowed between two consecutive links.
///
/// Lower values give a rigid spine, higher values a loose one. A full circle
/// places no limit at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleConstraint {
    pub max_angle: f64,
}

impl AngleConstraint {
    pub const UNCONSTRAINED: Self = Self { max_angle: TAU };

    pub fn new(max_angle_degrees: f64) -> Self {
        Self {
            max_angle: max_angle_degrees.to_radians(),
        }
    }

    pub fn from_radians(max_angle: f64) -> Self {
        Self { max_angle }
    }

    pub fn is_valid(&self) -> bool {
        self.max_angle > 0.0 && self.max_angle <= TAU
    }

    /// Clamps `heading` to within the limit of `reference`.
    pub fn apply(&self, heading: f64, reference: f64) -> f64 {
        angle::constrain_angle(heading, reference, self.max_angle)
    }
}

impl Default for AngleConstraint {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}
