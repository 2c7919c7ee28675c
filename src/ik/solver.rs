use super::chain::Chain;
use crate::math::angle;
use glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveResult {
    pub converged: bool,
    pub iterations: u32,
    /// Distance left between the head and its target.
    pub final_distance: f64,
}

/// Angle-constrained follow-the-leader resolution, used for spines.
pub struct FollowSolver;

impl FollowSolver {
    pub fn solve(chain: &mut Chain, target: DVec2) {
        let link_size = chain.link_size;
        let constraint = chain.angle_constraint;
        let joints = &mut chain.joints;

        // Standing still keeps the old heading instead of snapping to zero.
        let head = &mut joints[0];
        if let Some(heading) = angle::heading(target - head.position) {
            head.angle = heading;
        }
        head.position = target;

        for i in 1..joints.len() {
            let prev = joints[i - 1];
            let curr = joints[i].position;

            let raw = angle::heading(prev.position - curr).unwrap_or(prev.angle);
            let constrained = constraint.apply(raw, prev.angle);

            joints[i].angle = constrained;
            joints[i].position = prev.position - angle::unit(constrained) * link_size;
        }
    }
}

/// Two-ended reaching, used for limbs whose foot and shoulder are both pinned.
///
/// Each iteration is one forward sweep from the head toward the target and one
/// backward sweep from the tail toward the anchor. Joint angles are left alone.
pub struct FabrikSolver;

impl FabrikSolver {
    pub fn solve(chain: &mut Chain, target: DVec2, anchor: DVec2) -> SolveResult {
        let tolerance = chain.tolerance;
        let max_iterations = chain.max_iterations.max(1);

        for iteration in 0..max_iterations {
            Self::forward_pass(chain, target);
            Self::backward_pass(chain, anchor);

            let distance = chain.head().distance(target);
            if distance <= tolerance {
                return SolveResult {
                    converged: true,
                    iterations: iteration + 1,
                    final_distance: distance,
                };
            }
        }

        let final_distance = chain.head().distance(target);
        SolveResult {
            converged: final_distance <= tolerance,
            iterations: max_iterations,
            final_distance,
        }
    }

    fn forward_pass(chain: &mut Chain, target: DVec2) {
        let link_size = chain.link_size;
        let joints = &mut chain.joints;

        joints[0].position = target;

        for i in 1..joints.len() {
            let prev = joints[i - 1].position;
            joints[i].position = Self::reach(joints[i].position, prev, link_size, DVec2::Y);
        }
    }

    fn backward_pass(chain: &mut Chain, anchor: DVec2) {
        let link_size = chain.link_size;
        let joints = &mut chain.joints;
        let n = joints.len();

        joints[n - 1].position = anchor;

        for i in (0..n - 1).rev() {
            let next = joints[i + 1].position;
            joints[i].position = Self::reach(joints[i].position, next, link_size, DVec2::NEG_Y);
        }
    }

    /// Drags `pos` to exactly `link_size` from `anchor`. Coincident points fall
    /// back to the rest-pose axis so the chain never picks up a NaN.
    fn reach(pos: DVec2, anchor: DVec2, link_size: f64, fallback: DVec2) -> DVec2 {
        angle::constrain_distance(pos, anchor, link_size)
            .unwrap_or(anchor + fallback * link_size)
    }
}
