//! Foot planting for FABRIK-driven limbs.
//!
//! A foot holds still on its cached spot until the body has carried the ideal
//! spot far enough away, then picks the new spot in one go. The limb then eases
//! toward whichever spot is cached.

use glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaitConfig {
    /// Distance the ideal foot spot may drift from the planted one before a step.
    pub step_threshold: f64,
    /// Fraction of the remaining distance a foot covers per tick.
    pub ease: f64,
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            step_threshold: 200.0,
            ease: 0.4,
        }
    }
}

impl GaitConfig {
    pub fn new(step_threshold: f64) -> Self {
        Self {
            step_threshold,
            ..Default::default()
        }
    }

    pub fn with_ease(mut self, ease: f64) -> Self {
        self.ease = ease;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Planted,
    Stepping,
}

pub fn should_step(planted: DVec2, candidate: DVec2, threshold: f64) -> bool {
    planted.distance(candidate) > threshold
}

/// Cached foot spot of one limb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootPlant {
    desired: Option<DVec2>,
    state: StepState,
}

impl Default for FootPlant {
    fn default() -> Self {
        Self::new()
    }
}

impl FootPlant {
    /// A foot that has not touched down yet; the first update plants it.
    pub fn new() -> Self {
        Self {
            desired: None,
            state: StepState::Planted,
        }
    }

    pub fn planted_at(spot: DVec2) -> Self {
        Self {
            desired: Some(spot),
            state: StepState::Planted,
        }
    }

    pub fn desired(&self) -> Option<DVec2> {
        self.desired
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    /// Offers this tick's ideal spot; the cache only takes it past the threshold.
    pub fn update(&mut self, candidate: DVec2, config: &GaitConfig) -> StepState {
        let step = match self.desired {
            Some(planted) => should_step(planted, candidate, config.step_threshold),
            None => true,
        };

        self.state = if step {
            log::debug!("foot steps to ({:.1}, {:.1})", candidate.x, candidate.y);
            self.desired = Some(candidate);
            StepState::Stepping
        } else {
            StepState::Planted
        };
        self.state
    }

    /// Where the foot should be pulled this tick, starting from `foot`.
    pub fn target(&self, foot: DVec2, config: &GaitConfig) -> DVec2 {
        match self.desired {
            Some(spot) => foot.lerp(spot, config.ease),
            None => foot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_update_plants_the_foot() {
        let mut plant = FootPlant::new();
        assert_eq!(plant.desired(), None);
        let spot = DVec2::new(10.0, 20.0);
        assert_eq!(plant.update(spot, &GaitConfig::default()), StepState::Stepping);
        assert_eq!(plant.desired(), Some(spot));
    }

    #[test]
    fn small_drift_keeps_foot_planted() {
        let config = GaitConfig::default();
        let spot = DVec2::new(300.0, 300.0);
        let mut plant = FootPlant::planted_at(spot);

        for i in 0..20 {
            let candidate = spot + DVec2::new(i as f64 * 9.0, 0.0);
            assert_eq!(plant.update(candidate, &config), StepState::Planted);
            assert_eq!(plant.desired(), Some(spot));
        }
    }

    #[test]
    fn drift_past_threshold_steps() {
        let config = GaitConfig::default();
        let mut plant = FootPlant::planted_at(DVec2::ZERO);

        assert_eq!(plant.update(DVec2::new(200.0, 0.0), &config), StepState::Planted);
        let far = DVec2::new(200.5, 0.0);
        assert_eq!(plant.update(far, &config), StepState::Stepping);
        assert_eq!(plant.desired(), Some(far));
        assert_eq!(plant.state(), StepState::Stepping);

        assert_eq!(plant.update(far, &config), StepState::Planted);
    }

    #[test]
    fn target_eases_toward_cached_spot() {
        let config = GaitConfig::default();
        let plant = FootPlant::planted_at(DVec2::new(100.0, 0.0));
        let target = plant.target(DVec2::ZERO, &config);
        assert_abs_diff_eq!(target.x, 40.0, epsilon = 1e-12);
        assert_abs_diff_eq!(target.y, 0.0);

        assert_eq!(FootPlant::new().target(DVec2::ONE, &config), DVec2::ONE);
    }

    #[test]
    fn config_builder() {
        let config = GaitConfig::new(50.0).with_ease(0.25);
        assert_eq!(config.step_threshold, 50.0);
        assert_eq!(config.ease, 0.25);
    }
}
