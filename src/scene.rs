//! The active creature, the pointer it chases, and the tick clock.

use crate::creature::{shape, Creature, CreatureKind, Shape};
use crate::ik::ChainError;
use glam::DVec2;

/// Turns wall-clock frame times into a whole number of fixed animation ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    step: f64,
    accumulator: f64,
    max_ticks: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl FrameClock {
    /// Clock ticking `hz` times per second. A rate that is not finite and
    /// positive falls back to 60 Hz.
    pub fn new(hz: f64) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 {
            hz
        } else {
            log::warn!("invalid tick rate {hz}, using 60 Hz");
            60.0
        };
        Self {
            step: 1.0 / hz,
            accumulator: 0.0,
            max_ticks: 4,
        }
    }

    /// Most ticks a single frame may run; longer stalls are dropped.
    pub fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Adds `dt` seconds and returns how many ticks are now due.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }

        let due = (self.accumulator / self.step).floor();
        let ticks = due.min(self.max_ticks as f64) as u32;
        if due > self.max_ticks as f64 {
            log::trace!("dropping {} late ticks", due as u64 - self.max_ticks as u64);
            self.accumulator = 0.0;
        } else {
            self.accumulator -= ticks as f64 * self.step;
        }
        ticks
    }
}

pub struct Scene {
    kind: CreatureKind,
    creature: Box<dyn Creature>,
    pointer: DVec2,
    spawn_point: DVec2,
    clock: FrameClock,
    pub show_skeleton: bool,
}

impl Scene {
    /// Spawns `kind` at `spawn_point` with the pointer resting there too.
    pub fn new(kind: CreatureKind, spawn_point: DVec2) -> Result<Self, ChainError> {
        Ok(Self {
            kind,
            creature: kind.spawn(spawn_point)?,
            pointer: spawn_point,
            spawn_point,
            clock: FrameClock::default(),
            show_skeleton: false,
        })
    }

    pub fn kind(&self) -> CreatureKind {
        self.kind
    }

    pub fn creature(&self) -> &dyn Creature {
        self.creature.as_ref()
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    pub fn set_pointer(&mut self, pointer: DVec2) {
        self.pointer = pointer;
    }

    pub fn spawn_point(&self) -> DVec2 {
        self.spawn_point
    }

    /// Where the next creature will appear. The current one is left alone.
    pub fn set_spawn_point(&mut self, spawn_point: DVec2) {
        self.spawn_point = spawn_point;
    }

    /// Replaces the creature with a fresh `kind` at the spawn point.
    pub fn select(&mut self, kind: CreatureKind) -> Result<(), ChainError> {
        self.creature = kind.spawn(self.spawn_point)?;
        self.kind = kind;
        log::info!("switched to {kind}");
        Ok(())
    }

    pub fn cycle(&mut self) -> Result<(), ChainError> {
        self.select(self.kind.next())
    }

    pub fn respawn(&mut self) -> Result<(), ChainError> {
        self.select(self.kind)
    }

    /// Runs exactly one animation tick.
    pub fn tick(&mut self) {
        self.creature.resolve(self.pointer);
    }

    /// Runs however many fixed ticks `dt` seconds amount to.
    pub fn advance(&mut self, dt: f64) -> u32 {
        let ticks = self.clock.advance(dt);
        for _ in 0..ticks {
            self.tick();
        }
        ticks
    }

    pub fn shapes(&self) -> Vec<Shape> {
        let mut shapes = self.creature.shapes();
        if self.show_skeleton {
            shapes.extend(shape::skeleton(self.creature.spine()));
            for limb in self.creature.limbs() {
                shapes.extend(shape::skeleton(limb));
            }
        }
        shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn clock_emits_whole_ticks() {
        let mut clock = FrameClock::new(60.0);
        assert_eq!(clock.advance(1.0 / 120.0), 0);
        assert_eq!(clock.advance(1.0 / 120.0 + 1e-9), 1);
        assert_eq!(clock.advance(2.5 / 60.0), 2);
        assert_abs_diff_eq!(clock.accumulator, 0.5 / 60.0, epsilon = 1e-8);
    }

    #[test]
    fn clock_drops_long_stalls() {
        let mut clock = FrameClock::new(60.0).with_max_ticks(3);
        assert_eq!(clock.advance(1.0), 3);
        assert_eq!(clock.accumulator, 0.0);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f64::NAN), 0);
    }

    #[test]
    fn clock_rejects_bad_rates() {
        for hz in [f64::NAN, 0.0, -30.0, f64::INFINITY] {
            let mut clock = FrameClock::new(hz);
            assert_eq!(clock.step(), 1.0 / 60.0);
            assert_eq!(clock.advance(1.0 / 120.0), 0);
            assert_eq!(clock.advance(1.0 / 120.0 + 1e-9), 1);
            assert!(clock.accumulator.is_finite());
        }
    }

    #[test]
    fn cycling_respawns_at_spawn_point() {
        let spawn = DVec2::new(640.0, 360.0);
        let mut scene = Scene::new(CreatureKind::Fish, spawn).unwrap();
        scene.set_pointer(DVec2::new(0.0, 0.0));
        for _ in 0..10 {
            scene.tick();
        }
        assert_ne!(scene.creature().spine().head(), spawn);

        scene.cycle().unwrap();
        assert_eq!(scene.kind(), CreatureKind::Snake);
        assert_eq!(scene.creature().kind(), CreatureKind::Snake);
        assert_eq!(scene.creature().spine().head(), spawn);

        scene.set_spawn_point(DVec2::new(10.0, 10.0));
        scene.select(CreatureKind::Lizard).unwrap();
        assert_eq!(scene.creature().spine().head(), DVec2::new(10.0, 10.0));
    }

    #[test]
    fn advance_runs_due_ticks() {
        let mut scene = Scene::new(CreatureKind::Snake, DVec2::ZERO).unwrap();
        scene.set_pointer(DVec2::new(1000.0, 0.0));
        assert_eq!(scene.advance(2.0 / 60.0 + 1e-9), 2);
        // two slither steps of 8 units
        assert!(scene.creature().spine().head().abs_diff_eq(DVec2::new(16.0, 0.0), 1e-9));
    }

    #[test]
    fn skeleton_overlay_adds_shapes() {
        let mut scene = Scene::new(CreatureKind::Lizard, DVec2::ZERO).unwrap();
        let plain = scene.shapes().len();
        scene.show_skeleton = true;
        // spine (14 joints) plus four 3-joint limbs, each a line plus a disc per joint
        assert_eq!(scene.shapes().len(), plain + (1 + 14) + 4 * (1 + 3));
    }
}
