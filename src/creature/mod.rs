//! Creatures built from kinematic chains
//!
//! Each creature owns a spine chain (and, for the lizard, limb chains), pulls
//! it toward the pointer once per tick, and describes its body as vector shapes.

mod fish;
pub mod gait;
mod lizard;
pub mod shape;
mod snake;

pub use fish::Fish;
pub use gait::{FootPlant, GaitConfig, StepState};
pub use lizard::Lizard;
pub use shape::{Color, Path, Shape, Stroke, Style};
pub use snake::Snake;

use crate::ik::{Chain, ChainError};
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI};
use std::fmt;

pub trait Creature {
    fn kind(&self) -> CreatureKind;

    fn spine(&self) -> &Chain;

    fn limbs(&self) -> Vec<&Chain> {
        Vec::new()
    }

    /// Advances one animation tick toward `pointer`.
    fn resolve(&mut self, pointer: DVec2);

    /// Body, fins, limbs and eyes in back-to-front drawing order.
    fn shapes(&self) -> Vec<Shape>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreatureKind {
    Fish,
    Snake,
    Lizard,
}

impl CreatureKind {
    pub const ALL: [CreatureKind; 3] = [CreatureKind::Fish, CreatureKind::Snake, CreatureKind::Lizard];

    pub fn name(self) -> &'static str {
        match self {
            CreatureKind::Fish => "Fish",
            CreatureKind::Snake => "Snake",
            CreatureKind::Lizard => "Lizard",
        }
    }

    pub fn next(self) -> Self {
        match self {
            CreatureKind::Fish => CreatureKind::Snake,
            CreatureKind::Snake => CreatureKind::Lizard,
            CreatureKind::Lizard => CreatureKind::Fish,
        }
    }

    pub fn spawn(self, origin: DVec2) -> Result<Box<dyn Creature>, ChainError> {
        Ok(match self {
            CreatureKind::Fish => Box::new(Fish::new(origin)?),
            CreatureKind::Snake => Box::new(Snake::new(origin)?),
            CreatureKind::Lizard => Box::new(Lizard::new(origin)?),
        })
    }
}

impl fmt::Display for CreatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Head target a fixed `step` from `head` toward `pointer`.
pub fn step_toward(head: DVec2, pointer: DVec2, step: f64) -> DVec2 {
    (pointer - head)
        .try_normalize()
        .map_or(head, |direction| head + direction * step)
}

/// Control points for a body outline curve loop.
///
/// `pos(i, angle_offset, length_offset)` gives a point on the body edge at
/// joint `i`. The loop runs down the right flank, optionally around the tail
/// tip, back up the left flank, over the snout, and repeats the first three
/// right-flank points so the spline closes smoothly.
pub(crate) fn body_outline<F>(len: usize, tail_cap: bool, snout: [f64; 3], pos: F) -> Vec<DVec2>
where
    F: Fn(usize, f64, f64) -> DVec2,
{
    let mut points = Vec::with_capacity(2 * len + 7);
    points.extend((0..len).map(|i| pos(i, FRAC_PI_2, 0.0)));
    if tail_cap {
        points.push(pos(len - 1, PI, 0.0));
    }
    points.extend((0..len).rev().map(|i| pos(i, -FRAC_PI_2, 0.0)));
    points.push(pos(0, -FRAC_PI_6, snout[0]));
    points.push(pos(0, 0.0, snout[1]));
    points.push(pos(0, FRAC_PI_6, snout[2]));
    points.extend((0..3).map(|i| pos(i, FRAC_PI_2, 0.0)));
    points
}
