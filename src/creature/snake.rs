use super::shape::{rgb, Shape, Style, WHITE};
use super::{body_outline, step_toward, Creature, CreatureKind};
use crate::ik::{AngleConstraint, Chain, ChainError};
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, PI};

const JOINTS: usize = 48;
const LINK_SIZE: f64 = 64.0;
const SLITHER_STEP: f64 = 8.0;

pub struct Snake {
    spine: Chain,
}

fn body_width(i: usize) -> f64 {
    match i {
        0 => 76.0,
        1 => 80.0,
        _ => 64.0 - i as f64,
    }
}

impl Snake {
    pub fn new(origin: DVec2) -> Result<Self, ChainError> {
        let spine = Chain::builder(origin, JOINTS, LINK_SIZE)
            .angle_constraint(AngleConstraint::from_radians(PI / 8.0))
            .build()?;
        Ok(Self { spine })
    }

    fn pos(&self, i: usize, angle_offset: f64, length_offset: f64) -> DVec2 {
        self.spine.joints()[i].offset(angle_offset, body_width(i) + length_offset)
    }
}

impl Creature for Snake {
    fn kind(&self) -> CreatureKind {
        CreatureKind::Snake
    }

    fn spine(&self) -> &Chain {
        &self.spine
    }

    fn resolve(&mut self, pointer: DVec2) {
        let target = step_toward(self.spine.head(), pointer, SLITHER_STEP);
        self.spine.resolve(target);
    }

    fn shapes(&self) -> Vec<Shape> {
        let outline = body_outline(JOINTS, true, [0.0; 3], |i, a, l| self.pos(i, a, l));
        let eye = Style::filled(WHITE);
        vec![
            Shape::curve_loop(outline, Style::outlined(rgb(172, 57, 49), WHITE, 4.0)),
            Shape::circle(self.pos(0, FRAC_PI_2, -18.0), 24.0, eye),
            Shape::circle(self.pos(0, -FRAC_PI_2, -18.0), 24.0, eye),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_tapers_after_the_head() {
        assert_eq!(body_width(0), 76.0);
        assert_eq!(body_width(1), 80.0);
        assert_eq!(body_width(2), 62.0);
        assert_eq!(body_width(47), 17.0);
    }

    #[test]
    fn spine_keeps_its_bend_limit() {
        let mut snake = Snake::new(DVec2::new(600.0, 400.0)).unwrap();
        for step in 0..300 {
            let t = step as f64 * 0.1;
            snake.resolve(DVec2::new(600.0 + 300.0 * t.cos(), 400.0 + 150.0 * (2.0 * t).sin()));
        }
        let angles: Vec<_> = snake.spine().angles().collect();
        for pair in angles.windows(2) {
            let bend = crate::math::relative_angle_diff(pair[1], pair[0]);
            assert!(bend.abs() <= PI / 8.0 + 1e-9);
        }
    }

    #[test]
    fn outline_covers_whole_body() {
        let snake = Snake::new(DVec2::ZERO).unwrap();
        let shapes = snake.shapes();
        assert_eq!(shapes.len(), 3);
        match &shapes[0].path {
            crate::creature::Path::Curve(points) => assert_eq!(points.len(), 2 * JOINTS + 7),
            other => panic!("unexpected outline {other:?}"),
        }
    }
}
