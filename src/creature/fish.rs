use super::shape::{rgb, Shape, Style, WHITE};
use super::{body_outline, step_toward, Creature, CreatureKind};
use crate::ik::{AngleConstraint, Chain, ChainError};
use crate::math::angle::{self, relative_angle_diff};
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, PI};

const JOINTS: usize = 12;
const LINK_SIZE: f64 = 64.0;
const SWIM_STEP: f64 = 16.0;

// The last two joints carry the caudal fin only.
const BODY_WIDTH: [f64; 10] = [68.0, 81.0, 84.0, 83.0, 77.0, 64.0, 51.0, 38.0, 32.0, 19.0];

pub struct Fish {
    spine: Chain,
}

impl Fish {
    pub fn new(origin: DVec2) -> Result<Self, ChainError> {
        let spine = Chain::builder(origin, JOINTS, LINK_SIZE)
            .angle_constraint(AngleConstraint::from_radians(PI / 8.0))
            .build()?;
        Ok(Self { spine })
    }

    fn angle(&self, i: usize) -> f64 {
        self.spine.joints()[i].angle
    }

    fn pos(&self, i: usize, angle_offset: f64, length_offset: f64) -> DVec2 {
        self.spine.joints()[i].offset(angle_offset, BODY_WIDTH[i] + length_offset)
    }

    fn side(&self, i: usize, angle_offset: f64, distance: f64) -> DVec2 {
        self.spine.joints()[i].offset(angle_offset, distance)
    }

    /// How far the middle and the tail have turned away from the head.
    ///
    /// A 12-joint spine at π/8 per joint can curl past π end to end, which
    /// would flip the sign of a single head-to-tail difference, so the tail
    /// bend is summed in two halves.
    fn bends(&self) -> (f64, f64, f64) {
        let head = self.angle(0);
        let head_to_mid1 = relative_angle_diff(self.angle(6), head);
        let head_to_mid2 = relative_angle_diff(self.angle(7), head);
        let head_to_tail = head_to_mid1 + relative_angle_diff(self.angle(11), self.angle(6));
        (head_to_mid1, head_to_mid2, head_to_tail)
    }

    fn caudal_fin(&self, head_to_tail: f64, style: Style) -> Shape {
        let mut points = Vec::with_capacity(8);
        for i in 8..JOINTS {
            let spread = (i - 8) as f64;
            let width = 1.5 * head_to_tail * spread * spread;
            points.push(self.side(i, -FRAC_PI_2, width));
        }
        let width = (head_to_tail * 6.0).clamp(-13.0, 13.0);
        for i in (8..JOINTS).rev() {
            points.push(self.side(i, FRAC_PI_2, width));
        }
        Shape::curve_loop(points, style)
    }

    fn dorsal_fin(&self, head_to_mid1: f64, head_to_mid2: f64, style: Style) -> Shape {
        let joint = |i: usize| self.spine.joints()[i].position;
        Shape::bezier(
            joint(4),
            vec![
                [joint(5), joint(6), joint(7)],
                [
                    self.side(6, FRAC_PI_2, head_to_mid2 * 16.0),
                    self.side(5, FRAC_PI_2, head_to_mid1 * 16.0),
                    joint(4),
                ],
            ],
            true,
            style,
        )
    }
}

impl Creature for Fish {
    fn kind(&self) -> CreatureKind {
        CreatureKind::Fish
    }

    fn spine(&self) -> &Chain {
        &self.spine
    }

    fn resolve(&mut self, pointer: DVec2) {
        let target = step_toward(self.spine.head(), pointer, SWIM_STEP);
        self.spine.resolve(target);
    }

    fn shapes(&self) -> Vec<Shape> {
        let body = Style::outlined(rgb(58, 124, 165), WHITE, 4.0);
        let fin = Style::outlined(rgb(129, 195, 215), WHITE, 4.0);
        let (head_to_mid1, head_to_mid2, head_to_tail) = self.bends();
        let fin_angle = |i: usize, turn: f64| angle::normalize(self.angle(i) + turn);

        let mut shapes = vec![
            // pectoral
            Shape::ellipse(self.pos(3, FRAC_PI_3, 0.0), 160.0, 64.0, fin_angle(2, -FRAC_PI_4), fin),
            Shape::ellipse(self.pos(3, -FRAC_PI_3, 0.0), 160.0, 64.0, fin_angle(2, FRAC_PI_4), fin),
            // ventral
            Shape::ellipse(self.pos(7, FRAC_PI_2, 0.0), 96.0, 32.0, fin_angle(6, -FRAC_PI_4), fin),
            Shape::ellipse(self.pos(7, -FRAC_PI_2, 0.0), 96.0, 32.0, fin_angle(6, FRAC_PI_4), fin),
            self.caudal_fin(head_to_tail, fin),
        ];

        let outline = body_outline(BODY_WIDTH.len(), true, [0.0, 4.0, 0.0], |i, a, l| {
            self.pos(i, a, l)
        });
        shapes.push(Shape::curve_loop(outline, body));
        shapes.push(self.dorsal_fin(head_to_mid1, head_to_mid2, fin));

        let eye = Style::filled(WHITE);
        shapes.push(Shape::circle(self.pos(0, FRAC_PI_2, -18.0), 24.0, eye));
        shapes.push(Shape::circle(self.pos(0, -FRAC_PI_2, -18.0), 24.0, eye));
        shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn swims_toward_pointer_in_fixed_steps() {
        let mut fish = Fish::new(DVec2::new(500.0, 400.0)).unwrap();
        fish.resolve(DVec2::new(900.0, 400.0));
        assert!(fish.spine().head().abs_diff_eq(DVec2::new(516.0, 400.0), 1e-9));

        for _ in 0..200 {
            fish.resolve(DVec2::new(100.0, 100.0));
        }
        assert!(fish.spine().head().distance(DVec2::new(100.0, 100.0)) <= SWIM_STEP);

        let positions: Vec<_> = fish.spine().positions().collect();
        for pair in positions.windows(2) {
            assert_relative_eq!(pair[0].distance(pair[1]), LINK_SIZE, max_relative = 1e-9);
        }
    }

    #[test]
    fn straight_fish_has_no_bend() {
        let mut fish = Fish::new(DVec2::new(0.0, 0.0)).unwrap();
        for _ in 0..60 {
            fish.resolve(DVec2::new(0.0, -10_000.0));
        }
        let (mid1, mid2, tail) = fish.bends();
        assert!(mid1.abs() < 1e-9 && mid2.abs() < 1e-9 && tail.abs() < 1e-9);
    }

    #[test]
    fn shapes_are_finite() {
        let mut fish = Fish::new(DVec2::new(300.0, 300.0)).unwrap();
        for step in 0..120 {
            let t = step as f64 * 0.05;
            fish.resolve(DVec2::new(300.0 + 250.0 * t.cos(), 300.0 + 250.0 * t.sin()));
        }
        let shapes = fish.shapes();
        assert_eq!(shapes.len(), 9);
        for shape in &shapes {
            assert!(shape.flatten(8).iter().all(|p| p.is_finite()));
        }
    }
}
