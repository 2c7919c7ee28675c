use super::gait::{FootPlant, GaitConfig};
use super::shape::{rgb, Shape, Style, WHITE};
use super::{body_outline, step_toward, Creature, CreatureKind};
use crate::ik::{AngleConstraint, Chain, ChainError};
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, PI};

const JOINTS: usize = 14;
const LINK_SIZE: f64 = 64.0;
const CRAWL_STEP: f64 = 12.0;

const BODY_WIDTH: [f64; JOINTS] = [
    52.0, 58.0, 40.0, 60.0, 68.0, 71.0, 65.0, 50.0, 28.0, 15.0, 11.0, 9.0, 7.0, 7.0,
];

/// Spine joints the front and rear legs hang from.
const SHOULDER_JOINT: usize = 3;
const HIP_JOINT: usize = 7;

/// Rear elbows are pushed sideways by this much so the knees bend backward.
const KNEE_OFFSET: f64 = 30.0;

struct Limb {
    chain: Chain,
    plant: FootPlant,
    body_joint: usize,
    /// Reach angle off the spine for the planted foot.
    splay: f64,
    /// +1 for the right side, -1 for the left.
    side: f64,
}

impl Limb {
    fn new(origin: DVec2, index: usize) -> Result<Self, ChainError> {
        let front = index < 2;
        let link_size = if front { 52.0 } else { 36.0 };
        Ok(Self {
            chain: Chain::new(origin, 3, link_size)?,
            plant: FootPlant::new(),
            body_joint: if front { SHOULDER_JOINT } else { HIP_JOINT },
            splay: if front { FRAC_PI_4 } else { FRAC_PI_3 },
            side: if index % 2 == 0 { 1.0 } else { -1.0 },
        })
    }

    fn foot(&self) -> DVec2 {
        self.chain.joints()[0].position
    }

    fn elbow(&self) -> DVec2 {
        self.chain.joints()[1].position
    }

    fn shoulder(&self) -> DVec2 {
        self.chain.joints()[2].position
    }
}

pub struct Lizard {
    spine: Chain,
    limbs: Vec<Limb>,
    gait: GaitConfig,
}

impl Lizard {
    pub fn new(origin: DVec2) -> Result<Self, ChainError> {
        Self::with_gait(origin, GaitConfig::default())
    }

    pub fn with_gait(origin: DVec2, gait: GaitConfig) -> Result<Self, ChainError> {
        let spine = Chain::builder(origin, JOINTS, LINK_SIZE)
            .angle_constraint(AngleConstraint::from_radians(PI / 8.0))
            .build()?;
        let limbs = (0..4)
            .map(|i| Limb::new(origin, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { spine, limbs, gait })
    }

    pub fn gait(&self) -> &GaitConfig {
        &self.gait
    }

    /// Cached foot spots, front right, front left, rear right, rear left.
    pub fn planted_feet(&self) -> Vec<Option<DVec2>> {
        self.limbs.iter().map(|l| l.plant.desired()).collect()
    }

    fn pos(&self, i: usize, angle_offset: f64, length_offset: f64) -> DVec2 {
        self.spine.joints()[i].offset(angle_offset, BODY_WIDTH[i] + length_offset)
    }

    fn leg(&self, index: usize, limb: &Limb) -> [Shape; 2] {
        let shoulder = limb.shoulder();
        let foot = limb.foot();
        let mut elbow = limb.elbow();

        if let Some(along) = (foot - shoulder).try_normalize() {
            let perp = along.perp() * KNEE_OFFSET;
            match index {
                2 => elbow -= perp,
                3 => elbow += perp,
                _ => {}
            }
        }

        let segments = vec![[elbow, elbow, foot]];
        [
            Shape::bezier(shoulder, segments.clone(), false, Style::stroked(WHITE, 40.0)),
            Shape::bezier(shoulder, segments, false, Style::stroked(rgb(82, 121, 111), 32.0)),
        ]
    }
}

impl Creature for Lizard {
    fn kind(&self) -> CreatureKind {
        CreatureKind::Lizard
    }

    fn spine(&self) -> &Chain {
        &self.spine
    }

    fn limbs(&self) -> Vec<&Chain> {
        self.limbs.iter().map(|l| &l.chain).collect()
    }

    fn resolve(&mut self, pointer: DVec2) {
        let target = step_toward(self.spine.head(), pointer, CRAWL_STEP);
        self.spine.resolve(target);

        for i in 0..self.limbs.len() {
            let (body_joint, splay, side) = {
                let limb = &self.limbs[i];
                (limb.body_joint, limb.splay, limb.side)
            };
            let candidate = self.pos(body_joint, splay * side, 80.0);
            let anchor = self.pos(body_joint, FRAC_PI_2 * side, -20.0);

            let gait = self.gait;
            let limb = &mut self.limbs[i];
            limb.plant.update(candidate, &gait);
            let reach = limb.plant.target(limb.foot(), &gait);
            limb.chain.fabrik_resolve(reach, anchor);
        }
    }

    fn shapes(&self) -> Vec<Shape> {
        let mut shapes: Vec<Shape> = self
            .limbs
            .iter()
            .enumerate()
            .flat_map(|(i, limb)| self.leg(i, limb))
            .collect();

        let outline = body_outline(JOINTS, false, [-9.0, -5.0, -9.0], |i, a, l| {
            self.pos(i, a, l)
        });
        shapes.push(Shape::curve_loop(
            outline,
            Style::outlined(rgb(82, 121, 111), WHITE, 4.0),
        ));

        let eye = Style::filled(WHITE);
        shapes.push(Shape::circle(self.pos(0, 3.0 * PI / 5.0, -7.0), 24.0, eye));
        shapes.push(Shape::circle(self.pos(0, -3.0 * PI / 5.0, -7.0), 24.0, eye));
        shapes
    }
}
