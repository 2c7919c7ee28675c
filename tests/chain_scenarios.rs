use approx::assert_relative_eq;
use creature_ik::creature::gait::{FootPlant, GaitConfig, StepState};
use creature_ik::ik::{AngleConstraint, Chain};
use creature_ik::math::relative_angle_diff;
use glam::DVec2;
use std::f64::consts::PI;

fn assert_rigid(chain: &Chain) {
    let positions: Vec<_> = chain.positions().collect();
    for pair in positions.windows(2) {
        assert_relative_eq!(pair[0].distance(pair[1]), chain.link_size(), max_relative = 1e-6);
    }
}

#[test]
fn short_chain_follows_pointer() {
    let mut chain = Chain::new(DVec2::new(100.0, 100.0), 5, 50.0).unwrap();
    chain.resolve(DVec2::new(150.0, 120.0));

    assert_eq!(chain.head(), DVec2::new(150.0, 120.0));
    assert_eq!(chain.joint_count(), 5);
    assert_eq!(chain.angles().count(), 5);
    assert_rigid(&chain);
}

#[test]
fn constrained_spine_never_over_bends() {
    let mut chain = Chain::builder(DVec2::new(100.0, 100.0), 10, 64.0)
        .angle_constraint(AngleConstraint::from_radians(PI / 8.0))
        .build()
        .unwrap();

    let targets = [
        DVec2::new(500.0, 300.0),
        DVec2::new(90.0, 110.0),
        DVec2::new(-300.0, 100.0),
        DVec2::new(120.0, -400.0),
    ];
    for target in targets {
        chain.resolve(target);
        assert_eq!(chain.head(), target);
        assert_rigid(&chain);

        let angles: Vec<_> = chain.angles().collect();
        for pair in angles.windows(2) {
            assert!(relative_angle_diff(pair[1], pair[0]).abs() <= PI / 8.0 + 1e-9);
        }
    }
}

#[test]
fn limb_reaches_while_shoulder_stays_put() {
    let mut limb = Chain::new(DVec2::new(0.0, 0.0), 3, 52.0).unwrap();
    let anchor = DVec2::new(10.0, -20.0);

    for target in [
        DVec2::new(60.0, 40.0),
        DVec2::new(500.0, 500.0),
        anchor,
        DVec2::new(-30.0, 80.0),
    ] {
        let result = limb.fabrik_resolve(target, anchor);
        assert_eq!(limb.tail(), anchor);
        assert_eq!(result.iterations, 1);
        assert_rigid(&limb);
    }
}

#[test]
fn foot_holds_until_threshold_is_crossed() {
    let config = GaitConfig::default();
    let planted = DVec2::new(300.0, 300.0);
    let mut foot = FootPlant::planted_at(planted);

    assert_eq!(foot.update(DVec2::new(300.0, 499.0), &config), StepState::Planted);
    assert_eq!(foot.desired(), Some(planted));

    let far = DVec2::new(300.0, 501.0);
    assert_eq!(foot.update(far, &config), StepState::Stepping);
    assert_eq!(foot.desired(), Some(far));

    // the foot eases toward the new spot instead of jumping
    let reach = foot.target(planted, &config);
    assert_relative_eq!(reach.y, 300.0 + 0.4 * 201.0, max_relative = 1e-12);
}
