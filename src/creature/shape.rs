//! Vector shapes emitted by creatures, independent of any drawing backend.

use crate::ik::Chain;
use glam::DVec2;
use std::f64::consts::TAU;

pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

pub fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl Style {
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn outlined(fill: Color, stroke: Color, width: f64) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(Stroke {
                color: stroke,
                width,
            }),
        }
    }

    pub fn stroked(color: Color, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(Stroke { color, width }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Path {
    /// Catmull-Rom spline through the points. The first and last points only
    /// steer the curve ends and are not reached, as with p5's `curveVertex`.
    Curve(Vec<DVec2>),
    /// Cubic Bézier segments; each entry holds two control points and an end point.
    Bezier {
        start: DVec2,
        segments: Vec<[DVec2; 3]>,
    },
    Ellipse {
        center: DVec2,
        radii: DVec2,
        rotation: f64,
    },
    Polyline(Vec<DVec2>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub path: Path,
    pub style: Style,
    pub closed: bool,
}

impl Shape {
    pub fn curve_loop(points: Vec<DVec2>, style: Style) -> Self {
        Self {
            path: Path::Curve(points),
            style,
            closed: true,
        }
    }

    pub fn ellipse(center: DVec2, width: f64, height: f64, rotation: f64, style: Style) -> Self {
        Self {
            path: Path::Ellipse {
                center,
                radii: DVec2::new(width / 2.0, height / 2.0),
                rotation,
            },
            style,
            closed: true,
        }
    }

    pub fn circle(center: DVec2, diameter: f64, style: Style) -> Self {
        Self::ellipse(center, diameter, diameter, 0.0, style)
    }

    pub fn bezier(start: DVec2, segments: Vec<[DVec2; 3]>, closed: bool, style: Style) -> Self {
        Self {
            path: Path::Bezier { start, segments },
            style,
            closed,
        }
    }

    pub fn polyline(points: Vec<DVec2>, style: Style) -> Self {
        Self {
            path: Path::Polyline(points),
            style,
            closed: false,
        }
    }

    /// Flattens the path into a polyline with `samples` points per curve segment.
    ///
    /// Closed shapes never repeat their first point at the end.
    pub fn flatten(&self, samples: usize) -> Vec<DVec2> {
        let samples = samples.max(1);
        let mut points = match &self.path {
            Path::Curve(control) => catmull_rom(control, samples),
            Path::Bezier { start, segments } => bezier(*start, segments, samples),
            Path::Ellipse {
                center,
                radii,
                rotation,
            } => ellipse(*center, *radii, *rotation, samples * 8),
            Path::Polyline(points) => points.clone(),
        };

        if self.closed && points.len() > 1 {
            let first = points[0];
            if points
                .last()
                .is_some_and(|last| last.abs_diff_eq(first, 1e-9))
            {
                points.pop();
            }
        }
        points
    }
}

fn catmull_rom(control: &[DVec2], samples: usize) -> Vec<DVec2> {
    if control.len() < 4 {
        return control.to_vec();
    }

    let mut points = Vec::with_capacity((control.len() - 3) * samples + 1);
    for w in control.windows(4) {
        let (p0, p1, p2, p3) = (w[0], w[1], w[2], w[3]);
        for s in 0..samples {
            let t = s as f64 / samples as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            points.push(
                0.5 * (2.0 * p1
                    + (p2 - p0) * t
                    + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
                    + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3),
            );
        }
    }
    points.push(control[control.len() - 2]);
    points
}

fn bezier(start: DVec2, segments: &[[DVec2; 3]], samples: usize) -> Vec<DVec2> {
    let mut points = Vec::with_capacity(segments.len() * samples + 1);
    let mut from = start;
    for &[c1, c2, to] in segments {
        for s in 0..samples {
            let t = s as f64 / samples as f64;
            let u = 1.0 - t;
            points.push(
                from * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + to * (t * t * t),
            );
        }
        from = to;
    }
    points.push(from);
    points
}

fn ellipse(center: DVec2, radii: DVec2, rotation: f64, samples: usize) -> Vec<DVec2> {
    let axis = DVec2::from_angle(rotation);
    (0..samples)
        .map(|s| {
            let t = TAU * s as f64 / samples as f64;
            center + axis.rotate(DVec2::new(radii.x * t.cos(), radii.y * t.sin()))
        })
        .collect()
}

/// Links drawn as a white line with a disc at every joint.
pub fn skeleton(chain: &Chain) -> Vec<Shape> {
    let mut shapes = vec![Shape::polyline(
        chain.positions().collect(),
        Style::stroked(WHITE, 8.0),
    )];
    shapes.extend(
        chain
            .positions()
            .map(|p| Shape::circle(p, 32.0, Style::outlined(rgb(42, 44, 53), WHITE, 8.0))),
    );
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn catmull_rom_passes_through_inner_points() {
        let control = vec![
            DVec2::new(-1.0, 0.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(3.0, 0.0),
        ];
        let points = Shape::curve_loop(control.clone(), Style::filled(WHITE)).flatten(4);
        assert_eq!(points.len(), 2 * 4 + 1);
        assert!(points[0].abs_diff_eq(control[1], 1e-12));
        assert!(points[4].abs_diff_eq(control[2], 1e-12));
        assert!(points[8].abs_diff_eq(control[3], 1e-12));
    }

    #[test]
    fn closed_curve_drops_repeated_end() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(10.0, 0.0);
        let c = DVec2::new(10.0, 10.0);
        let d = DVec2::new(0.0, 10.0);
        let loop_points = vec![d, a, b, c, d, a, b];
        let points = Shape::curve_loop(loop_points, Style::filled(WHITE)).flatten(3);
        assert!(points[0].abs_diff_eq(a, 1e-12));
        assert!(!points.last().unwrap().abs_diff_eq(a, 1e-9));
        assert_eq!(points.len(), 4 * 3);
    }

    #[test]
    fn bezier_hits_endpoints() {
        let start = DVec2::new(0.0, 0.0);
        let end = DVec2::new(9.0, 3.0);
        let shape = Shape::bezier(
            start,
            vec![[DVec2::new(3.0, 5.0), DVec2::new(6.0, 5.0), end]],
            false,
            Style::stroked(WHITE, 1.0),
        );
        let points = shape.flatten(10);
        assert_eq!(points.len(), 11);
        assert_eq!(points[0], start);
        assert_eq!(points[10], end);
    }

    #[test]
    fn ellipse_respects_radii_and_rotation() {
        let shape = Shape::ellipse(
            DVec2::new(5.0, 5.0),
            160.0,
            64.0,
            std::f64::consts::FRAC_PI_2,
            Style::filled(WHITE),
        );
        let points = shape.flatten(4);
        assert_eq!(points.len(), 32);
        // the long axis is turned to point along +y
        assert_abs_diff_eq!(points[0].x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(points[0].y, 85.0, epsilon = 1e-9);
        for p in &points {
            let local =
                DVec2::from_angle(-std::f64::consts::FRAC_PI_2).rotate(*p - DVec2::new(5.0, 5.0));
            let r = (local.x / 80.0).powi(2) + (local.y / 32.0).powi(2);
            assert_abs_diff_eq!(r, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn skeleton_marks_every_joint() {
        let chain = Chain::new(DVec2::ZERO, 4, 10.0).unwrap();
        let shapes = skeleton(&chain);
        assert_eq!(shapes.len(), 1 + 4);
        assert_eq!(shapes[0].flatten(1).len(), 4);
    }

    #[test]
    fn rgb_scales_to_unit_range() {
        assert_eq!(rgb(255, 0, 51), [1.0, 0.0, 0.2, 1.0]);
    }
}
