use glam::DVec2;

/// One joint of a chain: where it is, and which way its incoming link points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub position: DVec2,
    /// Heading of the link arriving at this joint, in `[0, 2π)`.
    /// Only kept up to date by follow (FK) resolution.
    pub angle: f64,
}

impl Joint {
    pub fn new(position: DVec2) -> Self {
        Self {
            position,
            angle: 0.0,
        }
    }

    /// Point offset from this joint along `angle + angle_offset`.
    ///
    /// Creature outlines are built from these: a width table gives `distance`
    /// per joint, and the offset picks the side of the body.
    pub fn offset(&self, angle_offset: f64, distance: f64) -> DVec2 {
        self.position + DVec2::from_angle(self.angle + angle_offset) * distance
    }
}
