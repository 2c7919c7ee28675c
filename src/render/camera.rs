use glam::{DVec2, Mat4, Vec2};

/// Orthographic 2D camera over a y-down world measured in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World point shown at the middle of the viewport.
    pub center: Vec2,
    pub zoom: f32,
    /// Viewport size in physical pixels.
    pub viewport: Vec2,
    pub scale_factor: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: Vec2::new(640.0, 360.0),
            zoom: 1.0,
            viewport: Vec2::new(1280.0, 720.0),
            scale_factor: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    pub fn new(width: u32, height: u32, scale_factor: f32) -> Self {
        let mut camera = Self {
            scale_factor,
            ..Self::default()
        };
        camera.fit(width, height);
        camera
    }

    fn pixels_per_unit(&self) -> f32 {
        self.zoom * self.scale_factor
    }

    /// Resizes the viewport and recentres so that, at zoom 1, world and
    /// logical screen coordinates coincide.
    pub fn fit(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        self.center = self.viewport / (2.0 * self.scale_factor);
    }

    /// Changes the DPI scale and recentres for the current viewport.
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
        self.fit(self.viewport.x as u32, self.viewport.y as u32);
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
    }

    pub fn view_projection(&self) -> Mat4 {
        let half = self.viewport / (2.0 * self.pixels_per_unit());
        Mat4::orthographic_rh(
            self.center.x - half.x,
            self.center.x + half.x,
            self.center.y + half.y,
            self.center.y - half.y,
            -1.0,
            1.0,
        )
    }

    /// Maps a cursor position in physical pixels to world space.
    pub fn screen_to_world(&self, x: f64, y: f64) -> DVec2 {
        let offset = (Vec2::new(x as f32, y as f32) - self.viewport / 2.0) / self.pixels_per_unit();
        (self.center + offset).as_dvec2()
    }

    pub fn center_world(&self) -> DVec2 {
        self.center.as_dvec2()
    }
}
