// Camera mapping between window pixels and world space

use glam::Vec2;

/// Default pixels per world unit
pub const DEFAULT_PIXELS_PER_UNIT: f32 = 40.0;

/// 2D camera looking at the play field
///
/// World space is y-up with one unit per meter; window space is y-down in
/// pixels with the origin at the top-left corner.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera center in world space
    pub position: Vec2,
    /// Pixels per world unit
    pixels_per_unit: f32,
    viewport: Vec2,
}

impl Camera {
    pub fn new(position: Vec2, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position,
            pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
            viewport: Vec2::new(viewport_width, viewport_height),
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Keep the view centered on `target`, held at `boom` from it
    pub fn follow(&mut self, target: Vec2, boom: Vec2) {
        self.set_position(target + boom);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Convert window pixel coordinates to world coordinates
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        let from_center = screen_pos - self.viewport * 0.5;
        self.position + Vec2::new(from_center.x, -from_center.y) / self.pixels_per_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new(Vec2::new(0.0, 5.0), 800.0, 600.0)
    }

    #[test]
    fn test_center_maps_to_position() {
        let cam = camera();
        let world = cam.screen_to_world(Vec2::new(400.0, 300.0));
        assert_relative_eq!(world.x, 0.0);
        assert_relative_eq!(world.y, 5.0);
    }

    #[test]
    fn test_screen_y_points_down() {
        let cam = camera();
        let above = cam.screen_to_world(Vec2::new(400.0, 260.0));
        assert_relative_eq!(above.y, 6.0);
        let right = cam.screen_to_world(Vec2::new(440.0, 300.0));
        assert_relative_eq!(right.x, 1.0);
    }

    #[test]
    fn test_deprojection_follows_camera() {
        let mut cam = camera();
        let cursor = Vec2::new(440.0, 260.0);
        let before = cam.screen_to_world(cursor);

        cam.follow(Vec2::new(10.0, 1.5), Vec2::new(0.0, 2.0));
        assert_eq!(cam.position, Vec2::new(10.0, 3.5));

        let after = cam.screen_to_world(cursor);
        assert_relative_eq!(after.x, before.x + 10.0);
        assert_relative_eq!(after.y, before.y - 1.5);
        assert_relative_eq!(after.x, 11.0);
        assert_relative_eq!(after.y, 4.5);
    }

    #[test]
    fn test_resize_keeps_center() {
        let mut cam = camera();
        cam.resize(1280.0, 720.0);
        let world = cam.screen_to_world(Vec2::new(640.0, 360.0));
        assert_relative_eq!(world.y, 5.0);
    }
}
