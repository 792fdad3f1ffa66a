// Projectile movement - launch speed and gravity handling for thrown stones

use glam::Vec2;

use crate::core::math::safe_normalize;

/// Gravity scale a projectile falls with after it hits something
pub const IMPACT_GRAVITY_SCALE: f32 = 1.0;

/// Movement settings of one projectile
///
/// Stones fly with reduced gravity until they strike something; the impact
/// restores normal gravity so the stone drops once it loses its momentum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileMovement {
    pub launch_speed: f32,
    pub gravity_scale: f32,
    pub impact_gravity_scale: f32,
}

impl ProjectileMovement {
    pub fn new(launch_speed: f32, gravity_scale: f32) -> Self {
        Self {
            launch_speed,
            gravity_scale,
            impact_gravity_scale: IMPACT_GRAVITY_SCALE,
        }
    }

    /// Initial velocity along `direction`
    pub fn launch_velocity(&self, direction: Vec2) -> Vec2 {
        safe_normalize(direction) * self.launch_speed
    }

    /// React to striking something; returns the new gravity scale
    pub fn handle_impact(&mut self) -> f32 {
        self.gravity_scale = self.impact_gravity_scale;
        self.gravity_scale
    }

    pub fn has_impacted(&self) -> bool {
        self.gravity_scale == self.impact_gravity_scale
    }
}
