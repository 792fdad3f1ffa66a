// Character stats - tuning values for the playable character

use glam::Vec2;

/// Tuning values for the playable character
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterStats {
    // Movement
    /// Maximum horizontal movement speed (units/second)
    pub move_speed: f32,
    /// Upward velocity applied when jumping
    pub jump_velocity: f32,
    /// Fraction of upward velocity kept when jump is released early
    pub jump_cut: f32,
    /// Air control multiplier (0.0 = no air control, 1.0 = full control)
    pub air_control: f32,
    /// Gravity multiplier
    pub gravity_scale: f32,

    // Stones
    /// Stones carried when the character spawns
    pub starting_ammo: u32,
    /// Wind-up between releasing throw and the stone leaving the hand
    pub throw_duration: f32,
    /// How long picking up a stone locks movement
    pub pick_duration: f32,
    /// Where thrown stones appear, relative to the character centre
    pub stone_spawn_offset: Vec2,

    // Dimensions (for physics collider)
    /// Character width in world units
    pub width: f32,
    /// Character height in world units
    pub height: f32,
}

pub const BASE_STATS: CharacterStats = CharacterStats {
    move_speed: 6.0,
    jump_velocity: 12.0,
    jump_cut: 0.5,
    air_control: 0.8,
    gravity_scale: 2.0,

    starting_ammo: 5,
    throw_duration: 0.5,
    pick_duration: 0.6,
    stone_spawn_offset: Vec2::new(0.0, 0.5),

    width: 1.0,
    height: 2.0,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = CharacterStats::default();
        assert_eq!(stats.starting_ammo, 5);
        assert_eq!(stats.throw_duration, 0.5);
        assert_eq!(stats.pick_duration, 0.6);
    }

    #[test]
    fn test_capsule_fits_width() {
        let stats = CharacterStats::default();
        assert!(stats.height >= stats.width);
    }
}
