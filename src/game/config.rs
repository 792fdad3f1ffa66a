// Game configuration and validation

use super::characters::{AnimationState, CharacterStats, ClipLibrary};
use super::projectiles::{HitPolicy, PickupPolicy, ProjectileMovement};

/// Configuration errors, reported once when a session is created
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Throw duration must be positive, got {0}")]
    InvalidThrowDuration(f32),

    #[error("Pick duration must be positive, got {0}")]
    InvalidPickDuration(f32),

    #[error("Move speed must not be negative, got {0}")]
    InvalidMoveSpeed(f32),

    #[error("Stone launch speed must be positive, got {0}")]
    InvalidLaunchSpeed(f32),

    #[error("Stone radius must be positive, got {0}")]
    InvalidStoneRadius(f32),

    #[error("Clip {name} for {state:?} has no frames")]
    EmptyClip { state: AnimationState, name: String },

    #[error("Clip {name} has invalid frame duration {duration}")]
    InvalidFrameDuration { name: String, duration: f32 },
}

/// Stone tuning plus the policies that decide hits and pickups
#[derive(Debug, Clone, PartialEq)]
pub struct StoneConfig {
    pub launch_speed: f32,
    /// Gravity scale while in flight, before the first impact
    pub flight_gravity_scale: f32,
    pub radius: f32,
    pub pickup_policy: PickupPolicy,
    pub hit_policy: HitPolicy,
}

impl Default for StoneConfig {
    fn default() -> Self {
        Self {
            launch_speed: 15.0,
            flight_gravity_scale: 0.2,
            radius: 0.2,
            pickup_policy: PickupPolicy::default(),
            hit_policy: HitPolicy::default(),
        }
    }
}

impl StoneConfig {
    pub fn movement(&self) -> ProjectileMovement {
        ProjectileMovement::new(self.launch_speed, self.flight_gravity_scale)
    }
}

/// World-level settings
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    /// Gravity along y (negative is down)
    pub gravity: f32,
    /// Stones that fall below this height are removed
    pub kill_height: f32,
    /// Seed for animation clip selection
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            kill_height: -50.0,
            seed: 0x5709e,
        }
    }
}

/// Everything a `GameSession` is configured with
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    pub character: CharacterStats,
    pub stone: StoneConfig,
    pub world: WorldConfig,
    pub clips: ClipLibrary,
}

impl GameConfig {
    /// Default tuning with the standard clip set
    pub fn standard() -> Self {
        Self {
            clips: ClipLibrary::standard(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let character = &self.character;
        if !(character.throw_duration > 0.0) {
            return Err(ConfigError::InvalidThrowDuration(character.throw_duration));
        }
        if !(character.pick_duration > 0.0) {
            return Err(ConfigError::InvalidPickDuration(character.pick_duration));
        }
        if !(character.move_speed >= 0.0) {
            return Err(ConfigError::InvalidMoveSpeed(character.move_speed));
        }
        if !(self.stone.launch_speed > 0.0) {
            return Err(ConfigError::InvalidLaunchSpeed(self.stone.launch_speed));
        }
        if !(self.stone.radius > 0.0) {
            return Err(ConfigError::InvalidStoneRadius(self.stone.radius));
        }
        self.clips.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_config_is_valid() {
        assert!(GameConfig::standard().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_throw_duration() {
        let mut config = GameConfig::standard();
        config.character.throw_duration = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThrowDuration(_))
        ));
    }

    #[test]
    fn test_rejects_nan_launch_speed() {
        let mut config = GameConfig::standard();
        config.stone.launch_speed = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLaunchSpeed(_))
        ));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidPickDuration(-1.0);
        assert_eq!(err.to_string(), "Pick duration must be positive, got -1");
    }

    #[test]
    fn test_default_policies() {
        let stone = StoneConfig::default();
        assert_eq!(stone.pickup_policy, PickupPolicy::Always);
        assert!(stone.hit_policy.instigator_immune);
    }
}
