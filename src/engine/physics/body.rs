use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Stone sensors reach a bit past the solid stone so pickups are forgiving
pub const STONE_SENSOR_SCALE: Real = 1.5;

/// Surface response of a collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub friction: Real,
    pub restitution: Real,
    pub density: Real,
}

impl Material {
    /// Frictionless so lateral velocity is fully under input control
    pub const CHARACTER: Self = Self {
        friction: 0.0,
        restitution: 0.0,
        density: 1.0,
    };

    pub const LEVEL: Self = Self {
        friction: 0.3,
        restitution: 0.0,
        density: 1.0,
    };

    pub const STONE: Self = Self {
        friction: 0.8,
        restitution: 0.2,
        density: 2.0,
    };
}

/// Collider with groups, material and collision events set up
fn collider(shape: SharedShape, groups: CollisionGroups, material: Material) -> ColliderBuilder {
    ColliderBuilder::new(shape)
        .collision_groups(groups.to_interaction_groups())
        .friction(material.friction)
        .restitution(material.restitution)
        .density(material.density)
        .active_events(ActiveEvents::COLLISION_EVENTS)
}

/// Body and collider configurations for everything in a session
pub mod presets {
    use super::*;

    /// Character body: dynamic, upright, never asleep
    pub fn player_body(x: Real, y: Real, gravity_scale: Real) -> RigidBody {
        RigidBodyBuilder::dynamic()
            .translation(vector![x, y])
            .locked_axes(LockedAxes::ROTATION_LOCKED)
            .gravity_scale(gravity_scale)
            .can_sleep(false)
            .build()
    }

    /// Capsule spanning `width` x `height`, centered on the body
    pub fn player_collider(width: Real, height: Real) -> Collider {
        let radius = width / 2.0;
        let half_segment = (height / 2.0 - radius).max(0.0);
        collider(
            SharedShape::capsule_y(half_segment, radius),
            CollisionGroups::Player,
            Material::CHARACTER,
        )
        .build()
    }

    pub fn platform_body(x: Real, y: Real) -> RigidBody {
        RigidBodyBuilder::fixed().translation(vector![x, y]).build()
    }

    pub fn platform_collider(width: Real, height: Real) -> Collider {
        collider(
            SharedShape::cuboid(width / 2.0, height / 2.0),
            CollisionGroups::Platform,
            Material::LEVEL,
        )
        .build()
    }

    /// Stone body launched with `velocity`; CCD keeps fast throws from tunnelling
    pub fn stone_body(x: Real, y: Real, vel_x: Real, vel_y: Real, gravity_scale: Real) -> RigidBody {
        RigidBodyBuilder::dynamic()
            .translation(vector![x, y])
            .linvel(vector![vel_x, vel_y])
            .gravity_scale(gravity_scale)
            .linear_damping(0.1)
            .ccd_enabled(true)
            .build()
    }

    /// Solid part of a stone; rests on platforms, passes through characters
    pub fn stone_collider(radius: Real) -> Collider {
        collider(
            SharedShape::ball(radius),
            CollisionGroups::Stone,
            Material::STONE,
        )
        .build()
    }

    /// Massless overlap volume used for hits and pickups
    pub fn stone_sensor(radius: Real) -> Collider {
        collider(
            SharedShape::ball(radius * STONE_SENSOR_SCALE),
            CollisionGroups::StoneSensor,
            Material::STONE,
        )
        .sensor(true)
        .density(0.0)
        .build()
    }
}
