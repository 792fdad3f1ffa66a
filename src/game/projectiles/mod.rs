// Projectiles
//
// Thrown stones and the movement settings that make them drop after impact.

pub mod movement;
pub mod stone;

pub use movement::ProjectileMovement;
pub use stone::{
    HitPolicy, OverlapTarget, PickupPolicy, Stone, StoneBody, StoneHit, StoneId, StoneManager,
    StoneState,
};
