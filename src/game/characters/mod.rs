// Character system
//
// This module contains everything related to the playable character:
// - Character data, actions and management
// - Tuning values
// - Movement blocks that suppress lateral input during actions
// - Animation state selection and clip playback

pub mod animation;
pub mod character;
pub mod movement_block;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationPlayer, CharacterAnimator, ClipLibrary};
pub use character::{
    Character, CharacterBody, CharacterCommand, CharacterId, CharacterManager, Motion,
};
pub use movement_block::{MovementBlock, MovementBlockReason, MovementBlocks};
pub use state::{ActionRequest, AimZone, AnimationState, AnimationStateMachine};
pub use stats::CharacterStats;
