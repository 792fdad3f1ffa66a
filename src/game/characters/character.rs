// Character entity and management

use std::sync::Arc;

use glam::Vec2;
use log::debug;

use crate::core::math::{aim_angle_degrees, safe_normalize};
use crate::engine::physics::{ColliderHandle, RigidBodyHandle};

use super::animation::{CharacterAnimator, ClipLibrary};
use super::movement_block::{MovementBlockReason, MovementBlocks};
use super::state::{ActionRequest, AnimationState, AnimationStateMachine, SelectionContext};
use super::stats::CharacterStats;

/// Unique identifier for a character
pub type CharacterId = u32;

/// What physics reported about the character body this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Airborne (not standing on anything)
    pub falling: bool,
}

/// Side effects the character asks the world to perform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacterCommand {
    /// Zero horizontal velocity immediately
    StopMovement,
    /// Launch upwards
    Jump,
    /// Jump button released; cut the rise short
    StopJumping,
    /// Release a stone from `origin` travelling along `direction`
    SpawnStone { origin: Vec2, direction: Vec2 },
}

/// Physics handles backing a character, once it exists in a world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// The playable stone-throwing character
#[derive(Debug)]
pub struct Character {
    /// Unique identifier
    pub id: CharacterId,
    /// Character name (for display)
    pub name: String,
    /// Player index controlling this character, if any
    pub player_index: Option<usize>,
    /// Physics body, absent until spawned into a world
    pub body: Option<CharacterBody>,
    pub stats: CharacterStats,

    ammo: u32,
    aiming: bool,
    aim_direction: Vec2,
    throwing: bool,
    throw_remaining: f32,
    blocks: MovementBlocks,
    /// Direction character is facing (1 = right, -1 = left)
    facing: f32,
    move_input: f32,
    animator: CharacterAnimator,
    commands: Vec<CharacterCommand>,
}

impl Character {
    pub fn new(
        id: CharacterId,
        name: &str,
        stats: CharacterStats,
        clips: Arc<ClipLibrary>,
        seed: u64,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            player_index: None,
            body: None,
            ammo: stats.starting_ammo,
            stats,
            aiming: false,
            aim_direction: Vec2::X,
            throwing: false,
            throw_remaining: 0.0,
            blocks: MovementBlocks::new(),
            facing: 1.0,
            move_input: 0.0,
            animator: CharacterAnimator::new(clips, seed),
            commands: Vec::new(),
        }
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn is_aiming(&self) -> bool {
        self.aiming
    }

    pub fn is_throwing(&self) -> bool {
        self.throwing
    }

    pub fn aim_direction(&self) -> Vec2 {
        self.aim_direction
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.facing, 0.0)
    }

    pub fn move_input(&self) -> f32 {
        self.move_input
    }

    pub fn movement_blocks(&self) -> &MovementBlocks {
        &self.blocks
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animator.state()
    }

    pub fn animator(&self) -> &CharacterAnimator {
        &self.animator
    }

    /// Lateral movement is allowed when no movement block is active
    pub fn can_move(&self) -> bool {
        self.blocks.can_move()
    }

    /// Take the side effects queued since the last drain
    pub fn drain_commands(&mut self) -> Vec<CharacterCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Lateral input axis (-1 to 1); ignored while movement is blocked
    pub fn move_right(&mut self, value: f32) {
        self.move_input = if self.can_move() {
            value.clamp(-1.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn jump(&mut self, motion: &Motion) -> bool {
        if !self.can_move() || motion.falling {
            return false;
        }
        self.commands.push(CharacterCommand::Jump);
        self.request(ActionRequest::Jump, motion);
        true
    }

    pub fn stop_jumping(&mut self) {
        self.commands.push(CharacterCommand::StopJumping);
    }

    pub fn can_aim(&self, motion: &Motion) -> bool {
        !motion.falling && self.ammo > 0 && !self.throwing
    }

    /// Start aiming (throw button pressed)
    pub fn aim(&mut self, motion: &Motion) -> bool {
        if !self.can_aim(motion) {
            return false;
        }
        self.aiming = true;
        true
    }

    pub fn stop_aim(&mut self) {
        self.aiming = false;
    }

    pub fn can_throw(&self, motion: &Motion) -> bool {
        !motion.falling && self.ammo > 0 && !self.throwing && self.aiming
    }

    /// Begin the throw wind-up (throw button released)
    ///
    /// The stone leaves the hand once the wind-up countdown elapses in `tick`.
    pub fn throw(&mut self, motion: &Motion) -> bool {
        if !self.can_throw(motion) {
            return false;
        }
        self.commands.push(CharacterCommand::StopMovement);
        self.throwing = true;
        self.stop_aim();
        self.blocks
            .add_timed(MovementBlockReason::Throw, self.stats.throw_duration);
        self.throw_remaining = self.stats.throw_duration;
        self.request(ActionRequest::Throw, motion);
        true
    }

    fn commit_throw(&mut self, motion: &Motion) {
        self.throwing = false;
        self.ammo = self.ammo.saturating_sub(1);

        let direction = if self.aim_direction == Vec2::ZERO {
            self.forward()
        } else {
            self.aim_direction
        };
        let offset = self.stats.stone_spawn_offset;
        let origin = motion.position + Vec2::new(offset.x * self.facing, offset.y);
        self.commands
            .push(CharacterCommand::SpawnStone { origin, direction });

        debug!(
            "Character {} released a stone towards {:?} ({} left)",
            self.id, direction, self.ammo
        );
    }

    pub fn can_pick(&self, motion: &Motion) -> bool {
        !motion.falling
    }

    /// Collect a stone the character is standing over
    ///
    /// `stone_available` tells whether the world found a pickable stone;
    /// the caller removes that stone when this returns true.
    pub fn pick(&mut self, motion: &Motion, stone_available: bool) -> bool {
        if !self.can_pick(motion) || !stone_available {
            return false;
        }
        self.ammo += 1;
        self.commands.push(CharacterCommand::StopMovement);
        self.blocks
            .add_timed(MovementBlockReason::Pick, self.stats.pick_duration);
        self.request(ActionRequest::Pick, motion);
        debug!("Character {} picked up a stone ({} carried)", self.id, self.ammo);
        true
    }

    /// A stone struck this character
    pub fn on_hit(&mut self, motion: &Motion) {
        self.request(ActionRequest::Hit, motion);
    }

    /// Per-frame update: timers, aim tracking, facing and passive animation
    pub fn tick(&mut self, dt: f32, motion: &Motion, cursor: Option<Vec2>) {
        self.blocks.tick(dt);

        if self.aiming && !self.can_aim(motion) {
            self.stop_aim();
        }

        if self.throwing {
            self.throw_remaining -= dt;
            if self.throw_remaining <= 0.0 {
                self.commit_throw(motion);
            }
        }

        if self.aiming {
            if let Some(cursor) = cursor {
                self.aim_direction = safe_normalize(cursor - motion.position);
                self.facing = if self.aim_direction.x >= 0.0 { 1.0 } else { -1.0 };
            }
        } else if motion.velocity.x < 0.0 {
            self.facing = -1.0;
        } else if motion.velocity.x > 0.0 {
            self.facing = 1.0;
        }
        self.animator.set_flip_horizontal(self.facing < 0.0);

        // The launch only shows up in the next physics sample
        if self.commands.contains(&CharacterCommand::Jump) {
            return;
        }
        let request =
            AnimationStateMachine::passive_request(self.aiming, motion.velocity, motion.falling);
        self.request(request, motion);
    }

    /// Advance animation playback (called every frame after physics)
    pub fn update_animation(&mut self, dt: f32, motion: &Motion) {
        let ctx = self.selection_context(motion);
        self.animator.update(dt, &ctx);
    }

    /// The playing clip reached its end
    pub fn on_clip_finished(&mut self, motion: &Motion) {
        let ctx = self.selection_context(motion);
        self.animator.on_clip_finished(&ctx);
    }

    fn selection_context(&self, motion: &Motion) -> SelectionContext {
        SelectionContext {
            ammo: self.ammo,
            velocity: motion.velocity,
            aim_angle: aim_angle_degrees(self.forward(), self.aim_direction),
            aim_x: self.aim_direction.x,
        }
    }

    fn request(&mut self, request: ActionRequest, motion: &Motion) {
        let ctx = self.selection_context(motion);
        self.animator.request(request, &ctx);
    }
}

/// Manages all characters in the game
#[derive(Debug, Default)]
pub struct CharacterManager {
    characters: Vec<Character>,
    next_id: CharacterId,
}

impl CharacterManager {
    pub fn new() -> Self {
        Self {
            characters: Vec::new(),
            next_id: 0,
        }
    }

    /// Reserve the id the next inserted character will use
    pub fn next_id(&mut self) -> CharacterId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, character: Character) {
        self.characters.push(character);
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    /// Get a character by player index
    pub fn get_by_player(&self, player_index: usize) -> Option<&Character> {
        self.characters
            .iter()
            .find(|c| c.player_index == Some(player_index))
    }

    pub fn all(&self) -> &[Character] {
        &self.characters
    }

    pub fn all_mut(&mut self) -> &mut [Character] {
        &mut self.characters
    }

    pub fn remove(&mut self, id: CharacterId) -> Option<Character> {
        let pos = self.characters.iter().position(|c| c.id == id)?;
        Some(self.characters.remove(pos))
    }

    pub fn count(&self) -> usize {
        self.characters.len()
    }
}
