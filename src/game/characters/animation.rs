// Character animation clips, clip selection and playback

use std::collections::HashMap;
use std::sync::Arc;

use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::state::{
    ActionRequest, AnimationCommand, AnimationState, AnimationStateMachine, SelectionContext,
};
use crate::game::config::ConfigError;

/// A single one-shot animation clip
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Name of the clip (e.g., "idle_a", "throw_up")
    pub name: String,
    /// Number of frames in the clip
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
}

impl AnimationClip {
    pub fn new(name: &str, frame_count: usize, fps: f32) -> Self {
        Self {
            name: name.to_string(),
            frame_count,
            frame_duration: 1.0 / fps,
        }
    }

    fn last_frame(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }
}

/// Authored clips per animation state
///
/// A state may have several clips; one is chosen uniformly whenever the
/// state is entered or a clip of that state finishes.
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    clips: HashMap<AnimationState, Vec<AnimationClip>>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self {
            clips: HashMap::new(),
        }
    }

    /// The default clip set shipped with the game
    pub fn standard() -> Self {
        use AnimationState::*;

        let mut library = Self::new();
        library
            .with_clip(Idle, AnimationClip::new("idle_a", 8, 10.0))
            .with_clip(Idle, AnimationClip::new("idle_b", 8, 8.0))
            .with_clip(Walk, AnimationClip::new("walk", 8, 12.0))
            .with_clip(CarryIdle, AnimationClip::new("carry_idle_a", 8, 10.0))
            .with_clip(CarryIdle, AnimationClip::new("carry_idle_b", 6, 8.0))
            .with_clip(CarryWalk, AnimationClip::new("carry_walk", 8, 12.0))
            .with_clip(CarryFall, AnimationClip::new("carry_fall", 4, 10.0))
            .with_clip(CarryJump, AnimationClip::new("carry_jump", 6, 12.0))
            .with_clip(AimingUp, AnimationClip::new("aim_up", 4, 10.0))
            .with_clip(AimingDown, AnimationClip::new("aim_down", 4, 10.0))
            .with_clip(AimingFront, AnimationClip::new("aim_front", 4, 10.0))
            .with_clip(WalkAimingUp, AnimationClip::new("walk_aim_up", 8, 12.0))
            .with_clip(WalkAimingDown, AnimationClip::new("walk_aim_down", 8, 12.0))
            .with_clip(WalkAimingFront, AnimationClip::new("walk_aim_front", 8, 12.0))
            .with_clip(ThrowUp, AnimationClip::new("throw_up", 6, 12.0))
            .with_clip(ThrowDown, AnimationClip::new("throw_down", 6, 12.0))
            .with_clip(ThrowFront, AnimationClip::new("throw_front", 6, 12.0))
            .with_clip(Pick, AnimationClip::new("pick", 6, 10.0))
            .with_clip(Hit, AnimationClip::new("hit_a", 4, 12.0))
            .with_clip(Hit, AnimationClip::new("hit_b", 4, 12.0))
            .with_clip(Jump, AnimationClip::new("jump", 6, 12.0))
            .with_clip(Fall, AnimationClip::new("fall", 4, 10.0));
        library
    }

    /// Register a clip for a state
    pub fn register(&mut self, state: AnimationState, clip: AnimationClip) {
        self.clips.entry(state).or_default().push(clip);
    }

    fn with_clip(&mut self, state: AnimationState, clip: AnimationClip) -> &mut Self {
        self.register(state, clip);
        self
    }

    /// All clips registered for a state
    pub fn clips(&self, state: AnimationState) -> &[AnimationClip] {
        self.clips.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Pick a clip for the state uniformly at random
    pub fn pick<R: rand::Rng + ?Sized>(
        &self,
        state: AnimationState,
        rng: &mut R,
    ) -> Option<&AnimationClip> {
        self.clips(state).choose(rng)
    }

    /// Reject clips that could never finish playing
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (state, clips) in &self.clips {
            for clip in clips {
                if clip.frame_count == 0 {
                    return Err(ConfigError::EmptyClip {
                        state: *state,
                        name: clip.name.clone(),
                    });
                }
                if clip.frame_duration <= 0.0 || !clip.frame_duration.is_finite() {
                    return Err(ConfigError::InvalidFrameDuration {
                        name: clip.name.clone(),
                        duration: clip.frame_duration,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Plays one clip at a time, forwards or backwards
#[derive(Debug, Default)]
pub struct AnimationPlayer {
    clip: Option<AnimationClip>,
    current_frame: usize,
    frame_timer: f32,
    playing: bool,
    reversed: bool,
    flip_horizontal: bool,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new clip without starting it
    pub fn set_clip(&mut self, clip: AnimationClip) {
        self.clip = Some(clip);
    }

    /// Play the current clip forwards from its first frame
    pub fn play_from_start(&mut self) {
        self.reversed = false;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = self.clip.is_some();
    }

    /// Play the current clip backwards from its last frame
    pub fn reverse_from_end(&mut self) {
        self.reversed = true;
        self.current_frame = self.clip.as_ref().map_or(0, AnimationClip::last_frame);
        self.frame_timer = 0.0;
        self.playing = self.clip.is_some();
    }

    /// Change direction in place, resuming playback
    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
        self.playing = self.clip.is_some();
    }

    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Advance playback; returns true on the frame the clip finishes
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.playing {
            return false;
        }
        let Some(clip) = &self.clip else {
            return false;
        };

        self.frame_timer += dt;
        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;

            let at_end = if self.reversed {
                self.current_frame == 0
            } else {
                self.current_frame >= clip.last_frame()
            };
            if at_end {
                self.playing = false;
                self.frame_timer = 0.0;
                return true;
            }

            if self.reversed {
                self.current_frame -= 1;
            } else {
                self.current_frame += 1;
            }
        }
        false
    }

    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.clip.as_ref()
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Get animation data for rendering (clip, frame index and flip state)
    pub fn frame_data(&self) -> AnimationFrameData {
        AnimationFrameData {
            clip_name: self
                .clip
                .as_ref()
                .map(|clip| clip.name.clone())
                .unwrap_or_default(),
            frame_index: self.current_frame,
            flip_horizontal: self.flip_horizontal,
        }
    }
}

/// Data needed to draw the current animation frame
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrameData {
    pub clip_name: String,
    pub frame_index: usize,
    pub flip_horizontal: bool,
}

/// Couples the state machine with clip selection and playback
#[derive(Debug)]
pub struct CharacterAnimator {
    machine: AnimationStateMachine,
    player: AnimationPlayer,
    library: Arc<ClipLibrary>,
    rng: StdRng,
}

impl CharacterAnimator {
    pub fn new(library: Arc<ClipLibrary>, seed: u64) -> Self {
        let mut animator = Self {
            machine: AnimationStateMachine::new(),
            player: AnimationPlayer::new(),
            library,
            rng: StdRng::seed_from_u64(seed),
        };
        animator.apply(AnimationCommand::Restart { reversed: false });
        animator
    }

    pub fn state(&self) -> AnimationState {
        self.machine.state()
    }

    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.player.set_flip_horizontal(flip);
    }

    pub fn request(&mut self, request: ActionRequest, ctx: &SelectionContext) {
        let before = self.machine.state();
        if let Some(command) = self.machine.request(request, ctx) {
            if self.machine.state() != before {
                trace!(
                    "Animation {} -> {} ({:?})",
                    before.animation_name(),
                    self.machine.state().animation_name(),
                    request
                );
            }
            self.apply(command);
        }
    }

    /// Advance playback, handling clip completion
    pub fn update(&mut self, dt: f32, ctx: &SelectionContext) {
        if self.player.update(dt) {
            self.on_clip_finished(ctx);
        }
    }

    pub fn on_clip_finished(&mut self, ctx: &SelectionContext) {
        if let Some(command) = self.machine.on_clip_finished(ctx) {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: AnimationCommand) {
        match command {
            AnimationCommand::Restart { reversed } => {
                // States without clips keep replaying whatever is loaded
                if let Some(clip) = self.library.pick(self.machine.state(), &mut self.rng) {
                    self.player.set_clip(clip.clone());
                }
                if reversed {
                    self.player.reverse_from_end();
                } else {
                    self.player.play_from_start();
                }
            }
            AnimationCommand::SetReversed(reversed) => self.player.set_reversed(reversed),
        }
    }
}
