// Character animation state machine

use glam::Vec2;

use crate::core::math::sign;

/// Vertical aim threshold in degrees separating front from up/down poses
pub const AIM_ZONE_THRESHOLD: f32 = 30.0;

/// Speed below which a body counts as standing still (solver jitter)
const MOVING_THRESHOLD: f32 = 0.01;

/// Discrete pose/action the character is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationState {
    Idle,
    Walk,
    CarryIdle,
    CarryWalk,
    CarryFall,
    CarryJump,
    AimingUp,
    AimingDown,
    AimingFront,
    WalkAimingUp,
    WalkAimingDown,
    WalkAimingFront,
    ThrowUp,
    ThrowDown,
    ThrowFront,
    Pick,
    Hit,
    Jump,
    Fall,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::Idle
    }
}

impl AnimationState {
    /// Discrete actions that passive states must not interrupt
    pub fn is_in_flight_action(&self) -> bool {
        matches!(
            self,
            Self::ThrowUp | Self::ThrowDown | Self::ThrowFront | Self::Pick | Self::Hit
        )
    }

    pub fn is_jump(&self) -> bool {
        matches!(self, Self::Jump | Self::CarryJump)
    }

    /// Aim poses held while standing still
    pub fn is_stationary_aim(&self) -> bool {
        matches!(self, Self::AimingUp | Self::AimingDown | Self::AimingFront)
    }

    /// Name used when logging transitions
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::CarryIdle => "carry_idle",
            Self::CarryWalk => "carry_walk",
            Self::CarryFall => "carry_fall",
            Self::CarryJump => "carry_jump",
            Self::AimingUp => "aim_up",
            Self::AimingDown => "aim_down",
            Self::AimingFront => "aim_front",
            Self::WalkAimingUp => "walk_aim_up",
            Self::WalkAimingDown => "walk_aim_down",
            Self::WalkAimingFront => "walk_aim_front",
            Self::ThrowUp => "throw_up",
            Self::ThrowDown => "throw_down",
            Self::ThrowFront => "throw_front",
            Self::Pick => "pick",
            Self::Hit => "hit",
            Self::Jump => "jump",
            Self::Fall => "fall",
        }
    }
}

/// Coarse request issued by the character; resolved into an `AnimationState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionRequest {
    Idle,
    Walk,
    Jump,
    Fall,
    Aim,
    Throw,
    Pick,
    Hit,
}

/// Vertical aim band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimZone {
    Up,
    Front,
    Down,
}

impl AimZone {
    /// Classify a signed aim angle in degrees (strict inequalities)
    pub fn classify(angle_degrees: f32) -> Self {
        if angle_degrees > AIM_ZONE_THRESHOLD {
            Self::Up
        } else if angle_degrees < -AIM_ZONE_THRESHOLD {
            Self::Down
        } else {
            Self::Front
        }
    }
}

/// Everything the selector needs to know about the character this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionContext {
    pub ammo: u32,
    pub velocity: Vec2,
    /// Signed aim elevation in degrees relative to the facing direction
    pub aim_angle: f32,
    /// Horizontal aim component, compared against travel direction
    pub aim_x: f32,
}

impl SelectionContext {
    fn carrying(&self) -> bool {
        self.ammo > 0
    }

    fn moving(&self) -> bool {
        self.velocity.length_squared() > MOVING_THRESHOLD * MOVING_THRESHOLD
    }

    /// Travelling one way while aiming the other
    fn aim_against_travel(&self) -> bool {
        let travel = sign(self.velocity.x);
        self.moving() && travel != 0.0 && travel != sign(self.aim_x)
    }
}

/// What the animation player must do after a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCommand {
    /// Select a clip for the (new) current state and play it from the start,
    /// or from the end when reversed
    Restart { reversed: bool },
    /// Keep the current clip but change playback direction
    SetReversed(bool),
}

/// Resolves action requests into animation states
#[derive(Debug)]
pub struct AnimationStateMachine {
    current_state: AnimationState,
    previous_state: AnimationState,
    reversing: bool,
}

impl Default for AnimationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: AnimationState::Idle,
            previous_state: AnimationState::Idle,
            reversing: false,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.current_state
    }

    pub fn previous_state(&self) -> AnimationState {
        self.previous_state
    }

    pub fn is_reversing(&self) -> bool {
        self.reversing
    }

    /// Apply a request and report how playback has to change, if at all
    pub fn request(
        &mut self,
        request: ActionRequest,
        ctx: &SelectionContext,
    ) -> Option<AnimationCommand> {
        let old_state = self.current_state;
        let mut direction_change = None;
        let mut set_reverse = false;

        let next = match request {
            ActionRequest::Idle => (!old_state.is_in_flight_action()).then(|| {
                if ctx.carrying() {
                    AnimationState::CarryIdle
                } else {
                    AnimationState::Idle
                }
            }),
            ActionRequest::Walk => (!old_state.is_in_flight_action()).then(|| {
                if ctx.carrying() {
                    AnimationState::CarryWalk
                } else {
                    AnimationState::Walk
                }
            }),
            ActionRequest::Fall => {
                (!old_state.is_in_flight_action() && !old_state.is_jump()).then(|| {
                    if ctx.carrying() {
                        AnimationState::CarryFall
                    } else {
                        AnimationState::Fall
                    }
                })
            }
            ActionRequest::Jump => Some(if ctx.carrying() {
                AnimationState::CarryJump
            } else {
                AnimationState::Jump
            }),
            ActionRequest::Aim => {
                let against = ctx.aim_against_travel();
                if !against && self.reversing {
                    self.reversing = false;
                    direction_change = Some(AnimationCommand::SetReversed(false));
                } else if against && !self.reversing {
                    self.reversing = true;
                    set_reverse = true;
                    direction_change = Some(AnimationCommand::SetReversed(true));
                }

                let moving = ctx.moving();
                Some(match (AimZone::classify(ctx.aim_angle), moving) {
                    (AimZone::Up, true) => AnimationState::WalkAimingUp,
                    (AimZone::Up, false) => AnimationState::AimingUp,
                    (AimZone::Down, true) => AnimationState::WalkAimingDown,
                    (AimZone::Down, false) => AnimationState::AimingDown,
                    (AimZone::Front, true) => AnimationState::WalkAimingFront,
                    (AimZone::Front, false) => AnimationState::AimingFront,
                })
            }
            ActionRequest::Throw => Some(match AimZone::classify(ctx.aim_angle) {
                AimZone::Up => AnimationState::ThrowUp,
                AimZone::Down => AnimationState::ThrowDown,
                AimZone::Front => AnimationState::ThrowFront,
            }),
            ActionRequest::Pick => Some(AnimationState::Pick),
            ActionRequest::Hit => Some(AnimationState::Hit),
        };

        if let Some(next) = next {
            self.current_state = next;
        }

        if self.current_state == old_state {
            return direction_change;
        }

        self.previous_state = old_state;
        if self.reversing && !set_reverse {
            self.reversing = false;
        }
        Some(AnimationCommand::Restart {
            reversed: self.reversing,
        })
    }

    /// Called when the playing clip reaches its end
    pub fn on_clip_finished(&mut self, ctx: &SelectionContext) -> Option<AnimationCommand> {
        let state = self.current_state;
        if state.is_in_flight_action() {
            // Force a state change so the settle request always restarts
            self.current_state = AnimationState::Walk;
            self.settle(state, ActionRequest::Idle, ctx)
        } else if state.is_jump() {
            self.current_state = AnimationState::Walk;
            self.settle(state, ActionRequest::Fall, ctx)
        } else if state.is_stationary_aim() {
            None
        } else {
            Some(AnimationCommand::Restart {
                reversed: self.reversing,
            })
        }
    }

    fn settle(
        &mut self,
        finished: AnimationState,
        request: ActionRequest,
        ctx: &SelectionContext,
    ) -> Option<AnimationCommand> {
        let command = self.request(request, ctx);
        self.previous_state = finished;
        command
    }

    /// Passive request derived from movement; issued once per tick
    pub fn passive_request(aiming: bool, velocity: Vec2, falling: bool) -> ActionRequest {
        if aiming {
            ActionRequest::Aim
        } else if velocity.length_squared() > MOVING_THRESHOLD * MOVING_THRESHOLD {
            if falling {
                ActionRequest::Fall
            } else {
                ActionRequest::Walk
            }
        } else {
            ActionRequest::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(ammo: u32) -> SelectionContext {
        SelectionContext {
            ammo,
            velocity: Vec2::ZERO,
            aim_angle: 0.0,
            aim_x: 1.0,
        }
    }

    fn moving(ammo: u32, vx: f32) -> SelectionContext {
        SelectionContext {
            velocity: Vec2::new(vx, 0.0),
            ..ctx(ammo)
        }
    }

    #[test]
    fn test_initial_state() {
        let sm = AnimationStateMachine::new();
        assert_eq!(sm.state(), AnimationState::Idle);
        assert!(!sm.is_reversing());
    }

    #[test]
    fn test_aim_zone_classification() {
        assert_eq!(AimZone::classify(45.0), AimZone::Up);
        assert_eq!(AimZone::classify(-45.0), AimZone::Down);
        assert_eq!(AimZone::classify(10.0), AimZone::Front);
        assert_eq!(AimZone::classify(-10.0), AimZone::Front);
    }

    #[test]
    fn test_aim_zone_boundaries_are_front() {
        assert_eq!(AimZone::classify(30.0), AimZone::Front);
        assert_eq!(AimZone::classify(-30.0), AimZone::Front);
        assert_eq!(AimZone::classify(30.001), AimZone::Up);
        assert_eq!(AimZone::classify(-30.001), AimZone::Down);
    }

    #[test]
    fn test_idle_selects_carry_variant() {
        let mut sm = AnimationStateMachine::new();
        let command = sm.request(ActionRequest::Idle, &ctx(3));
        assert_eq!(sm.state(), AnimationState::CarryIdle);
        assert_eq!(command, Some(AnimationCommand::Restart { reversed: false }));

        sm.request(ActionRequest::Idle, &ctx(0));
        assert_eq!(sm.state(), AnimationState::Idle);
    }

    #[test]
    fn test_same_state_yields_no_command() {
        let mut sm = AnimationStateMachine::new();
        assert_eq!(sm.request(ActionRequest::Idle, &ctx(0)), None);
        assert_eq!(sm.state(), AnimationState::Idle);
    }

    #[test]
    fn test_walk_selects_carry_variant() {
        let mut sm = AnimationStateMachine::new();
        sm.request(ActionRequest::Walk, &moving(1, 2.0));
        assert_eq!(sm.state(), AnimationState::CarryWalk);
        sm.request(ActionRequest::Walk, &moving(0, 2.0));
        assert_eq!(sm.state(), AnimationState::Walk);
    }

    #[test]
    fn test_throw_not_interrupted_by_passive_states() {
        let mut sm = AnimationStateMachine::new();
        sm.request(ActionRequest::Throw, &ctx(2));
        assert_eq!(sm.state(), AnimationState::ThrowFront);

        assert_eq!(sm.request(ActionRequest::Idle, &ctx(2)), None);
        assert_eq!(sm.request(ActionRequest::Walk, &moving(2, 1.0)), None);
        assert_eq!(sm.request(ActionRequest::Fall, &moving(2, 1.0)), None);
        assert_eq!(sm.state(), AnimationState::ThrowFront);
    }

    #[test]
    fn test_pick_and_hit_not_interrupted() {
        let mut sm = AnimationStateMachine::new();
        sm.request(ActionRequest::Pick, &ctx(1));
        sm.request(ActionRequest::Walk, &moving(1, 1.0));
        assert_eq!(sm.state(), AnimationState::Pick);

        sm.request(ActionRequest::Hit, &ctx(1));
        sm.request(ActionRequest::Idle, &ctx(1));
        assert_eq!(sm.state(), AnimationState::Hit);
    }

    #[test]
    fn test_fall_waits_for_jump_clip() {
        let mut sm = AnimationStateMachine::new();
        sm.request(ActionRequest::Jump, &ctx(0));
        assert_eq!(sm.state(), AnimationState::Jump);

        sm.request(ActionRequest::Fall, &moving(0, 1.0));
        assert_eq!(sm.state(), AnimationState::Jump);

        sm.on_clip_finished(&moving(0, 1.0));
        assert_eq!(sm.state(), AnimationState::Fall);
    }

    #[test]
    fn test_carry_jump_settles_into_carry_fall() {
        let mut sm = AnimationStateMachine::new();
        sm.request(ActionRequest::Jump, &ctx(4));
        assert_eq!(sm.state(), AnimationState::CarryJump);

        let command = sm.on_clip_finished(&ctx(4));
        assert_eq!(sm.state(), AnimationState::CarryFall);
        assert_eq!(sm.previous_state(), AnimationState::CarryJump);
        assert_eq!(command, Some(AnimationCommand::Restart { reversed: false }));
    }

    #[test]
    fn test_throw_clip_finished_settles_to_idle() {
        let mut sm = AnimationStateMachine::new();
        sm.request(ActionRequest::Throw, &ctx(1));
        sm.on_clip_finished(&ctx(1));
        assert_eq!(sm.state(), AnimationState::CarryIdle);

        sm.request(ActionRequest::Pick, &ctx(0));
        sm.on_clip_finished(&ctx(0));
        assert_eq!(sm.state(), AnimationState::Idle);
    }

    #[test]
    fn test_aim_variants_by_angle_and_motion() {
        let mut sm = AnimationStateMachine::new();
        let mut c = ctx(1);

        c.aim_angle = 50.0;
        sm.request(ActionRequest::Aim, &c);
        assert_eq!(sm.state(), AnimationState::AimingUp);

        c.aim_angle = -50.0;
        sm.request(ActionRequest::Aim, &c);
        assert_eq!(sm.state(), AnimationState::AimingDown);

        c.aim_angle = 0.0;
        c.velocity = Vec2::new(1.0, 0.0);
        sm.request(ActionRequest::Aim, &c);
        assert_eq!(sm.state(), AnimationState::WalkAimingFront);

        c.aim_angle = 31.0;
        sm.request(ActionRequest::Aim, &c);
        assert_eq!(sm.state(), AnimationState::WalkAimingUp);
    }

    #[test]
    fn test_aim_overrides_in_flight_action() {
        let mut sm = AnimationStateMachine::new();
        sm.request(ActionRequest::Pick, &ctx(1));
        sm.request(ActionRequest::Aim, &ctx(1));
        assert_eq!(sm.state(), AnimationState::AimingFront);
    }

    #[test]
    fn test_throw_variants() {
        let mut sm = AnimationStateMachine::new();
        let mut c = ctx(1);
        c.aim_angle = 60.0;
        sm.request(ActionRequest::Throw, &c);
        assert_eq!(sm.state(), AnimationState::ThrowUp);

        c.aim_angle = -60.0;
        sm.request(ActionRequest::Throw, &c);
        assert_eq!(sm.state(), AnimationState::ThrowDown);
    }

    #[test]
    fn test_walking_backwards_while_aiming_reverses() {
        let mut sm = AnimationStateMachine::new();
        let mut c = moving(1, -2.0);
        c.aim_x = 1.0;

        let command = sm.request(ActionRequest::Aim, &c);
        assert!(sm.is_reversing());
        assert_eq!(command, Some(AnimationCommand::Restart { reversed: true }));

        // Same state, turning around flips direction without a restart
        c.velocity.x = 2.0;
        let command = sm.request(ActionRequest::Aim, &c);
        assert!(!sm.is_reversing());
        assert_eq!(command, Some(AnimationCommand::SetReversed(false)));
    }

    #[test]
    fn test_drift_below_threshold_does_not_reverse() {
        let mut sm = AnimationStateMachine::new();
        let mut c = moving(1, -0.005);
        c.aim_x = 1.0;

        let command = sm.request(ActionRequest::Aim, &c);
        assert_eq!(sm.state(), AnimationState::AimingFront);
        assert!(!sm.is_reversing());
        assert_eq!(command, Some(AnimationCommand::Restart { reversed: false }));
        assert_eq!(sm.on_clip_finished(&c), None);
    }

    #[test]
    fn test_state_change_clears_reversal() {
        let mut sm = AnimationStateMachine::new();
        let mut c = moving(1, -2.0);
        c.aim_x = 1.0;
        sm.request(ActionRequest::Aim, &c);
        assert!(sm.is_reversing());

        let command = sm.request(ActionRequest::Throw, &ctx(1));
        assert!(!sm.is_reversing());
        assert_eq!(command, Some(AnimationCommand::Restart { reversed: false }));
    }

    #[test]
    fn test_stationary_aim_holds_on_finish() {
        let mut sm = AnimationStateMachine::new();
        sm.request(ActionRequest::Aim, &ctx(1));
        assert_eq!(sm.on_clip_finished(&ctx(1)), None);
        assert_eq!(sm.state(), AnimationState::AimingFront);
    }

    #[test]
    fn test_looping_states_restart_on_finish() {
        let mut sm = AnimationStateMachine::new();
        sm.request(ActionRequest::Walk, &moving(0, 1.0));
        assert_eq!(
            sm.on_clip_finished(&moving(0, 1.0)),
            Some(AnimationCommand::Restart { reversed: false })
        );
        assert_eq!(sm.state(), AnimationState::Walk);
    }

    #[test]
    fn test_passive_request() {
        assert_eq!(
            AnimationStateMachine::passive_request(true, Vec2::ZERO, true),
            ActionRequest::Aim
        );
        assert_eq!(
            AnimationStateMachine::passive_request(false, Vec2::new(0.0, -3.0), true),
            ActionRequest::Fall
        );
        assert_eq!(
            AnimationStateMachine::passive_request(false, Vec2::new(2.0, 0.0), false),
            ActionRequest::Walk
        );
        assert_eq!(
            AnimationStateMachine::passive_request(false, Vec2::ZERO, false),
            ActionRequest::Idle
        );
    }

    #[test]
    fn test_state_predicates() {
        assert!(AnimationState::ThrowUp.is_in_flight_action());
        assert!(AnimationState::Hit.is_in_flight_action());
        assert!(!AnimationState::Jump.is_in_flight_action());
        assert!(AnimationState::CarryJump.is_jump());
        assert_eq!(AnimationState::WalkAimingDown.animation_name(), "walk_aim_down");
    }
}
