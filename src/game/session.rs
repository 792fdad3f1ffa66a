// Game session - owns the physics world and drives characters and stones

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;
use log::{debug, info};

use crate::engine::input::{Action, PlayerInput};
use crate::engine::physics::{
    presets, CollisionEvent, ColliderHandle, PhysicsWorld, QueryFilter, Vector,
};

use super::characters::{
    Character, CharacterBody, CharacterCommand, CharacterId, CharacterManager, CharacterStats,
    ClipLibrary, Motion,
};
use super::config::{ConfigError, GameConfig};
use super::projectiles::{OverlapTarget, Stone, StoneBody, StoneHit, StoneId, StoneManager};

/// Vertical speed above which a character counts as airborne even on the ground
const RISING_EPSILON: f32 = 0.1;

/// Length of the ground probe below a character's feet
const GROUND_PROBE: f32 = 0.2;

/// What a collider belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorTag {
    Character(CharacterId),
    Stone(StoneId),
    Level,
}

/// Input a character acts on during the next update
///
/// Edges (`*_pressed`, `*_released`) are consumed by the first update that
/// sees them; the axis and cursor persist until replaced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlIntent {
    pub move_axis: f32,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub throw_pressed: bool,
    pub throw_released: bool,
    pub pick_pressed: bool,
    /// Cursor in world space
    pub cursor: Option<Vec2>,
}

impl ControlIntent {
    pub fn from_input(input: &PlayerInput, cursor: Option<Vec2>) -> Self {
        Self {
            move_axis: input.horizontal_axis(),
            jump_pressed: input.just_pressed(Action::Jump),
            jump_released: input.just_released(Action::Jump),
            throw_pressed: input.just_pressed(Action::Throw),
            throw_released: input.just_released(Action::Throw),
            pick_pressed: input.just_pressed(Action::Pick),
            cursor,
        }
    }

    fn consume_edges(&mut self) {
        self.jump_pressed = false;
        self.jump_released = false;
        self.throw_pressed = false;
        self.throw_released = false;
        self.pick_pressed = false;
    }
}

/// A running match: characters, stones and the level they live in
pub struct GameSession {
    config: GameConfig,
    clips: Arc<ClipLibrary>,
    physics: PhysicsWorld,
    characters: CharacterManager,
    stones: StoneManager,
    tags: HashMap<ColliderHandle, ActorTag>,
    intents: HashMap<CharacterId, ControlIntent>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut physics = PhysicsWorld::with_gravity(Vector::new(0.0, config.world.gravity));
        physics.set_timestep(crate::engine::game_loop::FIXED_TIMESTEP);
        info!(
            "Session created (gravity {}, pickup {:?})",
            config.world.gravity, config.stone.pickup_policy
        );

        Ok(Self {
            clips: Arc::new(config.clips.clone()),
            config,
            physics,
            characters: CharacterManager::new(),
            stones: StoneManager::new(),
            tags: HashMap::new(),
            intents: HashMap::new(),
        })
    }

    pub fn characters(&self) -> &[Character] {
        self.characters.all()
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id)
    }

    pub fn character_for_player(&self, player_index: usize) -> Option<&Character> {
        self.characters.get_by_player(player_index)
    }

    pub fn stones(&self) -> &[Stone] {
        self.stones.all()
    }

    pub fn stone(&self, id: StoneId) -> Option<&Stone> {
        self.stones.get(id)
    }

    pub fn tag(&self, collider: ColliderHandle) -> Option<ActorTag> {
        self.tags.get(&collider).copied()
    }

    /// Static level geometry centered on (x, y)
    pub fn add_platform(&mut self, x: f32, y: f32, width: f32, height: f32) -> ColliderHandle {
        let body = self.physics.add_rigid_body(presets::platform_body(x, y));
        let collider = self
            .physics
            .add_collider(presets::platform_collider(width, height), body);
        self.tags.insert(collider, ActorTag::Level);
        collider
    }

    pub fn spawn_character(
        &mut self,
        name: &str,
        player_index: Option<usize>,
        x: f32,
        y: f32,
    ) -> CharacterId {
        let id = self.characters.next_id();
        let stats = self.config.character.clone();

        let body_handle = self
            .physics
            .add_rigid_body(presets::player_body(x, y, stats.gravity_scale));
        let collider_handle = self
            .physics
            .add_collider(presets::player_collider(stats.width, stats.height), body_handle);
        self.tags.insert(collider_handle, ActorTag::Character(id));

        let seed = self.config.world.seed.wrapping_add(id as u64);
        let mut character = Character::new(id, name, stats, self.clips.clone(), seed);
        character.player_index = player_index;
        character.body = Some(CharacterBody {
            body_handle,
            collider_handle,
        });
        self.characters.insert(character);
        self.intents.insert(id, ControlIntent::default());

        info!("Spawned character {} '{}' at ({}, {})", id, name, x, y);
        id
    }

    /// A spent stone lying in the level, ready to be picked up
    pub fn spawn_loose_stone(&mut self, x: f32, y: f32) -> StoneId {
        let id = self.stones.next_id();
        let stone = Stone::loose(id, self.config.stone.movement());
        self.insert_stone(stone, Vec2::new(x, y), Vec2::ZERO)
    }

    /// Launch an armed stone thrown by `instigator`
    pub fn spawn_thrown_stone(
        &mut self,
        instigator: CharacterId,
        origin: Vec2,
        direction: Vec2,
    ) -> StoneId {
        let id = self.stones.next_id();
        let stone = Stone::thrown(id, instigator, self.config.stone.movement());
        let velocity = stone.movement.launch_velocity(direction);
        self.insert_stone(stone, origin, velocity)
    }

    fn insert_stone(&mut self, mut stone: Stone, origin: Vec2, velocity: Vec2) -> StoneId {
        let radius = self.config.stone.radius;
        let body_handle = self.physics.add_rigid_body(presets::stone_body(
            origin.x,
            origin.y,
            velocity.x,
            velocity.y,
            stone.movement.gravity_scale,
        ));
        let collider_handle = self
            .physics
            .add_collider(presets::stone_collider(radius), body_handle);
        let sensor_handle = self
            .physics
            .add_collider(presets::stone_sensor(radius), body_handle);

        let id = stone.id;
        self.tags.insert(collider_handle, ActorTag::Stone(id));
        self.tags.insert(sensor_handle, ActorTag::Stone(id));
        stone.body = Some(StoneBody {
            body_handle,
            collider_handle,
            sensor_handle,
        });
        self.stones.insert(stone);
        debug!("Stone {} spawned at {:?} moving {:?}", id, origin, velocity);
        id
    }

    pub fn despawn_stone(&mut self, id: StoneId) -> Option<Stone> {
        let stone = self.stones.remove(id)?;
        if let Some(body) = stone.body {
            self.tags.remove(&body.collider_handle);
            self.tags.remove(&body.sensor_handle);
            self.physics.remove_rigid_body(body.body_handle);
        }
        Some(stone)
    }

    /// Replace the input a character acts on
    pub fn set_intent(&mut self, id: CharacterId, intent: ControlIntent) {
        self.intents.insert(id, intent);
    }

    /// Feed a player's input to the character they control
    pub fn apply_input(&mut self, player_index: usize, input: &PlayerInput, cursor: Option<Vec2>) {
        if let Some(id) = self.characters.get_by_player(player_index).map(|c| c.id) {
            self.set_intent(id, ControlIntent::from_input(input, cursor));
        }
    }

    /// The player let go of the controls without releasing them (focus lost)
    pub fn cancel_aim(&mut self, player_index: usize) {
        let Some(id) = self.characters.get_by_player(player_index).map(|c| c.id) else {
            return;
        };
        if let Some(character) = self.characters.get_mut(id) {
            character.stop_aim();
        }
        self.set_intent(id, ControlIntent::default());
        debug!("Controls of player {} released", player_index);
    }

    /// Current physics state of a character's body
    pub fn motion(&self, id: CharacterId) -> Option<Motion> {
        let character = self.characters.get(id)?;
        read_motion(&self.physics, character.body.as_ref()?, &character.stats)
    }

    /// Stones overlapping the character that the pickup policy allows
    pub fn pick_candidates(&self, id: CharacterId) -> Vec<StoneId> {
        let Some(body) = self.characters.get(id).and_then(|c| c.body) else {
            return Vec::new();
        };
        let policy = self.config.stone.pickup_policy;
        self.stones
            .all()
            .iter()
            .filter(|stone| stone.can_be_picked(policy))
            .filter(|stone| {
                stone.body.is_some_and(|b| {
                    self.physics
                        .intersecting(b.sensor_handle, body.collider_handle)
                })
            })
            .map(|stone| stone.id)
            .collect()
    }

    /// Advance the session by `dt` seconds; returns the hits that landed
    pub fn update(&mut self, dt: f32) -> Vec<StoneHit> {
        self.physics.set_timestep(dt);

        let ids: Vec<CharacterId> = self.characters.all().iter().map(|c| c.id).collect();
        for &id in &ids {
            self.control_character(id, dt);
        }

        self.physics.step();
        let hits = self.route_collisions();
        self.sync_stone_gravity();
        self.despawn_fallen_stones();

        for &id in &ids {
            let Some(motion) = self.motion(id) else {
                continue;
            };
            if let Some(character) = self.characters.get_mut(id) {
                character.update_animation(dt, &motion);
            }
        }

        hits
    }

    fn control_character(&mut self, id: CharacterId, dt: f32) {
        let Some(motion) = self.motion(id) else {
            return;
        };
        let intent = match self.intents.get_mut(&id) {
            Some(intent) => {
                let current = *intent;
                intent.consume_edges();
                current
            }
            None => ControlIntent::default(),
        };
        let candidate = if intent.pick_pressed {
            self.pick_candidates(id).first().copied()
        } else {
            None
        };

        let Some(character) = self.characters.get_mut(id) else {
            return;
        };
        character.move_right(intent.move_axis);
        if intent.jump_pressed {
            character.jump(&motion);
        }
        if intent.jump_released {
            character.stop_jumping();
        }
        if intent.throw_pressed {
            character.aim(&motion);
        }
        if intent.throw_released && !character.throw(&motion) {
            character.stop_aim();
        }
        let picked = intent.pick_pressed && character.pick(&motion, candidate.is_some());

        character.tick(dt, &motion, intent.cursor);

        let commands = character.drain_commands();
        let move_input = character.move_input();
        let stats = character.stats.clone();
        let Some(body) = character.body else {
            return;
        };

        if picked {
            if let Some(stone) = candidate {
                self.despawn_stone(stone);
            }
        }
        self.apply_movement(body, &motion, move_input, &stats, &commands);
        for command in commands {
            if let CharacterCommand::SpawnStone { origin, direction } = command {
                self.spawn_thrown_stone(id, origin, direction);
            }
        }
    }

    fn apply_movement(
        &mut self,
        body: CharacterBody,
        motion: &Motion,
        move_input: f32,
        stats: &CharacterStats,
        commands: &[CharacterCommand],
    ) {
        let Some(rigid_body) = self.physics.get_rigid_body_mut(body.body_handle) else {
            return;
        };
        let mut velocity = *rigid_body.linvel();

        if move_input != 0.0 {
            let control = if motion.falling { stats.air_control } else { 1.0 };
            velocity.x = move_input * stats.move_speed * control;
        } else if !motion.falling {
            velocity.x = 0.0;
        }

        for command in commands {
            match command {
                CharacterCommand::StopMovement => velocity.x = 0.0,
                CharacterCommand::Jump => velocity.y = stats.jump_velocity,
                CharacterCommand::StopJumping => {
                    if velocity.y > 0.0 {
                        velocity.y *= stats.jump_cut;
                    }
                }
                CharacterCommand::SpawnStone { .. } => {}
            }
        }

        rigid_body.set_linvel(velocity, true);
    }

    fn route_collisions(&mut self) -> Vec<StoneHit> {
        let mut hits = Vec::new();
        for event in self.physics.get_collision_events() {
            let CollisionEvent::Started {
                collider1,
                collider2,
            } = event
            else {
                continue;
            };
            let (stone_collider, other) = match (self.tag(collider1), self.tag(collider2)) {
                (Some(ActorTag::Stone(_)), _) => (collider1, collider2),
                (_, Some(ActorTag::Stone(_))) => (collider2, collider1),
                _ => continue,
            };
            if let Some(hit) = self.stone_contact(stone_collider, other) {
                hits.push(hit);
            }
        }
        hits
    }

    fn stone_contact(
        &mut self,
        stone_collider: ColliderHandle,
        other: ColliderHandle,
    ) -> Option<StoneHit> {
        let Some(ActorTag::Stone(stone_id)) = self.tag(stone_collider) else {
            return None;
        };
        let other_tag = self.tag(other);
        let hit_policy = self.config.stone.hit_policy;
        let stone = self.stones.get_mut(stone_id)?;
        let body = stone.body?;

        if stone_collider == body.sensor_handle {
            let target = match other_tag {
                Some(ActorTag::Character(id)) => OverlapTarget::character(id),
                _ => OverlapTarget::inert(),
            };
            let hit = stone.on_overlap(target, hit_policy)?;
            if let Some(target) = hit.target {
                let motion = self.motion(target).unwrap_or_default();
                if let Some(character) = self.characters.get_mut(target) {
                    character.on_hit(&motion);
                }
                info!("Character {} hit by stone {}", target, stone_id);
            }
            Some(hit)
        } else {
            if other_tag == Some(ActorTag::Level) {
                stone.on_blocking_impact();
            }
            None
        }
    }

    fn sync_stone_gravity(&mut self) {
        for stone in self.stones.all() {
            if let Some(body) = stone.body {
                self.physics
                    .set_gravity_scale(body.body_handle, stone.movement.gravity_scale);
            }
        }
    }

    fn despawn_fallen_stones(&mut self) {
        let kill_height = self.config.world.kill_height;
        let fallen: Vec<StoneId> = self
            .stones
            .all()
            .iter()
            .filter(|stone| {
                stone
                    .body
                    .and_then(|b| self.physics.get_rigid_body(b.body_handle))
                    .is_some_and(|rb| rb.translation().y < kill_height)
            })
            .map(|stone| stone.id)
            .collect();
        for id in fallen {
            debug!("Stone {} fell out of the level", id);
            self.despawn_stone(id);
        }
    }
}

/// Sample a character body and probe for ground below its feet
fn read_motion(
    physics: &PhysicsWorld,
    body: &CharacterBody,
    stats: &CharacterStats,
) -> Option<Motion> {
    let rigid_body = physics.get_rigid_body(body.body_handle)?;
    let position = *rigid_body.translation();
    let velocity = *rigid_body.linvel();

    let ray_origin = Vector::new(position.x, position.y - stats.height / 2.0 + 0.1);
    let grounded = physics
        .raycast(
            ray_origin,
            Vector::new(0.0, -1.0),
            GROUND_PROBE,
            true,
            QueryFilter::default()
                .exclude_rigid_body(body.body_handle)
                .exclude_sensors(),
        )
        .is_some();

    Some(Motion {
        position: Vec2::new(position.x, position.y),
        velocity: Vec2::new(velocity.x, velocity.y),
        falling: !grounded || velocity.y > RISING_EPSILON,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::AnimationState;
    use crate::game::projectiles::{PickupPolicy, StoneState};

    const DT: f32 = 1.0 / 60.0;

    /// Ground slab whose top surface sits at y = 0.5
    fn session_with(config: GameConfig) -> GameSession {
        let mut session = GameSession::new(config).expect("valid config");
        session.add_platform(0.0, 0.0, 40.0, 1.0);
        session
    }

    fn session() -> GameSession {
        session_with(GameConfig::standard())
    }

    fn run(session: &mut GameSession, steps: usize) -> Vec<StoneHit> {
        let mut hits = Vec::new();
        for _ in 0..steps {
            hits.extend(session.update(DT));
        }
        hits
    }

    fn press(session: &mut GameSession, id: CharacterId, intent: ControlIntent) {
        session.set_intent(id, intent);
        session.update(DT);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::standard();
        config.character.throw_duration = -1.0;
        assert!(GameSession::new(config).is_err());
    }

    #[test]
    fn test_character_settles_on_ground() {
        let mut session = session();
        let id = session.spawn_character("p1", Some(0), 0.0, 2.0);
        run(&mut session, 90);

        let motion = session.motion(id).expect("character exists");
        assert!(!motion.falling);
        assert!((motion.position.y - 1.5).abs() < 0.1);
        assert_eq!(
            session.character(id).map(|c| c.animation_state()),
            Some(AnimationState::CarryIdle)
        );
    }

    #[test]
    fn test_jump_launches_upwards() {
        let mut session = session();
        let id = session.spawn_character("p1", Some(0), 0.0, 2.0);
        run(&mut session, 90);

        press(
            &mut session,
            id,
            ControlIntent {
                jump_pressed: true,
                ..ControlIntent::default()
            },
        );

        let motion = session.motion(id).expect("character exists");
        assert!(motion.velocity.y > 0.0);
        assert!(motion.falling);
        assert_eq!(
            session.character(id).map(|c| c.animation_state()),
            Some(AnimationState::CarryJump)
        );
    }

    #[test]
    fn test_player_input_routed_to_character() {
        let mut session = session();
        let id = session.spawn_character("p1", Some(0), 0.0, 2.0);
        run(&mut session, 90);

        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        session.apply_input(0, &input, None);
        session.update(DT);

        assert!(session.motion(id).is_some_and(|m| m.velocity.y > 0.0));
    }

    #[test]
    fn test_lateral_movement() {
        let mut session = session();
        let id = session.spawn_character("p1", Some(0), 0.0, 2.0);
        run(&mut session, 90);

        session.set_intent(
            id,
            ControlIntent {
                move_axis: 1.0,
                ..ControlIntent::default()
            },
        );
        run(&mut session, 30);

        let motion = session.motion(id).expect("character exists");
        assert!(motion.position.x > 1.0);
        assert_eq!(session.character(id).map(|c| c.facing()), Some(1.0));
    }

    #[test]
    fn test_pick_loose_stone() {
        let mut session = session();
        let id = session.spawn_character("p1", Some(0), 0.0, 2.0);
        let stone = session.spawn_loose_stone(0.2, 1.0);
        run(&mut session, 90);

        assert_eq!(session.pick_candidates(id), vec![stone]);

        press(
            &mut session,
            id,
            ControlIntent {
                pick_pressed: true,
                ..ControlIntent::default()
            },
        );

        let character = session.character(id).expect("character exists");
        assert_eq!(character.ammo(), 6);
        assert!(!character.can_move());
        assert_eq!(character.animation_state(), AnimationState::Pick);
        assert_eq!(session.stones().len(), 0);
    }

    #[test]
    fn test_pick_with_nothing_nearby() {
        let mut session = session();
        let id = session.spawn_character("p1", Some(0), 0.0, 2.0);
        session.spawn_loose_stone(8.0, 1.0);
        run(&mut session, 90);

        press(
            &mut session,
            id,
            ControlIntent {
                pick_pressed: true,
                ..ControlIntent::default()
            },
        );

        assert_eq!(session.character(id).map(|c| c.ammo()), Some(5));
        assert_eq!(session.stones().len(), 1);
    }

    #[test]
    fn test_pickup_policy_filters_candidates() {
        let mut config = GameConfig::standard();
        config.stone.pickup_policy = PickupPolicy::ArmedOnly;
        let mut session = session_with(config);
        let id = session.spawn_character("p1", Some(0), 0.0, 2.0);
        session.spawn_loose_stone(0.2, 1.0);
        run(&mut session, 90);

        assert!(session.pick_candidates(id).is_empty());
    }

    #[test]
    fn test_thrown_stone_hits_other_character() {
        let mut session = session();
        let thrower = session.spawn_character("p1", Some(0), 0.0, 2.0);
        let target = session.spawn_character("p2", None, 4.0, 2.0);
        run(&mut session, 90);

        let cursor = Some(Vec2::new(4.0, 1.5));
        press(
            &mut session,
            thrower,
            ControlIntent {
                throw_pressed: true,
                cursor,
                ..ControlIntent::default()
            },
        );
        assert!(session.character(thrower).is_some_and(|c| c.is_aiming()));

        press(
            &mut session,
            thrower,
            ControlIntent {
                throw_released: true,
                cursor,
                ..ControlIntent::default()
            },
        );
        assert!(session.character(thrower).is_some_and(|c| c.is_throwing()));

        let mut landed = None;
        for _ in 0..120 {
            let hits = session.update(DT);
            if let Some(hit) = hits.into_iter().next() {
                landed = Some(hit);
                break;
            }
        }

        let hit = landed.expect("stone should reach the target");
        assert_eq!(hit.target, Some(target));
        assert_eq!(hit.instigator, Some(thrower));
        assert_eq!(
            session.character(target).map(|c| c.animation_state()),
            Some(AnimationState::Hit)
        );
        assert_eq!(
            session.stone(hit.stone).map(|s| s.state()),
            Some(StoneState::Spent)
        );
        assert_eq!(session.character(thrower).map(|c| c.ammo()), Some(4));
    }

    #[test]
    fn test_stone_on_level_stays_armed() {
        let mut session = session();
        let thrower = session.spawn_character("p1", Some(0), -10.0, 2.0);
        let stone = session.spawn_thrown_stone(thrower, Vec2::new(5.0, 3.0), Vec2::NEG_Y);
        run(&mut session, 60);

        let stone = session.stone(stone).expect("stone still in the level");
        assert!(stone.is_armed());
        assert!(stone.movement.has_impacted());
    }

    #[test]
    fn test_focus_loss_ends_aim() {
        let mut session = session();
        let id = session.spawn_character("p1", Some(0), 0.0, 2.0);
        run(&mut session, 90);

        press(
            &mut session,
            id,
            ControlIntent {
                throw_pressed: true,
                cursor: Some(Vec2::new(3.0, 1.5)),
                ..ControlIntent::default()
            },
        );
        assert!(session.character(id).is_some_and(|c| c.is_aiming()));

        session.cancel_aim(0);
        run(&mut session, 5);

        let character = session.character(id).expect("character exists");
        assert!(!character.is_aiming());
        assert!(!character.is_throwing());
        assert_eq!(character.ammo(), 5);
    }

    #[test]
    fn test_own_stone_spends_on_thrower_without_immunity() {
        let mut config = GameConfig::standard();
        config.stone.hit_policy.instigator_immune = false;
        let mut session = session_with(config);
        let thrower = session.spawn_character("p1", Some(0), 0.0, 2.0);
        run(&mut session, 90);

        // Released inside the thrower's own capsule
        let stone = session.spawn_thrown_stone(thrower, Vec2::new(0.0, 2.0), Vec2::X);
        let hits = run(&mut session, 2);

        assert_eq!(
            hits,
            vec![StoneHit {
                stone,
                target: Some(thrower),
                instigator: Some(thrower),
            }]
        );
        assert_eq!(
            session.stone(stone).map(|s| s.state()),
            Some(StoneState::Spent)
        );
        assert_eq!(
            session.character(thrower).map(|c| c.animation_state()),
            Some(AnimationState::Hit)
        );
    }

    #[test]
    fn test_own_stone_ignored_with_immunity() {
        let mut session = session();
        let thrower = session.spawn_character("p1", Some(0), 0.0, 2.0);
        run(&mut session, 90);

        let stone = session.spawn_thrown_stone(thrower, Vec2::new(0.0, 2.0), Vec2::X);
        let hits = run(&mut session, 2);

        assert!(hits.is_empty());
        assert!(session.stone(stone).is_some_and(|s| s.is_armed()));
    }

    #[test]
    fn test_release_without_aim_does_nothing() {
        let mut session = session();
        let id = session.spawn_character("p1", Some(0), 0.0, 2.0);
        run(&mut session, 90);

        press(
            &mut session,
            id,
            ControlIntent {
                throw_released: true,
                ..ControlIntent::default()
            },
        );

        let character = session.character(id).expect("character exists");
        assert!(!character.is_throwing());
        assert_eq!(character.ammo(), 5);
    }

    #[test]
    fn test_fallen_stone_removed() {
        let mut config = GameConfig::standard();
        config.world.kill_height = -5.0;
        let mut session = session_with(config);
        session.spawn_loose_stone(100.0, 0.0);
        run(&mut session, 180);

        assert!(session.stones().is_empty());
    }

    #[test]
    fn test_spawned_characters_listed() {
        let mut session = session();
        let a = session.spawn_character("p1", Some(0), 0.0, 2.0);
        let b = session.spawn_character("p2", None, 3.0, 2.0);

        let ids: Vec<CharacterId> = session.characters().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(session.character_for_player(0).map(|c| c.id), Some(a));
    }

    #[test]
    fn test_colliders_tagged() {
        let mut session = session();
        let id = session.spawn_character("p1", Some(0), 0.0, 2.0);
        let stone = session.spawn_loose_stone(3.0, 1.0);

        let body = session.character(id).and_then(|c| c.body).expect("body");
        assert_eq!(
            session.tag(body.collider_handle),
            Some(ActorTag::Character(id))
        );
        let stone_body = session.stone(stone).and_then(|s| s.body).expect("body");
        assert_eq!(
            session.tag(stone_body.sensor_handle),
            Some(ActorTag::Stone(stone))
        );

        session.despawn_stone(stone);
        assert_eq!(session.tag(stone_body.sensor_handle), None);
    }

    #[test]
    fn test_edges_consumed_once() {
        let mut session = session();
        let id = session.spawn_character("p1", Some(0), 0.0, 2.0);
        session.spawn_loose_stone(0.2, 1.0);
        session.spawn_loose_stone(-0.2, 1.0);
        run(&mut session, 90);

        session.set_intent(
            id,
            ControlIntent {
                pick_pressed: true,
                ..ControlIntent::default()
            },
        );
        run(&mut session, 3);

        assert_eq!(session.character(id).map(|c| c.ammo()), Some(6));
        assert_eq!(session.stones().len(), 1);
    }
}
