// Stone projectile - armed while in flight, spent after its first hit

use log::debug;

use super::movement::ProjectileMovement;
use crate::engine::physics::{ColliderHandle, RigidBodyHandle};
use crate::game::characters::CharacterId;

/// Unique identifier for a stone
pub type StoneId = u32;

/// Damage lifecycle of a stone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoneState {
    /// Can still deal damage
    Armed,
    /// Already hit something; harmless
    Spent,
}

/// Which stones a character may pick up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickupPolicy {
    /// Only stones that have already hit something
    SpentOnly,
    /// Only stones that can still deal damage
    ArmedOnly,
    /// Any stone
    #[default]
    Always,
}

impl PickupPolicy {
    pub fn allows(&self, state: StoneState) -> bool {
        match self {
            Self::SpentOnly => state == StoneState::Spent,
            Self::ArmedOnly => state == StoneState::Armed,
            Self::Always => true,
        }
    }
}

/// Rules applied when a stone overlaps another actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitPolicy {
    /// The character that threw a stone cannot be hit by it
    pub instigator_immune: bool,
}

impl Default for HitPolicy {
    fn default() -> Self {
        Self {
            instigator_immune: true,
        }
    }
}

/// The actor a stone overlapped, described by capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapTarget {
    pub character: Option<CharacterId>,
    pub damageable: bool,
}

impl OverlapTarget {
    pub fn character(id: CharacterId) -> Self {
        Self {
            character: Some(id),
            damageable: true,
        }
    }

    pub fn inert() -> Self {
        Self {
            character: None,
            damageable: false,
        }
    }
}

/// A stone struck a damageable target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoneHit {
    pub stone: StoneId,
    pub target: Option<CharacterId>,
    pub instigator: Option<CharacterId>,
}

/// Physics handles backing a stone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoneBody {
    pub body_handle: RigidBodyHandle,
    /// Solid collider that rests on level geometry
    pub collider_handle: ColliderHandle,
    /// Sensor used for hits and pickup overlap
    pub sensor_handle: ColliderHandle,
}

#[derive(Debug, Clone)]
pub struct Stone {
    pub id: StoneId,
    /// Character that threw the stone
    pub instigator: Option<CharacterId>,
    pub movement: ProjectileMovement,
    pub body: Option<StoneBody>,
    state: StoneState,
}

impl Stone {
    /// A freshly thrown stone
    pub fn thrown(id: StoneId, instigator: CharacterId, movement: ProjectileMovement) -> Self {
        Self {
            id,
            instigator: Some(instigator),
            movement,
            body: None,
            state: StoneState::Armed,
        }
    }

    /// A harmless stone lying in the level
    pub fn loose(id: StoneId, mut movement: ProjectileMovement) -> Self {
        movement.handle_impact();
        Self {
            id,
            instigator: None,
            movement,
            body: None,
            state: StoneState::Spent,
        }
    }

    pub fn state(&self) -> StoneState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == StoneState::Armed
    }

    pub fn can_be_picked(&self, policy: PickupPolicy) -> bool {
        policy.allows(self.state)
    }

    /// The stone's sensor started overlapping `target`
    pub fn on_overlap(&mut self, target: OverlapTarget, policy: HitPolicy) -> Option<StoneHit> {
        if !self.is_armed() || !target.damageable {
            return None;
        }
        if policy.instigator_immune
            && target.character.is_some()
            && target.character == self.instigator
        {
            return None;
        }

        self.state = StoneState::Spent;
        self.movement.handle_impact();
        debug!("Stone {} hit {:?}", self.id, target.character);

        Some(StoneHit {
            stone: self.id,
            target: target.character,
            instigator: self.instigator,
        })
    }

    /// The stone struck level geometry: it drops but stays armed
    pub fn on_blocking_impact(&mut self) {
        self.movement.handle_impact();
    }
}

/// Owns every stone in the world
#[derive(Debug, Default)]
pub struct StoneManager {
    stones: Vec<Stone>,
    next_id: StoneId,
}

impl StoneManager {
    pub fn new() -> Self {
        Self {
            stones: Vec::new(),
            next_id: 0,
        }
    }

    pub fn next_id(&mut self) -> StoneId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, stone: Stone) {
        self.stones.push(stone);
    }

    pub fn get(&self, id: StoneId) -> Option<&Stone> {
        self.stones.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: StoneId) -> Option<&mut Stone> {
        self.stones.iter_mut().find(|s| s.id == id)
    }

    pub fn all(&self) -> &[Stone] {
        &self.stones
    }

    pub fn remove(&mut self, id: StoneId) -> Option<Stone> {
        let pos = self.stones.iter().position(|s| s.id == id)?;
        Some(self.stones.remove(pos))
    }

    pub fn count(&self) -> usize {
        self.stones.len()
    }
}
