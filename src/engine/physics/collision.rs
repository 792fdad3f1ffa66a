use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can interact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Player characters
    Player = 0b0000_0001,

    /// Solid part of a stone; rests on level geometry
    Stone = 0b0000_0010,

    /// Stone overlap volume used for hits and pickups
    StoneSensor = 0b0000_0100,

    /// Static platforms and walls
    Platform = 0b0000_1000,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Players stand on platforms and get overlapped by stone sensors,
            // but never bump into solid stones
            CollisionGroups::Player => Group::from_bits_truncate(
                CollisionGroups::Platform as u32 | CollisionGroups::StoneSensor as u32,
            ),

            CollisionGroups::Stone => Group::from_bits_truncate(CollisionGroups::Platform as u32),

            CollisionGroups::StoneSensor => {
                Group::from_bits_truncate(CollisionGroups::Player as u32)
            }

            CollisionGroups::Platform => Group::from_bits_truncate(
                CollisionGroups::Player as u32 | CollisionGroups::Stone as u32,
            ),
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Collision event reported to game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching or overlapping
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching or overlapping
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

/// Queue for storing collision events during a physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this step
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// rapier2d calls back into the queue while stepping
impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interacts(a: CollisionGroups, b: CollisionGroups) -> bool {
        a.to_interaction_groups()
            .test(b.to_interaction_groups())
    }

    #[test]
    fn test_collision_groups_bits() {
        let groups = [
            CollisionGroups::Player,
            CollisionGroups::Stone,
            CollisionGroups::StoneSensor,
            CollisionGroups::Platform,
        ];

        for (i, group1) in groups.iter().enumerate() {
            for (j, group2) in groups.iter().enumerate() {
                if i != j {
                    assert_ne!(
                        *group1 as u32, *group2 as u32,
                        "Groups must have unique bits"
                    );
                }
            }
        }
    }

    #[test]
    fn test_players_do_not_collide_with_each_other() {
        assert!(!interacts(CollisionGroups::Player, CollisionGroups::Player));
    }

    #[test]
    fn test_solid_stone_ignores_players() {
        assert!(!interacts(CollisionGroups::Stone, CollisionGroups::Player));
        assert!(interacts(CollisionGroups::Stone, CollisionGroups::Platform));
    }

    #[test]
    fn test_stone_sensor_overlaps_players_only() {
        assert!(interacts(CollisionGroups::StoneSensor, CollisionGroups::Player));
        assert!(!interacts(CollisionGroups::StoneSensor, CollisionGroups::Platform));
        assert!(!interacts(CollisionGroups::StoneSensor, CollisionGroups::Stone));
    }

    #[test]
    fn test_event_queue_clear() {
        let queue = CollisionEventQueue::new();
        assert!(queue.events().is_empty());
        queue.clear();
        assert!(queue.events().is_empty());
    }
}
