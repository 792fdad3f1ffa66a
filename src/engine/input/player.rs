// Per-player input state management

use super::action::Action;
use glam::Vec2;
use std::collections::HashSet;

/// Input state for the local player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions currently held
    pressed: HashSet<Action>,

    /// Actions pressed since the last frame
    just_pressed: HashSet<Action>,

    /// Actions released since the last frame
    just_released: HashSet<Action>,

    /// Cursor position in window pixels, if the cursor is over the window
    cursor: Option<Vec2>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    pub fn set_cursor(&mut self, position: Option<Vec2>) {
        self.cursor = position;
    }

    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Clear per-frame edges; call once per frame after they were consumed
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Lateral movement axis (-1.0 to 1.0)
    pub fn horizontal_axis(&self) -> f32 {
        let mut horizontal = 0.0;
        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }
        horizontal
    }
}
