// Input manager - turns winit events into player actions

use super::action::{default_bindings, Action, InputSource};
use super::player::PlayerInput;
use glam::Vec2;
use log::debug;
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Maps input sources to actions and tracks the local player's input
#[derive(Debug)]
pub struct InputManager {
    bindings: HashMap<InputSource, Action>,
    player: PlayerInput,
}

impl InputManager {
    pub fn new() -> Self {
        Self::with_bindings(default_bindings())
    }

    pub fn with_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
            player: PlayerInput::new(),
        }
    }

    /// Bind a source to an action, replacing any previous binding of that source
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    pub fn action_for(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        if event.repeat {
            return;
        }
        self.process_source(InputSource::key(key_code), event.state);
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.process_source(InputSource::mouse(button), state);
    }

    /// Cursor moved to `position` (window pixels) or left the window (`None`)
    pub fn process_cursor(&mut self, position: Option<Vec2>) {
        self.player.set_cursor(position);
    }

    /// Feed a press/release for any source
    pub fn process_source(&mut self, source: InputSource, state: ElementState) {
        let Some(action) = self.action_for(source) else {
            return;
        };
        match state {
            ElementState::Pressed => self.player.press(action),
            ElementState::Released => self.player.release(action),
        }
        debug!("{:?} {:?} via {:?}", action, state, source);
    }

    /// Clear per-frame edges; call once per frame after the game consumed them
    pub fn update(&mut self) {
        self.player.update();
    }

    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerInput {
        &mut self.player
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
