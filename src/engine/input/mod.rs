// Input handling system
//
// Keyboard and mouse input for the local player.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `player`: Per-player input state (held keys, per-frame edges, cursor)
// - `manager`: Translates winit events into actions
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::new();
//
// // In your event loop
// input.process_keyboard_event(&key_event);
//
// // Game logic reads the edges
// if input.player().just_released(Action::Throw) {
//     // Throw!
// }
//
// // At the end of each frame
// input.update();
// ```

pub mod action;
pub mod manager;
pub mod player;

pub use action::{Action, InputSource};
pub use manager::InputManager;
pub use player::PlayerInput;
