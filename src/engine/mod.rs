// Engine modules: frame timing, physics, input, camera

pub mod camera;
pub mod game_loop;
pub mod input;
pub mod physics;
