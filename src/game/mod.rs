// Game logic: characters, stones and the session that ties them together

pub mod characters;
pub mod config;
pub mod projectiles;
pub mod session;

pub use config::{ConfigError, GameConfig};
pub use session::{ActorTag, ControlIntent, GameSession};
