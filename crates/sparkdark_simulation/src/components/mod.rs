//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: игрок (Player, PlayerLives, Invincibility, RespawnPoint)
//! - movement: навигация (MovementCommand, MovementSpeed)
//! - pickup: монеты и power pellets (Coin, PowerPellet)
//!
//! Ghost компоненты живут в `ai::components` рядом с FSM.

pub mod actor;
pub mod movement;
pub mod pickup;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use pickup::*;
