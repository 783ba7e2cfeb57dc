//! Компоненты игрока: Player, PlayerLives, Invincibility, RespawnPoint

use bevy::prelude::*;

/// Игрок: цель для ghost AI и источник pickup контактов
///
/// RespawnPoint снимается с Transform при первом тике (`init_spawned_players`).
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(PlayerLives, Invincibility, Transform)]
pub struct Player;

/// Жизни игрока
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLives {
    pub lives: u32,
}

impl Default for PlayerLives {
    fn default() -> Self {
        Self { lives: 3 }
    }
}

impl PlayerLives {
    /// Снимает одну жизнь, возвращает true если жизни остались
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives > 0
    }
}

/// Окно неуязвимости после респавна
///
/// Countdown той же формы, что и power mode: remaining уменьшается на delta каждый тик.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Invincibility {
    pub remaining: f32,
    pub duration: f32,
}

impl Default for Invincibility {
    fn default() -> Self {
        Self {
            remaining: 0.0,
            duration: 2.0,
        }
    }
}

impl Invincibility {
    pub fn with_duration(duration: f32) -> Self {
        Self {
            remaining: 0.0,
            duration,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn start(&mut self) {
        self.remaining = self.duration;
    }

    pub fn tick(&mut self, delta: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - delta).max(0.0);
        }
    }
}

/// Точка респавна игрока
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RespawnPoint(pub Vec3);
