//! HUD sink: симуляция только пишет HudUpdate, движок рисует текст.

use bevy::prelude::*;
use std::fmt;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudUpdate {
    Score(u32),
    Lives(u32),
    Coins { current: u32, target: u32 },
}

impl fmt::Display for HudUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HudUpdate::Score(score) => write!(f, "Score: {}", score),
            HudUpdate::Lives(lives) => write!(f, "Lives: {}", lives),
            HudUpdate::Coins { current, target } => write!(f, "Coins: {}/{}", current, target),
        }
    }
}

/// Headless "рендер" HUD: в лог
pub fn log_hud_updates(mut updates: EventReader<HudUpdate>) {
    for update in updates.read() {
        crate::log(&format!("🖥️ HUD {}", update));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_text() {
        assert_eq!(HudUpdate::Score(1200).to_string(), "Score: 1200");
        assert_eq!(HudUpdate::Lives(2).to_string(), "Lives: 2");
        assert_eq!(
            HudUpdate::Coins {
                current: 5,
                target: 83
            }
            .to_string(),
            "Coins: 5/83"
        );
    }
}
