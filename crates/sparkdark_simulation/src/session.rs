//! Session outcome: игра идёт / выиграна (все монеты) / проиграна (кончились жизни)
//!
//! После решения gameplay sets перестают выполняться (аналог паузы времени).

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionOutcome {
    #[default]
    Playing,
    Won,
    Lost,
}

/// Событие: игрок собрал нужное количество монет
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameWon {
    pub coins: u32,
}

/// Событие: у игрока кончились жизни
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub final_score: u32,
}
