//! Счётчики очков и монет (чистые данные, без ECS систем)

use bevy::prelude::*;

use super::{CoinConfig, ScoreConfig};

/// Очки + combo за поимку ghost'ов
///
/// Каждая поимка: combo += 1, награда = capture_score × combo.
/// Combo сбрасывается только явно (ResetCombo / конец power mode при включённом флаге).
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ScoreLedger {
    score: u32,
    combo: u32,
    capture_score: u32,
    reset_combo_on_power_end: bool,
}

impl Default for ScoreLedger {
    fn default() -> Self {
        Self::new(&ScoreConfig::default())
    }
}

impl ScoreLedger {
    pub fn new(config: &ScoreConfig) -> Self {
        Self {
            score: 0,
            combo: 0,
            capture_score: config.capture_score,
            reset_combo_on_power_end: config.reset_combo_on_power_end,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn capture_score(&self) -> u32 {
        self.capture_score
    }

    pub fn resets_combo_on_power_end(&self) -> bool {
        self.reset_combo_on_power_end
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Поимка ghost'а: возвращает начисленные очки
    pub fn on_capture(&mut self) -> u32 {
        self.combo = self.combo.saturating_add(1);
        let awarded = self.capture_score.saturating_mul(self.combo);
        self.add_score(awarded);
        awarded
    }

    pub fn reset_combo(&mut self) {
        self.combo = 0;
    }
}

/// Монеты игрока + условие победы
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CoinLedger {
    coins: u32,
    coins_to_win: u32,
    won: bool,
}

impl Default for CoinLedger {
    fn default() -> Self {
        Self::new(&CoinConfig::default())
    }
}

impl CoinLedger {
    pub fn new(config: &CoinConfig) -> Self {
        Self {
            coins: config.starting_coins,
            coins_to_win: config.coins_to_win,
            won: false,
        }
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn coins_to_win(&self) -> u32 {
        self.coins_to_win
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    /// Добавляет монеты. Возвращает true ровно один раз: на монете, достигшей цели.
    ///
    /// После победы монеты игнорируются.
    pub fn add_coins(&mut self, amount: u32) -> bool {
        if self.won {
            return false;
        }

        self.coins = self.coins.saturating_add(amount);
        if self.coins >= self.coins_to_win {
            self.won = true;
            return true;
        }
        false
    }

    pub fn remove_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_sub(amount);
    }
}
