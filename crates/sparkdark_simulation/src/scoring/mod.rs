//! Scoring module
//!
//! ScoreLedger (очки + combo за ghost'ов) и CoinLedger (монеты + победа).
//! Оба ресурса кормятся событиями gameplay систем.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod ledger;
pub mod systems;

pub use ledger::{CoinLedger, ScoreLedger};

use crate::schedules::SimulationSet;

/// Начислить очки (power pellet и т.п.)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddScore(pub u32);

/// Снять монеты (штрафы и т.п.), не ниже нуля
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveCoins(pub u32);

/// Сбросить combo счётчик
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResetCombo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Базовые очки за ghost'а (умножаются на combo)
    pub capture_score: u32,
    pub reset_combo_on_power_end: bool,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            capture_score: 200,
            reset_combo_on_power_end: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinConfig {
    pub coins_to_win: u32,
    pub starting_coins: u32,
}

impl Default for CoinConfig {
    fn default() -> Self {
        Self {
            coins_to_win: 83,
            starting_coins: 0,
        }
    }
}

/// Scoring Plugin
///
/// Ledger'ы не перезаписываются, если уже вставлены (тесты/движок).
#[derive(Default)]
pub struct ScoringPlugin {
    pub score: ScoreConfig,
    pub coins: CoinConfig,
}

impl Plugin for ScoringPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AddScore>()
            .add_event::<ResetCombo>()
            .add_event::<RemoveCoins>();

        if !app.world().contains_resource::<ScoreLedger>() {
            app.insert_resource(ScoreLedger::new(&self.score));
        }
        if !app.world().contains_resource::<CoinLedger>() {
            app.insert_resource(CoinLedger::new(&self.coins));
        }

        // Стартовый HUD: "Score: 0", "Coins: 0/N"
        app.add_systems(
            FixedUpdate,
            systems::announce_ledgers.in_set(SimulationSet::Init),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::apply_ghost_captures,
                systems::apply_score_additions,
                systems::apply_combo_policy,
                systems::apply_coin_removals,
            )
                .chain()
                .in_set(SimulationSet::Score),
        );
    }
}
