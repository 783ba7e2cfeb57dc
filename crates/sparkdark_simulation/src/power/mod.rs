//! Power mode module
//!
//! Power pellet → ActivatePowerMode → все ghost'ы (кроме Eaten) в Flee на duration секунд.
//! По истечении Flee ghost'ы возвращаются в Chase. Повторная активация
//! перезапускает таймер (last-writer-wins, без стакинга).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod controller;
pub mod systems;

pub use controller::{PowerModeController, PowerModeTick};

use crate::schedules::SimulationSet;

/// Запрос на включение power mode (pellet pickup или внешний триггер)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActivatePowerMode {
    pub duration: f32,
}

/// Изменения power mode для presentation/score collaborators
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PowerModeChanged {
    Activated { duration: f32 },
    /// remaining вошёл в warning окно (ghost'ы можно мигать)
    WarningStarted { remaining: f32 },
    Deactivated,
}

/// Параметры power mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerModeConfig {
    /// За сколько секунд до конца начинается warning фаза
    pub warning_time: f32,
}

impl Default for PowerModeConfig {
    fn default() -> Self {
        Self { warning_time: 3.0 }
    }
}

/// Power Mode Plugin
///
/// Регистрирует PowerModeController (если не вставлен заранее) и
/// `update_power_mode` в SimulationSet::PowerMode.
#[derive(Default)]
pub struct PowerModePlugin {
    pub config: PowerModeConfig,
}

impl Plugin for PowerModePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ActivatePowerMode>()
            .add_event::<PowerModeChanged>();

        if !app.world().contains_resource::<PowerModeController>() {
            app.insert_resource(PowerModeController::new(self.config.warning_time));
        }

        app.add_systems(
            FixedUpdate,
            systems::update_power_mode.in_set(SimulationSet::PowerMode),
        );
    }
}
