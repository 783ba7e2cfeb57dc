//! SessionConfig: все tunables сессии одним JSON файлом
//!
//! Любое поле можно опустить (serde default). Загрузка: единственный
//! fallible API симуляции; gameplay системы ошибок не возвращают.

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ai::GhostConfig;
use crate::player::PlayerConfig;
use crate::power::PowerModeConfig;
use crate::scoring::{CoinConfig, ScoreConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Resource: конфиг текущей сессии (spawn helpers берут отсюда GhostConfig/PlayerConfig)
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ghost: GhostConfig,
    pub power: PowerModeConfig,
    pub score: ScoreConfig,
    pub player: PlayerConfig,
    pub coins: CoinConfig,
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Интервалы, скорости, дистанции и длительности должны быть > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ghost = &self.ghost;
        require_positive("ghost.chase_speed", ghost.chase_speed)?;
        require_positive("ghost.flee_speed", ghost.flee_speed)?;
        require_positive("ghost.path_update_interval", ghost.path_update_interval)?;
        require_positive("ghost.flee_distance", ghost.flee_distance)?;
        require_positive("ghost.rotation_speed", ghost.rotation_speed)?;
        require_positive("ghost.spawn_arrival_tolerance", ghost.spawn_arrival_tolerance)?;
        require_positive("player.invincibility_duration", self.player.invincibility_duration)?;

        if self.power.warning_time < 0.0 || !self.power.warning_time.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "power.warning_time",
                reason: format!("must be >= 0, got {}", self.power.warning_time),
            });
        }

        if self.player.lives == 0 {
            return Err(ConfigError::InvalidValue {
                field: "player.lives",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.coins.coins_to_win == 0 {
            return Err(ConfigError::InvalidValue {
                field: "coins.coins_to_win",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be > 0, got {}", value),
        })
    }
}
