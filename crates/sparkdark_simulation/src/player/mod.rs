//! Player module: жизни, неуязвимость после респавна, game over.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod systems;

use crate::components::{Invincibility, Player, PlayerLives};
use crate::schedules::SimulationSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub lives: u32,
    /// Окно неуязвимости после потери жизни (секунды)
    pub invincibility_duration: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            invincibility_duration: 2.0,
        }
    }
}

impl PlayerConfig {
    /// Bundle игрока с параметрами из конфига
    pub fn bundle(&self, position: Vec3) -> (Player, PlayerLives, Invincibility, Transform) {
        (
            Player,
            PlayerLives { lives: self.lives },
            Invincibility::with_duration(self.invincibility_duration),
            Transform::from_translation(position),
        )
    }
}

/// Player Plugin
///
/// Порядок:
/// 1. init_spawned_players (SimulationSet::Init)
/// 2. tick_invincibility → apply_player_damage (SimulationSet::Player)
///
/// Countdown идёт до урона: неуязвимость, начатая в этом тике, длится полные duration.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            systems::init_spawned_players.in_set(SimulationSet::Init),
        );

        app.add_systems(
            FixedUpdate,
            (systems::tick_invincibility, systems::apply_player_damage)
                .chain()
                .in_set(SimulationSet::Player),
        );
    }
}
