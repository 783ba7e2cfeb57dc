//! Ghost AI module
//!
//! FSM Chase / Flee / Eaten (+ Respawning pass-through) для каждого ghost'а.
//! Переходы: чистая функция (`transition`), системы только применяют effects.
//! Power mode переключает Chase ⇄ Flee снаружи (см. `power`).

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod flee;
pub mod rotation;
pub mod systems;
pub mod transition;

// Re-export основных типов
pub use components::*;
pub use events::{DamagePlayer, GhostCaptured, PlayerContact};
pub use flee::{find_flee_destination, FleeDestination, FleeTier};
pub use systems::apply_transition;
pub use transition::{transition, GhostEffect, GhostTrigger, Transition};

use crate::schedules::SimulationSet;

/// AI Plugin
///
/// Регистрирует ghost системы в FixedUpdate.
/// Порядок выполнения:
/// 1. init_spawned_ghosts: SpawnPoint/LastPosition + вход в Chase (SimulationSet::Init)
/// 2. handle_player_contacts: контакты от движка → DamagePlayer / GhostCaptured
/// 3. replan_ghost_paths: периодический replan (chase / flee search / return to spawn)
/// 4. snap_ghost_rotation: поворот к 4 сторонам
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerContact>()
            .add_event::<DamagePlayer>()
            .add_event::<GhostCaptured>();

        app.add_systems(
            FixedUpdate,
            systems::init_spawned_ghosts.in_set(SimulationSet::Init),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::handle_player_contacts,
                systems::replan_ghost_paths,
                systems::snap_ghost_rotation,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Ai),
        );
    }
}
