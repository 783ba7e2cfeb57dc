//! Headless engine substitute
//!
//! В игре движение по navmesh и trigger коллайдеры делает движок.
//! Для headless прогонов (бинарник, детерминизм тесты): простая замена:
//! агенты идут по прямой к MovementCommand, контакты: по радиусу,
//! игрок блуждает по случайным точкам (DeterministicRng).

use bevy::prelude::*;

pub mod arena;
pub mod systems;

pub use arena::{arena_navmesh, spawn_arena, ArenaLayout};

use crate::navigation::NavRect;
use crate::schedules::{session_in_progress, SimulationSet};

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HeadlessEngineConfig {
    /// Где игрок выбирает случайные цели
    pub wander_bounds: NavRect,
    pub wander_sample_radius: f32,
    pub ghost_contact_radius: f32,
    pub pickup_radius: f32,
}

impl Default for HeadlessEngineConfig {
    fn default() -> Self {
        Self {
            wander_bounds: NavRect::new(Vec2::splat(-10.0), Vec2::splat(10.0)),
            wander_sample_radius: 2.0,
            ghost_contact_radius: 0.8,
            pickup_radius: 0.5,
        }
    }
}

/// Headless Engine Plugin
///
/// Системы идут до gameplay sets: сначала движок двигает и сообщает
/// о контактах, затем симуляция реагирует в том же тике.
#[derive(Default)]
pub struct HeadlessEnginePlugin {
    pub config: HeadlessEngineConfig,
}

impl Plugin for HeadlessEnginePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config);

        app.add_systems(
            FixedUpdate,
            (
                systems::wander_player,
                systems::move_agents,
                systems::detect_contacts,
            )
                .chain()
                .before(SimulationSet::Init)
                .run_if(session_in_progress),
        );
    }
}
