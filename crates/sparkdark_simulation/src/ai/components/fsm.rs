//! Ghost FSM components (state, config, spawn point, replan timer).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{MovementCommand, MovementSpeed};

/// Множитель скорости в Eaten (возвращаемся на спавн быстрее)
pub const EATEN_SPEED_MULTIPLIER: f32 = 1.5;

/// Ghost: маркер врага, управляемого FSM
///
/// Required Components дают FSM всё необходимое кроме SpawnPoint/LastPosition,
/// которые снимаются с Transform при первом тике (`init_spawned_ghosts`).
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    GhostState,
    GhostConfig,
    PathReplanTimer,
    GhostVisual,
    MovementCommand,
    MovementSpeed,
    Transform
)]
pub struct Ghost;

/// Ghost FSM состояния
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GhostState {
    /// Chase: преследуем игрока (начальное состояние)
    #[default]
    Chase,

    /// Flee: power mode, убегаем от игрока
    Flee,

    /// Eaten: съеден, возвращаемся на SpawnPoint
    Eaten,

    /// Respawning: мгновенный pass-through обратно в Chase, между тиками не живёт
    Respawning,
}

impl GhostState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GhostState::Chase => "Chase",
            GhostState::Flee => "Flee",
            GhostState::Eaten => "Eaten",
            GhostState::Respawning => "Respawning",
        }
    }
}

/// Ссылка на материал движка (рендер резолвит id → ресурс)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub String);

impl MaterialId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Параметры ghost AI (per-ghost tunables)
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostConfig {
    /// Скорость в Chase (м/с)
    pub chase_speed: f32,
    /// Скорость в Flee (м/с)
    pub flee_speed: f32,
    /// Как часто перестраивать путь (секунды)
    pub path_update_interval: f32,
    /// Дистанция, на которую пытаемся убежать от игрока
    pub flee_distance: f32,
    /// Snap поворота к 90° (4 направления)
    pub snap_rotation: bool,
    /// Скорость интерполяции поворота
    pub rotation_speed: f32,
    /// Радиус "дошёл до спавна" для Eaten → Chase
    pub spawn_arrival_tolerance: f32,
    pub chase_material: Option<MaterialId>,
    pub flee_material: Option<MaterialId>,
    pub eaten_material: Option<MaterialId>,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            chase_speed: 3.5,
            flee_speed: 2.5,
            path_update_interval: 0.2,
            flee_distance: 10.0,
            snap_rotation: true,
            rotation_speed: 10.0,
            spawn_arrival_tolerance: 1.0,
            chase_material: None,
            flee_material: None,
            eaten_material: None,
        }
    }
}

impl GhostConfig {
    /// Скорость агента для состояния
    pub fn speed_for(&self, state: GhostState) -> f32 {
        match state {
            GhostState::Chase | GhostState::Respawning => self.chase_speed,
            GhostState::Flee => self.flee_speed,
            GhostState::Eaten => self.chase_speed * EATEN_SPEED_MULTIPLIER,
        }
    }

    pub fn material_for(&self, state: GhostState) -> Option<&MaterialId> {
        match state {
            GhostState::Chase | GhostState::Respawning => self.chase_material.as_ref(),
            GhostState::Flee => self.flee_material.as_ref(),
            GhostState::Eaten => self.eaten_material.as_ref(),
        }
    }
}

/// Точка спавна (immutable после инициализации)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint(pub Vec3);

/// Позиция на прошлом тике (для направления движения → snap rotation)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct LastPosition(pub Vec3);

/// Таймер перепланирования пути
///
/// Периодический: при достижении интервала сбрасывается в 0 (остаток не переносится).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PathReplanTimer {
    pub elapsed: f32,
}

impl PathReplanTimer {
    /// Накапливает delta, возвращает true когда пора перепланировать
    pub fn tick(&mut self, delta: f32, interval: f32) -> bool {
        self.elapsed += delta;
        if self.elapsed >= interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}

/// Текущий материал рендера (движок читает и применяет)
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct GhostVisual {
    pub material: Option<MaterialId>,
}
