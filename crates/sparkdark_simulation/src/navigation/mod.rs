//! Navigation: граница с navmesh движка
//!
//! ECS ответственность:
//! - решить КУДА идти (MovementCommand), с какой скоростью (MovementSpeed)
//! - спросить у navmesh ближайшую достижимую точку (`sample_position`)
//!
//! Движок ответственность:
//! - построение navmesh, pathfinding, движение агента по пути
//!
//! Headless прогоны используют `RectNavMesh` (прямоугольная арена + препятствия).

use bevy::prelude::*;

pub mod rect_mesh;

pub use rect_mesh::{NavRect, RectNavMesh};

/// Navmesh query контракт движка
///
/// Вызовы синхронные и должны вернуться в пределах того же тика.
pub trait NavigationService: Send + Sync {
    /// Ближайшая точка navmesh к `point` в пределах `radius` (None: не нашли)
    fn sample_position(&self, point: Vec3, radius: f32) -> Option<Vec3>;
}

/// Resource: активный navmesh сессии
///
/// Отсутствие ресурса не фатально: flee search логирует и оставляет прежний target.
#[derive(Resource)]
pub struct NavMesh(pub Box<dyn NavigationService>);

impl NavMesh {
    pub fn new(service: impl NavigationService + 'static) -> Self {
        Self(Box::new(service))
    }

    pub fn sample_position(&self, point: Vec3, radius: f32) -> Option<Vec3> {
        self.0.sample_position(point, radius)
    }
}
