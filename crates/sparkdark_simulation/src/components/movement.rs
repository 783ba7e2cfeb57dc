//! Movement компоненты: команда навигации и скорость агента

use bevy::prelude::*;

/// Команда движения для агента (выполняется NavMeshAgent движка)
///
/// Архитектура:
/// - ECS система пишет MovementCommand (high-level intent, "SetDestination")
/// - движок читает и конвертирует в target своего navmesh агента
/// - Transform остаётся за движком, ECS только читает позицию
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum MovementCommand {
    /// Стоять на месте (target не выставлен)
    #[default]
    Idle,
    /// Двигаться к позиции (world coordinates)
    MoveToPosition { target: Vec3 },
}

impl MovementCommand {
    pub fn target(&self) -> Option<Vec3> {
        match self {
            MovementCommand::Idle => None,
            MovementCommand::MoveToPosition { target } => Some(*target),
        }
    }
}

/// Скорость движения агента (метры/сек)
///
/// Движок применяет к своему navmesh агенту (`agent.speed`)
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 3.5 }
    }
}

/// Helper: выставить destination, не трогая компонент если target не изменился
///
/// Иначе Changed<MovementCommand> спамит движку каждый replan.
pub fn set_destination(command: &mut Mut<MovementCommand>, target: Vec3) {
    if command.target() != Some(target) {
        **command = MovementCommand::MoveToPosition { target };
    }
}
