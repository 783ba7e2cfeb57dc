//! AI Events: контакты от движка и исходящие события ghost FSM
//!
//! Движок (trigger collider) → PlayerContact → ghost FSM
//! Ghost FSM → DamagePlayer / GhostCaptured → player / score collaborators

use bevy::prelude::*;

/// Ghost пересёкся с игроком
///
/// Движок шлёт каждый кадр пока коллайдеры перекрываются,
/// реакции обязаны быть идемпотентными.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerContact {
    pub ghost: Entity,
}

/// Ghost в Chase задел игрока → игрок теряет жизнь (если не неуязвим)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamagePlayer {
    pub source: Entity,
}

/// Ghost в Flee пойман игроком (Flee → Eaten)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostCaptured {
    pub ghost: Entity,
}
