//! Порядок gameplay систем внутри FixedUpdate
//!
//! Каждый доменный plugin кладёт системы в свой SystemSet,
//! SimulationPlugin выстраивает sets в цепочку и гейтит их SessionOutcome.

use bevy::prelude::*;

use crate::session::SessionOutcome;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Новые ghost'ы/игроки снимают точки спавна с Transform
    Init,
    /// Pickup контакты → монеты, power pellets
    Pickups,
    /// Power mode countdown + broadcast Flee/Chase
    PowerMode,
    /// Ghost FSM: контакты, replan, rotation
    Ai,
    /// Урон игроку, неуязвимость
    Player,
    /// Очки, combo, HUD
    Score,
}

/// Run condition: сессия ещё не решена (не выиграна и не проиграна)
///
/// Без ресурса считаем что игра идёт.
pub fn session_in_progress(outcome: Option<Res<SessionOutcome>>) -> bool {
    outcome.map_or(true, |o| *o == SessionOutcome::Playing)
}

pub fn configure_simulation_sets(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            SimulationSet::Init,
            SimulationSet::Pickups,
            SimulationSet::PowerMode,
            SimulationSet::Ai,
            SimulationSet::Player,
            SimulationSet::Score,
        )
            .chain()
            // Условие на каждый set: победа в Pickups сразу останавливает остаток тика
            .distributive_run_if(session_in_progress),
    );
}
