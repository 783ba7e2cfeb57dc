//! Pickups module: монеты (→ CoinLedger, победа) и power pellets (→ power mode + очки)
//!
//! Движок шлёт PickupContact когда игрок касается pickup'а.

use bevy::prelude::*;

pub mod systems;

use crate::schedules::SimulationSet;

/// Игрок коснулся pickup'а (Coin или PowerPellet)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupContact {
    pub pickup: Entity,
}

pub struct PickupsPlugin;

impl Plugin for PickupsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PickupContact>();

        app.add_systems(
            FixedUpdate,
            systems::collect_pickups.in_set(SimulationSet::Pickups),
        );
    }
}
