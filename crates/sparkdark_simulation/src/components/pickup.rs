//! Pickup компоненты: монеты и power pellets

use bevy::prelude::*;

/// Монета (collect → CoinLedger)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
#[require(Transform)]
pub struct Coin {
    pub value: u32,
}

impl Default for Coin {
    fn default() -> Self {
        Self { value: 1 }
    }
}

/// Power pellet (collect → power mode + очки)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(Transform)]
pub struct PowerPellet {
    /// Длительность power mode (секунды)
    pub duration: f32,
    pub score_value: u32,
}

impl Default for PowerPellet {
    fn default() -> Self {
        Self {
            duration: 10.0,
            score_value: 50,
        }
    }
}
