//! Pickup collection system.

use bevy::prelude::*;

use crate::components::{Coin, PowerPellet};
use crate::power::ActivatePowerMode;
use crate::presentation::HudUpdate;
use crate::scoring::{AddScore, CoinLedger};
use crate::session::{GameWon, SessionOutcome};

use super::PickupContact;

/// Система: PickupContact → эффект pickup'а + despawn
///
/// - Coin: CoinLedger += value, HUD; достигли цели → GameWon + SessionOutcome::Won
/// - PowerPellet: ActivatePowerMode + AddScore
///
/// Движок шлёт контакт пока коллайдеры перекрываются: повторы одного
/// pickup'а в тике собираются один раз, despawn убирает его из следующих тиков.
pub fn collect_pickups(
    mut commands: Commands,
    mut contacts: EventReader<PickupContact>,
    coins: Query<&Coin>,
    pellets: Query<&PowerPellet>,
    mut coin_ledger: Option<ResMut<CoinLedger>>,
    mut outcome: Option<ResMut<SessionOutcome>>,
    mut power_events: EventWriter<ActivatePowerMode>,
    mut score_events: EventWriter<AddScore>,
    mut hud: EventWriter<HudUpdate>,
    mut won_events: EventWriter<GameWon>,
) {
    let mut collected: Vec<Entity> = Vec::new();

    for contact in contacts.read() {
        let pickup = contact.pickup;
        if collected.contains(&pickup) {
            continue;
        }

        if let Ok(coin) = coins.get(pickup) {
            collected.push(pickup);
            commands.entity(pickup).despawn();

            let Some(ledger) = coin_ledger.as_deref_mut() else {
                crate::log_warning(&format!("Coin {:?}: no CoinLedger, value {} lost", pickup, coin.value));
                continue;
            };

            let just_won = ledger.add_coins(coin.value);
            hud.write(HudUpdate::Coins {
                current: ledger.coins(),
                target: ledger.coins_to_win(),
            });

            if just_won {
                crate::log_info(&format!("🏆 All coins collected ({})", ledger.coins()));
                won_events.write(GameWon {
                    coins: ledger.coins(),
                });
                if let Some(outcome) = outcome.as_deref_mut() {
                    *outcome = SessionOutcome::Won;
                }
            }
        } else if let Ok(pellet) = pellets.get(pickup) {
            collected.push(pickup);
            commands.entity(pickup).despawn();

            crate::log_info(&format!(
                "🍒 Power pellet {:?}: {:.1}s power mode, +{}",
                pickup, pellet.duration, pellet.score_value
            ));
            power_events.write(ActivatePowerMode {
                duration: pellet.duration,
            });
            score_events.write(AddScore(pellet.score_value));
        } else {
            // Уже собран (despawn) или не pickup
            crate::log(&format!("PickupContact: {:?} is not a pickup, ignored", pickup));
        }
    }
}
