//! Score systems: поимки, очки за pickup'ы, combo policy.

use bevy::prelude::*;

use crate::ai::GhostCaptured;
use crate::power::PowerModeChanged;
use crate::presentation::HudUpdate;

use super::ledger::{CoinLedger, ScoreLedger};
use super::{AddScore, RemoveCoins, ResetCombo};

/// Система: один раз выводит стартовые значения ledger'ов в HUD
pub fn announce_ledgers(
    mut announced: Local<bool>,
    score: Option<Res<ScoreLedger>>,
    coins: Option<Res<CoinLedger>>,
    mut hud: EventWriter<HudUpdate>,
) {
    if *announced {
        return;
    }
    *announced = true;

    if let Some(score) = score {
        hud.write(HudUpdate::Score(score.score()));
    }
    if let Some(coins) = coins {
        hud.write(HudUpdate::Coins {
            current: coins.coins(),
            target: coins.coins_to_win(),
        });
    }
}

/// Система: GhostCaptured → combo + очки
pub fn apply_ghost_captures(
    mut captures: EventReader<GhostCaptured>,
    ledger: Option<ResMut<ScoreLedger>>,
    mut hud: EventWriter<HudUpdate>,
) {
    let Some(mut ledger) = ledger else {
        for capture in captures.read() {
            crate::log_warning(&format!("Score: no ScoreLedger, capture of {:?} not scored", capture.ghost));
        }
        return;
    };

    for capture in captures.read() {
        let awarded = ledger.on_capture();
        crate::log_info(&format!(
            "💯 Ghost {:?} captured: +{} (combo x{})",
            capture.ghost,
            awarded,
            ledger.combo()
        ));
        hud.write(HudUpdate::Score(ledger.score()));
    }
}

/// Система: AddScore (pellets и прочие источники) → очки
pub fn apply_score_additions(
    mut additions: EventReader<AddScore>,
    ledger: Option<ResMut<ScoreLedger>>,
    mut hud: EventWriter<HudUpdate>,
) {
    let Some(mut ledger) = ledger else {
        for addition in additions.read() {
            crate::log_warning(&format!("Score: no ScoreLedger, +{} dropped", addition.0));
        }
        return;
    };

    for addition in additions.read() {
        ledger.add_score(addition.0);
        hud.write(HudUpdate::Score(ledger.score()));
    }
}

/// Система: сброс combo
///
/// ResetCombo: всегда; конец power mode: только если включён reset_combo_on_power_end.
pub fn apply_combo_policy(
    mut resets: EventReader<ResetCombo>,
    mut power_changes: EventReader<PowerModeChanged>,
    ledger: Option<ResMut<ScoreLedger>>,
) {
    let Some(mut ledger) = ledger else {
        resets.clear();
        power_changes.clear();
        return;
    };

    let mut reset = resets.read().count() > 0;

    let power_ended = power_changes
        .read()
        .any(|change| matches!(change, PowerModeChanged::Deactivated));
    if power_ended && ledger.resets_combo_on_power_end() {
        reset = true;
    }

    if reset && ledger.combo() > 0 {
        crate::log(&format!("Score: combo x{} reset", ledger.combo()));
        ledger.reset_combo();
    }
}

/// Система: RemoveCoins → CoinLedger (clamp в 0) + HUD
pub fn apply_coin_removals(
    mut removals: EventReader<RemoveCoins>,
    ledger: Option<ResMut<CoinLedger>>,
    mut hud: EventWriter<HudUpdate>,
) {
    let Some(mut ledger) = ledger else {
        for removal in removals.read() {
            crate::log_warning(&format!("Coins: no CoinLedger, -{} dropped", removal.0));
        }
        return;
    };

    for removal in removals.read() {
        ledger.remove_coins(removal.0);
        crate::log(&format!("Coins: -{} ({} left)", removal.0, ledger.coins()));
        hud.write(HudUpdate::Coins {
            current: ledger.coins(),
            target: ledger.coins_to_win(),
        });
    }
}
