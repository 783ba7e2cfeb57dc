//! Player systems: спавн, урон от ghost'ов, неуязвимость.

use bevy::prelude::*;

use crate::ai::DamagePlayer;
use crate::components::{Invincibility, Player, PlayerLives, RespawnPoint};
use crate::presentation::HudUpdate;
use crate::scoring::ScoreLedger;
use crate::session::{GameOver, SessionOutcome};

/// Система: новый игрок → RespawnPoint (из Transform, если не задан) + HUD жизней
pub fn init_spawned_players(
    mut commands: Commands,
    players: Query<(Entity, &Transform, &PlayerLives, Option<&RespawnPoint>), Added<Player>>,
    mut hud: EventWriter<HudUpdate>,
) {
    for (entity, transform, lives, respawn) in players.iter() {
        if respawn.is_none() {
            commands.entity(entity).insert(RespawnPoint(transform.translation));
        }

        hud.write(HudUpdate::Lives(lives.lives));
        crate::log_info(&format!(
            "🙂 Player {:?} spawned at {:?} ({} lives)",
            entity, transform.translation, lives.lives
        ));
    }
}

/// Система: DamagePlayer → минус жизнь
///
/// - неуязвим → игнор
/// - жизни остались → телепорт на RespawnPoint + старт неуязвимости
/// - жизни кончились → GameOver, SessionOutcome::Lost
///
/// Несколько DamagePlayer за тик снимают максимум одну жизнь:
/// первый запускает неуязвимость, остальные в неё упираются.
pub fn apply_player_damage(
    mut damage_events: EventReader<DamagePlayer>,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut PlayerLives,
            &mut Invincibility,
            Option<&RespawnPoint>,
        ),
        With<Player>,
    >,
    ledger: Option<Res<ScoreLedger>>,
    mut outcome: Option<ResMut<SessionOutcome>>,
    mut hud: EventWriter<HudUpdate>,
    mut game_over: EventWriter<GameOver>,
) {
    if damage_events.is_empty() {
        return;
    }

    let Ok((entity, mut transform, mut lives, mut invincibility, respawn)) = players.single_mut() else {
        crate::log_warning("DamagePlayer: no single Player entity, damage dropped");
        damage_events.clear();
        return;
    };

    for damage in damage_events.read() {
        if invincibility.is_active() || lives.lives == 0 {
            continue;
        }

        let has_lives = lives.lose_life();
        hud.write(HudUpdate::Lives(lives.lives));

        if has_lives {
            if let Some(respawn) = respawn {
                transform.translation = respawn.0;
            }
            invincibility.start();
            crate::log_info(&format!(
                "💥 Player {:?} hit by {:?}: {} lives left, invincible for {:.1}s",
                entity, damage.source, lives.lives, invincibility.duration
            ));
        } else {
            let final_score = ledger.as_deref().map_or(0, ScoreLedger::score);
            crate::log_info(&format!("☠️ Game Over (score {})", final_score));
            game_over.write(GameOver { final_score });

            if let Some(outcome) = outcome.as_deref_mut() {
                *outcome = SessionOutcome::Lost;
            }
        }
    }
}

/// Система: countdown неуязвимости
pub fn tick_invincibility(mut players: Query<&mut Invincibility, With<Player>>, time: Res<Time>) {
    let delta = time.delta_secs();

    for mut invincibility in players.iter_mut() {
        invincibility.tick(delta);
    }
}
