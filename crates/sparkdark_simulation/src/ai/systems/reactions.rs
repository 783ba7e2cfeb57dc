//! Ghost reaction systems (контакт с игроком, snap rotation).

use bevy::prelude::*;

use crate::ai::rotation::snap_rotation_step;
use crate::ai::transition::{transition, GhostEffect, GhostTrigger};
use crate::ai::{DamagePlayer, Ghost, GhostCaptured, GhostConfig, GhostState, GhostVisual, LastPosition, PlayerContact};
use crate::components::{MovementSpeed, Player};

use super::fsm::apply_transition;

/// System: реакция ghost'а на контакт с игроком
///
/// - Chase: игрок получает урон (DamagePlayer), ghost не меняется
/// - Flee: Flee → Eaten + GhostCaptured (score считает combo)
/// - Eaten: игнор
///
/// PlayerContact приходит каждый overlapping кадр: повторы безопасны,
/// т.к. Eaten игнорирует контакт, а неуязвимость игрока гасит повторный урон.
pub fn handle_player_contacts(
    mut contacts: EventReader<PlayerContact>,
    mut ghosts: Query<
        (&GhostConfig, &mut GhostState, &mut MovementSpeed, Option<&mut GhostVisual>),
        With<Ghost>,
    >,
    mut damage_events: EventWriter<DamagePlayer>,
    mut captured_events: EventWriter<GhostCaptured>,
) {
    for contact in contacts.read() {
        let Ok((config, mut state, mut speed, mut visual)) = ghosts.get_mut(contact.ghost) else {
            crate::log_warning(&format!("PlayerContact: {:?} is not a ghost", contact.ghost));
            continue;
        };

        let t = transition(*state, GhostTrigger::PlayerContact, config);
        let outward = apply_transition(contact.ghost, t, &mut state, &mut speed, visual.as_deref_mut());

        for effect in outward {
            match effect {
                GhostEffect::DamagePlayer => {
                    damage_events.write(DamagePlayer {
                        source: contact.ghost,
                    });
                }
                GhostEffect::Captured => {
                    crate::log_info(&format!("🍽️ Ghost {:?} captured", contact.ghost));
                    captured_events.write(GhostCaptured {
                        ghost: contact.ghost,
                    });
                }
                GhostEffect::SetSpeed(_) | GhostEffect::ApplyMaterial(_) => {}
            }
        }
    }
}

/// System: snap rotation ghost'ов к 4 сторонам
///
/// Движение за тик = позиция − LastPosition. Двигаемся → плавно поворачиваем
/// к snapped yaw. LastPosition обновляется каждый тик.
pub fn snap_ghost_rotation(
    mut ghosts: Query<(&mut Transform, &mut LastPosition, &GhostConfig), With<Ghost>>,
    players: Query<(), With<Player>>,
    time: Res<Time>,
) {
    if players.is_empty() {
        return;
    }

    let delta = time.delta_secs();

    for (mut transform, mut last_position, config) in ghosts.iter_mut() {
        let position = transform.translation;

        if config.snap_rotation {
            let movement = position - last_position.0;
            if let Some(rotation) = snap_rotation_step(transform.rotation, movement, config.rotation_speed, delta) {
                transform.rotation = rotation;
            }
        }

        last_position.0 = position;
    }
}
