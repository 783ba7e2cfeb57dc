//! Ghost FSM systems (init, periodic replan, применение переходов).

use bevy::prelude::*;

use crate::ai::flee::find_flee_destination;
use crate::ai::transition::{transition, GhostEffect, GhostTrigger, Transition};
use crate::ai::{Ghost, GhostConfig, GhostState, GhostVisual, LastPosition, PathReplanTimer, SpawnPoint};
use crate::components::{set_destination, MovementCommand, MovementSpeed, Player};
use crate::navigation::NavMesh;

/// Применяет Transition к компонентам ghost'а
///
/// Внутренние effects (скорость, материал) применяются сразу,
/// исходящие (DamagePlayer, Captured) возвращаются вызывающей системе.
pub fn apply_transition(
    entity: Entity,
    transition: Transition,
    state: &mut GhostState,
    speed: &mut MovementSpeed,
    mut visual: Option<&mut GhostVisual>,
) -> Vec<GhostEffect> {
    if transition.rejected {
        crate::log_warning(&format!(
            "Ghost {:?}: request rejected in state {}",
            entity,
            state.as_str()
        ));
    }

    if transition.changed_from(*state) {
        crate::log(&format!(
            "👻 Ghost {:?}: {} → {}",
            entity,
            state.as_str(),
            transition.next.as_str()
        ));
    }
    *state = transition.next;

    let mut outward = Vec::new();
    for effect in transition.effects {
        if effect.is_outward() {
            outward.push(effect);
            continue;
        }

        match effect {
            GhostEffect::SetSpeed(value) => speed.speed = value,
            GhostEffect::ApplyMaterial(material) => match visual.as_deref_mut() {
                Some(visual) => visual.material = Some(material),
                None => crate::log_warning(&format!(
                    "Ghost {:?}: no GhostVisual, material {:?} skipped",
                    entity, material.0
                )),
            },
            GhostEffect::DamagePlayer | GhostEffect::Captured => {}
        }
    }
    outward
}

/// Система: инициализация новых ghost'ов
///
/// SpawnPoint/LastPosition снимаются с Transform (если SpawnPoint не задан заранее),
/// затем вход в Chase выставляет скорость и материал.
pub fn init_spawned_ghosts(
    mut commands: Commands,
    mut ghosts: Query<
        (
            Entity,
            &Transform,
            &GhostConfig,
            Option<&SpawnPoint>,
            &mut GhostState,
            &mut MovementSpeed,
            Option<&mut GhostVisual>,
        ),
        Added<Ghost>,
    >,
) {
    for (entity, transform, config, spawn, mut state, mut speed, mut visual) in ghosts.iter_mut() {
        let position = transform.translation;

        let mut entity_commands = commands.entity(entity);
        entity_commands.insert(LastPosition(position));
        if spawn.is_none() {
            entity_commands.insert(SpawnPoint(position));
        }

        let t = transition(*state, GhostTrigger::Request(GhostState::Chase), config);
        apply_transition(entity, t, &mut state, &mut speed, visual.as_deref_mut());

        crate::log_info(&format!("👻 Ghost {:?} spawned at {:?}", entity, position));
    }
}

/// Система: периодический replan пути ghost'ов
///
/// Таймер каждого ghost'а копит delta; при достижении path_update_interval:
/// - Chase: destination = позиция игрока
/// - Flee: flee search по navmesh (провал всех уровней → прежний destination)
/// - Eaten: destination = SpawnPoint, внутри tolerance → Chase
///
/// Без игрока AI стоит (прежние команды не трогаем).
pub fn replan_ghost_paths(
    mut ghosts: Query<
        (
            Entity,
            &Transform,
            &GhostConfig,
            &SpawnPoint,
            &mut GhostState,
            &mut PathReplanTimer,
            &mut MovementCommand,
            &mut MovementSpeed,
            Option<&mut GhostVisual>,
        ),
        With<Ghost>,
    >,
    players: Query<&Transform, (With<Player>, Without<Ghost>)>,
    nav: Option<Res<NavMesh>>,
    time: Res<Time>,
    mut missing_player_logged: Local<bool>,
    mut missing_nav_logged: Local<bool>,
) {
    let Ok(player_transform) = players.single() else {
        if !*missing_player_logged {
            crate::log_warning("Ghost AI: no single Player entity, agents idle");
            *missing_player_logged = true;
        }
        return;
    };
    *missing_player_logged = false;

    let player_pos = player_transform.translation;
    let delta = time.delta_secs();

    for (entity, transform, config, spawn, mut state, mut timer, mut command, mut speed, mut visual) in
        ghosts.iter_mut()
    {
        if !timer.tick(delta, config.path_update_interval) {
            continue;
        }

        let position = transform.translation;
        let current = *state;

        match current {
            GhostState::Chase => {
                set_destination(&mut command, player_pos);
            }

            GhostState::Flee => {
                let Some(nav) = nav.as_deref() else {
                    if !*missing_nav_logged {
                        crate::log_warning("Ghost AI: no NavMesh resource, flee keeps previous destination");
                        *missing_nav_logged = true;
                    }
                    continue;
                };

                match find_flee_destination(nav.0.as_ref(), position, player_pos, config.flee_distance) {
                    Some(found) => set_destination(&mut command, found.position),
                    None => crate::log(&format!(
                        "Ghost {:?}: flee search failed on all tiers, keeping destination",
                        entity
                    )),
                }
            }

            GhostState::Eaten => {
                set_destination(&mut command, spawn.0);

                if position.distance(spawn.0) < config.spawn_arrival_tolerance {
                    let t = transition(current, GhostTrigger::ReachedSpawn, config);
                    apply_transition(entity, t, &mut state, &mut speed, visual.as_deref_mut());
                }
            }

            GhostState::Respawning => {
                let t = transition(current, GhostTrigger::Request(GhostState::Respawning), config);
                apply_transition(entity, t, &mut state, &mut speed, visual.as_deref_mut());
            }
        }
    }
}
