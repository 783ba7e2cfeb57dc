//! Headless engine системы: движение к MovementCommand, блуждание игрока, контакты.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{Ghost, PlayerContact};
use crate::components::{Coin, MovementCommand, MovementSpeed, Player, PowerPellet};
use crate::navigation::NavMesh;
use crate::pickups::PickupContact;
use crate::DeterministicRng;

use super::HeadlessEngineConfig;

/// Ближе этого считаем что агент дошёл до target
const ARRIVAL_EPSILON: f32 = 0.05;

/// Система: игрок без цели (или дошедший) выбирает случайную точку арены
///
/// Точка прогоняется через navmesh: в препятствие не идём.
pub fn wander_player(
    mut players: Query<(&Transform, &mut MovementCommand), With<Player>>,
    config: Res<HeadlessEngineConfig>,
    nav: Option<Res<NavMesh>>,
    mut rng: ResMut<DeterministicRng>,
) {
    let bounds = config.wander_bounds;

    for (transform, mut command) in players.iter_mut() {
        let arrived = match command.target() {
            Some(target) => transform.translation.distance(target) < ARRIVAL_EPSILON,
            None => true,
        };
        if !arrived {
            continue;
        }

        let x = rng.rng.gen_range(bounds.min.x..=bounds.max.x);
        let z = rng.rng.gen_range(bounds.min.y..=bounds.max.y);
        let candidate = Vec3::new(x, transform.translation.y, z);

        let target = match nav.as_deref() {
            Some(nav) => nav.sample_position(candidate, config.wander_sample_radius),
            None => Some(candidate),
        };

        if let Some(target) = target {
            *command = MovementCommand::MoveToPosition { target };
        }
    }
}

/// Система: прямолинейное движение к target со скоростью MovementSpeed
///
/// Pathfinding здесь нет: его делает движок. Достигли → Idle.
pub fn move_agents(mut agents: Query<(&mut Transform, &mut MovementCommand, &MovementSpeed)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (mut transform, mut command, speed) in agents.iter_mut() {
        let Some(target) = command.target() else {
            continue;
        };

        let to_target = target - transform.translation;
        let distance = to_target.length();
        let step = speed.speed * delta;

        if distance <= step || distance < ARRIVAL_EPSILON {
            transform.translation = target;
            *command = MovementCommand::Idle;
        } else {
            transform.translation += to_target / distance * step;
        }
    }
}

/// Система: trigger коллайдеры движка в виде радиусов
///
/// Как и в движке: события идут каждый тик пока есть перекрытие.
pub fn detect_contacts(
    players: Query<&Transform, With<Player>>,
    ghosts: Query<(Entity, &Transform), (With<Ghost>, Without<Player>)>,
    pickups: Query<(Entity, &Transform), (Or<(With<Coin>, With<PowerPellet>)>, Without<Player>)>,
    config: Res<HeadlessEngineConfig>,
    mut player_contacts: EventWriter<PlayerContact>,
    mut pickup_contacts: EventWriter<PickupContact>,
) {
    for player in players.iter() {
        let position = player.translation;

        for (ghost, transform) in ghosts.iter() {
            if position.distance(transform.translation) <= config.ghost_contact_radius {
                player_contacts.write(PlayerContact { ghost });
            }
        }

        for (pickup, transform) in pickups.iter() {
            if position.distance(transform.translation) <= config.pickup_radius {
                pickup_contacts.write(PickupContact { pickup });
            }
        }
    }
}
