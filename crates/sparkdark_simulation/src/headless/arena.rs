//! Тестовая арена для headless прогонов
//!
//! 20×20 поле, четыре блока-препятствия, игрок в центре,
//! ghost'ы по углам, монеты сеткой, pellets у углов.

use bevy::prelude::*;

use crate::components::{Coin, MovementCommand, MovementSpeed, PowerPellet};
use crate::config::SessionConfig;
use crate::navigation::{NavMesh, NavRect, RectNavMesh};
use crate::{spawn_ghost, spawn_player};

const HALF_SIZE: f32 = 10.0;
const PLAYER_SPEED: f32 = 4.0;
const COIN_SPACING: f32 = 2.0;

/// Entity арены (для отчётов и тестов)
#[derive(Debug, Clone)]
pub struct ArenaLayout {
    pub player: Entity,
    pub ghosts: Vec<Entity>,
    pub coins: usize,
    pub pellets: usize,
}

pub fn arena_navmesh() -> RectNavMesh {
    RectNavMesh::new(NavRect::new(Vec2::splat(-HALF_SIZE), Vec2::splat(HALF_SIZE)))
        .with_obstacle(NavRect::new(Vec2::new(-6.0, -6.0), Vec2::new(-3.0, -3.0)))
        .with_obstacle(NavRect::new(Vec2::new(3.0, -6.0), Vec2::new(6.0, -3.0)))
        .with_obstacle(NavRect::new(Vec2::new(-6.0, 3.0), Vec2::new(-3.0, 6.0)))
        .with_obstacle(NavRect::new(Vec2::new(3.0, 3.0), Vec2::new(6.0, 6.0)))
}

/// Спавнит арену в мир (NavMesh ресурс + все entity)
pub fn spawn_arena(world: &mut World, config: &SessionConfig) -> ArenaLayout {
    let nav = arena_navmesh();

    let player = spawn_player(world, Vec3::ZERO, &config.player);
    world.entity_mut(player).insert((
        MovementCommand::Idle,
        MovementSpeed { speed: PLAYER_SPEED },
    ));

    let corner = HALF_SIZE - 1.0;
    let ghosts: Vec<Entity> = [
        Vec3::new(-corner, 0.0, -corner),
        Vec3::new(corner, 0.0, -corner),
        Vec3::new(-corner, 0.0, corner),
        Vec3::new(corner, 0.0, corner),
    ]
    .into_iter()
    .map(|position| spawn_ghost(world, position, config.ghost.clone()))
    .collect();

    let pellet_offset = corner - 2.0;

    let mut coins = 0;
    let steps = (2.0 * (HALF_SIZE - 1.0) / COIN_SPACING) as i32;
    for ix in 0..=steps {
        for iz in 0..=steps {
            let x = -HALF_SIZE + 1.0 + ix as f32 * COIN_SPACING;
            let z = -HALF_SIZE + 1.0 + iz as f32 * COIN_SPACING;
            let point = Vec2::new(x, z);

            // Не в препятствиях, не под игроком, не на местах pellets/ghost'ов
            if !nav.is_walkable(point) || point.length() < 1.0 || (z.abs() >= corner && x.abs() >= pellet_offset) {
                continue;
            }

            world.spawn((Coin::default(), Transform::from_xyz(x, 0.0, z)));
            coins += 1;
        }
    }

    let mut pellets = 0;
    for (x, z) in [
        (-pellet_offset, -corner),
        (pellet_offset, -corner),
        (-pellet_offset, corner),
        (pellet_offset, corner),
    ] {
        world.spawn((PowerPellet::default(), Transform::from_xyz(x, 0.0, z)));
        pellets += 1;
    }

    world.insert_resource(NavMesh::new(nav));

    crate::log_info(&format!(
        "🗺️ Arena ready: {} ghosts, {} coins, {} pellets",
        ghosts.len(),
        coins,
        pellets
    ));

    ArenaLayout {
        player,
        ghosts,
        coins,
        pellets,
    }
}
