//! Интеграционные тесты ghost FSM: поимка, combo, возврат на спавн, урон игроку

use bevy::prelude::*;
use std::time::Duration;

use sparkdark_simulation::headless::arena_navmesh;
use sparkdark_simulation::{
    create_headless_app, spawn_ghost, spawn_player, step_simulation, ActivatePowerMode, DamagePlayer, GhostCaptured,
    GhostConfig, GhostState, LastPosition, MovementCommand, MovementSpeed, NavMesh, PlayerConfig, PlayerContact,
    ScoreLedger, SpawnPoint,
};

const STEP: Duration = Duration::from_millis(500);

fn state(app: &App, ghost: Entity) -> GhostState {
    *app.world().get::<GhostState>(ghost).unwrap()
}

fn set_position(app: &mut App, entity: Entity, position: Vec3) {
    app.world_mut().get_mut::<Transform>(entity).unwrap().translation = position;
}

fn event_count<E: Event>(app: &App) -> usize {
    app.world().resource::<Events<E>>().iter_current_update_events().count()
}

/// Игрок + ghost'ы, init тик и power mode
fn setup_fleeing(ghost_positions: &[Vec3]) -> (App, Entity, Vec<Entity>) {
    let mut app = create_headless_app(42);
    let world = app.world_mut();
    world.insert_resource(NavMesh::new(arena_navmesh()));
    let player = spawn_player(world, Vec3::ZERO, &PlayerConfig::default());
    let ghosts = ghost_positions
        .iter()
        .map(|&position| spawn_ghost(world, position, GhostConfig::default()))
        .collect();

    step_simulation(&mut app, STEP);
    app.world_mut().send_event(ActivatePowerMode { duration: 30.0 });
    step_simulation(&mut app, STEP);

    (app, player, ghosts)
}

#[test]
fn test_spawn_point_recorded_from_initial_transform() {
    let (app, _, ghosts) = setup_fleeing(&[Vec3::new(8.0, 0.0, 8.0)]);
    assert_eq!(
        app.world().get::<SpawnPoint>(ghosts[0]).unwrap().0,
        Vec3::new(8.0, 0.0, 8.0)
    );
}

#[test]
fn test_capture_combo_scores_base_then_double() {
    let (mut app, _, ghosts) = setup_fleeing(&[Vec3::new(8.0, 0.0, 8.0), Vec3::new(-8.0, 0.0, 8.0)]);
    for &ghost in &ghosts {
        set_position(&mut app, ghost, Vec3::new(0.0, 0.0, -9.0));
    }

    app.world_mut().send_event(PlayerContact { ghost: ghosts[0] });
    step_simulation(&mut app, STEP);
    assert_eq!(state(&app, ghosts[0]), GhostState::Eaten);
    assert_eq!(app.world().resource::<ScoreLedger>().score(), 200);
    assert_eq!(event_count::<GhostCaptured>(&app), 1);

    app.world_mut().send_event(PlayerContact { ghost: ghosts[1] });
    step_simulation(&mut app, STEP);

    let ledger = app.world().resource::<ScoreLedger>();
    assert_eq!(ledger.combo(), 2);
    assert_eq!(ledger.score(), 200 + 400);
    assert_eq!(event_count::<GhostCaptured>(&app), 1);
}

#[test]
fn test_repeated_contacts_capture_once() {
    let (mut app, _, ghosts) = setup_fleeing(&[Vec3::new(8.0, 0.0, 8.0)]);
    set_position(&mut app, ghosts[0], Vec3::new(0.0, 0.0, -9.0));

    // Движок шлёт контакт каждый кадр перекрытия
    for _ in 0..3 {
        app.world_mut().send_event(PlayerContact { ghost: ghosts[0] });
    }
    step_simulation(&mut app, STEP);
    assert_eq!(event_count::<GhostCaptured>(&app), 1);
    assert_eq!(event_count::<DamagePlayer>(&app), 0);

    app.world_mut().send_event(PlayerContact { ghost: ghosts[0] });
    step_simulation(&mut app, STEP);

    assert_eq!(state(&app, ghosts[0]), GhostState::Eaten);
    assert_eq!(event_count::<GhostCaptured>(&app), 0);
    assert_eq!(event_count::<DamagePlayer>(&app), 0); // Eaten игнорирует контакт
    assert_eq!(app.world().resource::<ScoreLedger>().score(), 200);
}

#[test]
fn test_eaten_returns_to_chase_only_within_tolerance() {
    let spawn = Vec3::new(8.0, 0.0, 8.0);
    let (mut app, _, ghosts) = setup_fleeing(&[spawn]);
    let ghost = ghosts[0];
    set_position(&mut app, ghost, Vec3::new(0.0, 0.0, -9.0));

    app.world_mut().send_event(PlayerContact { ghost });
    step_simulation(&mut app, STEP);
    step_simulation(&mut app, STEP);

    // Далеко от спавна: Eaten, идём на SpawnPoint
    assert_eq!(state(&app, ghost), GhostState::Eaten);
    assert_eq!(app.world().get::<MovementCommand>(ghost).unwrap().target(), Some(spawn));

    // 1.5 от спавна: ещё не дошёл
    set_position(&mut app, ghost, spawn + Vec3::new(1.5, 0.0, 0.0));
    step_simulation(&mut app, STEP);
    assert_eq!(state(&app, ghost), GhostState::Eaten);

    // 0.5 от спавна: дошёл
    set_position(&mut app, ghost, spawn + Vec3::new(0.5, 0.0, 0.0));
    step_simulation(&mut app, STEP);
    assert_eq!(state(&app, ghost), GhostState::Chase);
    assert_eq!(app.world().get::<MovementSpeed>(ghost).unwrap().speed, 3.5);

    // Power mode ещё идёт, но вернувшийся ghost в Flee сам не уходит
    step_simulation(&mut app, STEP);
    assert_eq!(state(&app, ghost), GhostState::Chase);
}

#[test]
fn test_chase_contact_damages_player() {
    let mut app = create_headless_app(42);
    let world = app.world_mut();
    spawn_player(world, Vec3::ZERO, &PlayerConfig::default());
    let ghost = spawn_ghost(world, Vec3::new(0.5, 0.0, 0.0), GhostConfig::default());
    step_simulation(&mut app, STEP);

    app.world_mut().send_event(PlayerContact { ghost });
    step_simulation(&mut app, STEP);

    assert_eq!(state(&app, ghost), GhostState::Chase);
    let damage: Vec<DamagePlayer> = app
        .world()
        .resource::<Events<DamagePlayer>>()
        .iter_current_update_events()
        .copied()
        .collect();
    assert_eq!(damage, vec![DamagePlayer { source: ghost }]);
}

#[test]
fn test_chase_targets_player_position() {
    let mut app = create_headless_app(42);
    let world = app.world_mut();
    let player = spawn_player(world, Vec3::new(2.0, 0.0, 3.0), &PlayerConfig::default());
    let ghost = spawn_ghost(world, Vec3::new(8.0, 0.0, 8.0), GhostConfig::default());

    step_simulation(&mut app, STEP);
    assert_eq!(
        app.world().get::<MovementCommand>(ghost).unwrap().target(),
        Some(Vec3::new(2.0, 0.0, 3.0))
    );

    set_position(&mut app, player, Vec3::new(-4.0, 0.0, 1.0));
    step_simulation(&mut app, STEP);
    assert_eq!(
        app.world().get::<MovementCommand>(ghost).unwrap().target(),
        Some(Vec3::new(-4.0, 0.0, 1.0))
    );
}

#[test]
fn test_flee_destination_moves_away_from_player() {
    let ghost_position = Vec3::new(0.0, 0.0, 2.0);
    let (mut app, _, ghosts) = setup_fleeing(&[ghost_position]);
    step_simulation(&mut app, STEP);

    let target = app
        .world()
        .get::<MovementCommand>(ghosts[0])
        .unwrap()
        .target()
        .expect("flee destination");
    assert!(target.distance(Vec3::ZERO) > ghost_position.distance(Vec3::ZERO));
}

#[test]
fn test_no_player_leaves_ghosts_idle() {
    let mut app = create_headless_app(42);
    let ghost = spawn_ghost(app.world_mut(), Vec3::new(3.0, 0.0, 3.0), GhostConfig::default());

    for _ in 0..5 {
        step_simulation(&mut app, STEP);
    }

    assert_eq!(state(&app, ghost), GhostState::Chase);
    assert_eq!(*app.world().get::<MovementCommand>(ghost).unwrap(), MovementCommand::Idle);
}

#[test]
fn test_flee_without_navmesh_keeps_previous_destination() {
    let mut app = create_headless_app(42);
    let world = app.world_mut();
    let player = spawn_player(world, Vec3::new(2.0, 0.0, 3.0), &PlayerConfig::default());
    let ghost = spawn_ghost(world, Vec3::new(8.0, 0.0, 8.0), GhostConfig::default());

    // Chase: destination = игрок
    step_simulation(&mut app, STEP);
    let chase_target = Some(Vec3::new(2.0, 0.0, 3.0));
    assert_eq!(app.world().get::<MovementCommand>(ghost).unwrap().target(), chase_target);

    app.world_mut().send_event(ActivatePowerMode { duration: 30.0 });
    set_position(&mut app, player, Vec3::new(-4.0, 0.0, 1.0));

    // NavMesh нет: flee search невозможен, destination не трогаем
    for _ in 0..3 {
        step_simulation(&mut app, STEP);
        assert_eq!(state(&app, ghost), GhostState::Flee);
        assert_eq!(app.world().get::<MovementCommand>(ghost).unwrap().target(), chase_target);
    }
}

#[test]
fn test_snap_rotation_follows_movement_each_tick() {
    let mut app = create_headless_app(42);
    let world = app.world_mut();
    spawn_player(world, Vec3::new(-9.0, 0.0, -9.0), &PlayerConfig::default());
    let start = Vec3::new(0.0, 0.0, 5.0);
    let ghost = spawn_ghost(world, start, GhostConfig::default());

    step_simulation(&mut app, STEP);
    assert_eq!(app.world().get::<LastPosition>(ghost).unwrap().0, start);
    assert_eq!(app.world().get::<Transform>(ghost).unwrap().rotation, Quat::IDENTITY);

    // Движение по +X → yaw 180°
    let moved = start + Vec3::X;
    set_position(&mut app, ghost, moved);
    step_simulation(&mut app, STEP);

    let transform = app.world().get::<Transform>(ghost).unwrap();
    assert!(transform.rotation.angle_between(Quat::from_rotation_y(180f32.to_radians())) < 1e-3);
    assert_eq!(app.world().get::<LastPosition>(ghost).unwrap().0, moved);

    // Стоим на месте: поворот не меняется
    let rotation = transform.rotation;
    step_simulation(&mut app, STEP);
    assert_eq!(app.world().get::<Transform>(ghost).unwrap().rotation, rotation);

    // Движение по -Z → yaw 270°
    let moved_again = moved - Vec3::Z * 2.0;
    set_position(&mut app, ghost, moved_again);
    step_simulation(&mut app, STEP);

    assert!(
        app.world()
            .get::<Transform>(ghost)
            .unwrap()
            .rotation
            .angle_between(Quat::from_rotation_y(270f32.to_radians()))
            < 1e-3
    );
    assert_eq!(app.world().get::<LastPosition>(ghost).unwrap().0, moved_again);
}
