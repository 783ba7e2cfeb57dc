//! SparkDark Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: ghost FSM, power mode, очки/монеты/жизни.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = gameplay rules (ghost AI, power mode, score, lives)
//! - Движок = tactical layer (navmesh, движение агентов, коллайдеры, рендер)
//!
//! Граница: ECS пишет MovementCommand/MovementSpeed/Transform.rotation и
//! спрашивает NavigationService; движок шлёт PlayerContact/PickupContact.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod components;
pub mod config;
pub mod headless;
pub mod logger;
pub mod navigation;
pub mod pickups;
pub mod player;
pub mod power;
pub mod presentation;
pub mod schedules;
pub mod scoring;
pub mod session;

// Re-export базовых типов для удобства
pub use ai::{
    AIPlugin, DamagePlayer, Ghost, GhostCaptured, GhostConfig, GhostState, GhostVisual, LastPosition, MaterialId,
    PlayerContact, SpawnPoint,
};
pub use components::*;
pub use config::{ConfigError, SessionConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use navigation::{NavMesh, NavRect, NavigationService, RectNavMesh};
pub use pickups::{PickupContact, PickupsPlugin};
pub use player::{PlayerConfig, PlayerPlugin};
pub use power::{ActivatePowerMode, PowerModeChanged, PowerModeController, PowerModePlugin};
pub use presentation::HudUpdate;
pub use schedules::SimulationSet;
pub use scoring::{AddScore, CoinLedger, RemoveCoins, ResetCombo, ScoreLedger, ScoringPlugin};
pub use session::{GameOver, GameWon, SessionOutcome};

/// Длительность одного simulation tick (60Hz)
pub const TICK: Duration = Duration::from_nanos(16_666_667);

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: SessionConfig,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        schedules::configure_simulation_sets(app);

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .insert_resource(self.config.clone())
            .init_resource::<SessionOutcome>()
            .add_event::<GameWon>()
            .add_event::<GameOver>()
            .add_event::<HudUpdate>();

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        // Подсистемы (порядок добавления не важен: порядок задают SimulationSet)
        app.add_plugins((
            PickupsPlugin,
            PowerModePlugin {
                config: self.config.power.clone(),
            },
            AIPlugin,
            PlayerPlugin,
            ScoringPlugin {
                score: self.config.score.clone(),
                coins: self.config.coins.clone(),
            },
        ));

        // HUD выводится и в тике, где сессия закончилась
        app.add_systems(
            FixedUpdate,
            presentation::log_hud_updates.after(SimulationSet::Score),
        );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт headless App для тестов (без рендера, без движка)
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_config(seed, SessionConfig::default())
}

pub fn create_headless_app_with_config(seed: u64, config: SessionConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin { config });

    app
}

/// Один simulation tick с заданным delta
///
/// Двигаем Time вручную и запускаем FixedUpdate напрямую: тик не зависит
/// от wall clock, прогоны детерминированы.
///
/// First schedule здесь не крутится, поэтому буферы событий свапаем сами
/// в начале тика (как event_update_system в First). После шага
/// `iter_current_update_events()` отдаёт только события этого тика.
pub fn step_simulation(app: &mut App, delta: Duration) {
    let world = app.world_mut();
    update_event_buffers(world);
    world.resource_mut::<Time>().advance_by(delta);
    world.run_schedule(FixedUpdate);
}

/// Swap double buffer'ов всех событий симуляции
///
/// События старше одного тика выбрасываются, буферы не растут.
pub fn update_event_buffers(world: &mut World) {
    swap_events::<PlayerContact>(world);
    swap_events::<DamagePlayer>(world);
    swap_events::<GhostCaptured>(world);
    swap_events::<PickupContact>(world);
    swap_events::<ActivatePowerMode>(world);
    swap_events::<PowerModeChanged>(world);
    swap_events::<AddScore>(world);
    swap_events::<ResetCombo>(world);
    swap_events::<RemoveCoins>(world);
    swap_events::<GameWon>(world);
    swap_events::<GameOver>(world);
    swap_events::<HudUpdate>(world);
}

fn swap_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Спавнит ghost'а (SpawnPoint/LastPosition снимутся с Transform в первом тике)
pub fn spawn_ghost(world: &mut World, position: Vec3, config: GhostConfig) -> Entity {
    let speed = MovementSpeed {
        speed: config.chase_speed,
    };
    world
        .spawn((Ghost, config, speed, Transform::from_translation(position)))
        .id()
}

/// Спавнит игрока с жизнями/неуязвимостью из конфига
pub fn spawn_player(world: &mut World, position: Vec3, config: &PlayerConfig) -> Entity {
    world.spawn(config.bundle(position)).id()
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
