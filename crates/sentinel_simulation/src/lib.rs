//! Sentinel Simulation Core
//!
//! ECS-симуляция врага-часового на Bevy 0.16:
//! - perception (vision cone + optional LOS через Rapier коллайдеры)
//! - state machine Normal / Chase / Damaged / Dead
//! - resource exchange: Chase дренит stamina цели, Normal регенит (±1 в секунду)
//! - lifecycle: damage, Damaged overlay, смерть, respawn
//!
//! Ядро (EnemyAgent::tick / take_damage / respawn) — чистый Rust с Δt параметром,
//! ECS слой только раздаёт Time, коллайдеры и события.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod error;
pub mod logger;
pub mod physics;

// Re-export базовых компонентов для удобства
pub use ai::{
    spawn_chase_target, spawn_enemy, AIPlugin, BlockReason, EnemyAgent, EnemyConfig, EnemyState,
    EnemyStateChanged, LabelTint, Perception, PerceptionMode, StaminaChanged, StateLabel,
};
pub use combat::{
    CombatPlugin, DamageOutcome, DamageRequest, DamageSource, DamageTaken, Dead, EnemyDied,
    EnemyRespawned, FireIntent, Gun, GunConfig, Representation, RepresentationToggled,
    RespawnRequest,
};
pub use components::*;
pub use error::{ConfigError, LifecycleError};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};

/// Порядок подсистем внутри FixedUpdate: сначала урон, потом AI тик
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Combat,
    Ai,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .configure_sets(FixedUpdate, (SimulationSet::Combat, SimulationSet::Ai).chain())
            // Подсистемы
            .add_plugins((CombatPlugin, AIPlugin));

        // Детерминистичный RNG (seed по умолчанию), если host не положил свой
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Seeded источник случайности для скриптов вокруг симуляции (блуждание цели)
///
/// Ядро врага случайность не использует; RNG нужен только host-скриптам.
#[derive(Resource)]
pub struct DeterministicRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Случайный шаг в плоскости XZ, компоненты в [-1, 1]
    pub fn planar_step(&mut self) -> Vec3 {
        let x = self.rng.gen_range(-1.0..=1.0);
        let z = self.rng.gen_range(-1.0..=1.0);
        Vec3::new(x, 0.0, z)
    }
}

/// Headless App с SimulationPlugin: ровно один FixedUpdate шаг на `app.update()`
///
/// Первый update прогревает Time (delta = 0).
pub fn headless_simulation_app(seed: u64) -> App {
    init_logger();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(timestep));
    app
}

fn state_code(state: EnemyState) -> u8 {
    match state {
        EnemyState::Normal => 0,
        EnemyState::Chase => 1,
        EnemyState::Damaged => 2,
        EnemyState::Dead => 3,
    }
}

/// Побайтовый снимок врагов и stamina пулов (для сравнения прогонов)
///
/// Враг: index, state, raw life, position, stamina timer, damaged cooldown.
/// Пул: index, current, max. f32 пишутся битами, без округления.
pub fn simulation_snapshot(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();

    let mut enemies: Vec<_> = world
        .query::<(Entity, &EnemyAgent)>()
        .iter(world)
        .map(|(entity, agent)| (entity.index(), agent.clone()))
        .collect();
    enemies.sort_by_key(|(index, _)| *index);

    for (index, agent) in &enemies {
        snapshot.extend_from_slice(&index.to_le_bytes());
        snapshot.push(state_code(agent.current_state()));
        snapshot.extend_from_slice(&agent.raw_life().to_le_bytes());
        for axis in agent.position().to_array() {
            snapshot.extend_from_slice(&axis.to_bits().to_le_bytes());
        }
        snapshot.extend_from_slice(&agent.stamina_timer().to_bits().to_le_bytes());
        snapshot.extend_from_slice(&agent.damaged_cooldown_remaining().to_bits().to_le_bytes());
    }

    let mut pools: Vec<_> = world
        .query::<(Entity, &StaminaPool)>()
        .iter(world)
        .map(|(entity, pool)| (entity.index(), *pool))
        .collect();
    pools.sort_by_key(|(index, _)| *index);

    for (index, pool) in &pools {
        snapshot.extend_from_slice(&index.to_le_bytes());
        snapshot.extend_from_slice(&pool.current().to_le_bytes());
        snapshot.extend_from_slice(&pool.max().to_le_bytes());
    }

    snapshot
}
