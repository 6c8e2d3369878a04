//! Spawn helpers для врага и цели
//!
//! Создают entity с полным набором компонентов:
//! - EnemyAgent / ChaseTarget (+ required Transform, StateLabel / Life, StaminaPool)
//! - Rapier Collider (capsule) — геометрия для LOS и hitscan

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::ai::components::{EnemyAgent, EnemyConfig};
use crate::components::{ChaseTarget, StaminaConfig, StaminaPool};
use crate::error::ConfigError;

/// Половина высоты цилиндра капсулы актора (метры)
pub const ACTOR_HALF_HEIGHT: f32 = 0.5;

/// Радиус капсулы актора (метры)
pub const ACTOR_RADIUS: f32 = 0.4;

fn actor_collider() -> Collider {
    Collider::capsule_y(ACTOR_HALF_HEIGHT, ACTOR_RADIUS)
}

/// Spawn врага в точке спавна. Невалидный конфиг → ничего не спавнится.
pub fn spawn_enemy(
    commands: &mut Commands,
    config: &EnemyConfig,
    position: Vec3,
    forward: Vec3,
) -> Result<Entity, ConfigError> {
    let agent = EnemyAgent::new(config, position, forward)?;

    let entity = commands
        .spawn((
            Name::new("Enemy"),
            Transform::from_translation(position),
            agent,
            actor_collider(),
        ))
        .id();

    crate::log(&format!("Spawned enemy {:?} at {:?}", entity, position));
    Ok(entity)
}

/// Spawn цели (игрока) с собственным stamina пулом
pub fn spawn_chase_target(
    commands: &mut Commands,
    position: Vec3,
    stamina: StaminaConfig,
) -> Result<Entity, ConfigError> {
    let pool = StaminaPool::new(stamina)?;

    let entity = commands
        .spawn((
            Name::new("ChaseTarget"),
            ChaseTarget,
            Transform::from_translation(position),
            pool,
            actor_collider(),
        ))
        .id();

    Ok(entity)
}
