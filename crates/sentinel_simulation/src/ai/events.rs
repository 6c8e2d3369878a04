//! AI Events — нотификации enemy state machine для host'а (UI, звук, аналитика)

use bevy::prelude::*;

use crate::ai::components::EnemyState;

/// Враг сменил состояние
///
/// Шлётся ровно один раз на каждую реальную смену (set_state),
/// включая Damaged/Dead из боевых систем и Normal после respawn.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct EnemyStateChanged {
    pub enemy: Entity,
    pub from: EnemyState,
    pub to: EnemyState,
}

/// Stamina цели изменилась от resource exchange
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct StaminaChanged {
    pub target: Entity,
    /// Враг, чей тик дал изменение
    pub enemy: Entity,
    /// Реально применённая delta (после clamp)
    pub delta: i32,
    pub current: i32,
}
