//! AI decision-making module
//!
//! Enemy state machine (Normal / Chase / Damaged / Dead), perception
//! (vision cone + optional LOS), resource exchange со stamina цели.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod exchange;
pub mod perception;
pub mod spawn;
pub mod systems;

// Re-export основных типов
pub use components::{
    EnemyAgent, EnemyConfig, EnemyState, LabelTint, PerceptionMode, StateLabel, StateTransition,
    TickOutcome,
};
pub use events::{EnemyStateChanged, StaminaChanged};
pub use exchange::{ExchangeMode, EXCHANGE_INTERVAL};
pub use perception::{
    BlockReason, ConeEdges, HitTag, LineOfSightProbe, Perception, ProbeHit, VisionCone,
};
pub use spawn::{spawn_chase_target, spawn_enemy};

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. enemy_ai_tick — perception → state → движение → stamina exchange
/// 2. sync_enemy_transforms — pose агента → Transform (коллайдер следует за врагом)
///
/// Display tick (refresh_state_labels) — в Update, своя каденция.
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EnemyStateChanged>()
            .add_event::<StaminaChanged>()
            .register_type::<EnemyAgent>()
            .register_type::<StateLabel>();

        app.add_systems(
            FixedUpdate,
            (systems::enemy_ai_tick, systems::sync_enemy_transforms)
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Ai),
        );

        app.add_systems(Update, systems::refresh_state_labels);
    }
}
