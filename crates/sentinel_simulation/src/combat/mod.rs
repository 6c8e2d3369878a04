//! Combat system module
//!
//! ECS ответственность:
//! - Lifecycle врага: damage → Damaged overlay → Dead → respawn
//! - Gun: fire rate + hitscan по Rapier коллайдерам
//! - Events: DamageTaken, EnemyDied, EnemyRespawned, RepresentationToggled
//!
//! Визуал и коллизия врага — внешние collaborators: они получают
//! RepresentationToggled, коллизию выключаем сами через ColliderDisabled.

use bevy::prelude::*;

pub mod lifecycle;
pub mod systems;
pub mod weapon;

// Re-export основных типов
pub use lifecycle::{
    DamageOutcome, DamageRequest, DamageSource, DamageTaken, Dead, EnemyDied, EnemyRespawned,
    Representation, RepresentationToggled, RespawnRequest, DAMAGED_COOLDOWN,
};
pub use weapon::{FireIntent, Gun, GunConfig};

use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate, до AI тика (урон в этом же
/// шаге успевает заморозить врага Damaged cooldown'ом).
///
/// Порядок выполнения:
/// 1. tick_gun_cooldowns — обновление cooldown таймеров
/// 2. resolve_fire_intents — FireIntent → raycast → DamageRequest
/// 3. apply_damage_requests — DamageRequest → take_damage → события
/// 4. handle_respawn_requests — RespawnRequest → respawn
/// 5. apply_representation_toggles — Dead маркер + ColliderDisabled
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<FireIntent>()
            .add_event::<DamageRequest>()
            .add_event::<RespawnRequest>()
            .add_event::<DamageTaken>()
            .add_event::<EnemyDied>()
            .add_event::<EnemyRespawned>()
            .add_event::<RepresentationToggled>()
            .register_type::<Gun>();

        app.add_systems(
            FixedUpdate,
            (
                systems::tick_gun_cooldowns,
                systems::resolve_fire_intents,
                systems::apply_damage_requests,
                systems::handle_respawn_requests,
                systems::apply_representation_toggles,
            )
                .chain() // Последовательное выполнение
                .in_set(SimulationSet::Combat),
        );
    }
}
