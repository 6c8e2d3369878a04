//! Gun systems (cooldown, hitscan resolution).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::ai::components::EnemyAgent;
use crate::combat::lifecycle::{DamageRequest, DamageSource};
use crate::combat::weapon::{FireIntent, Gun};
use crate::physics::{cast_nearest, collect_colliders};

/// Система: уменьшение cooldown оружия
pub fn tick_gun_cooldowns(time: Res<Time>, mut guns: Query<&mut Gun>) {
    let dt = time.delta_secs();
    for mut gun in guns.iter_mut() {
        if !gun.can_fire() {
            gun.tick(dt);
        }
    }
}

/// Система: FireIntent → raycast → DamageRequest
///
/// Первый коллайдер на луче (кроме стрелка) принимает выстрел.
/// Если это враг — урон из Gun; стена/цель/пустота — промах.
pub fn resolve_fire_intents(
    mut intents: EventReader<FireIntent>,
    mut guns: Query<&mut Gun>,
    colliders: Query<(Entity, &Collider, &Transform), Without<ColliderDisabled>>,
    enemies: Query<(), With<EnemyAgent>>,
    mut damage_requests: EventWriter<DamageRequest>,
) {
    let mut snapshots = None;

    for intent in intents.read() {
        let Ok(mut gun) = guns.get_mut(intent.shooter) else {
            crate::log_warning(&format!("FireIntent from {:?} without Gun", intent.shooter));
            continue;
        };

        let Some(direction) = intent.direction.try_normalize() else {
            crate::log_warning("FireIntent with zero direction ignored");
            continue;
        };

        if !gun.fire() {
            continue; // ещё перезаряжается
        }

        let snapshots = snapshots.get_or_insert_with(|| collect_colliders(colliders.iter()));
        let hit = cast_nearest(
            snapshots,
            intent.origin,
            direction,
            gun.config.range,
            Some(intent.shooter),
        );

        match hit {
            Some((entity, distance)) if enemies.contains(entity) => {
                crate::log(&format!("Hit enemy {:?} at {:.2}m", entity, distance));
                damage_requests.write(DamageRequest {
                    enemy: entity,
                    amount: gun.config.damage,
                    source: DamageSource::Hitscan {
                        shooter: intent.shooter,
                    },
                });
            }
            Some((entity, _)) => {
                crate::log(&format!("Shot hit non-enemy {:?}", entity));
            }
            None => {
                crate::log("Shot missed");
            }
        }
    }
}
