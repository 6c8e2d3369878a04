//! Damage, death and respawn systems.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::ai::components::EnemyAgent;
use crate::ai::systems::publish_transitions;
use crate::ai::EnemyStateChanged;
use crate::combat::lifecycle::{
    DamageOutcome, DamageRequest, DamageSource, DamageTaken, Dead, EnemyDied, EnemyRespawned,
    RepresentationToggled, RespawnRequest,
};

/// Система: DamageRequest → take_damage → DamageTaken / EnemyDied
///
/// Смерть дополнительно шлёт RepresentationToggled { enabled: false }
/// (визуал и коллизия выключаются в apply_representation_toggles).
pub fn apply_damage_requests(
    mut requests: EventReader<DamageRequest>,
    mut enemies: Query<&mut EnemyAgent>,
    mut damage_taken: EventWriter<DamageTaken>,
    mut died: EventWriter<EnemyDied>,
    mut toggles: EventWriter<RepresentationToggled>,
    mut state_events: EventWriter<EnemyStateChanged>,
) {
    for request in requests.read() {
        let Ok(mut agent) = enemies.get_mut(request.enemy) else {
            crate::log_warning(&format!(
                "DamageRequest for {:?} ignored: not an enemy",
                request.enemy
            ));
            continue;
        };

        let outcome = agent.take_damage(request.amount);

        if outcome.was_applied() {
            damage_taken.write(DamageTaken {
                enemy: request.enemy,
                amount: request.amount,
                life: agent.current_life(),
                source: request.source,
            });
        }

        if let DamageOutcome::Killed { .. } = outcome {
            let killer = match request.source {
                DamageSource::Hitscan { shooter } => Some(shooter),
                DamageSource::External => None,
            };
            died.write(EnemyDied {
                enemy: request.enemy,
                killer,
            });
        }

        if outcome.representation().is_some() {
            toggles.write(RepresentationToggled {
                entity: request.enemy,
                enabled: false,
            });
        }

        publish_transitions(request.enemy, &mut agent, &mut state_events);
    }
}

/// Система: RespawnRequest → respawn мёртвого врага
///
/// Запрос для живого врага логируется и игнорируется.
pub fn handle_respawn_requests(
    mut requests: EventReader<RespawnRequest>,
    mut enemies: Query<&mut EnemyAgent>,
    mut respawned: EventWriter<EnemyRespawned>,
    mut toggles: EventWriter<RepresentationToggled>,
    mut state_events: EventWriter<EnemyStateChanged>,
) {
    for request in requests.read() {
        let Ok(mut agent) = enemies.get_mut(request.enemy) else {
            continue;
        };

        match agent.respawn() {
            Ok(_) => {
                respawned.write(EnemyRespawned {
                    enemy: request.enemy,
                    position: agent.position(),
                });
                toggles.write(RepresentationToggled {
                    entity: request.enemy,
                    enabled: true,
                });
            }
            Err(err) => {
                crate::log_warning(&format!("RespawnRequest for {:?}: {}", request.enemy, err));
            }
        }

        publish_transitions(request.enemy, &mut agent, &mut state_events);
    }
}

/// Система: RepresentationToggled → Dead маркер + ColliderDisabled
///
/// Выключенный коллайдер не участвует ни в LOS, ни в hitscan.
pub fn apply_representation_toggles(
    mut commands: Commands,
    mut toggles: EventReader<RepresentationToggled>,
) {
    for toggle in toggles.read() {
        let Ok(mut entity) = commands.get_entity(toggle.entity) else {
            continue;
        };

        if toggle.enabled {
            entity.remove::<(Dead, ColliderDisabled)>();
        } else {
            entity.insert((Dead, ColliderDisabled));
        }
    }
}
