//! Enemy FSM systems (AI tick, transform sync).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::ai::components::EnemyAgent;
use crate::ai::perception::LineOfSightProbe;
use crate::ai::{EnemyStateChanged, StaminaChanged};
use crate::components::{ChaseTarget, StaminaPool};
use crate::physics::{collect_colliders, ColliderProbe};

/// Переложить накопленные смены состояния агента в события
pub fn publish_transitions(
    entity: Entity,
    agent: &mut EnemyAgent,
    events: &mut EventWriter<EnemyStateChanged>,
) {
    for transition in agent.drain_transitions() {
        events.write(EnemyStateChanged {
            enemy: entity,
            from: transition.from,
            to: transition.to,
        });
    }
}

/// Система: тик всех врагов против единственной цели
///
/// Порядок врагов = порядок Query (детерминирован для одного и того же мира).
/// Каждый враг пишет в общий StaminaPool последовательно, clamp внутри пула.
/// LOS probe строится только если у цели есть коллайдер,
/// иначе perception деградирует до geometry-only.
pub fn enemy_ai_tick(
    time: Res<Time>,
    mut enemies: Query<(Entity, &mut EnemyAgent)>,
    mut targets: Query<(Entity, &Transform, &mut StaminaPool), With<ChaseTarget>>,
    colliders: Query<(Entity, &Collider, &Transform), Without<ColliderDisabled>>,
    mut state_events: EventWriter<EnemyStateChanged>,
    mut stamina_events: EventWriter<StaminaChanged>,
) {
    let dt = time.delta_secs();
    let Ok((target, target_transform, mut pool)) = targets.single_mut() else {
        return;
    };
    let target_position = target_transform.translation;

    let snapshots = collect_colliders(colliders.iter());

    for (entity, mut agent) in enemies.iter_mut() {
        let probe = ColliderProbe {
            colliders: &snapshots,
            observer: entity,
            target,
        };
        let probe_ref: Option<&dyn LineOfSightProbe> = if probe.target_has_collider() {
            Some(&probe)
        } else {
            None
        };

        let outcome = agent.tick(dt, target_position, probe_ref, &mut pool);

        if outcome.stamina_delta != 0 {
            stamina_events.write(StaminaChanged {
                target,
                enemy: entity,
                delta: outcome.stamina_delta,
                current: pool.current(),
            });
        }

        publish_transitions(entity, &mut agent, &mut state_events);
    }
}

/// Система: EnemyAgent pose → Transform
///
/// Агент владеет позицией, Transform только зеркало (для коллайдера и host'а).
pub fn sync_enemy_transforms(
    mut query: Query<(&EnemyAgent, &mut Transform), Changed<EnemyAgent>>,
) {
    for (agent, mut transform) in query.iter_mut() {
        transform.translation = agent.position();

        if let Ok(forward) = Dir3::new(agent.forward()) {
            transform.look_to(forward, Dir3::Y);
        }
    }
}
