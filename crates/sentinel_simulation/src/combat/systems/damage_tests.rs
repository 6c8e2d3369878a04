//! Tests for damage / respawn systems.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use bevy_rapier3d::prelude::*;

    use super::super::damage::{
        apply_damage_requests, apply_representation_toggles, handle_respawn_requests,
    };
    use crate::ai::components::{EnemyAgent, EnemyConfig, EnemyState};
    use crate::ai::EnemyStateChanged;
    use crate::combat::lifecycle::{
        DamageRequest, DamageSource, DamageTaken, Dead, EnemyDied, EnemyRespawned,
        RepresentationToggled, RespawnRequest,
    };

    fn lifecycle_app() -> App {
        let mut app = App::new();
        app.add_event::<DamageRequest>()
            .add_event::<RespawnRequest>()
            .add_event::<DamageTaken>()
            .add_event::<EnemyDied>()
            .add_event::<EnemyRespawned>()
            .add_event::<RepresentationToggled>()
            .add_event::<EnemyStateChanged>()
            .add_systems(
                Update,
                (
                    apply_damage_requests,
                    handle_respawn_requests,
                    apply_representation_toggles,
                )
                    .chain(),
            );
        app
    }

    fn spawn_enemy(app: &mut App, life_max: i32) -> Entity {
        let config = EnemyConfig {
            life_max,
            ..Default::default()
        };
        let agent = EnemyAgent::new(&config, Vec3::new(0.0, 0.0, 3.0), Vec3::Z).unwrap();
        app.world_mut().spawn((agent, Collider::ball(0.5))).id()
    }

    fn drain<E: Event + Clone>(app: &mut App) -> Vec<E> {
        app.world_mut()
            .resource_mut::<Events<E>>()
            .drain()
            .collect()
    }

    #[test]
    fn test_damage_request_emits_damage_taken_and_state_change() {
        let mut app = lifecycle_app();
        let enemy = spawn_enemy(&mut app, 50);

        app.world_mut().send_event(DamageRequest {
            enemy,
            amount: 20,
            source: DamageSource::External,
        });
        app.update();

        let taken = drain::<DamageTaken>(&mut app);
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].life, 30);

        let changes = drain::<EnemyStateChanged>(&mut app);
        assert_eq!(
            changes,
            vec![EnemyStateChanged {
                enemy,
                from: EnemyState::Normal,
                to: EnemyState::Damaged,
            }]
        );
        assert!(drain::<EnemyDied>(&mut app).is_empty());
        assert!(app.world().get::<Dead>(enemy).is_none());
    }

    #[test]
    fn test_lethal_damage_disables_then_respawn_enables() {
        let mut app = lifecycle_app();
        let enemy = spawn_enemy(&mut app, 70);
        let shooter = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(DamageRequest {
            enemy,
            amount: 80,
            source: DamageSource::Hitscan { shooter },
        });
        app.update();

        let died = drain::<EnemyDied>(&mut app);
        assert_eq!(died.len(), 1);
        assert_eq!(died[0].killer, Some(shooter));

        let toggles = drain::<RepresentationToggled>(&mut app);
        assert_eq!(toggles.len(), 1);
        assert!(!toggles[0].enabled);

        assert!(app.world().get::<Dead>(enemy).is_some());
        assert!(app.world().get::<ColliderDisabled>(enemy).is_some());

        app.world_mut().send_event(RespawnRequest { enemy });
        app.update();

        let respawned = drain::<EnemyRespawned>(&mut app);
        assert_eq!(respawned.len(), 1);
        assert_eq!(respawned[0].position, Vec3::new(0.0, 0.0, 3.0));

        assert!(app.world().get::<Dead>(enemy).is_none());
        assert!(app.world().get::<ColliderDisabled>(enemy).is_none());

        let agent = app.world().get::<EnemyAgent>(enemy).unwrap();
        assert_eq!(agent.current_state(), EnemyState::Normal);
        assert_eq!(agent.current_life(), 70);
    }

    #[test]
    fn test_respawn_request_for_living_enemy_is_ignored() {
        let mut app = lifecycle_app();
        let enemy = spawn_enemy(&mut app, 50);

        app.world_mut().send_event(RespawnRequest { enemy });
        app.update();

        assert!(drain::<EnemyRespawned>(&mut app).is_empty());
        assert!(drain::<RepresentationToggled>(&mut app).is_empty());
        assert!(drain::<EnemyStateChanged>(&mut app).is_empty());
    }

    #[test]
    fn test_non_positive_damage_request_changes_nothing() {
        let mut app = lifecycle_app();
        let enemy = spawn_enemy(&mut app, 50);

        app.world_mut().send_event(DamageRequest {
            enemy,
            amount: 0,
            source: DamageSource::External,
        });
        app.update();

        assert!(drain::<DamageTaken>(&mut app).is_empty());
        let agent = app.world().get::<EnemyAgent>(enemy).unwrap();
        assert_eq!(agent.current_life(), 50);
        assert_eq!(agent.current_state(), EnemyState::Normal);
    }
}
