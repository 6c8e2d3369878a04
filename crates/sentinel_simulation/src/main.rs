//! Headless симуляция Sentinel
//!
//! Цель бродит по арене (seeded RNG), враг стоит у стены и преследует её,
//! цель периодически стреляет во врага. Мёртвый враг респавнится через паузу.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use sentinel_simulation::*;

const TICKS: u32 = 1000;
/// Выстрел каждые N тиков
const FIRE_EVERY: u32 = 20;
/// Сколько тиков враг лежит мёртвым до respawn
const RESPAWN_DELAY: u32 = 120;
/// Скорость блуждания цели (м/с)
const WANDER_SPEED: f32 = 3.0;
const ARENA_HALF_SIZE: f32 = 12.0;

/// Счётчики для итогового отчёта
#[derive(Resource, Default)]
struct RunStats {
    transitions: u32,
    stamina_changes: u32,
    deaths: u32,
}

/// Система: случайное блуждание цели в пределах арены
fn wander_target(
    time: Res<Time>,
    mut rng: ResMut<DeterministicRng>,
    mut targets: Query<&mut Transform, With<ChaseTarget>>,
) {
    let dt = time.delta_secs();

    for mut transform in targets.iter_mut() {
        let step = rng.planar_step();
        let bounds = Vec3::new(ARENA_HALF_SIZE, 0.0, ARENA_HALF_SIZE);
        transform.translation = (transform.translation + step * WANDER_SPEED * dt).clamp(-bounds, bounds);
    }
}

fn count_events(
    mut stats: ResMut<RunStats>,
    mut state_changes: EventReader<EnemyStateChanged>,
    mut stamina_changes: EventReader<StaminaChanged>,
    mut deaths: EventReader<EnemyDied>,
) {
    stats.transitions += state_changes.read().count() as u32;
    stats.stamina_changes += stamina_changes.read().count() as u32;
    stats.deaths += deaths.read().count() as u32;
}

/// Враг, цель (со своим Gun) и стена между ними
fn spawn_scenario(world: &mut World) -> Result<(Entity, Entity), ConfigError> {
    let enemy_config = EnemyConfig {
        perception: PerceptionMode::LineOfSight,
        ..Default::default()
    };
    let gun = Gun::new(GunConfig::default())?;

    let (enemy, target) = {
        let mut commands = world.commands();
        let enemy = spawn_enemy(&mut commands, &enemy_config, Vec3::ZERO, Vec3::Z)?;
        let target =
            spawn_chase_target(&mut commands, Vec3::new(0.0, 0.0, 6.0), StaminaConfig::default())?;
        commands.entity(target).insert(gun);
        commands.spawn((
            Name::new("Wall"),
            Transform::from_xyz(3.0, 0.0, 4.0),
            Collider::cuboid(1.5, 1.0, 0.1),
        ));
        (enemy, target)
    };

    world.flush();
    Ok((enemy, target))
}

/// Выстрел цели в текущую позицию врага
fn aim_at_enemy(world: &World, shooter: Entity, enemy: Entity) -> Option<FireIntent> {
    let origin = world.get::<Transform>(shooter)?.translation;
    let enemy_position = world.get::<EnemyAgent>(enemy)?.position();

    Some(FireIntent {
        shooter,
        origin,
        direction: enemy_position - origin,
    })
}

fn main() {
    let seed = 42;
    println!("Starting Sentinel headless simulation (seed: {})", seed);

    let mut app = headless_simulation_app(seed);
    // Stamina и попадания пишутся на Debug, для прогона хватает смен состояния
    set_log_level(LogLevel::Info);

    app.init_resource::<RunStats>()
        .add_systems(FixedUpdate, wander_target.before(SimulationSet::Combat))
        .add_systems(FixedUpdate, count_events.after(SimulationSet::Ai));

    let (enemy, target) = match spawn_scenario(app.world_mut()) {
        Ok(entities) => entities,
        Err(err) => {
            log_error(&format!("Scenario setup failed: {}", err));
            return;
        }
    };

    let mut dead_ticks = 0;
    for tick in 0..TICKS {
        if tick % FIRE_EVERY == 0 {
            if let Some(intent) = aim_at_enemy(app.world(), target, enemy) {
                app.world_mut().send_event(intent);
            }
        }

        app.update();

        if app.world().get::<Dead>(enemy).is_some() {
            dead_ticks += 1;
            if dead_ticks >= RESPAWN_DELAY {
                app.world_mut().send_event(RespawnRequest { enemy });
                dead_ticks = 0;
            }
        } else {
            dead_ticks = 0;
        }

        if tick % 100 == 0 {
            let world = app.world();
            if let (Some(agent), Some(pool)) =
                (world.get::<EnemyAgent>(enemy), world.get::<StaminaPool>(target))
            {
                println!(
                    "Tick {}: enemy {} life {} | target stamina {}/{}",
                    tick,
                    agent.current_state(),
                    agent.current_life(),
                    pool.current(),
                    pool.max()
                );
            }
        }
    }

    let stats = app.world().resource::<RunStats>();
    println!(
        "Simulation complete! transitions: {}, stamina changes: {}, deaths: {}",
        stats.transitions, stats.stamina_changes, stats.deaths
    );
}
