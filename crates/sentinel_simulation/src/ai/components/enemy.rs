//! Enemy state machine
//!
//! Normal ⇄ Chase каждый тик по результату perception,
//! Damaged — временный overlay после попадания (тик заморожен на cooldown),
//! Dead — терминальное состояние до явного respawn.
//!
//! Все смены состояния идут через `set_state`: он пишет лог и копит
//! StateTransition, которые host забирает через `drain_transitions`.

use bevy::prelude::*;
use std::fmt;

use crate::ai::components::{EnemyConfig, PerceptionMode, StateLabel};
use crate::ai::exchange::{self, ExchangeMode};
use crate::ai::perception::{self, LineOfSightProbe, Perception, VisionCone};
use crate::components::StaminaPool;
use crate::error::ConfigError;

/// Остаток cooldown меньше этого = 0
const COOLDOWN_EPSILON: f32 = 1e-4;

/// Поведенческое состояние врага
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum EnemyState {
    #[default]
    Normal,
    Chase,
    Damaged,
    Dead,
}

impl fmt::Display for EnemyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnemyState::Normal => "Normal",
            EnemyState::Chase => "Chase",
            EnemyState::Damaged => "Damaged",
            EnemyState::Dead => "Dead",
        };
        f.write_str(name)
    }
}

/// Зафиксированная смена состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct StateTransition {
    pub from: EnemyState,
    pub to: EnemyState,
}

/// Результат одного тика
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub state: EnemyState,
    pub position_delta: Vec3,
    /// Реально применённое изменение stamina пула
    pub stamina_delta: i32,
    /// None если тик был перехвачен (Dead, Damaged cooldown, dt ≤ 0)
    pub perception: Option<Perception>,
}

impl TickOutcome {
    fn skipped(state: EnemyState) -> Self {
        Self {
            state,
            position_delta: Vec3::ZERO,
            stamina_delta: 0,
            perception: None,
        }
    }
}

/// Враг: pose, жизнь, состояние, таймеры
///
/// Pose принадлежит агенту; Transform синхронизируется из него
/// (`sync_enemy_transforms`), не наоборот.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, StateLabel)]
pub struct EnemyAgent {
    pub(crate) position: Vec3,
    pub(crate) forward: Vec3,
    pub(crate) spawn_point: Vec3,
    pub(crate) spawn_forward: Vec3,

    /// Может уйти в минус внутри; наружу отдаётся max(life, 0)
    pub(crate) life: i32,
    pub(crate) life_max: i32,
    pub(crate) state: EnemyState,
    /// Кэш state == Dead, respawn гейтится именно по нему
    pub(crate) is_dead: bool,

    pub(crate) cone: VisionCone,
    pub(crate) chase_speed: f32,
    pub(crate) perception_mode: PerceptionMode,
    pub(crate) damaged_overlay: bool,

    pub(crate) damaged_cooldown_remaining: f32,
    /// Накопитель для resource exchange, в [0, 1)
    pub(crate) stamina_timer: f32,

    pub(crate) last_perception: Option<Perception>,
    pub(crate) pending_transitions: Vec<StateTransition>,
}

impl EnemyAgent {
    /// Новый агент в точке спавна. Spawn point и forward фиксируются для respawn.
    pub fn new(config: &EnemyConfig, spawn_point: Vec3, forward: Vec3) -> Result<Self, ConfigError> {
        config.validate()?;

        let forward = forward.normalize_or_zero();
        Ok(Self {
            position: spawn_point,
            forward,
            spawn_point,
            spawn_forward: forward,
            life: config.life_max,
            life_max: config.life_max,
            state: EnemyState::Normal,
            is_dead: false,
            cone: config.vision_cone(),
            chase_speed: config.chase_speed,
            perception_mode: config.perception,
            damaged_overlay: config.damaged_overlay,
            damaged_cooldown_remaining: 0.0,
            stamina_timer: 0.0,
            last_perception: None,
            pending_transitions: Vec::new(),
        })
    }

    pub fn current_state(&self) -> EnemyState {
        self.state
    }

    /// Жизнь для display слоя (никогда не меньше 0)
    pub fn current_life(&self) -> i32 {
        self.life.max(0)
    }

    /// Жизнь как есть, может быть отрицательной после overkill
    pub fn raw_life(&self) -> i32 {
        self.life
    }

    pub fn life_max(&self) -> i32 {
        self.life_max
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn spawn_point(&self) -> Vec3 {
        self.spawn_point
    }

    pub fn vision_cone(&self) -> VisionCone {
        self.cone
    }

    pub fn perception_mode(&self) -> PerceptionMode {
        self.perception_mode
    }

    pub fn damaged_cooldown_remaining(&self) -> f32 {
        self.damaged_cooldown_remaining
    }

    pub fn stamina_timer(&self) -> f32 {
        self.stamina_timer
    }

    pub fn last_perception(&self) -> Option<Perception> {
        self.last_perception
    }

    /// Повернуть врага (host-side поворот, патруль и т.п.)
    pub fn set_forward(&mut self, forward: Vec3) {
        self.forward = forward.normalize_or_zero();
    }

    /// Забрать накопленные смены состояния (для событий/UI)
    pub fn drain_transitions(&mut self) -> Vec<StateTransition> {
        std::mem::take(&mut self.pending_transitions)
    }

    /// Единственная точка смены состояния. Ничего не делает, если состояние то же.
    pub(crate) fn set_state(&mut self, next: EnemyState) -> bool {
        if self.state == next {
            return false;
        }

        let transition = StateTransition {
            from: self.state,
            to: next,
        };
        self.state = next;
        self.pending_transitions.push(transition);
        crate::log_info(&format!("Enemy State: {} → {}", transition.from, transition.to));
        true
    }

    /// Один шаг симуляции
    ///
    /// - dt ≤ 0 → no-op
    /// - Dead → no-op (только respawn)
    /// - Damaged cooldown > 0 → только уменьшаем cooldown
    /// - иначе perception → Chase (движение + Drain) или Normal (Regen)
    ///
    /// `probe` используется только в режиме LineOfSight; без него — geometry-only.
    pub fn tick(
        &mut self,
        dt: f32,
        target: Vec3,
        probe: Option<&dyn LineOfSightProbe>,
        pool: &mut StaminaPool,
    ) -> TickOutcome {
        if !(dt > 0.0) || !dt.is_finite() || self.is_dead {
            return TickOutcome::skipped(self.state);
        }

        if self.damaged_cooldown_remaining > 0.0 {
            let remaining = self.damaged_cooldown_remaining - dt;
            // Хвосты f32 (0.3 − 3×0.1 ≈ 1e-8) считаем истёкшим cooldown
            self.damaged_cooldown_remaining = if remaining > COOLDOWN_EPSILON {
                remaining
            } else {
                0.0
            };
            return TickOutcome::skipped(self.state);
        }

        let probe = match self.perception_mode {
            PerceptionMode::GeometryOnly => None,
            PerceptionMode::LineOfSight => probe,
        };
        let perception = perception::evaluate(self.position, self.forward, target, self.cone, probe);
        self.last_perception = Some(perception);

        let (mode, position_delta) = if perception.is_visible() {
            self.set_state(EnemyState::Chase);
            (ExchangeMode::Drain, self.advance_towards(target, dt))
        } else {
            self.set_state(EnemyState::Normal);
            (ExchangeMode::Regen, Vec3::ZERO)
        };

        // Таймер не сбрасывается при Chase ⇄ Normal, копится непрерывно
        let (timer, stamina_delta) = exchange::exchange(mode, dt, self.stamina_timer, pool);
        self.stamina_timer = timer;

        TickOutcome {
            state: self.state,
            position_delta,
            stamina_delta,
            perception: Some(perception),
        }
    }

    /// Шаг к цели на chase_speed · dt, без перелёта
    fn advance_towards(&mut self, target: Vec3, dt: f32) -> Vec3 {
        let to_target = target - self.position;
        let step = self.chase_speed * dt;

        let delta = if to_target.length() <= step {
            to_target
        } else {
            to_target.normalize_or_zero() * step
        };

        self.position += delta;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> EnemyAgent {
        EnemyAgent::new(&EnemyConfig::default(), Vec3::ZERO, Vec3::Z)
            .unwrap_or_else(|err| panic!("default config must be valid: {err}"))
    }

    #[test]
    fn test_new_agent_starts_normal_full_life() {
        let enemy = agent();
        assert_eq!(enemy.current_state(), EnemyState::Normal);
        assert_eq!(enemy.current_life(), 50);
        assert_eq!(enemy.spawn_point(), Vec3::ZERO);
        assert!(!enemy.is_dead());
    }

    #[test]
    fn test_new_agent_rejects_invalid_config() {
        let config = EnemyConfig {
            vision_angle: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            EnemyAgent::new(&config, Vec3::ZERO, Vec3::Z),
            Err(ConfigError::InvalidVisionAngle(_))
        ));
    }

    #[test]
    fn test_set_state_emits_only_on_change() {
        let mut enemy = agent();

        assert!(!enemy.set_state(EnemyState::Normal));
        assert!(enemy.set_state(EnemyState::Chase));
        assert!(!enemy.set_state(EnemyState::Chase));

        assert_eq!(
            enemy.drain_transitions(),
            vec![StateTransition {
                from: EnemyState::Normal,
                to: EnemyState::Chase
            }]
        );
        assert!(enemy.drain_transitions().is_empty());
    }

    #[test]
    fn test_chase_never_overshoots_target() {
        let mut enemy = agent();
        let mut pool = StaminaPool::default();
        let target = Vec3::new(0.0, 0.0, 0.5);

        let outcome = enemy.tick(1.0, target, None, &mut pool);
        assert_eq!(outcome.state, EnemyState::Chase);
        assert_eq!(enemy.position(), target);
        assert_eq!(outcome.position_delta, target);
    }

    #[test]
    fn test_state_display_names() {
        assert_eq!(EnemyState::Chase.to_string(), "Chase");
        assert_eq!(EnemyState::Dead.to_string(), "Dead");
    }
}
