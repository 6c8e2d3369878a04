//! Damage / death / respawn lifecycle врага
//!
//! - take_damage: минус life, Damaged overlay на DAMAGED_COOLDOWN, при life ≤ 0 → Dead
//! - Dead терминален: тики и урон игнорируются
//! - respawn: только для мёртвого, полный сброс к параметрам спавна
//!
//! Визуал/коллизия — внешние collaborators, получают сигнал через Representation.

use bevy::prelude::*;

use crate::ai::components::{EnemyAgent, EnemyState};
use crate::error::LifecycleError;

/// Длительность Damaged overlay (секунды)
pub const DAMAGED_COOLDOWN: f32 = 0.3;

/// Сигнал для визуала/коллизии врага
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Representation {
    Enabled,
    Disabled,
}

/// Результат take_damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// amount ≤ 0, ничего не изменилось
    Rejected,
    /// Враг уже мёртв, урон проигнорирован
    IgnoredDead,
    /// Урон принят, враг жив
    Damaged { life: i32 },
    /// Урон добил врага. life — внутреннее значение (может быть < 0)
    Killed { life: i32 },
}

impl DamageOutcome {
    /// Нужно ли переключить визуал/коллизию
    pub fn representation(&self) -> Option<Representation> {
        match self {
            DamageOutcome::Killed { .. } => Some(Representation::Disabled),
            _ => None,
        }
    }

    pub fn was_applied(&self) -> bool {
        matches!(self, DamageOutcome::Damaged { .. } | DamageOutcome::Killed { .. })
    }
}

impl EnemyAgent {
    /// Принять урон
    ///
    /// Каждое попадание заново взводит cooldown на DAMAGED_COOLDOWN
    /// (если damaged overlay включён в конфиге).
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.is_dead {
            return DamageOutcome::IgnoredDead;
        }

        if amount <= 0 {
            crate::log_warning(&format!("take_damage: rejected non-positive amount {}", amount));
            return DamageOutcome::Rejected;
        }

        self.life = self.life.saturating_sub(amount);

        if self.damaged_overlay {
            self.set_state(EnemyState::Damaged);
            self.damaged_cooldown_remaining = DAMAGED_COOLDOWN;
        }

        crate::log(&format!(
            "Enemy took {} damage, life {}/{}",
            amount,
            self.current_life(),
            self.life_max
        ));

        if self.life <= 0 {
            self.die();
            return DamageOutcome::Killed { life: self.life };
        }

        DamageOutcome::Damaged { life: self.life }
    }

    fn die(&mut self) {
        self.set_state(EnemyState::Dead);
        self.is_dead = true;
        self.damaged_cooldown_remaining = 0.0;
        crate::log_info("Enemy died, disabling visuals and collisions");
    }

    /// Respawn мёртвого врага в точке спавна
    ///
    /// Живой враг не трогается: Err(NotDead), никаких мутаций.
    pub fn respawn(&mut self) -> Result<Representation, LifecycleError> {
        if !self.is_dead {
            crate::log_warning("respawn ignored: enemy is still alive");
            return Err(LifecycleError::NotDead);
        }

        self.position = self.spawn_point;
        self.forward = self.spawn_forward;
        self.life = self.life_max;
        self.is_dead = false;
        self.damaged_cooldown_remaining = 0.0;
        self.stamina_timer = 0.0;
        self.last_perception = None;
        self.set_state(EnemyState::Normal);

        crate::log_info("Enemy respawning");
        Ok(Representation::Enabled)
    }
}

/// Откуда пришёл урон
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    /// Hitscan выстрел (Gun)
    Hitscan { shooter: Entity },
    /// Скрипт / host напрямую
    External,
}

/// Запрос: нанести урон врагу
#[derive(Event, Debug, Clone)]
pub struct DamageRequest {
    pub enemy: Entity,
    pub amount: i32,
    pub source: DamageSource,
}

/// Запрос: респавн врага (host решает когда, например по кнопке)
#[derive(Event, Debug, Clone)]
pub struct RespawnRequest {
    pub enemy: Entity,
}

/// Событие: урон применён
#[derive(Event, Debug, Clone)]
pub struct DamageTaken {
    pub enemy: Entity,
    pub amount: i32,
    pub life: i32,
    pub source: DamageSource,
}

/// Событие: враг умер
#[derive(Event, Debug, Clone)]
pub struct EnemyDied {
    pub enemy: Entity,
    pub killer: Option<Entity>,
}

/// Событие: враг респавнился
#[derive(Event, Debug, Clone)]
pub struct EnemyRespawned {
    pub enemy: Entity,
    pub position: Vec3,
}

/// Событие: включить/выключить визуал и коллизию entity
#[derive(Event, Debug, Clone)]
pub struct RepresentationToggled {
    pub entity: Entity,
    pub enabled: bool,
}

/// Компонент-маркер: враг мёртв (пока не будет respawn)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;
