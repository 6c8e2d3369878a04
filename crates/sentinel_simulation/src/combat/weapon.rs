//! Gun — hitscan источник урона
//!
//! Architecture:
//! - Host переводит input в FireIntent (origin + direction луча)
//! - ECS: Gun cooldown (fire rate), raycast по коллайдерам, DamageRequest врагу
//! - Первый коллайдер на луче получает выстрел; не враг → промах

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Параметры оружия (serde, грузится host'ом)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct GunConfig {
    /// Дальность луча (метры)
    pub range: f32,
    /// Урон за попадание
    pub damage: i32,
    /// Минимальный интервал между выстрелами (секунды)
    pub fire_rate: f32,
}

impl Default for GunConfig {
    fn default() -> Self {
        Self {
            range: 100.0,
            damage: 10,
            fire_rate: 0.25,
        }
    }
}

impl GunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.range.is_finite() || self.range <= 0.0 {
            return Err(ConfigError::InvalidGunRange(self.range));
        }
        if self.damage <= 0 {
            return Err(ConfigError::NonPositiveGunDamage(self.damage));
        }
        if !self.fire_rate.is_finite() || self.fire_rate <= 0.0 {
            return Err(ConfigError::InvalidFireRate(self.fire_rate));
        }
        Ok(())
    }
}

/// Оружие стрелка
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Gun {
    pub config: GunConfig,
    /// Текущий cooldown timer (уменьшается до 0)
    pub cooldown_remaining: f32,
}

impl Gun {
    pub fn new(config: GunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            cooldown_remaining: 0.0,
        })
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    /// Выстрел: взводит cooldown. false если ещё перезаряжается.
    pub fn fire(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }
        self.cooldown_remaining = self.config.fire_rate;
        true
    }

    pub fn tick(&mut self, dt: f32) {
        if dt > 0.0 && self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        }
    }
}

/// Event: стрелок ХОЧЕТ выстрелить (input host'а → ECS)
///
/// Cooldown и raycast проверяются в resolve_fire_intents.
#[derive(Event, Debug, Clone)]
pub struct FireIntent {
    /// Кто стреляет (его коллайдер исключается из raycast)
    pub shooter: Entity,
    /// Начало луча (обычно камера)
    pub origin: Vec3,
    /// Направление луча (нормализуется в системе)
    pub direction: Vec3,
}
