//! Компоненты цели (target actor): ChaseTarget, Life, StaminaPool

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Stamina max по умолчанию (целые единицы)
pub const DEFAULT_STAMINA_MAX: i32 = 10;

/// Life цели по умолчанию
pub const DEFAULT_TARGET_LIFE: i32 = 100;

/// Цель, которую видят и преследуют враги (обычно игрок)
///
/// Автоматически добавляет Life, StaminaPool и Transform через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Life, StaminaPool, Transform)]
pub struct ChaseTarget;

/// Здоровье цели
///
/// Симуляция врагов его не трогает, хранится для host'а.
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Life {
    pub current: i32,
    pub max: i32,
}

impl Default for Life {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_LIFE)
    }
}

impl Life {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}

/// Параметры stamina пула (serde, грузится host'ом)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaConfig {
    pub max: i32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            max: DEFAULT_STAMINA_MAX,
        }
    }
}

impl StaminaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max <= 0 {
            return Err(ConfigError::NonPositiveStaminaMax(self.max));
        }
        Ok(())
    }
}

/// Целочисленная stamina цели — shared resource, который враги дренят и регенят
///
/// Инвариант: 0 ≤ current ≤ max после КАЖДОЙ мутации (clamp внутри apply_delta).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct StaminaPool {
    current: i32,
    max: i32,
}

impl Default for StaminaPool {
    fn default() -> Self {
        Self {
            current: DEFAULT_STAMINA_MAX,
            max: DEFAULT_STAMINA_MAX,
        }
    }
}

impl StaminaPool {
    /// Полный пул
    pub fn new(config: StaminaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            current: config.max,
            max: config.max,
        })
    }

    /// Пул с произвольным стартовым значением (clamp в [0, max])
    pub fn with_current(current: i32, config: StaminaConfig) -> Result<Self, ConfigError> {
        let mut pool = Self::new(config)?;
        pool.current = current.clamp(0, pool.max);
        Ok(pool)
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }

    /// Применяет delta и клампит. Возвращает реально применённое изменение.
    pub fn apply_delta(&mut self, delta: i32) -> i32 {
        let before = self.current;
        self.current = before.saturating_add(delta).clamp(0, self.max);
        self.current - before
    }
}
