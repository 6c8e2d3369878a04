//! Параметры врага (serde-профиль, грузит host).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::perception::{VisionCone, DEFAULT_VISION_ANGLE, DEFAULT_VISION_RANGE};
use crate::error::ConfigError;

/// Как враг проверяет видимость
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum PerceptionMode {
    /// Только range + angle
    #[default]
    GeometryOnly,
    /// Range + angle + LOS луч (стены перекрывают обзор)
    LineOfSight,
}

/// Профиль врага
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Максимальная (и стартовая) жизнь
    pub life_max: i32,
    /// Скорость преследования (метры/сек)
    pub chase_speed: f32,
    /// Дальность зрения (метры)
    pub vision_range: f32,
    /// Полный угол конуса (градусы)
    pub vision_angle: f32,
    pub perception: PerceptionMode,
    /// Замораживать ли тик на DAMAGED_COOLDOWN после попадания
    pub damaged_overlay: bool,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            life_max: 50,
            chase_speed: 5.0,
            vision_range: DEFAULT_VISION_RANGE,
            vision_angle: DEFAULT_VISION_ANGLE,
            perception: PerceptionMode::GeometryOnly,
            damaged_overlay: true,
        }
    }
}

impl EnemyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.life_max <= 0 {
            return Err(ConfigError::NonPositiveLifeMax(self.life_max));
        }
        if !self.vision_range.is_finite() || self.vision_range <= 0.0 {
            return Err(ConfigError::InvalidVisionRange(self.vision_range));
        }
        if !(self.vision_angle > 0.0 && self.vision_angle <= 360.0) {
            return Err(ConfigError::InvalidVisionAngle(self.vision_angle));
        }
        if !self.chase_speed.is_finite() || self.chase_speed < 0.0 {
            return Err(ConfigError::InvalidChaseSpeed(self.chase_speed));
        }
        Ok(())
    }

    pub fn vision_cone(&self) -> VisionCone {
        VisionCone {
            range: self.vision_range,
            angle: self.vision_angle,
        }
    }
}
