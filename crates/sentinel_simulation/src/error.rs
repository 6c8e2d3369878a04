//! Ошибки конфигурации и lifecycle операций.

use thiserror::Error;

/// Невалидные параметры конфигурации (EnemyConfig, GunConfig, StaminaPool)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("life_max must be > 0, got {0}")]
    NonPositiveLifeMax(i32),

    #[error("vision_range must be finite and > 0, got {0}")]
    InvalidVisionRange(f32),

    #[error("vision_angle must be in (0, 360] degrees, got {0}")]
    InvalidVisionAngle(f32),

    #[error("chase_speed must be finite and >= 0, got {0}")]
    InvalidChaseSpeed(f32),

    #[error("stamina max must be > 0, got {0}")]
    NonPositiveStaminaMax(i32),

    #[error("gun range must be finite and > 0, got {0}")]
    InvalidGunRange(f32),

    #[error("gun damage must be > 0, got {0}")]
    NonPositiveGunDamage(i32),

    #[error("fire rate must be finite and > 0, got {0}")]
    InvalidFireRate(f32),
}

/// Отказ lifecycle операции (respawn)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// Respawn разрешён только для мёртвого агента
    #[error("respawn requested while the enemy is still alive")]
    NotDead,
}
