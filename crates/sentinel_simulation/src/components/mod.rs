//! ECS Components цели
//!
//! - actor: ChaseTarget маркер, Life, StaminaPool (+ StaminaConfig)
//!
//! Компоненты врага живут в `ai::components`, оружие — в `combat::weapon`.

pub mod actor;

pub use actor::*;
