//! AI components (enemy state machine, config, display label).

pub mod config;
pub mod display;
pub mod enemy;


pub use config::{EnemyConfig, PerceptionMode};
pub use display::{LabelTint, StateLabel, DAMAGED_BLINK_INTERVAL};
pub use enemy::{EnemyAgent, EnemyState, StateTransition, TickOutcome};
