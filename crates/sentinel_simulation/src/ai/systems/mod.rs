//! AI systems (enemy tick + display)

pub mod display;
pub mod fsm;

// Re-export all systems
pub use display::*;
pub use fsm::*;
