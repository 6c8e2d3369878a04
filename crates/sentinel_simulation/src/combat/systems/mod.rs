//! Combat systems (damage, lifecycle, gun)

pub mod damage;
pub mod weapon;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod damage_tests;

// Re-export all systems
pub use damage::*;
pub use weapon::*;
