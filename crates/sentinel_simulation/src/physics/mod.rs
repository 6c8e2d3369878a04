//! Physics queries
//!
//! Rapier коллайдеры как геометрия для line-of-sight и hitscan.

pub mod raycast;

pub use raycast::{cast_nearest, collect_colliders, ColliderProbe, ColliderSnapshot};
