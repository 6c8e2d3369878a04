//! Raycast по Rapier коллайдерам (LOS + hitscan)
//!
//! Используем только геометрию `Collider` (parry shape + Transform),
//! physics step не нужен — работает и в headless симуляции.
//! Коллайдеры с `ColliderDisabled` (мёртвые враги) в запрос не попадают.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::ai::perception::{HitTag, LineOfSightProbe, ProbeHit};

/// Коллайдер на момент запроса
#[derive(Clone, Copy)]
pub struct ColliderSnapshot<'a> {
    pub entity: Entity,
    pub collider: &'a Collider,
    pub translation: Vec3,
    pub rotation: Quat,
}

/// Собрать snapshot всех активных коллайдеров
pub fn collect_colliders<'a>(
    colliders: impl IntoIterator<Item = (Entity, &'a Collider, &'a Transform)>,
) -> Vec<ColliderSnapshot<'a>> {
    colliders
        .into_iter()
        .map(|(entity, collider, transform)| ColliderSnapshot {
            entity,
            collider,
            translation: transform.translation,
            rotation: transform.rotation,
        })
        .collect()
}

/// Ближайшее попадание луча (entity, дистанция), `exclude` пропускается
///
/// `direction` должен быть нормализован — тогда toi = метры.
pub fn cast_nearest(
    colliders: &[ColliderSnapshot<'_>],
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    exclude: Option<Entity>,
) -> Option<(Entity, f32)> {
    colliders
        .iter()
        .filter(|snapshot| Some(snapshot.entity) != exclude)
        .filter_map(|snapshot| {
            snapshot
                .collider
                .cast_ray(
                    snapshot.translation,
                    snapshot.rotation,
                    origin,
                    direction,
                    max_distance,
                    true,
                )
                .map(|toi| (snapshot.entity, toi))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// LOS probe для одного врага: первое попадание == цель → Target, иначе Obstruction
pub struct ColliderProbe<'a> {
    pub colliders: &'a [ColliderSnapshot<'a>],
    pub observer: Entity,
    pub target: Entity,
}

impl ColliderProbe<'_> {
    /// Есть ли у цели коллайдер (без него LOS проверять не по чему)
    pub fn target_has_collider(&self) -> bool {
        self.colliders
            .iter()
            .any(|snapshot| snapshot.entity == self.target)
    }
}

impl LineOfSightProbe for ColliderProbe<'_> {
    fn probe(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<ProbeHit> {
        let (entity, distance) = cast_nearest(
            self.colliders,
            origin,
            direction,
            max_distance,
            Some(self.observer),
        )?;

        let tag = if entity == self.target {
            HitTag::Target
        } else {
            HitTag::Obstruction
        };
        Some(ProbeHit { tag, distance })
    }
}
