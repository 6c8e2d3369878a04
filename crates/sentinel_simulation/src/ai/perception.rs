//! Perception — vision cone + optional line-of-sight
//!
//! Чистая функция: pose врага + позиция цели (+ LOS probe) → Perception.
//! Конус "лежит на земле": угол считается в XZ плоскости, дистанция — полная 3D.
//!
//! LOS probe — внешний collaborator (физика). Если его нет, видимость
//! деградирует до geometry-only (range + angle, без окклюзии).

use bevy::prelude::*;

/// Дальность зрения по умолчанию (метры)
pub const DEFAULT_VISION_RANGE: f32 = 10.0;

/// Полный угол конуса по умолчанию (градусы)
pub const DEFAULT_VISION_ANGLE: f32 = 60.0;

/// Допуск на границе конуса (градусы), граница включительная
const ANGLE_EPSILON_DEG: f32 = 1e-3;

/// Что первым попалось лучу
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum HitTag {
    /// Сама цель
    Target,
    /// Любой другой collider (стена, другой актор)
    Obstruction,
}

/// Первое попадание LOS луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub tag: HitTag,
    pub distance: f32,
}

/// Line-of-sight запрос к физике
///
/// `direction` нормализован, `max_distance` = vision range.
/// Возвращает первое попадание вдоль луча или None.
pub trait LineOfSightProbe {
    fn probe(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<ProbeHit>;
}

impl<F> LineOfSightProbe for F
where
    F: Fn(Vec3, Vec3, f32) -> Option<ProbeHit>,
{
    fn probe(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<ProbeHit> {
        self(origin, direction, max_distance)
    }
}

/// Почему цель не видна
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum BlockReason {
    OutOfRange,
    OutOfAngle,
    Occluded,
}

/// Результат оценки видимости
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Perception {
    /// В конусе и (если LOS включён) не перекрыта
    InRange,
    /// Не видна
    Blocked(BlockReason),
}

impl Perception {
    pub fn is_visible(&self) -> bool {
        matches!(self, Perception::InRange)
    }
}

/// Параметры конуса зрения
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct VisionCone {
    /// Дальность (метры), > 0
    pub range: f32,
    /// Полный угол (градусы), (0, 360]
    pub angle: f32,
}

impl Default for VisionCone {
    fn default() -> Self {
        Self {
            range: DEFAULT_VISION_RANGE,
            angle: DEFAULT_VISION_ANGLE,
        }
    }
}

/// Лучи границ конуса (для debug отрисовки на стороне host'а)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeEdges {
    pub origin: Vec3,
    pub left: Vec3,
    pub right: Vec3,
    pub forward: Vec3,
}

impl VisionCone {
    pub fn half_angle(&self) -> f32 {
        self.angle / 2.0
    }

    /// Концы лучей: ±half_angle вокруг +Y, длина = range
    pub fn edges(&self, position: Vec3, forward: Vec3) -> ConeEdges {
        let forward = forward.normalize_or_zero();
        let half = self.half_angle().to_radians();

        ConeEdges {
            origin: position,
            left: position + Quat::from_rotation_y(half) * forward * self.range,
            right: position + Quat::from_rotation_y(-half) * forward * self.range,
            forward: position + forward * self.range,
        }
    }
}

/// Угол между forward и направлением на цель в XZ плоскости (градусы)
///
/// Вырожденные вектора (цель совпадает с врагом, цель строго сверху,
/// нулевой forward) дают 0.
pub fn planar_angle_degrees(forward: Vec3, to_target: Vec3) -> f32 {
    let forward = Vec3::new(forward.x, 0.0, forward.z);
    let to_target = Vec3::new(to_target.x, 0.0, to_target.z);

    let (Some(forward), Some(to_target)) = (forward.try_normalize(), to_target.try_normalize())
    else {
        return 0.0;
    };

    forward.dot(to_target).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Оценка видимости цели
///
/// 1. d ≤ range (включительно)
/// 2. θ ≤ angle / 2 (включительно)
/// 3. если есть probe: первое попадание луча должно быть целью
///
/// Не-finite координаты (NaN / ±inf) = цель вне дальности.
pub fn evaluate(
    position: Vec3,
    forward: Vec3,
    target: Vec3,
    cone: VisionCone,
    probe: Option<&dyn LineOfSightProbe>,
) -> Perception {
    // NaN проваливает все сравнения ниже и выглядел бы как InRange
    if !target.is_finite() || !position.is_finite() {
        return Perception::Blocked(BlockReason::OutOfRange);
    }

    let to_target = target - position;
    let distance = to_target.length();

    if distance > cone.range {
        return Perception::Blocked(BlockReason::OutOfRange);
    }

    if planar_angle_degrees(forward, to_target) > cone.half_angle() + ANGLE_EPSILON_DEG {
        return Perception::Blocked(BlockReason::OutOfAngle);
    }

    let Some(probe) = probe else {
        return Perception::InRange;
    };

    // Цель в той же точке — лучу некуда лететь, считаем видимой
    let Some(direction) = to_target.try_normalize() else {
        return Perception::InRange;
    };

    match probe.probe(position, direction, cone.range) {
        Some(ProbeHit {
            tag: HitTag::Target,
            ..
        }) => Perception::InRange,
        _ => Perception::Blocked(BlockReason::Occluded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cone() -> VisionCone {
        VisionCone {
            range: 10.0,
            angle: 60.0,
        }
    }

    #[test]
    fn test_target_ahead_is_visible() {
        let result = evaluate(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), cone(), None);
        assert_eq!(result, Perception::InRange);
    }

    #[test]
    fn test_target_at_90_degrees_is_out_of_angle() {
        let result = evaluate(Vec3::ZERO, Vec3::Z, Vec3::new(8.0, 0.0, 0.0), cone(), None);
        assert_eq!(result, Perception::Blocked(BlockReason::OutOfAngle));
    }

    #[test]
    fn test_range_boundary_inclusive() {
        let at_edge = evaluate(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 10.0), cone(), None);
        assert_eq!(at_edge, Perception::InRange);

        let beyond = evaluate(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 10.01), cone(), None);
        assert_eq!(beyond, Perception::Blocked(BlockReason::OutOfRange));
    }

    #[test]
    fn test_angle_ignores_vertical_component() {
        // Цель выше врага, но прямо по курсу в XZ
        let result = evaluate(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 4.0, 4.0), cone(), None);
        assert_eq!(result, Perception::InRange);
    }

    #[test]
    fn test_coincident_target_counts_as_in_angle() {
        let result = evaluate(Vec3::ONE, Vec3::Z, Vec3::ONE, cone(), None);
        assert_eq!(result, Perception::InRange);
        assert_eq!(planar_angle_degrees(Vec3::Z, Vec3::ZERO), 0.0);
        assert_eq!(planar_angle_degrees(Vec3::ZERO, Vec3::X), 0.0);
    }

    #[test]
    fn test_non_finite_target_is_out_of_range() {
        let always_target = |_: Vec3, _: Vec3, _: f32| -> Option<ProbeHit> {
            Some(ProbeHit {
                distance: 0.0,
                tag: HitTag::Target,
            })
        };

        for target in [
            Vec3::new(f32::NAN, 0.0, f32::NAN),
            Vec3::new(0.0, 0.0, f32::NAN),
            Vec3::new(0.0, 0.0, f32::INFINITY),
            Vec3::new(f32::NEG_INFINITY, 0.0, 1.0),
        ] {
            assert_eq!(
                evaluate(Vec3::ZERO, Vec3::Z, target, cone(), None),
                Perception::Blocked(BlockReason::OutOfRange),
                "target {:?}",
                target
            );
            assert_eq!(
                evaluate(Vec3::ZERO, Vec3::Z, target, cone(), Some(&always_target)),
                Perception::Blocked(BlockReason::OutOfRange),
                "target {:?} with line of sight",
                target
            );
        }

        let nan_position = evaluate(Vec3::splat(f32::NAN), Vec3::Z, Vec3::ZERO, cone(), None);
        assert_eq!(nan_position, Perception::Blocked(BlockReason::OutOfRange));
    }

    #[test]
    fn test_target_behind_out_of_angle() {
        let result = evaluate(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -3.0), cone(), None);
        assert_eq!(result, Perception::Blocked(BlockReason::OutOfAngle));
    }

    #[test]
    fn test_full_circle_cone_sees_behind() {
        let wide = VisionCone {
            range: 10.0,
            angle: 360.0,
        };
        let result = evaluate(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -3.0), wide, None);
        assert_eq!(result, Perception::InRange);
    }

    #[test]
    fn test_probe_hitting_target_keeps_visibility() {
        let probe = |_origin: Vec3, _dir: Vec3, _max: f32| {
            Some(ProbeHit {
                tag: HitTag::Target,
                distance: 5.0,
            })
        };
        let result = evaluate(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), cone(), Some(&probe));
        assert_eq!(result, Perception::InRange);
    }

    #[test]
    fn test_probe_hitting_wall_blocks() {
        let probe = |_origin: Vec3, _dir: Vec3, _max: f32| {
            Some(ProbeHit {
                tag: HitTag::Obstruction,
                distance: 2.0,
            })
        };
        let result = evaluate(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), cone(), Some(&probe));
        assert_eq!(result, Perception::Blocked(BlockReason::Occluded));
    }

    #[test]
    fn test_probe_missing_everything_blocks() {
        let probe = |_origin: Vec3, _dir: Vec3, _max: f32| -> Option<ProbeHit> { None };
        let result = evaluate(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), cone(), Some(&probe));
        assert_eq!(result, Perception::Blocked(BlockReason::Occluded));
    }

    #[test]
    fn test_probe_receives_normalized_direction_and_range() {
        let probe = |origin: Vec3, dir: Vec3, max: f32| {
            assert_eq!(origin, Vec3::ZERO);
            assert!((dir.length() - 1.0).abs() < 1e-5);
            assert_eq!(max, 10.0);
            Some(ProbeHit {
                tag: HitTag::Target,
                distance: 3.0,
            })
        };
        evaluate(Vec3::ZERO, Vec3::Z, Vec3::new(1.0, 0.0, 3.0), cone(), Some(&probe));
    }

    #[test]
    fn test_probe_not_consulted_outside_cone() {
        let probe = |_origin: Vec3, _dir: Vec3, _max: f32| -> Option<ProbeHit> {
            panic!("probe must not run for targets outside the cone")
        };
        let result = evaluate(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 50.0), cone(), Some(&probe));
        assert_eq!(result, Perception::Blocked(BlockReason::OutOfRange));
    }

    #[test]
    fn test_cone_edges_are_symmetric() {
        let edges = cone().edges(Vec3::ZERO, Vec3::Z);
        assert!((edges.forward - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
        assert!((edges.left.length() - 10.0).abs() < 1e-4);
        assert!((edges.right.length() - 10.0).abs() < 1e-4);
        assert!((edges.left.x + edges.right.x).abs() < 1e-4);
        assert!((planar_angle_degrees(Vec3::Z, edges.left) - 30.0).abs() < 1e-2);
    }
}
