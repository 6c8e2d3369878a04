//! Resource exchange — дренаж/регенерация stamina цели
//!
//! Время копится в таймере, раз в полную секунду → ровно один ±1 шаг.
//! Остаток сверх 1.0 сек отбрасывается (не переносится).

use bevy::prelude::*;

use crate::components::StaminaPool;

/// Интервал одного шага (секунды)
pub const EXCHANGE_INTERVAL: f32 = 1.0;

/// Допуск на накопление f32: 60 × (1/60) = 0.9999997, это всё ещё "секунда"
const INTERVAL_EPSILON: f32 = 1e-4;

/// Направление обмена
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ExchangeMode {
    /// Враг видит цель → stamina −1/сек
    Drain,
    /// Цель вне конуса → stamina +1/сек
    Regen,
}

impl ExchangeMode {
    pub fn unit_delta(&self) -> i32 {
        match self {
            ExchangeMode::Drain => -1,
            ExchangeMode::Regen => 1,
        }
    }
}

/// Копит elapsed в timer; при timer ≥ 1.0 выдаёт ±1 и сбрасывает timer в 0.
///
/// Порог с допуском: срабатывает уже при timer ≥ 1.0 − INTERVAL_EPSILON
/// (0.9999), иначе сумма 60 × (1/60) в f32 недотягивает до 1.0 и срабатывание
/// съезжает на 61-й шаг. Ниже 0.9999 мутации нет.
///
/// Возвращает (новый timer, delta). Отрицательный elapsed не копится.
pub fn apply(mode: ExchangeMode, elapsed: f32, timer: f32) -> (f32, i32) {
    let accumulated = timer + elapsed.max(0.0);

    if accumulated + INTERVAL_EPSILON >= EXCHANGE_INTERVAL {
        (0.0, mode.unit_delta())
    } else {
        (accumulated, 0)
    }
}

/// apply() + мутация пула. Возвращает (новый timer, реально применённая delta).
///
/// Delta может быть 0 даже при срабатывании таймера: пул уже упёрся в границу.
pub fn exchange(
    mode: ExchangeMode,
    elapsed: f32,
    timer: f32,
    pool: &mut StaminaPool,
) -> (f32, i32) {
    let (timer, delta) = apply(mode, elapsed, timer);
    if delta == 0 {
        return (timer, 0);
    }

    let applied = pool.apply_delta(delta);
    crate::log(&format!(
        "Stamina {:?}: {} → {}/{}",
        mode,
        pool.current() - applied,
        pool.current(),
        pool.max()
    ));
    (timer, applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::StaminaConfig;

    #[test]
    fn test_below_interval_no_delta() {
        let (timer, delta) = apply(ExchangeMode::Drain, 0.4, 0.5);
        assert_eq!(delta, 0);
        assert!((timer - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_tolerance_boundary() {
        assert_eq!(apply(ExchangeMode::Drain, 0.9998, 0.0), (0.9998, 0));
        assert_eq!(apply(ExchangeMode::Drain, 0.99995, 0.0), (0.0, -1));
    }

    #[test]
    fn test_full_second_fires_once_and_resets() {
        assert_eq!(apply(ExchangeMode::Drain, 1.0, 0.0), (0.0, -1));
        assert_eq!(apply(ExchangeMode::Regen, 1.0, 0.0), (0.0, 1));
    }

    #[test]
    fn test_carry_over_is_discarded() {
        // 2.5 сек одним вызовом → один шаг, timer = 0
        assert_eq!(apply(ExchangeMode::Drain, 2.5, 0.0), (0.0, -1));
        assert_eq!(apply(ExchangeMode::Regen, 0.7, 0.6), (0.0, 1));
    }

    #[test]
    fn test_ten_small_steps_equal_one_second() {
        let mut pool = StaminaPool::default();
        let mut timer = 0.0;
        let mut deltas = Vec::new();

        for _ in 0..10 {
            let (next, delta) = exchange(ExchangeMode::Drain, 0.1, timer, &mut pool);
            timer = next;
            deltas.push(delta);
        }

        assert_eq!(deltas.iter().filter(|d| **d != 0).count(), 1);
        assert_eq!(deltas.last(), Some(&-1));
        assert_eq!(timer, 0.0);
        assert_eq!(pool.current(), 9);
    }

    #[test]
    fn test_sixty_fixed_steps_equal_one_second() {
        let mut timer = 0.0;
        let mut fired = 0;

        for _ in 0..60 {
            let (next, delta) = apply(ExchangeMode::Regen, 1.0 / 60.0, timer);
            timer = next;
            if delta != 0 {
                fired += 1;
            }
        }

        assert_eq!(fired, 1);
        assert_eq!(timer, 0.0);
    }

    #[test]
    fn test_regen_capped_at_max() {
        let mut pool = StaminaPool::default();
        let (timer, applied) = exchange(ExchangeMode::Regen, 1.0, 0.0, &mut pool);
        assert_eq!(timer, 0.0);
        assert_eq!(applied, 0);
        assert_eq!(pool.current(), 10);
    }

    #[test]
    fn test_drain_floored_at_zero() {
        let mut pool = StaminaPool::with_current(0, StaminaConfig::default())
            .unwrap_or_default();
        let (_, applied) = exchange(ExchangeMode::Drain, 1.0, 0.0, &mut pool);
        assert_eq!(applied, 0);
        assert_eq!(pool.current(), 0);
    }

    #[test]
    fn test_negative_elapsed_ignored() {
        assert_eq!(apply(ExchangeMode::Drain, -5.0, 0.5), (0.5, 0));
    }
}
