//! StateLabel — данные для UI надписи над врагом (display tick)
//!
//! Отрисовка на стороне host'а, здесь только текст и цвет.

use bevy::prelude::*;

use crate::ai::components::EnemyState;

/// Период мигания во время Damaged (секунды display времени)
pub const DAMAGED_BLINK_INTERVAL: f32 = 0.1;

/// Цвет надписи
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum LabelTint {
    #[default]
    White,
    Yellow,
    Red,
    Grey,
}

/// Текст состояния + цвет, обновляется на display каденсе (Update)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct StateLabel {
    pub text: String,
    pub tint: LabelTint,
    blink_elapsed: f32,
}

impl StateLabel {
    /// Пересчитать надпись. Возвращает true если текст или цвет поменялись.
    pub fn refresh(&mut self, state: EnemyState, life: i32, dt: f32) -> bool {
        let tint = match state {
            EnemyState::Normal => LabelTint::White,
            EnemyState::Chase => LabelTint::Yellow,
            EnemyState::Damaged => {
                self.blink_elapsed += dt.max(0.0);
                // Чётная фаза — красный, нечётная — белый
                let phase = (self.blink_elapsed / DAMAGED_BLINK_INTERVAL).floor() as u32;
                if phase % 2 == 0 {
                    LabelTint::Red
                } else {
                    LabelTint::White
                }
            }
            EnemyState::Dead => LabelTint::Grey,
        };

        if state != EnemyState::Damaged {
            self.blink_elapsed = 0.0;
        }

        let text = format!("State: {} | Life: {}", state, life);
        let changed = text != self.text || tint != self.tint;
        self.text = text;
        self.tint = tint;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_text_and_tint() {
        let mut label = StateLabel::default();

        assert!(label.refresh(EnemyState::Chase, 40, 0.016));
        assert_eq!(label.text, "State: Chase | Life: 40");
        assert_eq!(label.tint, LabelTint::Yellow);

        // Тот же state/life → без изменений
        assert!(!label.refresh(EnemyState::Chase, 40, 0.016));

        label.refresh(EnemyState::Dead, 0, 0.016);
        assert_eq!(label.tint, LabelTint::Grey);
    }

    #[test]
    fn test_damaged_label_blinks_on_display_time() {
        let mut label = StateLabel::default();

        label.refresh(EnemyState::Damaged, 30, 0.05);
        assert_eq!(label.tint, LabelTint::Red);

        label.refresh(EnemyState::Damaged, 30, 0.1); // 0.15 → фаза 1
        assert_eq!(label.tint, LabelTint::White);

        label.refresh(EnemyState::Damaged, 30, 0.1); // 0.25 → фаза 2
        assert_eq!(label.tint, LabelTint::Red);

        // Выход из Damaged сбрасывает мигание
        label.refresh(EnemyState::Normal, 30, 0.1);
        label.refresh(EnemyState::Damaged, 30, 0.0);
        assert_eq!(label.tint, LabelTint::Red);
    }
}
