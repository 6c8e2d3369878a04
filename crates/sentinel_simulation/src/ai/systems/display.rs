//! Display tick: StateLabel из EnemyAgent (Update, не FixedUpdate).

use bevy::prelude::*;

use crate::ai::components::{EnemyAgent, StateLabel};

/// Система: обновить надписи состояния
///
/// Мутируем label только если текст/цвет реально поменялись,
/// чтобы Changed<StateLabel> у host'а срабатывал по делу.
pub fn refresh_state_labels(time: Res<Time>, mut labels: Query<(&EnemyAgent, &mut StateLabel)>) {
    let dt = time.delta_secs();

    for (agent, mut label) in labels.iter_mut() {
        let mut next = label.bypass_change_detection().clone();
        if next.refresh(agent.current_state(), agent.current_life(), dt) {
            *label = next;
        } else {
            // blink таймер двигается даже без видимой смены
            *label.bypass_change_detection() = next;
        }
    }
}
