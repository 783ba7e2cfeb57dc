//! Power mode systems (countdown + broadcast по ghost'ам).

use bevy::prelude::*;

use crate::ai::{apply_transition, transition, Ghost, GhostConfig, GhostState, GhostTrigger, GhostVisual};
use crate::components::MovementSpeed;

use super::controller::{PowerModeController, PowerModeTick};
use super::{ActivatePowerMode, PowerModeChanged};

type GhostControlQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static GhostConfig,
        &'static mut GhostState,
        &'static mut MovementSpeed,
        Option<&'static mut GhostVisual>,
    ),
    With<Ghost>,
>;

/// Broadcast: Request(target) каждому зарегистрированному ghost'у, прошедшему фильтр
///
/// Выполняется целиком внутри одной системы: ghost не увидит половину broadcast'а.
fn broadcast_state(
    agents: &[Entity],
    ghosts: &mut GhostControlQuery,
    target: GhostState,
    should_switch: impl Fn(GhostState) -> bool,
) -> usize {
    let mut switched = 0;

    for &agent in agents {
        let Ok((entity, config, mut state, mut speed, mut visual)) = ghosts.get_mut(agent) else {
            crate::log_warning(&format!("PowerMode: registered ghost {:?} missing, skipped", agent));
            continue;
        };

        if !should_switch(*state) {
            continue;
        }

        let t = transition(*state, GhostTrigger::Request(target), config);
        apply_transition(entity, t, &mut state, &mut speed, visual.as_deref_mut());
        switched += 1;
    }

    switched
}

/// Система: power mode countdown + активации
///
/// Порядок внутри тика:
/// 1. регистрация ghost'ов (один раз)
/// 2. countdown: истёк → Flee ghost'ы обратно в Chase (Eaten/Chase не трогаем)
/// 3. ActivatePowerMode события → restart таймера, все не-Eaten ghost'ы в Flee
///
/// Активация после countdown'а: в тике активации remaining == duration.
pub fn update_power_mode(
    mut controller: ResMut<PowerModeController>,
    mut activations: EventReader<ActivatePowerMode>,
    mut ghosts: GhostControlQuery,
    mut changed: EventWriter<PowerModeChanged>,
    time: Res<Time>,
) {
    if !controller.is_registered() {
        let agents: Vec<Entity> = ghosts.iter().map(|(entity, ..)| entity).collect();
        if controller.register_agents_once(agents) {
            crate::log_info(&format!(
                "PowerMode: registered {} ghosts",
                controller.registered_agents().len()
            ));
        }
    }

    let agents = controller.registered_agents().to_vec();

    match controller.tick(time.delta_secs()) {
        Some(PowerModeTick::Expired) => {
            let switched = broadcast_state(&agents, &mut ghosts, GhostState::Chase, |s| s == GhostState::Flee);
            crate::log_info(&format!("⚡ Power Mode Deactivated ({} ghosts back to Chase)", switched));
            changed.write(PowerModeChanged::Deactivated);
        }
        Some(PowerModeTick::WarningStarted { remaining }) => {
            crate::log(&format!("⚡ Power Mode warning: {:.2}s left", remaining));
            changed.write(PowerModeChanged::WarningStarted { remaining });
        }
        None => {}
    }

    for activation in activations.read() {
        controller.activate(activation.duration);
        let switched = broadcast_state(&agents, &mut ghosts, GhostState::Flee, |s| s != GhostState::Eaten);
        crate::log_info(&format!(
            "⚡ Power Mode Activated for {:.1}s ({} ghosts fleeing)",
            activation.duration, switched
        ));
        changed.write(PowerModeChanged::Activated {
            duration: controller.total(),
        });
    }
}
