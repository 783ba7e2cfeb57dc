//! Ghost FSM transitions (pure)
//!
//! Вся логика переходов: одна функция `transition(current, trigger, config)`.
//! Она ничего не мутирует: возвращает новое состояние + список side effects,
//! которые применяют системы (скорость, материал, события наружу).
//!
//! Граф:
//! Chase ⇄ Flee (только через Request от power mode)
//! Flee → Eaten (контакт с игроком)
//! Eaten → Chase (дошли до SpawnPoint)
//! Respawning → Chase (мгновенно)

use super::components::{GhostConfig, GhostState, MaterialId};

/// Что толкает FSM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostTrigger {
    /// Внешний SetState (power mode broadcast, респавн)
    Request(GhostState),
    /// Движок: ghost пересёкся с игроком (приходит каждый overlapping кадр)
    PlayerContact,
    /// Eaten ghost дошёл до SpawnPoint
    ReachedSpawn,
}

/// Side effect перехода
#[derive(Debug, Clone, PartialEq)]
pub enum GhostEffect {
    /// Выставить скорость navmesh агента
    SetSpeed(f32),
    /// Сменить материал рендера
    ApplyMaterial(MaterialId),
    /// Нанести урон игроку (Chase контакт)
    DamagePlayer,
    /// Ghost пойман (Flee контакт) → score collaborator
    Captured,
}

impl GhostEffect {
    /// Effect уходит наружу событием (а не применяется к компонентам ghost'а)
    pub fn is_outward(&self) -> bool {
        matches!(self, GhostEffect::DamagePlayer | GhostEffect::Captured)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: GhostState,
    pub effects: Vec<GhostEffect>,
    /// Запрос недопустим из текущего состояния (Flee при Eaten и т.п.)
    pub rejected: bool,
}

impl Transition {
    fn to(next: GhostState, effects: Vec<GhostEffect>) -> Self {
        Self {
            next,
            effects,
            rejected: false,
        }
    }

    fn stay(current: GhostState) -> Self {
        Self::to(current, Vec::new())
    }

    fn reject(current: GhostState) -> Self {
        Self {
            rejected: true,
            ..Self::stay(current)
        }
    }

    pub fn changed_from(&self, previous: GhostState) -> bool {
        self.next != previous
    }
}

/// Effects входа в состояние (скорость + материал если назначен)
///
/// Вызывается и при повторном входе в то же состояние: параметры всегда сбрасываются.
fn enter(state: GhostState, config: &GhostConfig) -> Vec<GhostEffect> {
    let mut effects = vec![GhostEffect::SetSpeed(config.speed_for(state))];
    if let Some(material) = config.material_for(state) {
        effects.push(GhostEffect::ApplyMaterial(material.clone()));
    }
    effects
}

pub fn transition(current: GhostState, trigger: GhostTrigger, config: &GhostConfig) -> Transition {
    match trigger {
        GhostTrigger::Request(requested) => request(current, requested, config),

        GhostTrigger::PlayerContact => match current {
            GhostState::Chase => Transition::to(GhostState::Chase, vec![GhostEffect::DamagePlayer]),
            GhostState::Flee => {
                let mut effects = enter(GhostState::Eaten, config);
                effects.push(GhostEffect::Captured);
                Transition::to(GhostState::Eaten, effects)
            }
            // Eaten игнорирует игрока; Respawning между тиками не существует
            GhostState::Eaten | GhostState::Respawning => Transition::stay(current),
        },

        GhostTrigger::ReachedSpawn => match current {
            GhostState::Eaten => Transition::to(GhostState::Chase, enter(GhostState::Chase, config)),
            _ => Transition::stay(current),
        },
    }
}

fn request(current: GhostState, requested: GhostState, config: &GhostConfig) -> Transition {
    match (current, requested) {
        // Respawning: pass-through сразу в Chase
        (_, GhostState::Respawning) => Transition::to(GhostState::Chase, enter(GhostState::Chase, config)),

        // Съеденный ghost не может снова стать уязвимым
        (GhostState::Eaten, GhostState::Flee) => Transition::reject(current),

        // Eaten только из Flee (или повторный вход)
        (GhostState::Chase | GhostState::Respawning, GhostState::Eaten) => Transition::reject(current),

        (_, next) => Transition::to(next, enter(next, config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_materials() -> GhostConfig {
        GhostConfig {
            chase_material: Some(MaterialId::new("chase")),
            flee_material: Some(MaterialId::new("flee")),
            eaten_material: Some(MaterialId::new("eaten")),
            ..Default::default()
        }
    }

    #[test]
    fn test_chase_contact_damages_player_and_keeps_state() {
        let config = GhostConfig::default();
        let t = transition(GhostState::Chase, GhostTrigger::PlayerContact, &config);

        assert_eq!(t.next, GhostState::Chase);
        assert_eq!(t.effects, vec![GhostEffect::DamagePlayer]);
    }

    #[test]
    fn test_flee_contact_captures() {
        let config = config_with_materials();
        let t = transition(GhostState::Flee, GhostTrigger::PlayerContact, &config);

        assert_eq!(t.next, GhostState::Eaten);
        assert_eq!(
            t.effects,
            vec![
                GhostEffect::SetSpeed(5.25),
                GhostEffect::ApplyMaterial(MaterialId::new("eaten")),
                GhostEffect::Captured,
            ]
        );
    }

    #[test]
    fn test_eaten_ignores_contact() {
        let config = GhostConfig::default();
        let t = transition(GhostState::Eaten, GhostTrigger::PlayerContact, &config);

        assert_eq!(t.next, GhostState::Eaten);
        assert!(t.effects.is_empty());
        assert!(!t.rejected); // игнор контакта: не ошибка
    }

    #[test]
    fn test_reached_spawn_only_from_eaten() {
        let config = GhostConfig::default();

        let t = transition(GhostState::Eaten, GhostTrigger::ReachedSpawn, &config);
        assert_eq!(t.next, GhostState::Chase);
        assert_eq!(t.effects, vec![GhostEffect::SetSpeed(3.5)]);

        let t = transition(GhostState::Flee, GhostTrigger::ReachedSpawn, &config);
        assert_eq!(t.next, GhostState::Flee);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_flee_request_rejected_while_eaten() {
        let config = GhostConfig::default();
        let t = transition(GhostState::Eaten, GhostTrigger::Request(GhostState::Flee), &config);

        assert_eq!(t.next, GhostState::Eaten);
        assert!(t.effects.is_empty());
        assert!(t.rejected);
    }

    #[test]
    fn test_eaten_request_rejected_outside_flee() {
        let config = GhostConfig::default();
        let t = transition(GhostState::Chase, GhostTrigger::Request(GhostState::Eaten), &config);

        assert_eq!(t.next, GhostState::Chase);
        assert!(t.effects.is_empty());
        assert!(t.rejected);
    }

    #[test]
    fn test_reentrant_request_resets_parameters() {
        let config = config_with_materials();
        let t = transition(GhostState::Flee, GhostTrigger::Request(GhostState::Flee), &config);

        assert_eq!(t.next, GhostState::Flee);
        assert!(!t.changed_from(GhostState::Flee));
        assert_eq!(
            t.effects,
            vec![
                GhostEffect::SetSpeed(2.5),
                GhostEffect::ApplyMaterial(MaterialId::new("flee")),
            ]
        );
    }

    #[test]
    fn test_respawning_passes_through_to_chase() {
        let config = GhostConfig::default();
        let t = transition(GhostState::Eaten, GhostTrigger::Request(GhostState::Respawning), &config);

        assert_eq!(t.next, GhostState::Chase);
    }

    #[test]
    fn test_missing_material_skips_effect() {
        let config = GhostConfig::default();
        let t = transition(GhostState::Chase, GhostTrigger::Request(GhostState::Flee), &config);

        assert_eq!(t.effects, vec![GhostEffect::SetSpeed(2.5)]);
    }
}
