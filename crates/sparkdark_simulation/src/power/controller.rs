//! PowerModeController: глобальный countdown power mode
//!
//! Чистые данные: activate/tick только считают время и говорят ЧТО случилось.
//! Broadcast по ghost'ам делает система `update_power_mode`.
//!
//! Инвариант: !active ⇒ remaining == 0

use bevy::prelude::*;

/// Что произошло за тик countdown'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerModeTick {
    /// remaining впервые вошёл в warning окно (одно событие на активацию)
    WarningStarted { remaining: f32 },
    /// remaining дошёл до нуля → power mode выключен
    Expired,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PowerModeController {
    active: bool,
    remaining: f32,
    total: f32,
    warning_time: f32,
    warning_announced: bool,
    /// Ghost'ы для broadcast (None: ещё не собраны)
    registered: Option<Vec<Entity>>,
}

impl Default for PowerModeController {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl PowerModeController {
    pub fn new(warning_time: f32) -> Self {
        Self {
            active: false,
            remaining: 0.0,
            total: 0.0,
            warning_time,
            warning_announced: false,
            registered: None,
        }
    }

    /// Явно заданный список ghost'ов (автопоиск не выполняется)
    pub fn with_agents(mut self, agents: Vec<Entity>) -> Self {
        self.registered = Some(agents);
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn warning_time(&self) -> f32 {
        self.warning_time
    }

    /// Warning фаза: power mode скоро закончится (только для presentation)
    pub fn is_warning(&self) -> bool {
        self.active && self.remaining > 0.0 && self.remaining <= self.warning_time
    }

    pub fn is_registered(&self) -> bool {
        self.registered.is_some()
    }

    pub fn registered_agents(&self) -> &[Entity] {
        self.registered.as_deref().unwrap_or(&[])
    }

    /// Собирает ghost'ов один раз; после первого заполнения список не меняется
    ///
    /// Пустой набор не фиксирует список: ждём пока ghost'ы появятся.
    pub fn register_agents_once(&mut self, agents: impl IntoIterator<Item = Entity>) -> bool {
        if self.registered.is_some() {
            return false;
        }

        let agents: Vec<Entity> = agents.into_iter().collect();
        if agents.is_empty() {
            return false;
        }

        self.registered = Some(agents);
        true
    }

    /// Включает power mode (перезаписывает текущий countdown, без стакинга)
    pub fn activate(&mut self, duration: f32) {
        let duration = duration.max(0.0);
        self.active = true;
        self.total = duration;
        self.remaining = duration;
        self.warning_announced = false;
    }

    /// Countdown на delta секунд
    pub fn tick(&mut self, delta: f32) -> Option<PowerModeTick> {
        if !self.active {
            return None;
        }

        self.remaining -= delta;

        if self.remaining <= 0.0 {
            self.deactivate();
            return Some(PowerModeTick::Expired);
        }

        if self.remaining <= self.warning_time && !self.warning_announced {
            self.warning_announced = true;
            return Some(PowerModeTick::WarningStarted {
                remaining: self.remaining,
            });
        }

        None
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.remaining = 0.0;
        self.warning_announced = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_by_default() {
        let controller = PowerModeController::default();
        assert!(!controller.is_active());
        assert_eq!(controller.remaining(), 0.0);
        assert!(!controller.is_warning());
    }

    #[test]
    fn test_reactivation_restarts_not_stacks() {
        let mut controller = PowerModeController::default();
        controller.activate(5.0);
        controller.activate(10.0);

        assert_eq!(controller.remaining(), 10.0); // не 15
        assert_eq!(controller.total(), 10.0);
    }

    #[test]
    fn test_countdown_expires() {
        let mut controller = PowerModeController::default();
        controller.activate(10.0);

        let mut expired = false;
        for _ in 0..11 {
            if controller.tick(1.0) == Some(PowerModeTick::Expired) {
                expired = true;
            }
        }

        assert!(expired);
        assert!(!controller.is_active());
        assert_eq!(controller.remaining(), 0.0);
        assert_eq!(controller.tick(1.0), None); // неактивный таймер не тикает
    }

    #[test]
    fn test_warning_announced_once() {
        let mut controller = PowerModeController::new(3.0);
        controller.activate(5.0);

        assert_eq!(controller.tick(1.0), None); // 4.0
        assert!(!controller.is_warning());

        assert_eq!(controller.tick(1.5), Some(PowerModeTick::WarningStarted { remaining: 2.5 }));
        assert!(controller.is_warning());

        assert_eq!(controller.tick(1.0), None); // 1.5: уже объявлено
        assert!(controller.is_warning());
    }

    #[test]
    fn test_register_agents_once() {
        let mut controller = PowerModeController::default();
        assert!(!controller.register_agents_once(Vec::new())); // пусто → ждём

        let first = Entity::from_raw(1);
        let second = Entity::from_raw(2);
        assert!(controller.register_agents_once(vec![first]));
        assert!(!controller.register_agents_once(vec![first, second]));
        assert_eq!(controller.registered_agents(), &[first]);
    }
}
