//! Flee destination search
//!
//! Navmesh sample может не найти точку у стен/препятствий, поэтому поиск
//! деградирует по трём уровням:
//! 1. полная flee_distance строго от игрока
//! 2. 0.75 / 0.5 / 0.25 от flee_distance по тому же направлению
//! 3. веер из 8 направлений (шаг 45°) от направления "от игрока", 0.5 дистанции
//!
//! Все уровни провалились → None, ghost сохраняет прежний destination.

use bevy::prelude::*;

use crate::navigation::NavigationService;

/// Количество радиальных попыток второго уровня (0.75, 0.5, 0.25)
const RADIAL_STEPS: u32 = 3;

/// Количество направлений веера
const FAN_DIRECTIONS: u32 = 8;

const FAN_STEP_DEGREES: f32 = 45.0;

/// Какой уровень поиска нашёл точку (для логов/тестов)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleeTier {
    Full,
    Radial { step: u32 },
    Fan { direction: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FleeDestination {
    pub position: Vec3,
    pub tier: FleeTier,
}

/// Ищет точку для бегства от `player`
pub fn find_flee_destination(
    nav: &dyn NavigationService,
    agent: Vec3,
    player: Vec3,
    flee_distance: f32,
) -> Option<FleeDestination> {
    let away = (agent - player).normalize_or_zero();

    // Уровень 1: полная дистанция
    let candidate = agent + away * flee_distance;
    if let Some(position) = nav.sample_position(candidate, flee_distance * 0.5) {
        return Some(FleeDestination {
            position,
            tier: FleeTier::Full,
        });
    }

    // Уровень 2: ближе, по тому же направлению
    for step in (1..=RADIAL_STEPS).rev() {
        let distance = flee_distance * 0.25 * step as f32;
        let candidate = agent + away * distance;
        if let Some(position) = nav.sample_position(candidate, distance * 0.5) {
            return Some(FleeDestination {
                position,
                tier: FleeTier::Radial { step },
            });
        }
    }

    // Уровень 3: веер направлений вокруг вертикали
    for direction in 0..FAN_DIRECTIONS {
        let angle = (direction as f32 * FAN_STEP_DEGREES).to_radians();
        let rotated = Quat::from_rotation_y(angle) * away;
        let candidate = agent + rotated * flee_distance * 0.5;
        if let Some(position) = nav.sample_position(candidate, flee_distance * 0.3) {
            return Some(FleeDestination {
                position,
                tier: FleeTier::Fan { direction },
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Navmesh, отвечающий только на N-й запрос (1-based), пишет все запросы
    struct ScriptedNav {
        succeed_on_call: Option<usize>,
        hit: Vec3,
        calls: Mutex<Vec<(Vec3, f32)>>,
    }

    impl ScriptedNav {
        fn new(succeed_on_call: Option<usize>) -> Self {
            Self {
                succeed_on_call,
                hit: Vec3::new(42.0, 0.0, -7.0),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(Vec3, f32)> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    impl NavigationService for ScriptedNav {
        fn sample_position(&self, point: Vec3, radius: f32) -> Option<Vec3> {
            let mut calls = self.calls.lock().unwrap();
            calls.push((point, radius));
            (Some(calls.len()) == self.succeed_on_call).then_some(self.hit)
        }
    }

    const AGENT: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    const PLAYER: Vec3 = Vec3::new(-3.0, 0.0, 0.0);

    #[test]
    fn test_full_distance_first() {
        let nav = ScriptedNav::new(Some(1));
        let result = find_flee_destination(&nav, AGENT, PLAYER, 10.0).unwrap();

        assert_eq!(result.tier, FleeTier::Full);
        assert_eq!(result.position, nav.hit);

        let calls = nav.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (Vec3::new(10.0, 0.0, 0.0), 5.0));
    }

    #[test]
    fn test_radial_fallback_distances() {
        let nav = ScriptedNav::new(None);
        let result = find_flee_destination(&nav, AGENT, PLAYER, 10.0);
        assert!(result.is_none());

        let calls = nav.calls();
        assert_eq!(calls.len(), 1 + 3 + 8);
        assert_eq!(calls[1], (Vec3::new(7.5, 0.0, 0.0), 3.75));
        assert_eq!(calls[2], (Vec3::new(5.0, 0.0, 0.0), 2.5));
        assert_eq!(calls[3], (Vec3::new(2.5, 0.0, 0.0), 1.25));
    }

    #[test]
    fn test_fan_direction_three_wins() {
        // 1 full + 3 radial + направления 0,1,2 провалились → 8-й вызов (direction 3)
        let nav = ScriptedNav::new(Some(8));
        let result = find_flee_destination(&nav, AGENT, PLAYER, 10.0).unwrap();

        assert_eq!(result.tier, FleeTier::Fan { direction: 3 });
        assert_eq!(result.position, nav.hit);

        let calls = nav.calls();
        let (point, radius) = calls[7];
        assert!((radius - 3.0).abs() < 1e-5); // 0.3 × flee_distance
        assert!((point.length() - 5.0).abs() < 1e-4); // 0.5 × flee_distance от агента

        // 135° от направления "от игрока" (+X)
        let away = Vec3::X;
        let angle = away.angle_between(point.normalize());
        assert!((angle.to_degrees() - 135.0).abs() < 1e-2, "angle = {}", angle.to_degrees());
    }

    #[test]
    fn test_fan_first_direction_is_straight_away() {
        let nav = ScriptedNav::new(Some(5));
        let result = find_flee_destination(&nav, AGENT, PLAYER, 10.0).unwrap();
        assert_eq!(result.tier, FleeTier::Fan { direction: 0 });

        let (point, _) = nav.calls()[4];
        assert!(point.distance(Vec3::new(5.0, 0.0, 0.0)) < 1e-4);
    }
}
