//! RectNavMesh: плоская прямоугольная арена с прямоугольными препятствиями
//!
//! Не pathfinder: только `sample_position` для headless прогонов и тестов.
//! Плоскость XZ, высота пола фиксирована.

use bevy::prelude::*;

use super::NavigationService;

/// Прямоугольник на плоскости XZ (min/max включительно)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl NavRect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Строго внутри (точки на границе препятствия считаются проходимыми)
    fn contains_strict(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    /// Ближайшая точка на границе (для выталкивания из препятствия)
    fn nearest_edge_point(&self, p: Vec2) -> Vec2 {
        let to_left = p.x - self.min.x;
        let to_right = self.max.x - p.x;
        let to_bottom = p.y - self.min.y;
        let to_top = self.max.y - p.y;

        let nearest = to_left.min(to_right).min(to_bottom).min(to_top);
        if nearest == to_left {
            Vec2::new(self.min.x, p.y)
        } else if nearest == to_right {
            Vec2::new(self.max.x, p.y)
        } else if nearest == to_bottom {
            Vec2::new(p.x, self.min.y)
        } else {
            Vec2::new(p.x, self.max.y)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectNavMesh {
    pub bounds: NavRect,
    pub obstacles: Vec<NavRect>,
    pub floor_height: f32,
}

impl RectNavMesh {
    pub fn new(bounds: NavRect) -> Self {
        Self {
            bounds,
            obstacles: Vec::new(),
            floor_height: 0.0,
        }
    }

    pub fn with_obstacle(mut self, obstacle: NavRect) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn is_walkable(&self, p: Vec2) -> bool {
        self.bounds.contains(p) && !self.obstacles.iter().any(|o| o.contains_strict(p))
    }
}

impl NavigationService for RectNavMesh {
    fn sample_position(&self, point: Vec3, radius: f32) -> Option<Vec3> {
        let query = Vec2::new(point.x, point.z);
        let mut candidate = self.bounds.clamp(query);

        if let Some(blocking) = self.obstacles.iter().find(|o| o.contains_strict(candidate)) {
            candidate = self.bounds.clamp(blocking.nearest_edge_point(candidate));
        }

        if !self.is_walkable(candidate) {
            return None;
        }

        if candidate.distance(query) > radius {
            return None;
        }

        Some(Vec3::new(candidate.x, self.floor_height, candidate.y))
    }
}
