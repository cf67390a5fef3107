//! Axis-aligned rectangles and circle tests
//!
//! Brute-force checks only; the entity counts in play never justify a broad-phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict interior test (points on the border are outside)
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x > self.pos.x && point.x < max.x && point.y > self.pos.y && point.y < max.y
    }

    /// Closest point of the rectangle to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }

    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) < radius * radius
    }
}

/// Clamp a circle's centre so the whole circle stays inside `[0, extent]`
#[inline]
pub fn clamp_circle(center: Vec2, radius: f32, extent: Vec2) -> Vec2 {
    let lo = Vec2::splat(radius);
    let hi = (extent - Vec2::splat(radius)).max(lo);
    center.clamp(lo, hi)
}

/// True when `point` lies inside the map rectangle `[0, extent]` (border inclusive)
#[inline]
pub fn in_bounds(point: Vec2, extent: Vec2) -> bool {
    point.x >= 0.0 && point.y >= 0.0 && point.x <= extent.x && point.y <= extent.y
}
