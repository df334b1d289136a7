//! Minimal screen-space geometry shared by the layout outputs.
//!
//! Coordinates grow rightwards (x) and downwards (y), in CSS pixels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Vec2f {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectF {
    pub min: Vec2f,
    pub max: Vec2f,
}

impl RectF {
    pub fn from_min_max(min: Vec2f, max: Vec2f) -> Self {
        Self { min, max }
    }
    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::from_min_max(Vec2f::new(x, y), Vec2f::new(x + width, y + height))
    }
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
    /// Touching edges do not count as an intersection.
    pub fn intersects(&self, other: RectF) -> bool {
        !(self.max.x <= other.min.x
            || other.max.x <= self.min.x
            || self.max.y <= other.min.y
            || other.max.y <= self.min.y)
    }
}
