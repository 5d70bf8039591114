//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in battlefield pixels.
/// Origin is the top-left corner; x grows East, y grows South.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GameTime {
    /// Frames simulated so far (only advances while a round is active).
    pub frame: u64,
    /// Elapsed battle time in milliseconds.
    pub elapsed_ms: u64,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle from a top-left corner and a size vector.
    pub fn from_corner_size(corner: Vec2, size: Vec2) -> Self {
        Self {
            x: corner.x,
            y: corner.y,
            w: size.x,
            h: size.y,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True when the rectangles overlap with positive area.
    /// Rectangles that merely share an edge do not intersect, which is
    /// what lets a tank sit flush against a wall it was clamped to.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// The same rectangle shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }
}

impl GameTime {
    /// Advance by one frame of `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: u32) {
        self.frame += 1;
        self.elapsed_ms += u64::from(dt_ms);
    }
}
