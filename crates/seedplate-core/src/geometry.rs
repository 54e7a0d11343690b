use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in display (scaled) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// A rectangle in source-image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Clamp a proposed top-left position so a `width`x`height` rectangle stays
/// inside `boundary`. Toolkit-free replacement for the geometry-framework
/// position-change callback: `x ∈ [left, right - width]`, same for `y`.
///
/// When the rectangle is larger than the boundary the lower bound wins and the
/// rectangle pins to the boundary's top-left.
pub fn clamp_position(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    boundary: &DisplayRect,
) -> (f32, f32) {
    let max_x = boundary.right() - width;
    let max_y = boundary.bottom() - height;
    (x.min(max_x).max(boundary.x), y.min(max_y).max(boundary.y))
}
