//! Rectangle type for UI layout

use macroquad::prelude::{vec2, Vec2};
use serde::Deserialize;

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create from screen dimensions
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Map a fractional point of this rect to absolute coordinates
    /// ((0,0) = upper-left, (1,1) = lower-right).
    pub fn point_at(&self, fraction: Vec2) -> Vec2 {
        vec2(self.x + self.w * fraction.x, self.y + self.h * fraction.y)
    }

    /// Resolve a child rectangle inside this frame.
    ///
    /// `anchor` names two fractional points of the frame; `offset`'s
    /// origin hangs off the first, and the span between them is added to
    /// `offset`'s size. Equal anchor points therefore pin the rect, and
    /// spread points stretch it with the frame. `scale` is applied last,
    /// about the fractional `pivot` point of the un-scaled result.
    pub fn anchored(&self, offset: Rect, anchor: (Vec2, Vec2), pivot: Vec2, scale: Vec2) -> Rect {
        let a0 = self.point_at(anchor.0);
        let a1 = self.point_at(anchor.1);
        let base = Rect::new(
            a0.x + offset.x,
            a0.y + offset.y,
            offset.w + (a1.x - a0.x),
            offset.h + (a1.y - a0.y),
        );

        let p = base.point_at(pivot);
        Rect::new(
            p.x + (base.x - p.x) * scale.x,
            p.y + (base.y - p.y) * scale.y,
            base.w * scale.x,
            base.h * scale.y,
        )
    }
}
