//! Draw seam between the widget tree and the renderer

use std::collections::HashMap;

use macroquad::prelude::*;

use super::Rect;

/// What a behavior needs from the backend to draw itself.
///
/// The production implementation is `Drawer`; tests substitute a recorder
/// to observe the traversal without a window.
pub trait DrawTarget {
    /// Pixel size of `text` rendered at `px` height with `font`.
    fn text_size(&self, font: &str, px: f32, text: &str) -> Vec2;

    fn text(&mut self, font: &str, px: f32, pos: Vec2, color: Color, text: &str);

    fn round_rect(&mut self, rect: Rect, radius: f32, color: Color);
}

/// Screen renderer holding loaded fonts by name.
///
/// Unknown font names fall back to the built-in font, so a canvas document
/// can name fonts that were never loaded and still render.
#[derive(Default)]
pub struct Drawer {
    fonts: HashMap<String, Font>,
}

impl Drawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a TTF font and register it under `name`. Failure is logged and
    /// the name keeps resolving to the built-in font.
    pub async fn load_font(&mut self, name: &str, path: &str) {
        match load_ttf_font(path).await {
            Ok(font) => {
                self.fonts.insert(name.to_string(), font);
            }
            Err(e) => eprintln!("font: failed to load {}: {:?}", path, e),
        }
    }

    fn font(&self, name: &str) -> Option<&Font> {
        self.fonts.get(name)
    }
}

impl DrawTarget for Drawer {
    fn text_size(&self, font: &str, px: f32, text: &str) -> Vec2 {
        let dims = measure_text(text, self.font(font), px as u16, 1.0);
        vec2(dims.width, dims.height)
    }

    fn text(&mut self, font: &str, px: f32, pos: Vec2, color: Color, text: &str) {
        let font = self.fonts.get(font);
        let dims = measure_text(text, font, px as u16, 1.0);
        // `pos` is the glyph box's upper-left; macroquad wants a baseline.
        draw_text_ex(
            text,
            pos.x,
            pos.y + dims.offset_y,
            TextParams {
                font,
                font_size: px as u16,
                color,
                ..Default::default()
            },
        );
    }

    fn round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        let r = radius.min(rect.w * 0.5).min(rect.h * 0.5).max(0.0);
        // Two overlapping rects plus corner circles.
        draw_rectangle(rect.x + r, rect.y, rect.w - r * 2.0, rect.h, color);
        draw_rectangle(rect.x, rect.y + r, rect.w, rect.h - r * 2.0, color);
        draw_circle(rect.x + r, rect.y + r, r, color);
        draw_circle(rect.right() - r, rect.y + r, r, color);
        draw_circle(rect.x + r, rect.bottom() - r, r, color);
        draw_circle(rect.right() - r, rect.bottom() - r, r, color);
    }
}
