//! Text drawing behavior

use macroquad::prelude::{vec2, Color, Vec2};

use crate::args::Value;

use super::{Behavior, DrawTarget, Rect, UiError};

/// Renders a string inside the widget rectangle.
///
/// Glyph height follows the resolved rectangle height at draw time, so a
/// stretched or scaled widget rescales its text for free. `layout` places
/// the string within the rectangle: (0,0) flush upper-left, (1,1) flush
/// lower-right, (0.5,0.5) centered.
pub struct Text {
    text: String,
    // What was in the document; keeps rendering when dynamic layout is off.
    initial_text: String,
    font: String,
    layout: Vec2,
    color: Color,
    dynamic_layout: bool,
}

impl Text {
    pub fn new(text: &str, font: &str, layout: Vec2, color: Color, dynamic_layout: bool) -> Self {
        Self {
            text: text.to_string(),
            initial_text: text.to_string(),
            font: font.to_string(),
            layout,
            color,
            dynamic_layout,
        }
    }
}

impl Behavior for Text {
    fn draw(&self, rect: Rect, target: &mut dyn DrawTarget) {
        let shown = if self.dynamic_layout {
            &self.text
        } else {
            &self.initial_text
        };
        let px = rect.h;
        let size = target.text_size(&self.font, px, shown);
        let pos = vec2(
            rect.x * (1.0 - self.layout.x) + (rect.right() - size.x) * self.layout.x,
            rect.y * (1.0 - self.layout.y) + (rect.bottom() - size.y) * self.layout.y,
        );
        target.text(&self.font, px, pos, self.color, shown);
    }

    fn set_param(&mut self, name: &str, value: &Value) -> Result<(), UiError> {
        match name {
            "text" => self.text = value.expect_text("text").to_string(),
            "color" => self.color = value.expect_color("color"),
            _ => return Err(UiError::UnknownParameter(name.to_string())),
        }
        Ok(())
    }

    fn get_param(&self, name: &str) -> Result<Value, UiError> {
        match name {
            "text" => Ok(Value::Text(self.text.clone())),
            "color" => Ok(Value::Color(self.color)),
            _ => Err(UiError::UnknownParameter(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::WHITE;

    #[derive(Default)]
    struct Recorder {
        rendered: Vec<String>,
    }

    impl DrawTarget for Recorder {
        fn text_size(&self, _font: &str, _px: f32, _text: &str) -> Vec2 {
            Vec2::ZERO
        }

        fn text(&mut self, _font: &str, _px: f32, _pos: Vec2, _color: Color, text: &str) {
            self.rendered.push(text.to_string());
        }

        fn round_rect(&mut self, _rect: Rect, _radius: f32, _color: Color) {}
    }

    #[test]
    fn test_dynamic_layout_renders_updates() {
        let mut text = Text::new("1'00", "default", vec2(0.5, 0.5), WHITE, true);
        text.set_param("text", &Value::Text("0'59".into())).unwrap();

        let mut recorder = Recorder::default();
        text.draw(Rect::new(0.0, 0.0, 100.0, 20.0), &mut recorder);
        assert_eq!(recorder.rendered, vec!["0'59"]);
    }

    #[test]
    fn test_static_layout_keeps_rendering_initial_value() {
        let mut text = Text::new("READY", "default", vec2(0.5, 0.5), WHITE, false);
        text.set_param("text", &Value::Text("changed".into())).unwrap();

        // The stored parameter moves, what is drawn does not.
        assert_eq!(text.get_param("text").unwrap(), Value::Text("changed".into()));
        let mut recorder = Recorder::default();
        text.draw(Rect::new(0.0, 0.0, 100.0, 20.0), &mut recorder);
        assert_eq!(recorder.rendered, vec!["READY"]);
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let mut text = Text::new("x", "default", vec2(0.5, 0.5), WHITE, true);
        assert_eq!(
            text.set_param("radius", &Value::Float(1.0)).unwrap_err(),
            UiError::UnknownParameter("radius".to_string())
        );
    }
}
