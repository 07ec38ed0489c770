//! Rounded-rectangle drawing behavior

use macroquad::prelude::Color;

use crate::args::Value;

use super::{Behavior, DrawTarget, Rect, UiError};

/// Filled rectangle with rounded corners.
pub struct RoundRect {
    corner_radius: f32,
    color: Color,
}

impl RoundRect {
    pub fn new(corner_radius: f32, color: Color) -> Self {
        Self {
            corner_radius,
            color,
        }
    }
}

impl Behavior for RoundRect {
    fn draw(&self, rect: Rect, target: &mut dyn DrawTarget) {
        target.round_rect(rect, self.corner_radius, self.color);
    }

    fn set_param(&mut self, name: &str, value: &Value) -> Result<(), UiError> {
        match name {
            "corner_radius" => self.corner_radius = value.expect_float("corner_radius") as f32,
            "color" => self.color = value.expect_color("color"),
            _ => return Err(UiError::UnknownParameter(name.to_string())),
        }
        Ok(())
    }

    fn get_param(&self, name: &str) -> Result<Value, UiError> {
        match name {
            "corner_radius" => Ok(Value::Float(self.corner_radius as f64)),
            "color" => Ok(Value::Color(self.color)),
            _ => Err(UiError::UnknownParameter(name.to_string())),
        }
    }
}
