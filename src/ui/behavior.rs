//! Widget behaviors: the polymorphic draw/parameter seam
//!
//! A behavior is the part of a widget that knows how to draw content and
//! which named parameters it answers to. New widget kinds implement this
//! trait; the tree and its traversal never change for them.

use crate::args::Value;

use super::{DrawTarget, Rect, UiError};

pub trait Behavior {
    /// Draw into the widget's resolved on-screen rectangle.
    fn draw(&self, rect: Rect, target: &mut dyn DrawTarget);

    /// Set a named parameter. Names a behavior does not recognize fail
    /// with `UnknownParameter`.
    fn set_param(&mut self, name: &str, value: &Value) -> Result<(), UiError>;

    fn get_param(&self, name: &str) -> Result<Value, UiError>;
}

/// Invisible behavior for pure layout/grouping widgets.
#[derive(Debug, Default)]
pub struct Blank;

impl Behavior for Blank {
    fn draw(&self, _rect: Rect, _target: &mut dyn DrawTarget) {}

    fn set_param(&mut self, name: &str, _value: &Value) -> Result<(), UiError> {
        Err(UiError::UnknownParameter(name.to_string()))
    }

    fn get_param(&self, name: &str) -> Result<Value, UiError> {
        Err(UiError::UnknownParameter(name.to_string()))
    }
}
