//! Named-argument payloads carried by event topics
//!
//! Topics move heterogeneous data: a countdown tick carries seconds, a
//! score update carries the whole score list, a touch carries positions.
//! `Value` is the closed set of payload shapes and `Arguments` is the bag
//! a `signal` hands to every subscriber. Access is typed at the access
//! site, never when the event is sent; reading a key as the wrong type is
//! a programmer error and panics.

use std::collections::HashMap;

use macroquad::prelude::{Color, Vec2};

use crate::input::Touch;

/// One named argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Color(Color),
    Vec2(Vec2),
    Ints(Vec<i64>),
    Touch(Touch),
    Touches(Vec<Touch>),
}

impl Value {
    /// Variant name, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Color(_) => "color",
            Value::Vec2(_) => "vec2",
            Value::Ints(_) => "ints",
            Value::Touch(_) => "touch",
            Value::Touches(_) => "touches",
        }
    }

    pub fn expect_bool(&self, what: &str) -> bool {
        match self {
            Value::Bool(v) => *v,
            other => mismatch(what, "bool", other),
        }
    }

    pub fn expect_int(&self, what: &str) -> i64 {
        match self {
            Value::Int(v) => *v,
            other => mismatch(what, "int", other),
        }
    }

    pub fn expect_float(&self, what: &str) -> f64 {
        match self {
            Value::Float(v) => *v,
            other => mismatch(what, "float", other),
        }
    }

    pub fn expect_text(&self, what: &str) -> &str {
        match self {
            Value::Text(v) => v,
            other => mismatch(what, "text", other),
        }
    }

    pub fn expect_color(&self, what: &str) -> Color {
        match self {
            Value::Color(v) => *v,
            other => mismatch(what, "color", other),
        }
    }

    pub fn expect_vec2(&self, what: &str) -> Vec2 {
        match self {
            Value::Vec2(v) => *v,
            other => mismatch(what, "vec2", other),
        }
    }

    pub fn expect_ints(&self, what: &str) -> &[i64] {
        match self {
            Value::Ints(v) => v,
            other => mismatch(what, "ints", other),
        }
    }

    pub fn expect_touch(&self, what: &str) -> &Touch {
        match self {
            Value::Touch(v) => v,
            other => mismatch(what, "touch", other),
        }
    }

    pub fn expect_touches(&self, what: &str) -> &[Touch] {
        match self {
            Value::Touches(v) => v,
            other => mismatch(what, "touches", other),
        }
    }
}

fn mismatch(what: &str, expected: &str, found: &Value) -> ! {
    panic!("{}: expected {}, found {}", what, expected, found.kind())
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Color> for Value {
    fn from(v: Color) -> Self {
        Value::Color(v)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Value::Vec2(v)
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Value::Ints(v)
    }
}

impl From<Touch> for Value {
    fn from(v: Touch) -> Self {
        Value::Touch(v)
    }
}

impl From<Vec<Touch>> for Value {
    fn from(v: Vec<Touch>) -> Self {
        Value::Touches(v)
    }
}

/// Read-only named-argument bag delivered to subscribers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: HashMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn value(&self, name: &str) -> &Value {
        self.values
            .get(name)
            .unwrap_or_else(|| panic!("missing argument `{}`", name))
    }

    pub fn boolean(&self, name: &str) -> bool {
        self.value(name).expect_bool(name)
    }

    pub fn int(&self, name: &str) -> i64 {
        self.value(name).expect_int(name)
    }

    pub fn float(&self, name: &str) -> f64 {
        self.value(name).expect_float(name)
    }

    pub fn text(&self, name: &str) -> &str {
        self.value(name).expect_text(name)
    }

    pub fn color(&self, name: &str) -> Color {
        self.value(name).expect_color(name)
    }

    pub fn vec2(&self, name: &str) -> Vec2 {
        self.value(name).expect_vec2(name)
    }

    pub fn ints(&self, name: &str) -> &[i64] {
        self.value(name).expect_ints(name)
    }

    pub fn touch(&self, name: &str) -> &Touch {
        self.value(name).expect_touch(name)
    }

    pub fn touches(&self, name: &str) -> &[Touch] {
        self.value(name).expect_touches(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::vec2;

    #[test]
    fn test_typed_access() {
        let args = Arguments::new()
            .with("flag", true)
            .with("count", 7)
            .with("remaining_time", 12.5)
            .with("label", "hello")
            .with("tint", Color::new(1.0, 0.0, 0.0, 1.0))
            .with("at", vec2(3.0, 4.0))
            .with("scores", vec![10i64, 25, 10]);

        assert!(args.boolean("flag"));
        assert_eq!(args.int("count"), 7);
        assert_eq!(args.float("remaining_time"), 12.5);
        assert_eq!(args.text("label"), "hello");
        assert_eq!(args.color("tint"), Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(args.vec2("at"), vec2(3.0, 4.0));
        assert_eq!(args.ints("scores"), &[10, 25, 10]);
    }

    #[test]
    fn test_touch_payload() {
        let touch = Touch {
            id: 3,
            pos: vec2(10.0, 20.0),
            prev_pos: vec2(9.0, 19.0),
        };
        let args = Arguments::new()
            .with("touch", touch)
            .with("touches", vec![touch, touch]);

        assert_eq!(args.touch("touch").id, 3);
        assert_eq!(args.touches("touches").len(), 2);
    }

    #[test]
    fn test_get_is_optional() {
        let args = Arguments::new().with("present", 1);
        assert!(args.get("present").is_some());
        assert!(args.get("absent").is_none());
        assert!(!args.contains("absent"));
    }

    #[test]
    #[should_panic(expected = "missing argument `absent`")]
    fn test_missing_argument_panics() {
        Arguments::new().float("absent");
    }

    #[test]
    #[should_panic(expected = "expected float, found text")]
    fn test_type_mismatch_panics_at_access() {
        // Building the bag with the wrong type is fine; the read blows up.
        let args = Arguments::new().with("remaining_time", "soon");
        args.float("remaining_time");
    }
}
