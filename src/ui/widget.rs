//! Widget tree node
//!
//! A widget owns its geometry, its children, and one behavior. The tree
//! is built once by the factory and then addressed by identifier paths:
//! `"put_timer:body"` is child `body` of child `put_timer`, each colon
//! segment descending one level from the receiver's children.
//!
//! Geometry is resolved lazily: the on-screen rectangle is derived at
//! draw time from the widget's own rect/anchor/pivot/scale and the frame
//! its parent resolved to, so there is no layout pass and no cached state
//! to invalidate.

use std::fmt;

use macroquad::prelude::{vec2, Vec2};

use crate::args::Value;

use super::{Behavior, Blank, DrawTarget, Rect, UiError};

pub struct Widget {
    identifier: String,
    rect: Rect,
    anchor: (Vec2, Vec2),
    pivot: Vec2,
    scale: Vec2,
    enabled: bool,
    behavior: Box<dyn Behavior>,
    children: Vec<Widget>,
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("identifier", &self.identifier)
            .field("rect", &self.rect)
            .field("anchor", &self.anchor)
            .field("pivot", &self.pivot)
            .field("scale", &self.scale)
            .field("enabled", &self.enabled)
            .field("children", &self.children)
            .finish()
    }
}

impl Widget {
    /// New widget with a `Blank` behavior, pinned to the frame's
    /// upper-left, centered pivot, unscaled.
    pub fn new(identifier: impl Into<String>, rect: Rect) -> Self {
        Self {
            identifier: identifier.into(),
            rect,
            anchor: (Vec2::ZERO, Vec2::ZERO),
            pivot: vec2(0.5, 0.5),
            scale: Vec2::ONE,
            enabled: true,
            behavior: Box::new(Blank),
            children: Vec::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn set_behavior(&mut self, behavior: Box<dyn Behavior>) {
        self.behavior = behavior;
    }

    /// Append a child; later children draw on top of earlier ones.
    pub fn add_child(&mut self, child: Widget) {
        self.children.push(child);
    }

    pub fn set_anchor(&mut self, a0: Vec2, a1: Vec2) {
        self.anchor = (a0, a1);
    }

    pub fn set_pivot(&mut self, pivot: Vec2) {
        self.pivot = pivot;
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Resolve a colon-delimited identifier path against this widget's
    /// descendants.
    pub fn find(&mut self, path: &str) -> Result<&mut Widget, UiError> {
        let mut current = self;
        for segment in path.split(':') {
            current = match current
                .children
                .iter_mut()
                .find(|c| c.identifier == segment)
            {
                Some(child) => child,
                None => return Err(UiError::WidgetNotFound(path.to_string())),
            };
        }
        Ok(current)
    }

    fn find_ref(&self, path: &str) -> Result<&Widget, UiError> {
        let mut current = self;
        for segment in path.split(':') {
            current = match current.children.iter().find(|c| c.identifier == segment) {
                Some(child) => child,
                None => return Err(UiError::WidgetNotFound(path.to_string())),
            };
        }
        Ok(current)
    }

    pub fn set_param(&mut self, path: &str, name: &str, value: &Value) -> Result<(), UiError> {
        self.find(path)?.behavior.set_param(name, value)
    }

    pub fn get_param(&self, path: &str, name: &str) -> Result<Value, UiError> {
        self.find_ref(path)?.behavior.get_param(name)
    }

    /// Toggle whether the addressed widget (and with it, its whole
    /// subtree) takes part in drawing.
    pub fn enable(&mut self, path: &str, enabled: bool) -> Result<(), UiError> {
        self.find(path)?.enabled = enabled;
        Ok(())
    }

    pub fn is_path_enabled(&self, path: &str) -> Result<bool, UiError> {
        Ok(self.find_ref(path)?.enabled)
    }

    /// Draw self, then enabled children in list order. A disabled widget
    /// is skipped outright, children included.
    pub fn draw(&self, frame: Rect, target: &mut dyn DrawTarget) {
        if !self.enabled {
            return;
        }
        let rect = frame.anchored(self.rect, self.anchor, self.pivot, self.scale);
        self.behavior.draw(rect, target);
        for child in &self.children {
            child.draw(rect, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{RoundRect, Text};
    use macroquad::prelude::{Color, WHITE};

    fn text_widget(identifier: &str, rect: Rect, text: &str) -> Widget {
        let mut widget = Widget::new(identifier, rect);
        widget.set_behavior(Box::new(Text::new(
            text,
            "default",
            vec2(0.5, 0.5),
            WHITE,
            true,
        )));
        widget
    }

    /// Records which widgets drew, via their text content / rect.
    #[derive(Default)]
    struct Recorder {
        texts: Vec<String>,
        rects: Vec<Rect>,
    }

    impl DrawTarget for Recorder {
        fn text_size(&self, _font: &str, _px: f32, _text: &str) -> Vec2 {
            Vec2::ZERO
        }

        fn text(&mut self, _font: &str, _px: f32, _pos: Vec2, _color: Color, text: &str) {
            self.texts.push(text.to_string());
        }

        fn round_rect(&mut self, rect: Rect, _radius: f32, _color: Color) {
            self.rects.push(rect);
        }
    }

    fn sample_tree() -> Widget {
        // root -> a -> b, root -> c
        let mut root = Widget::new("root", Rect::screen(100.0, 100.0));
        let mut a = text_widget("a", Rect::new(0.0, 0.0, 50.0, 10.0), "a");
        a.add_child(text_widget("b", Rect::new(0.0, 0.0, 40.0, 10.0), "b"));
        root.add_child(a);
        root.add_child(text_widget("c", Rect::new(0.0, 0.0, 50.0, 10.0), "c"));
        root
    }

    #[test]
    fn test_path_addresses_nested_widget() {
        let mut root = sample_tree();
        root.set_param("a:b", "text", &Value::Text("X".into()))
            .unwrap();

        assert_eq!(root.get_param("a:b", "text").unwrap(), Value::Text("X".into()));
        // Only the nested widget changed.
        assert_eq!(root.get_param("a", "text").unwrap(), Value::Text("a".into()));
    }

    #[test]
    fn test_missing_segment_is_widget_not_found() {
        let mut root = sample_tree();
        let err = root
            .set_param("a:c", "text", &Value::Text("X".into()))
            .unwrap_err();
        assert_eq!(err, UiError::WidgetNotFound("a:c".to_string()));

        let err = root.get_param("ghost", "text").unwrap_err();
        assert_eq!(err, UiError::WidgetNotFound("ghost".to_string()));
    }

    #[test]
    fn test_unknown_parameter_from_behavior() {
        let mut root = sample_tree();
        let err = root
            .set_param("a", "opacity", &Value::Float(0.5))
            .unwrap_err();
        assert_eq!(err, UiError::UnknownParameter("opacity".to_string()));
    }

    #[test]
    fn test_disabling_removes_whole_subtree_from_draw() {
        let mut root = sample_tree();
        let mut recorder = Recorder::default();
        root.draw(Rect::screen(100.0, 100.0), &mut recorder);
        assert_eq!(recorder.texts, vec!["a", "b", "c"]);

        // Disable the middle widget: its grandchild stays enabled but is
        // never visited.
        root.enable("a", false).unwrap();
        assert!(root.is_path_enabled("a:b").unwrap());

        let mut recorder = Recorder::default();
        root.draw(Rect::screen(100.0, 100.0), &mut recorder);
        assert_eq!(recorder.texts, vec!["c"]);
    }

    #[test]
    fn test_children_draw_in_list_order() {
        let mut root = Widget::new("root", Rect::screen(10.0, 10.0));
        root.add_child(text_widget("below", Rect::default(), "below"));
        root.add_child(text_widget("above", Rect::default(), "above"));

        let mut recorder = Recorder::default();
        root.draw(Rect::screen(10.0, 10.0), &mut recorder);
        assert_eq!(recorder.texts, vec!["below", "above"]);
    }

    #[test]
    fn test_child_resolves_inside_parent_rect() {
        let mut root = Widget::new("root", Rect::screen(200.0, 200.0));
        let mut panel = Widget::new("panel", Rect::new(50.0, 50.0, 100.0, 100.0));
        let mut body = Widget::new("body", Rect::new(10.0, 10.0, 20.0, 20.0));
        body.set_behavior(Box::new(RoundRect::new(4.0, WHITE)));
        panel.add_child(body);
        root.add_child(panel);

        let mut recorder = Recorder::default();
        root.draw(Rect::screen(200.0, 200.0), &mut recorder);
        // body offsets from panel's resolved origin.
        assert_eq!(recorder.rects, vec![Rect::new(60.0, 60.0, 20.0, 20.0)]);
    }

    #[test]
    fn test_layout_mutators_apply_at_next_draw() {
        let mut root = Widget::new("root", Rect::screen(100.0, 100.0));
        let mut box_widget = Widget::new("box", Rect::new(0.0, 0.0, 40.0, 40.0));
        box_widget.set_behavior(Box::new(RoundRect::new(0.0, WHITE)));
        root.add_child(box_widget);

        let mut recorder = Recorder::default();
        root.draw(Rect::screen(100.0, 100.0), &mut recorder);
        assert_eq!(recorder.rects, vec![Rect::new(0.0, 0.0, 40.0, 40.0)]);

        let moved = root.find("box").unwrap();
        moved.set_anchor(vec2(0.5, 0.5), vec2(0.5, 0.5));
        moved.set_pivot(Vec2::ZERO);
        moved.set_scale(vec2(2.0, 2.0));

        let mut recorder = Recorder::default();
        root.draw(Rect::screen(100.0, 100.0), &mut recorder);
        assert_eq!(recorder.rects, vec![Rect::new(50.0, 50.0, 80.0, 80.0)]);
    }
}
