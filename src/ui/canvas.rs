//! Canvas: one screen's widget tree plus its event bindings
//!
//! The canvas is the only surface between gameplay events and widgets —
//! game code never holds a widget reference. Bindings registered through
//! `connect` live in the canvas's own `ConnectionSet`, so dropping the
//! canvas (with its task) revokes them all, and they can be frozen as a
//! group with `active(false)` while a transition plays.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use macroquad::prelude::Vec2;

use crate::args::{Arguments, Value};
use crate::event::{ConnectionSet, EventBus};

use super::{DrawTarget, Rect, Widget};

struct CanvasInner {
    root: RefCell<Widget>,
    active: Cell<bool>,
}

pub struct Canvas {
    inner: Rc<CanvasInner>,
    connections: ConnectionSet,
}

impl Canvas {
    pub fn new(root: Widget) -> Self {
        Self {
            inner: Rc::new(CanvasInner {
                root: RefCell::new(root),
                active: Cell::new(true),
            }),
            connections: ConnectionSet::new(),
        }
    }

    /// Mutation handle for deferred actions and other closures.
    pub fn handle(&self) -> CanvasHandle {
        CanvasHandle {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Gate whether canvas bindings currently react to events. Drawing is
    /// not affected.
    pub fn active(&self, active: bool) {
        self.inner.active.set(active);
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    /// Bind `handler` to `topic`; it runs only while the canvas is
    /// active, and is revoked when the canvas is dropped.
    pub fn connect<F>(&mut self, bus: &EventBus, topic: &str, handler: F)
    where
        F: Fn(&CanvasHandle, &Arguments) + 'static,
    {
        let inner = Rc::clone(&self.inner);
        self.connections += bus.connect(topic, move |args| {
            if inner.active.get() {
                let handle = CanvasHandle {
                    inner: Rc::clone(&inner),
                };
                handler(&handle, args);
            }
        });
    }

    pub fn set_param(&self, path: &str, name: &str, value: impl Into<Value>) {
        self.handle().set_param(path, name, value);
    }

    pub fn get_param(&self, path: &str, name: &str) -> Value {
        self.handle().get_param(path, name)
    }

    pub fn enable(&self, path: &str, enabled: bool) {
        self.handle().enable(path, enabled);
    }

    pub fn is_enabled(&self, path: &str) -> bool {
        self.handle().is_enabled(path)
    }

    pub fn draw(&self, target: &mut dyn DrawTarget, window_size: Vec2) {
        self.inner
            .root
            .borrow()
            .draw(Rect::screen(window_size.x, window_size.y), target);
    }
}

/// Path-addressed access to a canvas's widgets.
///
/// Misses are configuration bugs (a document/handler mismatch), so every
/// method aborts instead of returning an error.
#[derive(Clone)]
pub struct CanvasHandle {
    inner: Rc<CanvasInner>,
}

impl CanvasHandle {
    pub fn set_param(&self, path: &str, name: &str, value: impl Into<Value>) {
        let result = self
            .inner
            .root
            .borrow_mut()
            .set_param(path, name, &value.into());
        if let Err(e) = result {
            panic!("canvas: {}", e);
        }
    }

    pub fn get_param(&self, path: &str, name: &str) -> Value {
        self.inner
            .root
            .borrow()
            .get_param(path, name)
            .unwrap_or_else(|e| panic!("canvas: {}", e))
    }

    pub fn enable(&self, path: &str, enabled: bool) {
        if let Err(e) = self.inner.root.borrow_mut().enable(path, enabled) {
            panic!("canvas: {}", e);
        }
    }

    pub fn is_enabled(&self, path: &str) -> bool {
        self.inner
            .root
            .borrow()
            .is_path_enabled(path)
            .unwrap_or_else(|e| panic!("canvas: {}", e))
    }
}
