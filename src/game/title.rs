//! Title screen

use std::cell::Cell;
use std::rc::Rc;

use macroquad::prelude::Vec2;

use crate::defer::Defer;
use crate::event::EventBus;
use crate::task::Task;
use crate::ui::{build, Canvas, CanvasHandle, DrawTarget, WidgetConfig};

/// Waits for the first touch, announces `Title:finished`, and goes away.
pub struct Title {
    canvas: Canvas,
    defer: Defer,
    finished: Rc<Cell<bool>>,
}

impl Title {
    pub fn new(ui: &WidgetConfig, bus: &EventBus) -> Self {
        let mut canvas = Canvas::new(build(ui));
        let defer = Defer::new();
        let finished = Rc::new(Cell::new(false));

        {
            let announce = bus.clone();
            let finished = Rc::clone(&finished);
            canvas.connect(bus, "single_touch_ended", move |_, _| {
                if finished.replace(true) {
                    return;
                }
                announce.signal("Title:finished", &crate::args::Arguments::new());
            });
        }

        schedule_pulse(&defer, canvas.handle(), false);

        Self {
            canvas,
            defer,
            finished,
        }
    }
}

/// Blink the touch hint by toggling its widget on a fixed beat.
fn schedule_pulse(defer: &Defer, ui: CanvasHandle, visible: bool) {
    let next = defer.clone();
    defer.add(0.6, move || {
        ui.enable("hint", visible);
        schedule_pulse(&next, ui.clone(), !visible);
    });
}

impl Task for Title {
    fn update(&mut self, _current_time: f64, delta_time: f64) -> bool {
        self.defer.update(delta_time);
        !self.finished.get()
    }

    fn draw(&mut self, target: &mut dyn DrawTarget, window_size: Vec2) {
        self.canvas.draw(target, window_size);
    }
}
