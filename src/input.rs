//! Touch input relayed onto the event bus
//!
//! Polls macroquad once per frame and republishes what it finds as bus
//! topics, so gameplay only ever sees `single_touch_*` /
//! `multi_touch_moved` events regardless of whether they came from a
//! finger or the mouse. The first finger down from an idle state is
//! *the* single touch; everything past one active finger goes out as a
//! multi-touch batch for pinch/orbit handling.
//!
//! A couple of desktop conveniences ride along: the mouse stands in for
//! a single finger, the wheel for a pinch, and the keyboard for the
//! pause/abort taps.

use std::collections::HashMap;

use macroquad::input::{
    is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, is_mouse_button_released,
    mouse_position, mouse_wheel, touches, KeyCode, MouseButton, TouchPhase,
};
use macroquad::math::{vec2, Vec2};

use crate::args::Arguments;
use crate::event::EventBus;

/// One finger (or the mouse) on the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub id: u64,
    pub pos: Vec2,
    pub prev_pos: Vec2,
}

const MOUSE_ID: u64 = 1;

pub struct TouchRelay {
    bus: EventBus,
    mouse_prev: Vec2,
    /// Last seen position per finger, for prev_pos on move/end.
    last_pos: HashMap<u64, Vec2>,
    first_id: Option<u64>,
}

impl TouchRelay {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            mouse_prev: Vec2::ZERO,
            last_pos: HashMap::new(),
            first_id: None,
        }
    }

    pub fn update(&mut self) {
        self.poll_mouse();
        self.poll_touches();
        self.poll_keys();
    }

    fn poll_mouse(&mut self) {
        let (x, y) = mouse_position();
        let pos = vec2(x, y);

        if is_mouse_button_pressed(MouseButton::Left) {
            self.mouse_prev = pos;
            self.signal_single("single_touch_began", MOUSE_ID, pos, pos);
        } else if is_mouse_button_down(MouseButton::Left) && pos != self.mouse_prev {
            self.signal_single("single_touch_moved", MOUSE_ID, pos, self.mouse_prev);
            self.mouse_prev = pos;
        } else if is_mouse_button_released(MouseButton::Left) {
            self.signal_single("single_touch_ended", MOUSE_ID, pos, self.mouse_prev);
        }

        let (_, wheel_y) = mouse_wheel();
        if wheel_y != 0.0 {
            self.bus
                .signal("wheel:scrolled", &Arguments::new().with("amount", wheel_y));
        }
    }

    fn poll_touches(&mut self) {
        let frame_touches = touches();
        if frame_touches.is_empty() {
            return;
        }

        let mut moved = Vec::new();
        for raw in &frame_touches {
            let prev = self.last_pos.get(&raw.id).copied().unwrap_or(raw.position);
            let touch = Touch {
                id: raw.id,
                pos: raw.position,
                prev_pos: prev,
            };

            match raw.phase {
                TouchPhase::Started => {
                    if self.last_pos.is_empty() && self.first_id.is_none() {
                        self.first_id = Some(raw.id);
                        self.bus
                            .signal("single_touch_began", &Arguments::new().with("touch", touch));
                    }
                    self.last_pos.insert(raw.id, raw.position);
                }
                TouchPhase::Moved | TouchPhase::Stationary => {
                    moved.push(touch);
                    self.last_pos.insert(raw.id, raw.position);
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    if self.first_id == Some(raw.id) {
                        self.bus
                            .signal("single_touch_ended", &Arguments::new().with("touch", touch));
                        self.first_id = None;
                    }
                    self.last_pos.remove(&raw.id);
                }
            }
        }

        if moved.len() > 1 {
            self.bus
                .signal("multi_touch_moved", &Arguments::new().with("touches", moved));
        } else if let Some(touch) = moved.first() {
            if self.first_id == Some(touch.id) && touch.pos != touch.prev_pos {
                self.bus
                    .signal("single_touch_moved", &Arguments::new().with("touch", *touch));
            }
        }
    }

    fn poll_keys(&mut self) {
        if is_key_pressed(KeyCode::Escape) {
            self.bus.signal("menu:tapped", &Arguments::new());
        }
        if is_key_pressed(KeyCode::Backspace) {
            self.bus.signal("abort:tapped", &Arguments::new());
        }
    }

    fn signal_single(&self, topic: &str, id: u64, pos: Vec2, prev_pos: Vec2) {
        let touch = Touch { id, pos, prev_pos };
        self.bus.signal(topic, &Arguments::new().with("touch", touch));
    }
}
