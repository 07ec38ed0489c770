//! Game-mode tasks
//!
//! Each screen (title, game) is a task: ticked once per frame, drawn in
//! list order, removed when its update reports completion.

use macroquad::prelude::Vec2;

use crate::ui::DrawTarget;

pub trait Task {
    /// Advance one frame. Return `false` to be removed from the container.
    fn update(&mut self, current_time: f64, delta_time: f64) -> bool;

    fn draw(&mut self, target: &mut dyn DrawTarget, window_size: Vec2);
}

/// Ordered, exclusively-owning task list.
#[derive(Default)]
pub struct TaskContainer {
    tasks: Vec<Box<dyn Task>>,
}

impl TaskContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert in front: drawn first, so visually bottom-most.
    pub fn push_front(&mut self, task: Box<dyn Task>) {
        self.tasks.insert(0, task);
    }

    pub fn push_back(&mut self, task: Box<dyn Task>) {
        self.tasks.push(task);
    }

    /// Tick every task once; drop the ones that finished, keeping the
    /// relative order of the survivors.
    pub fn update(&mut self, current_time: f64, delta_time: f64) {
        self.tasks
            .retain_mut(|task| task.update(current_time, delta_time));
    }

    pub fn draw(&mut self, target: &mut dyn DrawTarget, window_size: Vec2) {
        for task in &mut self.tasks {
            task.draw(target, window_size);
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        tag: &'static str,
        frames_left: u32,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Probe {
        fn new(tag: &'static str, frames_left: u32, log: &Rc<RefCell<Vec<String>>>) -> Box<Self> {
            Box::new(Self {
                tag,
                frames_left,
                log: Rc::clone(log),
            })
        }
    }

    impl Task for Probe {
        fn update(&mut self, _current_time: f64, _delta_time: f64) -> bool {
            self.log.borrow_mut().push(format!("update:{}", self.tag));
            if self.frames_left == 0 {
                return false;
            }
            self.frames_left -= 1;
            true
        }

        fn draw(&mut self, _target: &mut dyn DrawTarget, _window_size: Vec2) {
            self.log.borrow_mut().push(format!("draw:{}", self.tag));
        }
    }

    struct NullTarget;

    impl DrawTarget for NullTarget {
        fn text_size(&self, _font: &str, _px: f32, _text: &str) -> Vec2 {
            Vec2::ZERO
        }
        fn text(&mut self, _font: &str, _px: f32, _pos: Vec2, _color: macroquad::color::Color, _text: &str) {}
        fn round_rect(&mut self, _rect: crate::ui::Rect, _radius: f32, _color: macroquad::color::Color) {}
    }

    #[test]
    fn test_removed_after_reporting_done() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut container = TaskContainer::new();
        container.push_back(Probe::new("a", 1, &log));

        container.update(0.0, 0.0);
        container.draw(&mut NullTarget, Vec2::ZERO);
        assert_eq!(container.len(), 1);

        // Reports false this frame: still updated, but gone before the
        // next draw.
        container.update(0.0, 0.0);
        container.draw(&mut NullTarget, Vec2::ZERO);
        assert!(container.is_empty());

        assert_eq!(
            *log.borrow(),
            vec!["update:a", "draw:a", "update:a"]
        );
    }

    #[test]
    fn test_survivor_order_preserved() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut container = TaskContainer::new();
        container.push_back(Probe::new("a", 9, &log));
        container.push_back(Probe::new("b", 0, &log));
        container.push_back(Probe::new("c", 9, &log));

        container.update(0.0, 0.0);
        container.draw(&mut NullTarget, Vec2::ZERO);

        assert_eq!(
            *log.borrow(),
            vec!["update:a", "update:b", "update:c", "draw:a", "draw:c"]
        );
    }

    #[test]
    fn test_push_front_draws_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut container = TaskContainer::new();
        container.push_back(Probe::new("back", 9, &log));
        container.push_front(Probe::new("front", 9, &log));

        container.draw(&mut NullTarget, Vec2::ZERO);
        assert_eq!(*log.borrow(), vec!["draw:front", "draw:back"]);
    }
}
