//! Deferred one-shot actions, drained once per frame
//!
//! A minimal single-threaded timer list: entries carry a remaining time
//! that `update` counts down by the frame delta. No per-entry cancel —
//! an owner that goes away drops its whole queue.

use std::cell::RefCell;
use std::rc::Rc;

type Action = Box<dyn FnOnce()>;

struct Entry {
    remaining: f64,
    action: Action,
}

#[derive(Default)]
struct Queue {
    pending: Vec<Entry>,
    incoming: Vec<Entry>,
    updating: bool,
}

/// Clonable handle so a firing action can schedule a follow-up.
#[derive(Clone, Default)]
pub struct Defer {
    inner: Rc<RefCell<Queue>>,
}

impl Defer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` once, `delay` seconds of update time from now.
    ///
    /// Entries added while `update` is draining (by a firing action) are
    /// parked until the pass finishes, so they can never fire within the
    /// same `update` call.
    pub fn add<F>(&self, delay: f64, action: F)
    where
        F: FnOnce() + 'static,
    {
        let mut queue = self.inner.borrow_mut();
        let entry = Entry {
            remaining: delay,
            action: Box::new(action),
        };
        if queue.updating {
            queue.incoming.push(entry);
        } else {
            queue.pending.push(entry);
        }
    }

    /// Advance all pending entries by `delta_time` and fire the ones that
    /// reached zero, in the order they were scheduled.
    pub fn update(&self, delta_time: f64) {
        let due: Vec<Action> = {
            let mut queue = self.inner.borrow_mut();
            queue.updating = true;
            for entry in &mut queue.pending {
                entry.remaining -= delta_time;
            }
            let mut due = Vec::new();
            let mut i = 0;
            while i < queue.pending.len() {
                if queue.pending[i].remaining <= 0.0 {
                    due.push(queue.pending.remove(i).action);
                } else {
                    i += 1;
                }
            }
            due
        };

        for action in due {
            action();
        }

        let mut queue = self.inner.borrow_mut();
        queue.updating = false;
        let incoming = std::mem::take(&mut queue.incoming);
        queue.pending.extend(incoming);
    }

    pub fn len(&self) -> usize {
        let queue = self.inner.borrow();
        queue.pending.len() + queue.incoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
