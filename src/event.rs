//! Event bus: string topics, ordered synchronous delivery
//!
//! The bus decouples gameplay from presentation: gameplay signals a topic,
//! canvas bindings mutate widgets, and neither side holds a reference to
//! the other. Everything runs on the frame thread; `signal` returns only
//! after every subscriber (and anything they signalled in turn) has run.
//!
//! Dispatch iterates a snapshot of the subscriber list taken when `signal`
//! starts, so callbacks are free to connect and disconnect mid-delivery:
//! a subscription revoked during the dispatch is skipped even if the
//! revocation happened a callback earlier, and a subscription added during
//! the dispatch first fires on the next `signal`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::args::Arguments;

type Callback = Rc<dyn Fn(&Arguments)>;

struct Subscriber {
    id: u64,
    alive: Rc<Cell<bool>>,
    callback: Callback,
}

#[derive(Default)]
struct Topics {
    subscribers: HashMap<String, Vec<Subscriber>>,
    next_id: u64,
}

/// Cheaply clonable bus handle, threaded through constructors.
///
/// All clones share one subscriber table; the table lives as long as any
/// clone does. Single-threaded by design.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Topics>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `callback` to `topic`. Delivery order is subscription
    /// order. The returned handle is the only way to revoke; dropping it
    /// leaves the subscription live.
    pub fn connect<F>(&self, topic: &str, callback: F) -> Connection
    where
        F: Fn(&Arguments) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        let alive = Rc::new(Cell::new(true));
        inner
            .subscribers
            .entry(topic.to_string())
            .or_default()
            .push(Subscriber {
                id,
                alive: Rc::clone(&alive),
                callback: Rc::new(callback),
            });

        Connection {
            topic: topic.to_string(),
            id,
            alive,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Invoke every live subscriber of `topic`, in subscription order, on
    /// the calling thread. A topic with no subscribers is a no-op.
    pub fn signal(&self, topic: &str, args: &Arguments) {
        // Snapshot, then release the borrow before calling out: callbacks
        // may connect, disconnect, or signal again.
        let snapshot: Vec<(Rc<Cell<bool>>, Callback)> = {
            let inner = self.inner.borrow();
            match inner.subscribers.get(topic) {
                Some(subs) => subs
                    .iter()
                    .map(|s| (Rc::clone(&s.alive), Rc::clone(&s.callback)))
                    .collect(),
                None => return,
            }
        };

        for (alive, callback) in snapshot {
            // Recheck right before the call: an earlier callback of this
            // same dispatch may have revoked this one.
            if alive.get() {
                (*callback)(args);
            }
        }
    }
}

/// Revocable handle for one subscription.
pub struct Connection {
    topic: String,
    id: u64,
    alive: Rc<Cell<bool>>,
    bus: Weak<RefCell<Topics>>,
}

impl Connection {
    /// Revoke the subscription. Idempotent; safe to call from inside a
    /// dispatch of the same topic.
    pub fn disconnect(&self) {
        if !self.alive.replace(false) {
            return;
        }
        if let Some(bus) = self.bus.upgrade() {
            let mut inner = bus.borrow_mut();
            if let Some(subs) = inner.subscribers.get_mut(&self.topic) {
                subs.retain(|s| s.id != self.id);
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.alive.get()
    }
}

/// Holder that revokes every contained subscription when dropped.
///
/// Objects that subscribe (a task, a canvas) keep their handles in one of
/// these so teardown can never leave a dangling callback behind.
#[derive(Default)]
pub struct ConnectionSet {
    connections: Vec<Connection>,
}

impl ConnectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl std::ops::AddAssign<Connection> for ConnectionSet {
    fn add_assign(&mut self, connection: Connection) {
        self.add(connection);
    }
}

impl Drop for ConnectionSet {
    fn drop(&mut self) {
        for connection in &self.connections {
            connection.disconnect();
        }
    }
}
