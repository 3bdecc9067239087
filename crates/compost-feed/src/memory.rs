use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use serde_json::Value;
use tracing::debug;

use crate::store::{ErrorCallback, FeedError, RealtimeStore, Unsubscribe, ValueCallback};

/// Single-threaded in-process store with realtime-database listener semantics:
/// a new listener immediately receives the current value, then every write to its path.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    values: HashMap<String, Value>,
    listeners: Vec<Listener>,
    nextId: u64,
    connectFailure: Option<String>,
    connects: u32,
    noDemoFallback: bool,
}

struct Listener {
    id: u64,
    path: String,
    onValue: Rc<RefCell<ValueCallback>>,
    onError: Rc<RefCell<ErrorCallback>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemoryHandle {
    pub connection: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `connect` always fails with `reason`.
    pub fn unreachable(reason: &str) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().connectFailure = Some(reason.to_string());
        store
    }

    /// Report empty paths as empty instead of asking for demo readings.
    pub fn without_demo_fallback(self) -> Self {
        self.inner.borrow_mut().noDemoFallback = true;
        self
    }

    pub fn set(&self, path: &str, value: Value) {
        {
            let mut inner = self.inner.borrow_mut();
            if value.is_null() {
                inner.values.remove(path);
            } else {
                inner.values.insert(path.to_string(), value);
            }
        }
        self.notify(path);
    }

    /// Deliver `error` to every listener on `path` through its error channel.
    pub fn fail_reads(&self, path: &str, error: FeedError) {
        let callbacks: Vec<_> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.path == path)
            .map(|l| l.onError.clone())
            .collect();

        for callback in callbacks {
            (callback.borrow_mut())(error.clone());
        }
    }

    pub fn listener_count(&self, path: &str) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.path == path)
            .count()
    }

    pub fn connect_count(&self) -> u32 {
        self.inner.borrow().connects
    }

    fn notify(&self, path: &str) {
        let (value, callbacks) = {
            let inner = self.inner.borrow();
            let callbacks: Vec<_> = inner
                .listeners
                .iter()
                .filter(|l| l.path == path)
                .map(|l| l.onValue.clone())
                .collect();
            (inner.values.get(path).cloned(), callbacks)
        };

        for callback in callbacks {
            (callback.borrow_mut())(value.clone());
        }
    }
}

impl RealtimeStore for MemoryStore {
    type Handle = MemoryHandle;

    async fn connect(&self) -> Result<MemoryHandle, FeedError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(reason) = &inner.connectFailure {
            return Err(FeedError::Connect(reason.clone()));
        }
        inner.connects += 1;
        Ok(MemoryHandle {
            connection: inner.connects,
        })
    }

    fn subscribe(
        &self,
        handle: &MemoryHandle,
        path: &str,
        onValue: ValueCallback,
        onError: ErrorCallback,
    ) -> Unsubscribe {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.nextId;
            inner.nextId += 1;
            inner.listeners.push(Listener {
                id,
                path: path.to_string(),
                onValue: Rc::new(RefCell::new(onValue)),
                onError: Rc::new(RefCell::new(onError)),
            });
            id
        };
        debug!(connection = handle.connection, path, id, "listener registered");

        self.notify(path);

        let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
        Unsubscribe::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|l| l.id != id);
                debug!(id, "listener removed");
            }
        })
    }

    fn demo_fallback(&self, _handle: &MemoryHandle) -> bool {
        !self.inner.borrow().noDemoFallback
    }
}
