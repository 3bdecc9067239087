use std::cell::{Cell, RefCell};
use std::fmt::Display;
use std::rc::Rc;

use chrono::{DateTime, Local, TimeZone};
use compost_types::{SensorReadings, SensorSnapshot, SnapshotOutcome, SENSORS_PATH};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::store::{FeedError, RealtimeStore, Unsubscribe};

/// Feed lifecycle. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FeedPhase {
    /// Waiting for the store connection. Stays here forever if connecting fails.
    Connecting,
    Connected,
    Subscribed,
}

impl FeedPhase {
    pub fn is_ready(&self) -> bool {
        *self != FeedPhase::Connecting
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    pub readings: SensorReadings,
    pub phase: FeedPhase,
    pub last_update: DateTime<Local>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            readings: SensorReadings::new(),
            phase: FeedPhase::Connecting,
            last_update: Local::now(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase.is_ready()
    }

    pub fn footer_text(&self) -> String {
        footer_text(&self.last_update, self.is_ready())
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn footer_text<Tz: TimeZone>(lastUpdate: &DateTime<Tz>, ready: bool) -> String
where
    Tz::Offset: Display,
{
    let offlineSuffix = if ready { "" } else { " (Offline Mode)" };
    format!(
        "Terakhir diperbarui: {}{offlineSuffix}",
        lastUpdate.format("%H.%M.%S")
    )
}

type ChangeListener = Rc<dyn Fn(&DashboardState)>;

/// Owns the sensor display state and the feed subscription for one dashboard view.
///
/// Cloning shares the same dashboard. `start` connects and subscribes, `teardown` releases
/// the listener; both are safe to call in any order and more than once.
pub struct Dashboard<S: RealtimeStore> {
    inner: Rc<DashboardInner<S>>,
}

struct DashboardInner<S: RealtimeStore> {
    store: S,
    path: String,
    state: RefCell<DashboardState>,
    listeners: RefCell<Vec<ChangeListener>>,
    subscription: RefCell<Option<Unsubscribe>>,
    started: Cell<bool>,
    closed: Cell<bool>,
}

impl<S: RealtimeStore> Clone for Dashboard<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: RealtimeStore + 'static> Dashboard<S> {
    pub fn new(store: S) -> Self {
        Self::with_path(store, SENSORS_PATH)
    }

    pub fn with_path(store: S, path: &str) -> Self {
        Self {
            inner: Rc::new(DashboardInner {
                store,
                path: path.to_string(),
                state: RefCell::new(DashboardState::new()),
                listeners: RefCell::new(Vec::new()),
                subscription: RefCell::new(None),
                started: Cell::new(false),
                closed: Cell::new(false),
            }),
        }
    }

    /// Register a callback run after every state change.
    pub fn on_change(&self, listener: impl Fn(&DashboardState) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn state(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    pub fn phase(&self) -> FeedPhase {
        self.inner.state.borrow().phase
    }

    pub fn is_subscribed(&self) -> bool {
        self.inner
            .subscription
            .borrow()
            .as_ref()
            .is_some_and(Unsubscribe::is_active)
    }

    /// Connect to the store, then register the snapshot listener.
    ///
    /// A failed connection is logged and leaves the dashboard connecting for good.
    pub async fn start(&self) {
        if self.inner.started.replace(true) || self.inner.closed.get() {
            return;
        }

        info!(path = %self.inner.path, "connecting to realtime store");
        let handle = match self.inner.store.connect().await {
            Ok(handle) => handle,
            Err(e) => {
                error!("{e}");
                return;
            }
        };

        if self.inner.closed.get() {
            info!("dashboard closed while connecting, not subscribing");
            return;
        }

        self.inner.advance(FeedPhase::Connected);
        info!("realtime store ready");
        if self.inner.closed.get() {
            info!("dashboard closed on connect, not subscribing");
            return;
        }

        let demoFallback = self.inner.store.demo_fallback(&handle);
        let weak = Rc::downgrade(&self.inner);
        let onValue = Box::new(move |payload: Option<Value>| {
            if let Some(inner) = weak.upgrade() {
                inner.apply(payload, demoFallback);
            }
        });
        let onError = Box::new(|e: FeedError| {
            error!("error reading from realtime store: {e}");
        });

        let mut unsubscribe = self
            .inner
            .store
            .subscribe(&handle, &self.inner.path, onValue, onError);
        // Teardown may have run from a change listener during the initial delivery.
        if self.inner.closed.get() {
            unsubscribe.call();
            info!(path = %self.inner.path, "dashboard closed while subscribing, listener released");
            return;
        }
        *self.inner.subscription.borrow_mut() = Some(unsubscribe);
        self.inner.advance(FeedPhase::Subscribed);
        info!(path = %self.inner.path, "subscribed to sensor feed");
    }

    /// Release the feed listener. Runs the release at most once.
    pub fn teardown(&self) {
        self.inner.closed.set(true);
        let subscription = self.inner.subscription.borrow_mut().take();
        if let Some(mut unsubscribe) = subscription {
            unsubscribe.call();
            info!(path = %self.inner.path, "unsubscribed from sensor feed");
        }
    }
}

impl<S: RealtimeStore> DashboardInner<S> {
    fn advance(&self, phase: FeedPhase) {
        {
            let mut state = self.state.borrow_mut();
            if phase <= state.phase {
                return;
            }
            state.phase = phase;
        }
        self.notify();
    }

    fn apply(&self, payload: Option<Value>, demoFallback: bool) {
        if self.closed.get() {
            return;
        }

        debug!(?payload, "sensor snapshot received");
        if payload.as_ref().is_some_and(|v| !v.is_object() && !v.is_null()) {
            warn!("sensor payload is not an object, it carries no metric values");
        }
        let snapshot = SensorSnapshot::from_payload(payload);

        {
            let mut state = self.state.borrow_mut();
            match state.readings.apply_snapshot(snapshot.as_ref(), demoFallback) {
                SnapshotOutcome::Applied => state.last_update = Local::now(),
                SnapshotOutcome::DemoFallback => {
                    warn!("no sensor data in store, showing demo readings")
                }
                SnapshotOutcome::Cleared => info!("no sensor data in store"),
            }
        }
        self.notify();
    }

    fn notify(&self) {
        let state = self.state.borrow().clone();
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&state);
        }
    }
}
