use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FeedError {
    #[error("failed to connect to realtime store: {0}")]
    Connect(String),
    #[error("failed to read from realtime store: {0}")]
    Read(String),
    #[error("listener cancelled by the store: {0}")]
    Cancelled(String),
    #[error("store credentials were revoked")]
    AuthRevoked,
    #[error("malformed stream event: {0}")]
    Protocol(String),
}

/// Called with the full value at the subscribed path; `None` when the path holds nothing.
pub type ValueCallback = Box<dyn FnMut(Option<Value>)>;
pub type ErrorCallback = Box<dyn FnMut(FeedError)>;

/// A push-based realtime data store.
///
/// Connecting is the only suspension point. Subscribing is synchronous and returns the
/// handle that removes the listener again.
#[allow(async_fn_in_trait)]
pub trait RealtimeStore {
    type Handle;

    async fn connect(&self) -> Result<Self::Handle, FeedError>;

    fn subscribe(
        &self,
        handle: &Self::Handle,
        path: &str,
        onValue: ValueCallback,
        onError: ErrorCallback,
    ) -> Unsubscribe;

    /// Whether an empty path should be shown as demo readings on this connection.
    fn demo_fallback(&self, _handle: &Self::Handle) -> bool {
        true
    }
}

/// Removes a listener. Calling it more than once, or dropping it afterwards, is a no-op.
pub struct Unsubscribe {
    release: Option<Box<dyn FnOnce()>>,
}

impl Unsubscribe {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn noop() -> Self {
        Self { release: None }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    pub fn call(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Unsubscribe {
    fn drop(&mut self) {
        self.call();
    }
}

impl std::fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("active", &self.is_active())
            .finish()
    }
}
