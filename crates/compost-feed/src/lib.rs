#![allow(non_snake_case)]

pub mod dashboard;
pub mod memory;
pub mod store;
pub mod stream;

pub use dashboard::{footer_text, Dashboard, DashboardState, FeedPhase};
pub use memory::{MemoryHandle, MemoryStore};
pub use store::{ErrorCallback, FeedError, RealtimeStore, Unsubscribe, ValueCallback};
pub use stream::{stream_url, StreamEvent, StreamTree};
