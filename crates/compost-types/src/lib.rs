#![allow(non_snake_case)]

pub mod display;
pub mod metric;
pub mod reading;
pub mod snapshot;

pub use display::*;
pub use metric::*;
pub use reading::*;
pub use snapshot::*;

use serde::{Deserialize, Serialize};

/// Store path holding the sensor snapshot.
pub const SENSORS_PATH: &str = "sensors";

/// Feed connection settings handed to the browser when it connects.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FeedSettings {
    /// Base URL of the realtime database, e.g. `https://example-rtdb.firebaseio.com`.
    pub database_url: String,
    /// Install demo readings when the store holds no sensor data.
    pub demo_fallback: bool,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            demo_fallback: true,
        }
    }
}
