use serde_json::Value;

use crate::metric::MetricKey;

/// One feed event payload: metric key to number, any subset of keys may be present.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorSnapshot {
    payload: Value,
}

impl SensorSnapshot {
    /// Interpret a raw feed payload. `None` means the feed delivered nothing.
    ///
    /// A scalar or array payload is still a snapshot: it carries no metric values, so every
    /// reading goes back to loading.
    pub fn from_payload(payload: Option<Value>) -> Option<Self> {
        match payload? {
            Value::Null => None,
            payload => Some(Self { payload }),
        }
    }

    /// True only for an object with no keys at all.
    pub fn is_empty(&self) -> bool {
        self.payload.as_object().is_some_and(|fields| fields.is_empty())
    }

    /// Numeric value for a metric. Missing keys, nulls and non-numbers read as absent.
    pub fn value(&self, key: MetricKey) -> Option<f64> {
        self.payload.get(key.as_str()).and_then(Value::as_f64)
    }
}
