//! Realtime-database REST streaming protocol.
//!
//! A listener opens `GET {database}/{path}.json` as a server-sent event stream. The server
//! sends `put` and `patch` events relative to the subscribed path; the client keeps its own
//! copy of the tree and hands the whole tree to the subscriber after every change.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::store::FeedError;

/// SSE event names a stream listener registers for.
pub const STREAM_EVENTS: [&str; 5] = ["put", "patch", "keep-alive", "cancel", "auth_revoked"];

pub fn stream_url(databaseUrl: &str, path: &str) -> String {
    format!(
        "{}/{}.json",
        databaseUrl.trim_end_matches('/'),
        path.trim_matches('/')
    )
}

#[derive(Clone, Debug, PartialEq)]
pub enum StreamEvent {
    Put { path: String, data: Value },
    Patch { path: String, data: Value },
    KeepAlive,
    Cancel(String),
    AuthRevoked,
}

#[derive(Deserialize)]
struct ChangePayload {
    path: String,
    #[serde(default)]
    data: Value,
}

impl StreamEvent {
    pub fn parse(name: &str, data: &str) -> Result<Self, FeedError> {
        match name {
            "put" | "patch" => {
                let payload: ChangePayload = serde_json::from_str(data)
                    .map_err(|e| FeedError::Protocol(format!("{name} payload: {e}")))?;
                if name == "put" {
                    Ok(StreamEvent::Put {
                        path: payload.path,
                        data: payload.data,
                    })
                } else {
                    Ok(StreamEvent::Patch {
                        path: payload.path,
                        data: payload.data,
                    })
                }
            }
            "keep-alive" => Ok(StreamEvent::KeepAlive),
            "cancel" => {
                let reason = serde_json::from_str::<String>(data).unwrap_or_else(|_| data.to_string());
                Ok(StreamEvent::Cancel(reason))
            }
            "auth_revoked" => Ok(StreamEvent::AuthRevoked),
            other => Err(FeedError::Protocol(format!("unknown event '{other}'"))),
        }
    }
}

/// Local copy of the value at the subscribed path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamTree {
    root: Value,
}

impl StreamTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, `None` while the path holds nothing.
    pub fn value(&self) -> Option<Value> {
        match &self.root {
            Value::Null => None,
            v => Some(v.clone()),
        }
    }

    /// Apply one event. Returns the full tree after a change, `None` for keep-alives,
    /// and an error for events that end the stream.
    pub fn apply(&mut self, event: StreamEvent) -> Result<Option<Option<Value>>, FeedError> {
        match event {
            StreamEvent::Put { path, data } => {
                set_at(&mut self.root, &segments(&path), data);
            }
            StreamEvent::Patch { path, data } => {
                let Value::Object(children) = data else {
                    return Err(FeedError::Protocol(format!(
                        "patch at '{path}' is not an object"
                    )));
                };
                let base = segments(&path);
                for (key, child) in children {
                    let mut childPath = base.clone();
                    childPath.push(key);
                    set_at(&mut self.root, &childPath, child);
                }
            }
            StreamEvent::KeepAlive => return Ok(None),
            StreamEvent::Cancel(reason) => return Err(FeedError::Cancelled(reason)),
            StreamEvent::AuthRevoked => return Err(FeedError::AuthRevoked),
        }

        prune(&mut self.root);
        Ok(Some(self.value()))
    }
}

fn segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn set_at(node: &mut Value, path: &[String], data: Value) {
    let Some((first, rest)) = path.split_first() else {
        *node = data;
        return;
    };

    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    let Value::Object(children) = node else {
        return;
    };

    if rest.is_empty() && data.is_null() {
        children.remove(first);
        return;
    }

    let child = children.entry(first.clone()).or_insert(Value::Null);
    set_at(child, rest, data);
}

/// Empty objects do not exist in the store; collapse them to null.
fn prune(node: &mut Value) {
    if let Value::Object(children) = node {
        for child in children.values_mut() {
            prune(child);
        }
        children.retain(|_, v| !v.is_null());
        if children.is_empty() {
            *node = Value::Null;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn put(path: &str, data: Value) -> StreamEvent {
        StreamEvent::Put {
            path: path.to_string(),
            data,
        }
    }

    #[test]
    fn builds_stream_url() {
        assert_eq!(
            stream_url("https://compost-rtdb.firebaseio.com/", "sensors"),
            "https://compost-rtdb.firebaseio.com/sensors.json"
        );
        assert_eq!(
            stream_url("http://localhost:9000", "/sensors/"),
            "http://localhost:9000/sensors.json"
        );
    }

    #[test]
    fn parses_change_events() {
        let event =
            StreamEvent::parse("put", r#"{"path":"/","data":{"temperature":55.2}}"#).unwrap();
        assert_eq!(event, put("/", json!({"temperature": 55.2})));

        let event = StreamEvent::parse("patch", r#"{"path":"/","data":{"ph":7}}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Patch {
                path: "/".to_string(),
                data: json!({"ph": 7})
            }
        );
    }

    #[test]
    fn parses_control_events() {
        assert_eq!(StreamEvent::parse("keep-alive", "null").unwrap(), StreamEvent::KeepAlive);
        assert_eq!(
            StreamEvent::parse("cancel", "\"permission denied\"").unwrap(),
            StreamEvent::Cancel("permission denied".to_string())
        );
        assert_eq!(
            StreamEvent::parse("auth_revoked", "\"credential is no longer valid\"").unwrap(),
            StreamEvent::AuthRevoked
        );
    }

    #[test]
    fn rejects_malformed_events() {
        assert!(matches!(
            StreamEvent::parse("put", "not json"),
            Err(FeedError::Protocol(_))
        ));
        assert!(matches!(
            StreamEvent::parse("rename", "{}"),
            Err(FeedError::Protocol(_))
        ));
    }

    #[test]
    fn root_put_replaces_tree() {
        let mut tree = StreamTree::new();
        tree.apply(put("/", json!({"temperature": 50, "ph": 7}))).unwrap();
        let snapshot = tree.apply(put("/", json!({"gas": 120}))).unwrap();

        assert_eq!(snapshot, Some(Some(json!({"gas": 120}))));
    }

    #[test]
    fn initial_null_put_reports_empty_path() {
        let mut tree = StreamTree::new();
        assert_eq!(tree.apply(put("/", Value::Null)).unwrap(), Some(None));
    }

    #[test]
    fn child_put_updates_one_key() {
        let mut tree = StreamTree::new();
        tree.apply(put("/", json!({"temperature": 50, "ph": 7}))).unwrap();
        let snapshot = tree.apply(put("/temperature", json!(61.5))).unwrap();

        assert_eq!(snapshot, Some(Some(json!({"temperature": 61.5, "ph": 7}))));
    }

    #[test]
    fn child_put_null_removes_key() {
        let mut tree = StreamTree::new();
        tree.apply(put("/", json!({"temperature": 50, "ph": 7}))).unwrap();
        tree.apply(put("/ph", Value::Null)).unwrap();
        assert_eq!(tree.value(), Some(json!({"temperature": 50})));

        let snapshot = tree.apply(put("/temperature", Value::Null)).unwrap();
        assert_eq!(snapshot, Some(None));
    }

    #[test]
    fn patch_merges_children() {
        let mut tree = StreamTree::new();
        tree.apply(put("/", json!({"temperature": 50, "ph": 7}))).unwrap();
        let snapshot = tree
            .apply(StreamEvent::Patch {
                path: "/".to_string(),
                data: json!({"ph": 7.4, "ec": 1.5, "temperature": null}),
            })
            .unwrap();

        assert_eq!(snapshot, Some(Some(json!({"ph": 7.4, "ec": 1.5}))));
    }

    #[test]
    fn keep_alive_changes_nothing() {
        let mut tree = StreamTree::new();
        tree.apply(put("/", json!({"gas": 10}))).unwrap();
        assert_eq!(tree.apply(StreamEvent::KeepAlive).unwrap(), None);
        assert_eq!(tree.value(), Some(json!({"gas": 10})));
    }

    #[test]
    fn cancel_and_revocation_are_errors() {
        let mut tree = StreamTree::new();
        assert_eq!(
            tree.apply(StreamEvent::Cancel("permission denied".to_string())),
            Err(FeedError::Cancelled("permission denied".to_string()))
        );
        assert_eq!(tree.apply(StreamEvent::AuthRevoked), Err(FeedError::AuthRevoked));
    }
}
