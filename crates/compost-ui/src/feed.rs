use compost_types::FeedSettings;
use leptos::prelude::*;

/// Feed settings for the browser. Fails while no database URL is configured.
#[server]
pub async fn get_feed_settings() -> Result<FeedSettings, ServerFnError> {
    let settings = use_context::<FeedSettings>()
        .ok_or_else(|| ServerFnError::new("feed settings unavailable"))?;

    if settings.database_url.trim().is_empty() {
        return Err(ServerFnError::new("feed database_url is not configured"));
    }

    Ok(settings)
}

#[cfg(feature = "hydrate")]
pub use browser::EventSourceStore;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use compost_feed::stream::STREAM_EVENTS;
    use compost_feed::{
        stream_url, ErrorCallback, FeedError, RealtimeStore, StreamEvent, StreamTree,
        Unsubscribe, ValueCallback,
    };
    use compost_types::FeedSettings;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Event, EventSource, MessageEvent};

    use super::get_feed_settings;

    /// Realtime database listener over the browser's `EventSource`.
    ///
    /// Connecting fetches the feed settings from the server; subscribing opens the
    /// streaming endpoint for the path and keeps a local copy of the tree.
    pub struct EventSourceStore;

    impl RealtimeStore for EventSourceStore {
        type Handle = FeedSettings;

        async fn connect(&self) -> Result<FeedSettings, FeedError> {
            get_feed_settings()
                .await
                .map_err(|e| FeedError::Connect(e.to_string()))
        }

        fn subscribe(
            &self,
            handle: &FeedSettings,
            path: &str,
            onValue: ValueCallback,
            onError: ErrorCallback,
        ) -> Unsubscribe {
            let url = stream_url(&handle.database_url, path);
            let mut onError = onError;
            let source = match EventSource::new(&url) {
                Ok(source) => source,
                Err(e) => {
                    onError(FeedError::Connect(format!("cannot open {url}: {e:?}")));
                    return Unsubscribe::noop();
                }
            };

            let tree = Rc::new(RefCell::new(StreamTree::new()));
            let onValue = Rc::new(RefCell::new(onValue));
            let onError = Rc::new(RefCell::new(onError));

            let mut handlers = Vec::with_capacity(STREAM_EVENTS.len());
            for name in STREAM_EVENTS {
                let tree = tree.clone();
                let onValue = onValue.clone();
                let onError = onError.clone();
                let handler = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
                    let data = event.data().as_string().unwrap_or_default();
                    let applied = StreamEvent::parse(name, &data)
                        .and_then(|parsed| tree.borrow_mut().apply(parsed));
                    match applied {
                        Ok(Some(value)) => (onValue.borrow_mut())(value),
                        Ok(None) => {}
                        Err(e) => (onError.borrow_mut())(e),
                    }
                });
                if let Err(e) =
                    source.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())
                {
                    leptos::logging::warn!("failed to listen for '{name}' events: {e:?}");
                }
                handlers.push((name, handler));
            }

            let streamError = {
                let onError = onError.clone();
                Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                    (onError.borrow_mut())(FeedError::Read("event stream error".to_string()));
                })
            };
            source.set_onerror(Some(streamError.as_ref().unchecked_ref()));

            Unsubscribe::new(move || {
                source.set_onerror(None);
                for (name, handler) in &handlers {
                    let _ = source
                        .remove_event_listener_with_callback(name, handler.as_ref().unchecked_ref());
                }
                source.close();
                drop(streamError);
            })
        }

        fn demo_fallback(&self, handle: &FeedSettings) -> bool {
            handle.demo_fallback
        }
    }
}
