//! Best-effort confirmation notification
//!
//! Fired once when the question is answered, consumed only through the
//! [`Notifier`] trait. Failures are logged and swallowed; a notification
//! must never block, delay or revert the screen transition.

/// Outbound notification hook
pub trait Notifier {
    /// Kick off a fire-and-forget notification for `event`
    fn notify(&self, event: &str);
}

/// Notification mode "none": does nothing, records nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _event: &str) {}
}

/// Fire-and-forget GET against a webhook URL. The request runs on the
/// browser's microtask queue; the caller never waits on it.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
}

#[cfg(target_arch = "wasm32")]
impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(target_arch = "wasm32")]
impl Notifier for WebhookNotifier {
    fn notify(&self, event: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let url = format!("{}?event={}", self.url, event);
        let promise = window.fetch_with_str(&url);
        wasm_bindgen_futures::spawn_local(async move {
            match wasm_bindgen_futures::JsFuture::from(promise).await {
                Ok(_) => log::debug!("notification delivered"),
                Err(err) => log::warn!("notification failed (ignored): {err:?}"),
            }
        });
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Test double that remembers every event it was asked to send
    #[derive(Debug, Clone, Default)]
    pub struct RecordingNotifier {
        pub events: Rc<RefCell<Vec<String>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, event: &str) {
            self.events.borrow_mut().push(event.to_string());
        }
    }
}
