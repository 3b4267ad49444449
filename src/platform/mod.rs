//! Browser platform plumbing
//!
//! Event listeners and timeouts wrapped in owning guards, so every
//! subscription has a scoped lifetime: acquire on screen enter, drop on
//! screen exit. Dropping unhooks the browser callback, which is what keeps
//! stale timers and listeners from firing into a screen that is gone.
//!
//! Everything here is wasm-only; the native binary is a stub.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use web_sys::EventTarget;

use crate::Viewport;

/// A registered DOM event listener, removed again on drop
#[cfg(target_arch = "wasm32")]
pub struct EventSubscription {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

#[cfg(target_arch = "wasm32")]
impl EventSubscription {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Self {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    /// Register with `once: true` so the browser removes the listener after
    /// the first firing. Dropping the guard afterwards is harmless.
    pub fn once(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Self {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let options = web_sys::AddEventListenerOptions::new();
        options.set_once(true);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        );
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for EventSubscription {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// A pending `setTimeout`, cleared on drop
#[cfg(target_arch = "wasm32")]
pub struct Timeout {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

#[cfg(target_arch = "wasm32")]
impl Timeout {
    pub fn new(delay_ms: u32, callback: impl FnMut() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let closure = Closure::<dyn FnMut()>::new(callback);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms as i32,
            )
            .ok()?;
        Some(Self {
            id,
            _closure: closure,
        })
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.id);
        }
    }
}

/// Timers owned by the currently mounted screen.
///
/// `clear()` runs on every screen transition, so a timer scheduled by the
/// outgoing screen can never fire into the incoming one.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct TimerRegistry {
    timers: Vec<Timeout>,
}

#[cfg(target_arch = "wasm32")]
impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timeout owned by the current screen
    pub fn schedule(&mut self, delay_ms: u32, callback: impl FnMut() + 'static) {
        if let Some(timeout) = Timeout::new(delay_ms, callback) {
            self.timers.push(timeout);
        }
    }

    /// Invalidate everything still pending
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

/// Monotonic time in ms (performance.now)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Current viewport size in px
#[cfg(target_arch = "wasm32")]
pub fn viewport() -> Viewport {
    let window = web_sys::window();
    let dim = |v: Option<Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>>| {
        v.and_then(|r| r.ok()).and_then(|j| j.as_f64()).unwrap_or(0.0) as f32
    };
    Viewport::new(
        dim(window.as_ref().map(|w| w.inner_width())),
        dim(window.map(|w| w.inner_height())),
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub fn viewport() -> Viewport {
    Viewport::new(0.0, 0.0)
}
