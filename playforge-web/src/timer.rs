//! Cancellable browser timers
//!
//! Wraps `setTimeout`/`clearTimeout` in a handle whose drop cancels the
//! pending callback. Simulation views keep their handles as component state,
//! so unmounting mid-delay can never fire a callback into torn-down state.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::dom::{js_error_message, window};

/// A pending `setTimeout` callback. Cancelled on drop or via [`Self::cancel`].
pub struct TimerHandle {
    id: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl TimerHandle {
    /// Schedule `callback` to run once after `delay_ms` milliseconds.
    ///
    /// Scheduling failures are logged and degrade to a handle that never
    /// fires; timers are pacing, not correctness.
    pub fn schedule<F>(delay_ms: u32, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let closure = Closure::once(callback);
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match window().set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(id) => Self {
                id: Some(id),
                _closure: closure,
            },
            Err(err) => {
                log::warn!("failed to schedule timer: {}", js_error_message(&err));
                Self {
                    id: None,
                    _closure: closure,
                }
            }
        }
    }

    /// Cancel the pending callback. A no-op when the timer already fired.
    pub fn cancel(mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        if let Some(id) = self.id.take() {
            window().clear_timeout_with_handle(id);
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.clear();
    }
}
