use std::cell::RefCell;

use gloo_timers::callback::Timeout;

/// Runs only the most recently scheduled callback, `delay_ms` after it was
/// scheduled.
pub struct Debouncer {
    delay_ms: u32,
    pending: RefCell<Option<Timeout>>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: RefCell::new(None),
        }
    }

    /// Schedule `callback`, cancelling anything still pending.
    pub fn schedule(&self, callback: impl FnOnce() + 'static) {
        // Dropping the previous Timeout clears it.
        let previous = self
            .pending
            .replace(Some(Timeout::new(self.delay_ms, callback)));
        drop(previous);
    }
}
