//! Redelivery filter for webhook updates.
//!
//! Telegram resends an update when the webhook answers slowly or with an
//! error. Each `update_id` is handled at most once while it is still in the
//! window of recent ids.

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, PoisonError};

/// How many recent update ids are remembered.
pub const DEFAULT_WINDOW: usize = 256;

/// Bounded memory of recently handled update ids.
#[derive(Debug)]
pub struct SeenUpdates {
    window: usize,
    inner: Mutex<Window>,
}

#[derive(Debug, Default)]
struct Window {
    order: VecDeque<i64>,
    ids: HashSet<i64>,
}

impl SeenUpdates {
    /// Creates a filter remembering the last `window` ids.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            inner: Mutex::new(Window::default()),
        }
    }

    /// Records `update_id` and returns `true` the first time it is seen.
    pub fn first_delivery(&self, update_id: i64) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if !inner.ids.insert(update_id) {
            return false;
        }
        inner.order.push_back(update_id);
        if inner.order.len() > self.window
            && let Some(oldest) = inner.order.pop_front()
        {
            inner.ids.remove(&oldest);
        }
        true
    }
}

impl Default for SeenUpdates {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
