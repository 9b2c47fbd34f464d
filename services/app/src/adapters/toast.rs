//! services/app/src/adapters/toast.rs
//!
//! A `Notifier` that queues notices for the shell to print.

use std::collections::VecDeque;
use std::sync::Mutex;

use informes_core::{NoticeDuration, Notifier};
use tracing::info;

#[derive(Default)]
pub struct ToastQueue {
    pending: Mutex<VecDeque<(String, NoticeDuration)>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued notice, oldest first.
    pub fn drain(&self) -> Vec<(String, NoticeDuration)> {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, text: &str, duration: NoticeDuration) {
        info!(?duration, "Toast: {}", text);
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back((text.to_string(), duration));
    }
}
