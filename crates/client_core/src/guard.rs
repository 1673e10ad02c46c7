//! Single in-flight operation token.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use crate::error::ExecutorError;

#[derive(Debug, Default)]
struct GuardInner {
    busy: AtomicBool,
    active_label: Mutex<Option<String>>,
}

/// At most one operation may hold the token at a time. Clones share it.
#[derive(Debug, Clone, Default)]
pub struct InFlightGuard {
    inner: Arc<GuardInner>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, label: &str) -> Result<InFlightToken, ExecutorError> {
        if self
            .inner
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ExecutorError::Busy {
                active: self.active_label().unwrap_or_default(),
            });
        }
        *self.lock_label() = Some(label.to_string());
        Ok(InFlightToken {
            inner: self.inner.clone(),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.inner.busy.load(Ordering::Acquire)
    }

    pub fn active_label(&self) -> Option<String> {
        self.lock_label().clone()
    }

    fn lock_label(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        lock_label(&self.inner)
    }
}

fn lock_label(inner: &GuardInner) -> std::sync::MutexGuard<'_, Option<String>> {
    inner
        .active_label
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Releases the guard when dropped.
#[derive(Debug)]
pub struct InFlightToken {
    inner: Arc<GuardInner>,
}

impl Drop for InFlightToken {
    fn drop(&mut self) {
        lock_label(&self.inner).take();
        self.inner.busy.store(false, Ordering::Release);
    }
}
