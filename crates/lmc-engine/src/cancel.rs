//! Cooperative cancellation for batch runs.
//!
//! Bulk aggregation and alert triage check the token between records. A
//! cancelled run returns what it accumulated so far.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Something a batch run can poll for a stop request.
pub trait Cancellable {
    /// True once cancellation has been requested.
    fn is_cancelled(&self) -> bool;
}

/// Shareable cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// A token that is never cancelled, for callers without a stop signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl Cancellable for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}
