//! Cooperative cancellation flag.
//!
//! The signal handler installed by the daemon sets the flag; the refresh
//! loop and discovery polls it at every suspension point.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable handle onto one shared stop flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    requested: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every holder of this signal to stop.  Safe from a signal
    /// handler thread.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}
