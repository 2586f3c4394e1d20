use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag for a render pass.
///
/// Clones observe the same flag, so a handle kept by the caller can stop a
/// pass running on other threads. Workers poll it between rows.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Clear the flag so the token can drive another pass.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}
