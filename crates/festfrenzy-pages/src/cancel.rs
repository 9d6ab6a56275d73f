//! Cancellation flag shared between a page and its in-flight requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Set once when a page unmounts. Every place that applies a response to
/// page state checks it first.
///
/// Clones share the flag, so a front end can keep a clone and cancel a
/// page whose mount is running on another task.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_visible_through_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();

        assert!(clone.is_cancelled());
    }
}
