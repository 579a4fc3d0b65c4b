//! # Stale Flag
//!
//! Shared "data changed" signal between views. A successful mutation marks
//! the data stale; the next view that does a full reload consumes the mark.
//! Views receive a clone of the flag instead of reaching for global state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct StaleFlag {
    stale: Arc<AtomicBool>,
}

impl StaleFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_stale(&self) {
        self.stale.store(true, Ordering::SeqCst);
    }

    /// Returns whether the data was stale, resetting the flag.
    pub fn consume_stale(&self) -> bool {
        self.stale.swap(false, Ordering::SeqCst)
    }

    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_resets() {
        let flag = StaleFlag::new();
        assert!(!flag.consume_stale());
        flag.mark_stale();
        assert!(flag.is_stale());
        assert!(flag.consume_stale());
        assert!(!flag.consume_stale());
    }

    #[test]
    fn test_clones_share_state() {
        let writer = StaleFlag::new();
        let reader = writer.clone();
        writer.mark_stale();
        assert!(reader.consume_stale());
        assert!(!writer.is_stale());
    }
}
