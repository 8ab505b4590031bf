//! Process-wide GPU-instance reference counting.
//!
//! Every successful filter construction retains the shared ncnn Vulkan
//! instance; teardown (or any failed construction) releases it, and the
//! last release destroys the instance. The atomic bookkeeping lives here,
//! independent of the runtime feature, so the invariant stays testable.

use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) struct InstanceCount(AtomicUsize);

impl InstanceCount {
    pub(crate) const fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    /// Record one more holder; returns the new count.
    pub(crate) fn retain(&self) -> usize {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Drop one holder; returns true when this release brought the count to
    /// zero and the shared instance must be destroyed.
    pub(crate) fn release(&self) -> bool {
        self.0.fetch_sub(1, Ordering::AcqRel) == 1
    }

    #[cfg(test)]
    fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}

/// Holders of the shared GPU instance across the whole process.
pub(crate) static GPU_INSTANCES: InstanceCount = InstanceCount::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_release_signals_destroy() {
        let count = InstanceCount::new();
        assert_eq!(count.retain(), 1);
        assert_eq!(count.retain(), 2);
        assert!(!count.release());
        assert_eq!(count.get(), 1);
        assert!(count.release());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn interleaved_holders_destroy_once() {
        let count = InstanceCount::new();
        count.retain();
        count.retain();
        count.retain();
        assert!(!count.release());
        count.retain();
        assert!(!count.release());
        assert!(!count.release());
        assert!(count.release());
    }
}
