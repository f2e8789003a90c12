// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Tracks whether a long-running operation is in progress.
///
/// Operations may nest; the indicator stays raised until the outermost
/// guard is dropped. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct BusyIndicator {
    depth: Arc<AtomicUsize>,
}

impl BusyIndicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.depth.load(Ordering::Acquire) > 0
    }

    /// Raises the indicator until the returned guard is dropped.
    #[must_use]
    pub fn begin(&self, operation: &'static str) -> BusyGuard {
        debug!(operation, "Busy");
        self.depth.fetch_add(1, Ordering::AcqRel);
        BusyGuard {
            depth: Arc::clone(&self.depth),
            operation,
        }
    }
}

/// Lowers the busy indicator when dropped.
#[derive(Debug)]
pub struct BusyGuard {
    depth: Arc<AtomicUsize>,
    operation: &'static str,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::AcqRel);
        debug!(operation = self.operation, "Done");
    }
}

#[cfg(test)]
mod tests {
    use super::BusyIndicator;

    #[test]
    fn test_guard_clears_on_drop() {
        let busy: BusyIndicator = BusyIndicator::new();
        let observer: BusyIndicator = busy.clone();
        {
            let _guard = busy.begin("test");
            assert!(observer.is_busy());
        }
        assert!(!observer.is_busy());
    }

    #[test]
    fn test_nested_guards() {
        let busy: BusyIndicator = BusyIndicator::new();
        let outer = busy.begin("save");
        let inner = busy.begin("load");
        drop(inner);
        assert!(busy.is_busy());
        drop(outer);
        assert!(!busy.is_busy());
    }
}
