//! Coalesced UI refreshes.
//!
//! Plug-in UIs (menus, toolbars) refresh their state after user actions. A
//! burst of actions should cause a single refresh, so requests are recorded
//! and only acted upon when the host flushes at the end of its event turn.

/// Something whose UI state can be refreshed.
pub trait Updatable {
    fn update(&mut self);

    /// Whether refreshing makes sense right now (e.g. the text area is
    /// attached and enabled).
    fn can_update(&self) -> bool;
}

#[derive(Debug, Default, Clone)]
pub struct DeferredUpdater {
    /// Id of the most recent request, if it has not been flushed yet.
    pending: Option<u64>,
    requested: u64,
}

impl DeferredUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an update. Earlier requests that were not flushed yet are
    /// replaced by this one.
    pub fn defer_update(&mut self) {
        self.requested += 1;
        self.pending = Some(self.requested);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Run the pending update, if any. Returns true if `target` was updated.
    pub fn flush(&mut self, target: &mut impl Updatable) -> bool {
        let Some(request) = self.pending.take() else {
            return false;
        };
        if !target.can_update() {
            tracing::trace!(request, "skipping update, target not ready");
            return false;
        }
        target.update();
        true
    }

    /// Drop the pending request without running it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        updates: u32,
        ready: bool,
    }

    impl Updatable for Counter {
        fn update(&mut self) {
            self.updates += 1;
        }

        fn can_update(&self) -> bool {
            self.ready
        }
    }

    #[test]
    fn test_requests_are_coalesced() {
        let mut updater = DeferredUpdater::new();
        let mut counter = Counter {
            ready: true,
            ..Counter::default()
        };

        updater.defer_update();
        updater.defer_update();
        updater.defer_update();
        assert!(updater.flush(&mut counter));
        assert!(!updater.flush(&mut counter));
        assert_eq!(counter.updates, 1);
    }

    #[test]
    fn test_not_ready_target_drops_request() {
        let mut updater = DeferredUpdater::new();
        let mut counter = Counter::default();

        updater.defer_update();
        assert!(!updater.flush(&mut counter));
        assert!(!updater.is_pending());

        counter.ready = true;
        assert!(!updater.flush(&mut counter));
        assert_eq!(counter.updates, 0);
    }

    #[test]
    fn test_cancel() {
        let mut updater = DeferredUpdater::new();
        let mut counter = Counter {
            ready: true,
            ..Counter::default()
        };
        updater.defer_update();
        updater.cancel();
        assert!(!updater.flush(&mut counter));
    }
}
