//! Continuations deferred to the end of the current event turn.
//!
//! A rich text area that was hidden has no usable selection until the
//! platform re-initializes it, which happens after the event that showed it
//! has been handled. Work depending on that selection is queued here and run
//! by the driver once the turn is over.

use std::collections::VecDeque;

/// Work the coordinator resumes after yielding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Restore the DOM selection of the rich text area.
    RestoreDomSelection,
    /// Enable the WYSIWYG tab without converting (source text unchanged).
    EnableWysiwygTab,
}

/// A continuation plus the switch epoch that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub epoch: u64,
    pub continuation: Deferred,
}

/// FIFO of scheduled continuations.
#[derive(Debug, Default, Clone)]
pub struct DeferredQueue {
    queue: VecDeque<Scheduled>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, epoch: u64, continuation: Deferred) {
        self.queue.push_back(Scheduled {
            epoch,
            continuation,
        });
    }

    /// Take everything scheduled so far. Continuations scheduled while the
    /// returned batch runs belong to the next turn.
    pub fn take_batch(&mut self) -> VecDeque<Scheduled> {
        std::mem::take(&mut self.queue)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
