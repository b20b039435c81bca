//! Conversion request lifecycle.
//!
//! Each direction has at most one current request. Starting a new one
//! supersedes the previous request of the same direction: its result is still
//! delivered eventually (nothing is aborted on the wire), but the tracker no
//! longer recognizes its ticket, so the coordinator drops it.

use std::collections::BTreeMap;

use smol_str::SmolStr;

use crate::error::ConversionError;
use crate::types::Direction;

/// Identifies one conversion request. Generations increase monotonically
/// per direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub direction: Direction,
    pub generation: u64,
}

/// Tracks the current request of one direction.
#[derive(Debug, Clone)]
pub struct RequestTracker {
    direction: Direction,
    next_generation: u64,
    current: Option<u64>,
}

impl RequestTracker {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            next_generation: 1,
            current: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Start a new request. Returns its ticket and whether a previous
    /// request was still outstanding (and is now superseded).
    pub fn begin(&mut self) -> (Ticket, bool) {
        let generation = self.next_generation;
        self.next_generation += 1;
        let superseded = self.current.replace(generation).is_some();
        (
            Ticket {
                direction: self.direction,
                generation,
            },
            superseded,
        )
    }

    /// Whether a request of this direction is awaiting its result.
    pub fn is_outstanding(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<Ticket> {
        self.current.map(|generation| Ticket {
            direction: self.direction,
            generation,
        })
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.direction == self.direction && self.current == Some(ticket.generation)
    }

    /// Accept the result for `ticket`. Returns false (and changes nothing)
    /// if the ticket was superseded or already finished.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

/// A conversion the driver must hand to the conversion gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub ticket: Ticket,
    /// HTML for [`Direction::ToSource`], source text for [`Direction::ToHtml`].
    pub input: String,
    pub syntax: SmolStr,
}

impl ConversionRequest {
    pub fn direction(&self) -> Direction {
        self.ticket.direction
    }
}

/// A rebuild of the rich text area from a server-rendered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadRequest {
    pub ticket: Ticket,
    pub template_url: String,
    /// Request parameters; always contains `source`.
    pub params: BTreeMap<String, String>,
}

impl ReloadRequest {
    pub fn source(&self) -> Option<&str> {
        self.params.get("source").map(String::as_str)
    }
}

/// Work queued by the coordinator for the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    Convert(ConversionRequest),
    Reload(ReloadRequest),
}

impl PendingRequest {
    pub fn ticket(&self) -> Ticket {
        match self {
            PendingRequest::Convert(request) => request.ticket,
            PendingRequest::Reload(request) => request.ticket,
        }
    }
}

/// The outcome of a [`PendingRequest`], fed back to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// HTML → source finished.
    ToSource {
        ticket: Ticket,
        result: Result<String, ConversionError>,
    },
    /// Source → HTML finished (gateway path).
    ToHtml {
        ticket: Ticket,
        result: Result<String, ConversionError>,
    },
    /// The rich text area finished reloading (template path).
    Reloaded {
        ticket: Ticket,
        result: Result<(), ConversionError>,
    },
}

impl Completion {
    pub fn ticket(&self) -> Ticket {
        match self {
            Completion::ToSource { ticket, .. }
            | Completion::ToHtml { ticket, .. }
            | Completion::Reloaded { ticket, .. } => *ticket,
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            Completion::ToSource { result, .. } | Completion::ToHtml { result, .. } => {
                result.is_ok()
            }
            Completion::Reloaded { result, .. } => result.is_ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_supersedes_outstanding() {
        let mut tracker = RequestTracker::new(Direction::ToSource);
        let (first, superseded) = tracker.begin();
        assert!(!superseded);
        let (second, superseded) = tracker.begin();
        assert!(superseded);
        assert!(second.generation > first.generation);

        assert!(!tracker.finish(first));
        assert!(tracker.is_outstanding());
        assert!(tracker.finish(second));
        assert!(!tracker.is_outstanding());
        assert!(!tracker.finish(second));
    }

    #[test]
    fn test_directions_do_not_mix() {
        let mut to_html = RequestTracker::new(Direction::ToHtml);
        let mut to_source = RequestTracker::new(Direction::ToSource);
        let (html_ticket, _) = to_html.begin();
        let (source_ticket, _) = to_source.begin();

        // Same generation number, different direction.
        assert_eq!(html_ticket.generation, source_ticket.generation);
        assert!(!to_source.finish(html_ticket));
        assert!(to_html.finish(html_ticket));
        assert!(to_source.is_outstanding());
    }

    #[test]
    fn test_generations_keep_increasing_after_finish() {
        let mut tracker = RequestTracker::new(Direction::ToHtml);
        let (first, _) = tracker.begin();
        assert!(tracker.finish(first));
        let (second, superseded) = tracker.begin();
        assert!(!superseded);
        assert_ne!(first, second);
    }
}
