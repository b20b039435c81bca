//! Diagnostic console for editor failures.
//!
//! Provides a tracing Layer that keeps the most recent warnings and errors
//! emitted by quire modules in a fixed-size ring buffer. Conversion and reload
//! failures end up here, so a host page can surface them (or attach them to a
//! bug report) without wiring its own subscriber.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::Write as FmtWrite;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Maximum number of console entries to keep.
pub const MAX_ENTRIES: usize = 100;

/// Module prefixes captured by the console.
const CAPTURED_PREFIXES: &[&str] = &["quire_"];

/// Least severe level that reaches the console.
const CONSOLE_MIN_LEVEL: Level = Level::WARN;

thread_local! {
    static CONSOLE: RefCell<VecDeque<ConsoleEntry>> = RefCell::new(VecDeque::with_capacity(MAX_ENTRIES));
}

/// One captured console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl std::fmt::Display for ConsoleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", level_str(&self.level), self.target, self.message)
    }
}

/// A tracing Layer that records warnings and errors to the console buffer.
/// Regular output is left to whatever fmt layer sits next to it.
pub struct ConsoleLayer;

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = metadata.level();
        let target = metadata.target();

        let is_our_module = CAPTURED_PREFIXES.iter().any(|prefix| target.starts_with(prefix));
        if !is_our_module || *level > CONSOLE_MIN_LEVEL {
            return;
        }

        let mut message = String::new();
        let mut visitor = MessageVisitor(&mut message);
        event.record(&mut visitor);

        let entry = ConsoleEntry {
            level: *level,
            target: target.to_string(),
            message,
        };

        CONSOLE.with(|buf| {
            let mut buf = buf.borrow_mut();
            if buf.len() >= MAX_ENTRIES {
                buf.pop_front();
            }
            buf.push_back(entry);
        });
    }
}

/// Visitor that extracts the message field from a tracing event.
struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.0, "{:?}", value);
        } else {
            if !self.0.is_empty() {
                self.0.push_str(", ");
            }
            let _ = write!(self.0, "{}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        } else {
            if !self.0.is_empty() {
                self.0.push_str(", ");
            }
            let _ = write!(self.0, "{}={}", field.name(), value);
        }
    }
}

fn level_str(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// Snapshot of the captured entries, oldest first.
pub fn entries() -> Vec<ConsoleEntry> {
    CONSOLE.with(|buf| buf.borrow().iter().cloned().collect())
}

/// Get all captured console lines as a single string.
pub fn get_logs() -> String {
    CONSOLE.with(|buf| {
        let buf = buf.borrow();
        buf.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    })
}

/// Clear the console.
pub fn clear() {
    CONSOLE.with(|buf| buf.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    fn with_console<F: FnOnce()>(f: F) {
        let subscriber = tracing_subscriber::registry().with(ConsoleLayer);
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_captures_errors_and_warnings_only() {
        clear();
        with_console(|| {
            tracing::error!("conversion failed");
            tracing::warn!(tab = "source", "odd state");
            tracing::info!("not captured");
            tracing::debug!("not captured either");
        });

        let entries = entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, Level::ERROR);
        assert_eq!(entries[0].message, "conversion failed");
        assert!(entries[1].message.contains("odd state"));
        assert!(entries[1].message.contains("tab=source"));
    }

    #[test]
    fn test_ignores_foreign_targets() {
        clear();
        with_console(|| {
            tracing::error!(target: "some_other_crate", "boom");
        });
        assert!(entries().is_empty());
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        clear();
        with_console(|| {
            for i in 0..(MAX_ENTRIES + 5) {
                tracing::error!("failure {}", i);
            }
        });

        let entries = entries();
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert_eq!(entries[0].message, "failure 5");
    }

    #[test]
    fn test_formats_lines_with_level_and_target() {
        clear();
        with_console(|| {
            tracing::error!(target: "quire_editor_core::coordinator", "bad gateway");
        });
        assert_eq!(
            get_logs(),
            "[ERROR] quire_editor_core::coordinator: bad gateway"
        );
    }
}
