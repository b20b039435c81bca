//! quire-common: ambient helpers shared by the quire editor crates.
//!
//! - `console`: diagnostic console capturing warnings and errors from quire
//!   modules, readable on demand (bug reports, tests)
//! - `telemetry`: one-shot tracing subscriber setup
//! - `perf`: high-resolution timing helpers

pub mod console;
pub mod perf;
pub mod telemetry;

pub use console::ConsoleLayer;
pub use telemetry::TelemetryConfig;
