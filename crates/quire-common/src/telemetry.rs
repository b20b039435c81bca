//! Tracing setup for hosts embedding the editor.
//!
//! # Usage
//!
//! ```ignore
//! use quire_common::telemetry::{self, TelemetryConfig};
//!
//! telemetry::init(TelemetryConfig::from_env("wiki-editor"));
//! tracing::info!("editor booted");
//! // later, e.g. for a bug report
//! let recent_failures = quire_common::console::get_logs();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::console::ConsoleLayer;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Name logged once the subscriber is installed.
    pub service_name: String,
    /// Console level used when `RUST_LOG` is not set (DEBUG in debug builds).
    pub console_level: Level,
    /// Whether to record warnings/errors into the diagnostic console.
    pub capture_console: bool,
}

impl TelemetryConfig {
    /// Load config from the environment.
    ///
    /// - `RUST_LOG`: standard env filter (optional, overrides console_level)
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        Self {
            service_name: service_name.into(),
            console_level,
            capture_console: true,
        }
    }
}

/// Install the global tracing subscriber.
///
/// Returns false if a subscriber was already installed (by an earlier call or
/// by the host), in which case nothing changes.
pub fn init(config: TelemetryConfig) -> bool {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return false;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.console_level.as_str().to_lowercase()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(env_filter);

    let console = config.capture_console.then_some(ConsoleLayer);

    let installed = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(console)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(service = %config.service_name, "telemetry initialized");
    }
    installed
}
