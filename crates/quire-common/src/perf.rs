//! Timing of remote calls (conversions, template reloads).
//!
//! Timestamps come from `Performance.now()` in the browser and from a
//! process-wide monotonic clock elsewhere.

/// Calls slower than this are reported at warn level, so they end up in the
/// diagnostic console.
pub const SLOW_CALL_MS: f64 = 2_000.0;

/// High-resolution timestamp in milliseconds.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub fn now() -> f64 {
    use std::sync::OnceLock;
    use web_time::Instant;
    static START: OnceLock<Instant> = OnceLock::new();
    let start = START.get_or_init(Instant::now);
    start.elapsed().as_secs_f64() * 1000.0
}

/// Milliseconds elapsed since a timestamp taken with [`now`].
pub fn elapsed_since(start: f64) -> f64 {
    (now() - start).max(0.0)
}

/// Logs how long it lived when dropped. Keep it alive across the awaited
/// call to time the whole round trip.
#[derive(Debug)]
pub struct TimingGuard {
    label: &'static str,
    start: f64,
}

impl TimingGuard {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        elapsed_since(self.start)
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms > SLOW_CALL_MS {
            tracing::warn!(elapsed_ms, "slow call: {}", self.label);
        } else {
            tracing::debug!(elapsed_ms, "{}", self.label);
        }
    }
}
