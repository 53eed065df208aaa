//! Lightweight performance instrumentation.
//!
//! Timings and render events go through `tracing` at debug level, so they
//! land wherever the subscriber set up in `main` writes (the
//! `--render-debug-log` file while the TUI owns the terminal).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Scope {
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        tracing::debug!(target: "typolens::perf", scope = self.name, elapsed_ms = self.elapsed_ms());
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Time until the returned guard drops.
pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Record a named render event.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    tracing::debug!(target: "typolens::render", event = name, "{}", detail.as_ref());
}
