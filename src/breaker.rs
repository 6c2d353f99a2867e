// src/breaker.rs
// Circuit breaker for the CommonTrace API - tracks failures and temporarily
// stops issuing requests when the upstream is down or rate-limited.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Window in which failures are counted. Failures older than this are ignored.
const FAILURE_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Circuit state.
#[derive(Debug, Clone)]
enum State {
    /// Normal operation - tracking recent failures.
    Closed { failures: Vec<Instant> },
    /// Tripped - all requests are rejected until cooldown expires.
    Open { tripped_at: Instant },
    /// Cooldown expired - allow exactly one probe request.
    HalfOpen,
}

impl Default for State {
    fn default() -> Self {
        Self::Closed {
            failures: Vec::new(),
        }
    }
}

/// Thread-safe circuit breaker guarding the upstream API.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    threshold: u32,
    cooldown: Duration,
    state: Arc<Mutex<State>>,
}

impl CircuitBreaker {
    /// Create a breaker that trips after `threshold` failures within the
    /// tracking window and stays open for `cooldown` before probing.
    pub fn new(threshold: u32, cooldown: Duration) -> Self {
        Self {
            threshold: threshold.max(1),
            cooldown,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Check whether the upstream is currently available.
    ///
    /// Returns `true` if the circuit is Closed or transitions to HalfOpen
    /// (allowing a single probe). Returns `false` if the circuit is Open
    /// and cooldown has not yet elapsed.
    pub fn is_available(&self) -> bool {
        let Ok(mut state) = self.state.lock() else {
            return true; // If mutex is poisoned, allow the request
        };

        match &*state {
            State::Closed { .. } => true,
            State::Open { tripped_at } => {
                if tripped_at.elapsed() >= self.cooldown {
                    info!("Circuit half-open, allowing probe request");
                    *state = State::HalfOpen;
                    true
                } else {
                    false
                }
            }
            State::HalfOpen => {
                // A probe is already in flight. Block additional callers
                // until the probe resolves.
                false
            }
        }
    }

    /// Record a successful request - resets the circuit to Closed.
    pub fn record_success(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        let was_half_open = matches!(*state, State::HalfOpen);
        *state = State::Closed {
            failures: Vec::new(),
        };

        if was_half_open {
            info!("Circuit recovered (half-open probe succeeded)");
        }
    }

    /// Record a failed request - may trip the circuit.
    pub fn record_failure(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let now = Instant::now();

        match &mut *state {
            State::Closed { failures } => {
                failures.push(now);
                // Evict failures outside the window
                failures.retain(|t| now.duration_since(*t) < FAILURE_WINDOW);

                if failures.len() as u32 >= self.threshold {
                    warn!(
                        failures = failures.len(),
                        "Circuit tripped - CommonTrace API will be skipped for {}s",
                        self.cooldown.as_secs()
                    );
                    *state = State::Open { tripped_at: now };
                }
            }
            State::HalfOpen => {
                // Probe failed - re-trip immediately.
                warn!("Half-open probe failed - circuit re-tripped");
                *state = State::Open { tripped_at: now };
            }
            State::Open { .. } => {
                // Already open; nothing to do.
            }
        }
    }
}
