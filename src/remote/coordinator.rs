// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Request coordination: retries, timeouts, and single-flight keys.
//!
//! Every remote call runs under an operation key. Starting a request cancels
//! any in-flight request with the same key, so at most one flight per key is
//! live and only the newest one may deliver a result. A flight that loses its
//! key finishes as [`RequestError::Superseded`] no matter how far it got.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::http::{RequestSpec, Transport, TransportError};

/// Retry schedule for one operation.
///
/// `retries` is the total number of attempts. The wait before attempt `n + 1`
/// is `retry_delay * n`, and no wait follows the final attempt. `timeout`
/// bounds each attempt separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub retry_delay: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            retry_delay: Duration::from_millis(1000),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Schedule for text analysis: two attempts with a longer per-attempt
    /// budget.
    pub fn analysis() -> Self {
        Self {
            retries: 2,
            timeout: Duration::from_secs(60),
            ..Self::default()
        }
    }
}

/// Terminal outcome of a coordinated request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// A newer request took over the operation key, or the key was cancelled.
    Superseded,
    /// Every attempt failed; `last` is the failure of the final attempt.
    Network { attempts: u32, last: TransportError },
    /// The service answered but the payload could not be decoded.
    Parse { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Superseded => {
                write!(f, "request superseded by a newer request for the same operation")
            }
            RequestError::Network { attempts, last } => {
                write!(f, "request failed after {attempts} attempt(s): {last}")
            }
            RequestError::Parse { message } => {
                write!(f, "response could not be decoded: {message}")
            }
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Network { last, .. } => Some(last),
            _ => None,
        }
    }
}

struct Flight {
    generation: u64,
    token: CancellationToken,
}

impl Flight {
    fn idle() -> Self {
        Self {
            generation: 0,
            token: CancellationToken::new(),
        }
    }
}

/// Runs requests through a [`Transport`] under single-flight operation keys.
pub struct Coordinator<T> {
    transport: T,
    flights: Mutex<HashMap<String, Flight>>,
}

impl<T: Transport> Coordinator<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            flights: Mutex::new(HashMap::new()),
        }
    }

    /// Executes `spec` under `operation_key`, retrying per `policy`.
    ///
    /// Returns the first successful JSON value, or the terminal error. A
    /// success is discarded as [`RequestError::Superseded`] when the key moved
    /// on while the response was in flight.
    pub async fn execute(
        &self,
        operation_key: &str,
        spec: RequestSpec,
        policy: RetryPolicy,
    ) -> Result<serde_json::Value, RequestError> {
        let (generation, token) = self.begin_flight(operation_key);
        let attempts = policy.retries.max(1);
        let mut last: Option<TransportError> = None;

        for attempt in 1..=attempts {
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => return Err(RequestError::Superseded),
                outcome = time::timeout(policy.timeout, self.transport.execute(&spec)) => outcome,
            };

            match outcome {
                Ok(Ok(value)) => {
                    if self.current_generation(operation_key) != Some(generation) {
                        return Err(RequestError::Superseded);
                    }
                    return Ok(value);
                }
                Ok(Err(TransportError::Body { message })) => {
                    return Err(RequestError::Parse { message });
                }
                Ok(Err(err)) => last = Some(err),
                Err(_) => {
                    last = Some(TransportError::Timeout {
                        after: policy.timeout,
                    });
                }
            }

            if attempt < attempts {
                let delay = policy.retry_delay.saturating_mul(attempt);
                debug!(
                    key = operation_key,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "attempt failed, retrying"
                );
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(RequestError::Superseded),
                    _ = time::sleep(delay) => {}
                }
            }
        }

        Err(RequestError::Network {
            attempts,
            last: last.expect("at least one attempt ran"),
        })
    }

    /// Cancels the in-flight request for `operation_key`, if any.
    pub fn cancel(&self, operation_key: &str) {
        let mut flights = self.flights.lock().expect("flight table mutex poisoned");
        if let Some(flight) = flights.get_mut(operation_key) {
            flight.token.cancel();
            flight.generation = flight.generation.wrapping_add(1);
        }
    }

    /// Cancels every in-flight request.
    pub fn cancel_all(&self) {
        let mut flights = self.flights.lock().expect("flight table mutex poisoned");
        for flight in flights.values_mut() {
            flight.token.cancel();
            flight.generation = flight.generation.wrapping_add(1);
        }
    }

    // Entries are never removed from the table. Dropping one would hand a
    // later flight a counter restarting at 1, which a long-finished flight
    // could mistake for its own generation.
    fn begin_flight(&self, operation_key: &str) -> (u64, CancellationToken) {
        let mut flights = self.flights.lock().expect("flight table mutex poisoned");
        let flight = flights
            .entry(operation_key.to_owned())
            .or_insert_with(Flight::idle);
        flight.token.cancel();
        flight.token = CancellationToken::new();
        flight.generation = flight.generation.wrapping_add(1);
        (flight.generation, flight.token.clone())
    }

    fn current_generation(&self, operation_key: &str) -> Option<u64> {
        let flights = self.flights.lock().expect("flight table mutex poisoned");
        flights.get(operation_key).map(|flight| flight.generation)
    }
}
