// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cooperative cancellation for asynchronous host operations.
//!
//! Surface reconfiguration after a resize and fullscreen toggles complete
//! asynchronously on the host. When a newer request of the same kind arrives
//! before an older one finishes, the older one is cancelled and its result is
//! discarded. Requests are never queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared flag that an operation polls to learn it is no longer wanted.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token, and every clone of it, as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Handle to one request issued through a [`LatestRequest`] slot.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    generation: u64,
    token: CancellationToken,
}

impl RequestTicket {
    /// Monotonic sequence number of the request within its slot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The token the in-flight operation should poll.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Shorthand for `self.token().is_cancelled()`.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug)]
struct Pending<T> {
    ticket: RequestTicket,
    payload: T,
}

/// A single-occupancy slot with last-request-wins semantics.
#[derive(Debug)]
pub struct LatestRequest<T> {
    label: &'static str,
    next_generation: u64,
    pending: Option<Pending<T>>,
}

impl<T> LatestRequest<T> {
    /// Creates an empty slot. `label` is only used in log output.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            next_generation: 1,
            pending: None,
        }
    }

    /// Issues a new request, cancelling the one in flight if there is one.
    pub fn begin(&mut self, payload: T) -> RequestTicket {
        if let Some(previous) = self.pending.take() {
            log::debug!(
                "{} request #{} superseded before completion.",
                self.label,
                previous.ticket.generation
            );
            previous.ticket.token.cancel();
        }

        let ticket = RequestTicket {
            generation: self.next_generation,
            token: CancellationToken::new(),
        };
        self.next_generation += 1;
        self.pending = Some(Pending {
            ticket: ticket.clone(),
            payload,
        });
        ticket
    }

    /// The payload of the request currently in flight.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.payload)
    }

    /// Returns `true` if `ticket` is the request currently in flight.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.ticket.generation == ticket.generation && !ticket.is_cancelled())
    }

    /// Settles a request.
    ///
    /// Returns the original payload together with `result` when `ticket` is
    /// still current; the slot is then empty. Results for superseded or
    /// cancelled requests are discarded and `None` is returned.
    pub fn complete<R>(&mut self, ticket: &RequestTicket, result: R) -> Option<(T, R)> {
        if !self.is_current(ticket) {
            log::debug!(
                "Discarding result of stale {} request #{}.",
                self.label,
                ticket.generation
            );
            return None;
        }
        self.pending.take().map(|p| (p.payload, result))
    }

    /// Cancels the in-flight request, if any.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.pending.take() {
            previous.ticket.token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn newer_request_cancels_older() {
        let mut slot = LatestRequest::new("resize");
        let first = slot.begin((800, 600));
        let second = slot.begin((1024, 768));

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(second.generation() > first.generation());
        assert_eq!(slot.pending(), Some(&(1024, 768)));

        assert!(slot.complete(&first, "configured").is_none());
        assert_eq!(
            slot.complete(&second, "configured"),
            Some(((1024, 768), "configured"))
        );
        assert!(slot.pending().is_none());
    }

    #[test]
    fn completing_twice_yields_once() {
        let mut slot = LatestRequest::new("fullscreen");
        let ticket = slot.begin(true);
        assert!(slot.complete(&ticket, ()).is_some());
        assert!(slot.complete(&ticket, ()).is_none());
    }

    #[test]
    fn cancel_discards_in_flight() {
        let mut slot = LatestRequest::new("fullscreen");
        let ticket = slot.begin(false);
        slot.cancel();
        assert!(ticket.is_cancelled());
        assert!(!slot.is_current(&ticket));
        assert!(slot.complete(&ticket, ()).is_none());
    }
}
