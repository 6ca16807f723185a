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

//! Latest-request-wins surface reconfiguration.
//!
//! Resizes and fullscreen toggles complete asynchronously on the host. Each
//! kind of request has a single slot: issuing a new one cancels the one in
//! flight, and a late completion for a cancelled request is dropped.

use turbo_core::{LatestRequest, RequestTicket};

use crate::error::TransientError;

/// Pending and applied surface state.
#[derive(Debug)]
pub struct SurfaceOperations {
    size: (u32, u32),
    fullscreen: bool,
    resize: LatestRequest<(u32, u32)>,
    toggle: LatestRequest<bool>,
}

impl SurfaceOperations {
    /// Starts from the surface's current size, windowed.
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            fullscreen: false,
            resize: LatestRequest::new("resize"),
            toggle: LatestRequest::new("fullscreen"),
        }
    }

    /// Last applied size.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Last applied fullscreen state.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Size of the resize in flight, if any.
    pub fn pending_resize(&self) -> Option<(u32, u32)> {
        self.resize.pending().copied()
    }

    /// Fullscreen state requested and not yet settled, if any.
    pub fn pending_fullscreen(&self) -> Option<bool> {
        self.toggle.pending().copied()
    }

    /// Issues a reconfiguration for `width` x `height`.
    pub fn request_resize(&mut self, width: u32, height: u32) -> RequestTicket {
        log::debug!("Surface resize to {width}x{height} requested.");
        self.resize.begin((width, height))
    }

    /// Settles a resize. Returns the applied size when the ticket was current
    /// and the host succeeded.
    pub fn complete_resize(
        &mut self,
        ticket: &RequestTicket,
        result: Result<(), TransientError>,
    ) -> Option<(u32, u32)> {
        let (size, result) = self.resize.complete(ticket, result)?;
        match result {
            Ok(()) => {
                log::info!("Surface resized to {}x{}.", size.0, size.1);
                self.size = size;
                Some(size)
            }
            Err(e) => {
                log::warn!("Surface resize to {}x{} failed: {e}", size.0, size.1);
                None
            }
        }
    }

    /// Issues a fullscreen change.
    pub fn request_fullscreen(&mut self, enabled: bool) -> RequestTicket {
        self.toggle.begin(enabled)
    }

    /// Settles a fullscreen change. Returns the new state when applied.
    pub fn complete_fullscreen(
        &mut self,
        ticket: &RequestTicket,
        result: Result<(), TransientError>,
    ) -> Option<bool> {
        let (enabled, result) = self.toggle.complete(ticket, result)?;
        match result {
            Ok(()) => {
                self.fullscreen = enabled;
                Some(enabled)
            }
            Err(e) => {
                log::warn!("Fullscreen change failed: {e}");
                None
            }
        }
    }

    /// Cancels everything in flight.
    pub fn cancel_all(&mut self) {
        self.resize.cancel();
        self.toggle.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_resize_wins() {
        let mut ops = SurfaceOperations::new((256, 144));
        let first = ops.request_resize(800, 600);
        let second = ops.request_resize(1024, 768);
        assert!(first.is_cancelled());

        assert_eq!(ops.complete_resize(&first, Ok(())), None);
        assert_eq!(ops.size(), (256, 144));
        assert_eq!(ops.pending_resize(), Some((1024, 768)));

        assert_eq!(ops.complete_resize(&second, Ok(())), Some((1024, 768)));
        assert_eq!(ops.size(), (1024, 768));
        assert_eq!(ops.pending_resize(), None);
    }

    #[test]
    fn failed_resize_keeps_size() {
        let mut ops = SurfaceOperations::new((256, 144));
        let ticket = ops.request_resize(10, 10);
        assert_eq!(
            ops.complete_resize(&ticket, Err(TransientError::SurfaceLost)),
            None
        );
        assert_eq!(ops.size(), (256, 144));
    }

    #[test]
    fn fullscreen_and_resize_are_independent() {
        let mut ops = SurfaceOperations::new((1, 1));
        let toggle = ops.request_fullscreen(true);
        let resize = ops.request_resize(2, 2);
        assert!(!toggle.is_cancelled());
        assert_eq!(ops.complete_fullscreen(&toggle, Ok(())), Some(true));
        assert!(ops.is_fullscreen());

        ops.cancel_all();
        assert!(resize.is_cancelled());
        assert_eq!(ops.complete_resize(&resize, Ok(())), None);
    }
}
