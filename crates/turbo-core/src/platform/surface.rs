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

use std::sync::atomic::{AtomicU64, Ordering};

/// An opaque drawable surface supplied by the host (a canvas, a native window).
///
/// The core never draws through this trait; it only tracks identity and
/// dimensions so resize handling and the render pass agree on the target.
pub trait Surface: Send + Sync {
    /// Returns a stable identifier for the surface.
    fn id(&self) -> u64;

    /// Returns the current size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Returns the host's device-pixel ratio.
    fn scale_factor(&self) -> f64 {
        1.0
    }
}

static NEXT_HEADLESS_ID: AtomicU64 = AtomicU64::new(1);

/// A surface with no backing window, used by tools and tests.
#[derive(Debug)]
pub struct HeadlessSurface {
    id: u64,
    width: u32,
    height: u32,
}

impl HeadlessSurface {
    /// Creates a headless surface with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            id: NEXT_HEADLESS_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
        }
    }
}

impl Surface for HeadlessSurface {
    fn id(&self) -> u64 {
        self.id
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_surfaces_have_distinct_ids() {
        let a = HeadlessSurface::new(256, 144);
        let b = HeadlessSurface::new(256, 144);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.size(), (256, 144));
        assert_eq!(a.scale_factor(), 1.0);
    }
}
