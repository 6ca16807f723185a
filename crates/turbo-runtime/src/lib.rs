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

//! # Turbo Runtime
//!
//! The frame scheduler and the bootstrap contract. A host fetches a packaged
//! game through a [`ContentFetcher`](turbo_core::platform::ContentFetcher),
//! hands the decoded content to a [`Runtime`] together with a surface and its
//! capability hooks, then forwards timing callbacks, visibility changes and
//! raw input until shutdown.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use turbo_core::platform::HeadlessSurface;
//! use turbo_runtime::{
//!     HostCapabilities, MemoryFetcher, Runtime, RuntimeConfig, Simulation, StepContext,
//!     StepError, RenderContext, TransientError,
//! };
//! use turbo_core::input::InputSnapshot;
//!
//! struct Game;
//!
//! impl Simulation for Game {
//!     fn step(&mut self, _: &StepContext, _: &InputSnapshot) -> Result<(), StepError> {
//!         Ok(())
//!     }
//!     fn render(&mut self, _: &RenderContext) -> Result<(), TransientError> {
//!         Ok(())
//!     }
//! }
//!
//! # async fn run(fetcher: MemoryFetcher) -> Result<(), Box<dyn std::error::Error>> {
//! let mut runtime = Runtime::load(
//!     RuntimeConfig::default(),
//!     &fetcher,
//!     "game.turbo",
//!     Arc::new(HeadlessSurface::new(256, 144)),
//!     HostCapabilities::default(),
//!     |_setup| Ok(Box::new(Game)),
//! )
//! .await?;
//! runtime.on_frame(Duration::from_millis(16));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod bootstrap;
mod capabilities;
mod clock;
mod config;
mod error;
pub mod logging;
mod runtime;
mod scheduler;
mod surface;

pub use bootstrap::{load_content, ContentSlot, FileFetcher, MemoryFetcher};
pub use capabilities::HostCapabilities;
pub use clock::{FrameClock, MAX_FPS};
pub use config::{
    RuntimeConfig, DEFAULT_FPS, DEFAULT_MAX_STEPS_PER_CALLBACK, DEFAULT_RESOLUTION,
};
pub use error::{
    BootstrapError, ConfigError, FatalError, SchedulerError, SchedulerState, StepError,
    TransientError,
};
pub use runtime::{Runtime, SimulationSetup};
pub use scheduler::{
    FrameReport, FrameScheduler, FrameStats, RenderContext, Simulation, StepContext,
};
pub use surface::SurfaceOperations;
