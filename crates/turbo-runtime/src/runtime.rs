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

//! A single running game instance.

use std::sync::Arc;
use std::time::Duration;

use turbo_core::platform::{ContentFetcher, Surface};
use turbo_core::RequestTicket;
use turbo_input::{InputAggregator, InputRecorder};
use turbo_io::{AppMetadata, PackagedContent};

use crate::bootstrap::{console_progress, load_content, ContentSlot};
use crate::capabilities::HostCapabilities;
use crate::config::RuntimeConfig;
use crate::error::{BootstrapError, FatalError, SchedulerError, SchedulerState, TransientError};
use crate::scheduler::{FrameReport, FrameScheduler, FrameStats, Simulation};
use crate::surface::SurfaceOperations;

/// Everything a simulation factory receives when the runtime is built.
pub struct SimulationSetup<'a> {
    /// The decoded game, now owned by the simulation.
    pub content: PackagedContent,
    /// Parsed `Meta` section, if the game ships one.
    pub metadata: Option<AppMetadata>,
    /// Effective configuration after merging the game's settings.
    pub config: &'a RuntimeConfig,
    /// The drawable surface.
    pub surface: Arc<dyn Surface>,
    /// Host hooks, stubbed where absent.
    pub capabilities: &'a HostCapabilities,
}

/// Owns the scheduler, input, surface state and simulation of one game.
///
/// Instances share nothing; a process may run several side by side.
pub struct Runtime {
    config: RuntimeConfig,
    metadata: Option<AppMetadata>,
    scheduler: FrameScheduler,
    input: InputAggregator,
    surface: Arc<dyn Surface>,
    surface_ops: SurfaceOperations,
    capabilities: HostCapabilities,
    simulation: Box<dyn Simulation>,
}

impl Runtime {
    /// Takes the content out of `slot`, builds the simulation and starts the
    /// scheduler.
    ///
    /// Settings found in the game's `Config` section override `config`.
    pub fn new<F>(
        mut config: RuntimeConfig,
        slot: &mut ContentSlot,
        surface: Arc<dyn Surface>,
        capabilities: HostCapabilities,
        factory: F,
    ) -> Result<Self, BootstrapError>
    where
        F: FnOnce(SimulationSetup<'_>) -> Result<Box<dyn Simulation>, BootstrapError>,
    {
        let content = slot.take()?;
        let metadata = content.metadata()?;
        if let Some(app) = content.configuration()? {
            config.merge_app_configuration(&app);
        }
        config.validate()?;

        let mut scheduler = FrameScheduler::new(config.frame_clock()?);
        let input = InputAggregator::new(config.input.clone());
        let surface_ops = SurfaceOperations::new(surface.size());

        if let Some(name) = metadata.as_ref().and_then(|m| m.app_name.as_deref()) {
            log::info!("Starting '{name}' at {} fps.", config.fps);
        }
        if !capabilities.stubbed().is_empty() {
            log::debug!("Stubbed host capabilities: {:?}", capabilities.stubbed());
        }

        let simulation = factory(SimulationSetup {
            content,
            metadata: metadata.clone(),
            config: &config,
            surface: surface.clone(),
            capabilities: &capabilities,
        })?;
        scheduler.start()?;

        Ok(Self {
            config,
            metadata,
            scheduler,
            input,
            surface,
            surface_ops,
            capabilities,
            simulation,
        })
    }

    /// Fetches, decodes and starts a game in one call.
    ///
    /// Loading progress is shown through the console hook.
    pub async fn load<F>(
        config: RuntimeConfig,
        fetcher: &dyn ContentFetcher,
        identifier: &str,
        surface: Arc<dyn Surface>,
        capabilities: HostCapabilities,
        factory: F,
    ) -> Result<Self, BootstrapError>
    where
        F: FnOnce(SimulationSetup<'_>) -> Result<Box<dyn Simulation>, BootstrapError>,
    {
        let mut progress = console_progress(capabilities.console().clone());
        let content = load_content(fetcher, identifier, &mut progress).await?;
        Self::new(
            config,
            &mut ContentSlot::new(content),
            surface,
            capabilities,
            factory,
        )
    }

    /// A handle host input callbacks record into.
    pub fn recorder(&self) -> InputRecorder {
        self.input.recorder()
    }

    /// Host timing callback with a monotonic timestamp.
    pub fn on_frame(&mut self, timestamp: Duration) -> FrameReport {
        self.scheduler
            .on_frame(timestamp, self.simulation.as_mut(), &mut self.input)
    }

    /// Host timing callback with an explicit delta.
    pub fn advance(&mut self, delta: Duration) -> FrameReport {
        self.scheduler
            .advance(delta, self.simulation.as_mut(), &mut self.input)
    }

    /// Pauses when the page or window is hidden and resumes when shown.
    ///
    /// Does nothing when already in the matching state or stopped.
    pub fn set_visible(&mut self, visible: bool) -> Result<(), SchedulerError> {
        match (visible, self.scheduler.state()) {
            (false, SchedulerState::Running) => self.scheduler.pause(),
            (true, SchedulerState::Paused) => self.scheduler.resume(),
            _ => Ok(()),
        }
    }

    /// Explicit pause.
    pub fn pause(&mut self) -> Result<(), SchedulerError> {
        self.scheduler.pause()
    }

    /// Explicit resume.
    pub fn resume(&mut self) -> Result<(), SchedulerError> {
        self.scheduler.resume()
    }

    /// Stops the game for good and cancels pending surface operations.
    pub fn shutdown(&mut self) {
        self.surface_ops.cancel_all();
        if self.scheduler.state() != SchedulerState::Stopped {
            // Only fails when already stopped.
            let _ = self.scheduler.stop();
        }
    }

    /// Begins a surface reconfiguration, superseding any in flight.
    pub fn request_resize(&mut self, width: u32, height: u32) -> RequestTicket {
        self.surface_ops.request_resize(width, height)
    }

    /// Requests a resize to the configured resolution when the applied surface
    /// size differs from it, as it does when the game's `Config` section
    /// declares its own resolution.
    pub fn fit_surface(&mut self) -> Option<RequestTicket> {
        let [width, height] = self.config.resolution;
        if self.surface_ops.size() == (width, height) {
            return None;
        }
        Some(self.surface_ops.request_resize(width, height))
    }

    /// Reports the host's result for a resize.
    pub fn complete_resize(
        &mut self,
        ticket: &RequestTicket,
        result: Result<(), TransientError>,
    ) -> Option<(u32, u32)> {
        self.surface_ops.complete_resize(ticket, result)
    }

    /// Begins a fullscreen change, superseding any in flight.
    pub fn request_fullscreen(&mut self, enabled: bool) -> RequestTicket {
        self.surface_ops.request_fullscreen(enabled)
    }

    /// Reports the host's result for a fullscreen change.
    pub fn complete_fullscreen(
        &mut self,
        ticket: &RequestTicket,
        result: Result<(), TransientError>,
    ) -> Option<bool> {
        self.surface_ops.complete_fullscreen(ticket, result)
    }

    /// Scheduler state.
    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// The fault that stopped the game, if any.
    pub fn last_error(&self) -> Option<&FatalError> {
        self.scheduler.last_error()
    }

    /// Scheduler counters.
    pub fn stats(&self) -> &FrameStats {
        self.scheduler.stats()
    }

    /// Effective configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The game's metadata, if it ships any.
    pub fn metadata(&self) -> Option<&AppMetadata> {
        self.metadata.as_ref()
    }

    /// Host hooks in use.
    pub fn capabilities(&self) -> &HostCapabilities {
        &self.capabilities
    }

    /// The drawable surface.
    pub fn surface(&self) -> &Arc<dyn Surface> {
        &self.surface
    }

    /// Applied and pending surface state.
    pub fn surface_operations(&self) -> &SurfaceOperations {
        &self.surface_ops
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("state", &self.scheduler.state())
            .field("surface", &self.surface.id())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
