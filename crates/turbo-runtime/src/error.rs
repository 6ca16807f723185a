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

//! Error types for the scheduler, configuration and bootstrap paths.

use std::fmt;

use thiserror::Error;
use turbo_core::platform::FetchError;
use turbo_io::DecodeError;

/// Outcome of a failed simulation step, as reported by the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// The step could not complete but the simulation can continue.
    #[error("recoverable step failure: {0}")]
    Recoverable(String),
    /// The simulation cannot continue. The scheduler stops.
    #[error("fatal step failure: {0}")]
    Fatal(String),
}

impl StepError {
    /// Shorthand for [`StepError::Recoverable`].
    pub fn recoverable(reason: impl Into<String>) -> Self {
        StepError::Recoverable(reason.into())
    }

    /// Shorthand for [`StepError::Fatal`].
    pub fn fatal(reason: impl Into<String>) -> Self {
        StepError::Fatal(reason.into())
    }
}

/// The error that moved a scheduler to `Stopped`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("simulation stopped at tick {tick}: {reason}")]
pub struct FatalError {
    /// The tick whose step failed.
    pub tick: u64,
    /// What the simulation reported.
    pub reason: String,
}

/// A render failure. The frame is skipped and the scheduler keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransientError {
    /// The drawable surface was lost and must be recreated.
    #[error("surface lost")]
    SurfaceLost,
    /// The surface no longer matches the canvas and must be reconfigured.
    #[error("surface outdated")]
    SurfaceOutdated,
    /// Acquiring the next frame timed out.
    #[error("timed out acquiring the next frame")]
    Timeout,
    /// Any other backend failure.
    #[error("render failed: {0}")]
    Other(String),
}

/// Lifecycle state of a [`FrameScheduler`](crate::FrameScheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulerState {
    /// Created but not started.
    Idle,
    /// Stepping and rendering on every callback.
    Running,
    /// Holding accumulated time; callbacks do nothing.
    Paused,
    /// Terminal.
    Stopped,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchedulerState::Idle => "idle",
            SchedulerState::Running => "running",
            SchedulerState::Paused => "paused",
            SchedulerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Errors returned by scheduler lifecycle calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The requested transition is not allowed from the current state.
    #[error("cannot go from {from} to {to}")]
    InvalidTransition {
        /// Current state.
        from: SchedulerState,
        /// Requested state.
        to: SchedulerState,
    },
}

/// An invalid runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// `fps` must be at least 1.
    #[error("fps must be greater than zero")]
    ZeroFps,
    /// `fps` is so high that a step would last zero nanoseconds.
    #[error("fps {0} is above the limit of {max}", max = crate::clock::MAX_FPS)]
    FpsTooHigh(u32),
    /// `maxStepsPerCallback` must be at least 1.
    #[error("maxStepsPerCallback must be at least 1")]
    ZeroMaxSteps,
    /// The deadzone must lie in `[0, 1)`.
    #[error("deadzone {0} is outside [0, 1)")]
    Deadzone(f32),
    /// Both resolution components must be non-zero.
    #[error("resolution {0}x{1} has a zero dimension")]
    Resolution(u32, u32),
}

/// Failures before a runtime exists. No simulation is started when one occurs.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The packaged content could not be fetched.
    #[error("failed to fetch content: {0}")]
    Fetch(#[from] FetchError),
    /// The packaged content is not a valid Turbo file.
    #[error("failed to decode content: {0}")]
    Decode(#[from] DecodeError),
    /// The merged configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The content has already been handed to a runtime.
    #[error("packaged content was already handed off")]
    ContentAlreadyTaken,
    /// The simulation factory refused the content.
    #[error("failed to create simulation: {0}")]
    Simulation(String),
    /// The scheduler could not be started.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}
