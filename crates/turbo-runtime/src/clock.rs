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

//! Fixed-timestep accumulator.
//!
//! All arithmetic is done on [`Duration`] (integer nanoseconds), so two runs
//! fed the same deltas take the same steps and keep the same residual.

use std::time::Duration;

use crate::error::ConfigError;

/// Highest rate with a non-zero step duration (one nanosecond per step).
pub const MAX_FPS: u32 = 1_000_000_000;

/// Tracks wall-clock time owed to the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameClock {
    step: Duration,
    max_steps: u32,
    accumulated: Duration,
    steps_this_callback: u32,
}

impl FrameClock {
    /// Creates a clock stepping `fps` times per second, taking at most
    /// `max_steps_per_callback` steps per host callback.
    ///
    /// The step duration is `1s / fps`, truncated to whole nanoseconds.
    pub fn new(fps: u32, max_steps_per_callback: u32) -> Result<Self, ConfigError> {
        if fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if fps > MAX_FPS {
            return Err(ConfigError::FpsTooHigh(fps));
        }
        if max_steps_per_callback == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }
        Ok(Self {
            step: Duration::from_secs(1) / fps,
            max_steps: max_steps_per_callback,
            accumulated: Duration::ZERO,
            steps_this_callback: 0,
        })
    }

    /// Duration of one simulation step.
    pub fn step_duration(&self) -> Duration {
        self.step
    }

    /// Upper bound on steps taken in one callback.
    pub fn max_steps_per_callback(&self) -> u32 {
        self.max_steps
    }

    /// Time accumulated but not yet consumed by a step.
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Starts a new host callback that brought `delta` of wall-clock time.
    pub fn begin_callback(&mut self, delta: Duration) {
        self.accumulated = self.accumulated.saturating_add(delta);
        self.steps_this_callback = 0;
    }

    /// Consumes one step if enough time is owed and the per-callback cap
    /// has not been reached.
    pub fn consume_step(&mut self) -> bool {
        if self.steps_this_callback >= self.max_steps || self.accumulated < self.step {
            return false;
        }
        self.accumulated -= self.step;
        self.steps_this_callback += 1;
        true
    }

    /// Returns `true` when at least one whole step is still owed.
    pub fn is_behind(&self) -> bool {
        self.accumulated >= self.step
    }

    /// How far into the next step the accumulator is, in `[0, 1)` unless behind.
    pub fn alpha(&self) -> f64 {
        self.accumulated.as_secs_f64() / self.step.as_secs_f64()
    }
}
