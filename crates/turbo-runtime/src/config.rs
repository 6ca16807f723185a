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

//! Runtime configuration.

use serde::{Deserialize, Serialize};
use turbo_input::InputConfig;
use turbo_io::AppConfiguration;

use crate::clock::{FrameClock, MAX_FPS};
use crate::error::ConfigError;

/// Default simulation rate.
pub const DEFAULT_FPS: u32 = 60;
/// Default bound on catch-up steps per host callback.
pub const DEFAULT_MAX_STEPS_PER_CALLBACK: u32 = 5;
/// Default logical canvas size.
pub const DEFAULT_RESOLUTION: [u32; 2] = [256, 144];

/// Settings for one runtime instance.
///
/// Serialized as camelCase JSON; every field is optional in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeConfig {
    /// Simulation steps per second.
    pub fps: u32,
    /// Upper bound on simulation steps in a single host callback.
    pub max_steps_per_callback: u32,
    /// Logical canvas size in pixels, `[width, height]`.
    pub resolution: [u32; 2],
    /// Input bindings and deadzone.
    pub input: InputConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            max_steps_per_callback: DEFAULT_MAX_STEPS_PER_CALLBACK,
            resolution: DEFAULT_RESOLUTION,
            input: InputConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies the settings a game ships in its packaged `Config` section.
    pub fn merge_app_configuration(&mut self, app: &AppConfiguration) {
        if let Some(fps) = app.fps {
            self.fps = fps;
        }
        if let Some(resolution) = app.resolution {
            self.resolution = resolution;
        }
    }

    /// Checks every field for a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.fps > MAX_FPS {
            return Err(ConfigError::FpsTooHigh(self.fps));
        }
        if self.max_steps_per_callback == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }
        let [width, height] = self.resolution;
        if width == 0 || height == 0 {
            return Err(ConfigError::Resolution(width, height));
        }
        let deadzone = self.input.deadzone;
        if !(0.0..1.0).contains(&deadzone) {
            return Err(ConfigError::Deadzone(deadzone));
        }
        Ok(())
    }

    /// Builds the frame clock these settings describe.
    pub fn frame_clock(&self) -> Result<FrameClock, ConfigError> {
        FrameClock::new(self.fps, self.max_steps_per_callback)
    }
}
