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

use serde::Deserialize;
use std::path::PathBuf;

/// The `Turbo.toml` manifest describing one game package.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct TurboManifest {
    /// Written to the `Meta` section.
    pub app: AppSection,
    /// Written to the `Config` section.
    pub config: ConfigSection,
    /// Files that become content sections.
    pub content: ContentSection,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct AppSection {
    pub name: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ConfigSection {
    pub fps: Option<u32>,
    pub resolution: Option<[u32; 2]>,
    pub tile_size: Option<[u32; 2]>,
    /// WGSL files inlined into the configuration.
    pub shaders: ShaderPaths,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ShaderPaths {
    pub main: Option<PathBuf>,
    pub surface: Option<PathBuf>,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct ContentSection {
    /// The compiled game logic.
    pub code: PathBuf,
    /// Files or directories scanned for sprite data, one section per file.
    pub sprites: Vec<PathBuf>,
    /// Files or directories scanned for audio data, one section per file.
    pub audio: Vec<PathBuf>,
    /// LZ4-compress code, sprite and audio sections.
    pub compress: bool,
}

impl Default for ContentSection {
    /// Without a manifest the game is expected in the conventional places.
    fn default() -> Self {
        Self {
            code: PathBuf::from("target/game.wasm"),
            sprites: vec![PathBuf::from("sprites")],
            audio: vec![PathBuf::from("audio")],
            compress: true,
        }
    }
}
