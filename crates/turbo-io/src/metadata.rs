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

use serde::{Deserialize, Serialize};

/// Descriptive information about the packaged game (`Meta` section).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppMetadata {
    /// Display name.
    pub app_name: Option<String>,
    /// Version string chosen by the author.
    pub app_version: Option<String>,
    /// Author or studio.
    pub app_author: Option<String>,
    /// Free-form description.
    pub app_description: Option<String>,
}

/// Shader overrides for the two render stages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShaderConfig {
    /// Source of the main (scene) shader.
    pub main: Option<String>,
    /// Source of the surface (post/compose) shader.
    pub surface: Option<String>,
}

/// Runtime parameters requested by the packaged game (`Config` section).
///
/// Every field is optional; absent fields leave the runtime default in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfiguration {
    /// Simulation steps per second.
    pub fps: Option<u32>,
    /// Logical canvas resolution in pixels.
    pub resolution: Option<[u32; 2]>,
    /// Tile size in pixels.
    pub tile_size: Option<[u32; 2]>,
    /// Shader overrides.
    pub shaders: ShaderConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_uses_camel_case() {
        let meta: AppMetadata =
            serde_json::from_str(r#"{"appName":"Pong","appVersion":"1.2"}"#).unwrap();
        assert_eq!(meta.app_name.as_deref(), Some("Pong"));
        assert_eq!(meta.app_version.as_deref(), Some("1.2"));
        assert!(meta.app_author.is_none());
    }

    #[test]
    fn configuration_tolerates_missing_fields() {
        let config: AppConfiguration =
            serde_json::from_str(r#"{"fps":30,"tileSize":[8,8],"shaders":{"main":"fn x(){}"}}"#)
                .unwrap();
        assert_eq!(config.fps, Some(30));
        assert_eq!(config.resolution, None);
        assert_eq!(config.tile_size, Some([8, 8]));
        assert_eq!(config.shaders.main.as_deref(), Some("fn x(){}"));
        assert!(config.shaders.surface.is_none());
    }
}
