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
use std::collections::BTreeMap;
use turbo_core::input::LogicalButton;

/// Axis threshold used by the browser loader; also the default deadzone.
pub const DEFAULT_DEADZONE: f32 = 0.5;

/// Physical-to-logical binding tables.
///
/// This is configuration data: embeddings ship their own tables for unusual
/// hardware. Indices without an entry are unmapped and silently ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputMapping {
    /// Physical key code (`KeyboardEvent.code`) to logical button.
    pub keys: BTreeMap<String, LogicalButton>,
    /// Gamepad button index (standard layout) to logical button.
    pub gamepad_buttons: BTreeMap<u32, LogicalButton>,
    /// Pointer button index to logical button.
    pub pointer_buttons: BTreeMap<u8, LogicalButton>,
    /// Gamepad axis indices driving the analog stick, as `[x, y]`.
    pub stick_axes: [usize; 2],
}

impl Default for InputMapping {
    fn default() -> Self {
        use LogicalButton::*;

        let keys = [
            ("ArrowUp", Up),
            ("ArrowDown", Down),
            ("ArrowLeft", Left),
            ("ArrowRight", Right),
            ("KeyW", Up),
            ("KeyS", Down),
            ("KeyA", Left),
            ("KeyD", Right),
            ("KeyZ", A),
            ("KeyX", B),
            ("KeyC", X),
            ("KeyV", Y),
            ("Enter", Start),
            ("Space", Select),
        ]
        .into_iter()
        .map(|(code, button)| (code.to_string(), button))
        .collect();

        let gamepad_buttons = [
            (0, A),
            (1, B),
            (2, X),
            (3, Y),
            (8, Select),
            (9, Start),
            (12, Up),
            (13, Down),
            (14, Left),
            (15, Right),
        ]
        .into_iter()
        .collect();

        Self {
            keys,
            gamepad_buttons,
            pointer_buttons: BTreeMap::new(),
            stick_axes: [0, 1],
        }
    }
}

impl InputMapping {
    /// Logical button bound to a keyboard code.
    pub fn key(&self, code: &str) -> Option<LogicalButton> {
        self.keys.get(code).copied()
    }

    /// Logical button bound to a gamepad button index.
    pub fn gamepad_button(&self, index: usize) -> Option<LogicalButton> {
        u32::try_from(index)
            .ok()
            .and_then(|i| self.gamepad_buttons.get(&i).copied())
    }

    /// Logical button bound to a pointer button index.
    pub fn pointer_button(&self, index: u8) -> Option<LogicalButton> {
        self.pointer_buttons.get(&index).copied()
    }
}

/// Input section of the runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputConfig {
    /// Analog values with a smaller magnitude read as zero; crossing it
    /// presses the matching directional button.
    pub deadzone: f32,
    /// Binding tables.
    pub mapping: InputMapping,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            deadzone: DEFAULT_DEADZONE,
            mapping: InputMapping::default(),
        }
    }
}

impl InputConfig {
    /// Applies the deadzone to one axis value and rescales the rest to `[-1, 1]`.
    pub fn apply_deadzone(&self, value: f32) -> f32 {
        let magnitude = value.abs().min(1.0);
        if magnitude <= self.deadzone || self.deadzone >= 1.0 {
            return 0.0;
        }
        let scaled = (magnitude - self.deadzone) / (1.0 - self.deadzone);
        scaled.copysign(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_matches_loader_bindings() {
        let mapping = InputMapping::default();
        assert_eq!(mapping.gamepad_button(0), Some(LogicalButton::A));
        assert_eq!(mapping.gamepad_button(1), Some(LogicalButton::B));
        assert_eq!(mapping.gamepad_button(12), Some(LogicalButton::Up));
        assert_eq!(mapping.gamepad_button(15), Some(LogicalButton::Right));
        assert_eq!(mapping.key("KeyZ"), Some(LogicalButton::A));
        assert_eq!(mapping.key("ArrowLeft"), Some(LogicalButton::Left));
        assert_eq!(mapping.gamepad_button(42), None);
        assert_eq!(mapping.pointer_button(0), None);
    }

    #[test]
    fn mapping_deserializes_from_json() {
        let config: InputConfig = serde_json::from_str(
            r#"{
                "deadzone": 0.25,
                "mapping": {
                    "keys": { "KeyJ": "A" },
                    "gamepadButtons": { "5": "B" },
                    "pointerButtons": { "0": "A" }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.deadzone, 0.25);
        assert_eq!(config.mapping.key("KeyJ"), Some(LogicalButton::A));
        assert_eq!(config.mapping.key("KeyZ"), None);
        assert_eq!(config.mapping.gamepad_button(5), Some(LogicalButton::B));
        assert_eq!(config.mapping.pointer_button(0), Some(LogicalButton::A));
        assert_eq!(config.mapping.stick_axes, [0, 1]);
    }

    #[test]
    fn deadzone_rescales() {
        let config = InputConfig::default();
        assert_eq!(config.apply_deadzone(0.3), 0.0);
        assert_eq!(config.apply_deadzone(-0.5), 0.0);
        assert_eq!(config.apply_deadzone(0.75), 0.5);
        assert_eq!(config.apply_deadzone(-1.0), -1.0);
        assert_eq!(config.apply_deadzone(3.0), 1.0);
    }
}
