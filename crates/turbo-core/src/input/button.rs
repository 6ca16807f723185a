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

/// An abstract input identifier that several physical inputs may drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogicalButton {
    /// Directional up.
    Up,
    /// Directional down.
    Down,
    /// Directional left.
    Left,
    /// Directional right.
    Right,
    /// Primary face button.
    A,
    /// Secondary face button.
    B,
    /// Third face button.
    X,
    /// Fourth face button.
    Y,
    /// Start / pause.
    Start,
    /// Select / back.
    Select,
}

impl LogicalButton {
    /// Number of logical buttons.
    pub const COUNT: usize = 10;

    /// Every logical button, in index order.
    pub const ALL: [LogicalButton; Self::COUNT] = [
        LogicalButton::Up,
        LogicalButton::Down,
        LogicalButton::Left,
        LogicalButton::Right,
        LogicalButton::A,
        LogicalButton::B,
        LogicalButton::X,
        LogicalButton::Y,
        LogicalButton::Start,
        LogicalButton::Select,
    ];

    /// Dense index of this button, usable for array-backed tables.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Per-tick state of a logical button after edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonState {
    /// Not pressed this tick nor the previous one.
    #[default]
    Released,
    /// Pressed this tick, not pressed on the previous one.
    JustPressed,
    /// Pressed this tick and the previous one.
    Held,
    /// Not pressed this tick, pressed on the previous one.
    JustReleased,
}

impl ButtonState {
    /// Returns `true` for [`JustPressed`](Self::JustPressed) and [`Held`](Self::Held).
    pub fn is_pressed(self) -> bool {
        matches!(self, ButtonState::JustPressed | ButtonState::Held)
    }

    /// Returns `true` only on the tick the button went down.
    pub fn is_just_pressed(self) -> bool {
        self == ButtonState::JustPressed
    }

    /// Returns `true` only on the tick the button went up.
    pub fn is_just_released(self) -> bool {
        self == ButtonState::JustReleased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_all_order() {
        for (i, button) in LogicalButton::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
        }
    }

    #[test]
    fn pressed_states() {
        assert!(!ButtonState::Released.is_pressed());
        assert!(ButtonState::JustPressed.is_pressed());
        assert!(ButtonState::Held.is_pressed());
        assert!(!ButtonState::JustReleased.is_pressed());
        assert!(ButtonState::JustReleased.is_just_released());
        assert!(!ButtonState::Held.is_just_pressed());
    }
}
