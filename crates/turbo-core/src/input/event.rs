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

use super::button::LogicalButton;

/// Identifies which host source produced a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputSource {
    /// The physical keyboard.
    Keyboard,
    /// Mouse, touch or pen pointer.
    Pointer,
    /// A gamepad, identified by the host's device index.
    Gamepad(u32),
    /// The on-screen virtual joystick.
    VirtualStick,
}

/// A keyboard key transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Layout-dependent key identifier (e.g. `"z"`, `"ArrowUp"`).
    pub key: String,
    /// Layout-independent physical code (e.g. `"KeyZ"`, `"ArrowUp"`).
    pub code: String,
    /// `true` for key-down, `false` for key-up.
    pub pressed: bool,
    /// `true` if the host generated this event by auto-repeat.
    pub repeat: bool,
}

impl KeyEvent {
    /// A non-repeat key-down for `code`, using the code as key identifier.
    pub fn down(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            key: code.clone(),
            code,
            pressed: true,
            repeat: false,
        }
    }

    /// A key-up for `code`, using the code as key identifier.
    pub fn up(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            key: code.clone(),
            code,
            pressed: false,
            repeat: false,
        }
    }
}

/// The kind of device behind a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerDevice {
    /// A mouse or trackpad.
    Mouse,
    /// A finger on a touch screen.
    Touch,
    /// A stylus.
    Pen,
}

/// A single pointer position in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

/// A pointer transition or movement.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// The pointer moved.
    Moved {
        /// Final position.
        x: f32,
        /// Final position.
        y: f32,
        /// The device that moved.
        device: PointerDevice,
        /// High-frequency intermediate positions, oldest first.
        coalesced: Vec<PointerSample>,
    },
    /// A pointer button went down.
    Down {
        /// Position at the time of the press.
        x: f32,
        /// Position at the time of the press.
        y: f32,
        /// Button index (0 = primary).
        button: u8,
        /// The device that pressed.
        device: PointerDevice,
    },
    /// A pointer button went up.
    Up {
        /// Position at the time of the release.
        x: f32,
        /// Position at the time of the release.
        y: f32,
        /// Button index (0 = primary).
        button: u8,
        /// The device that released.
        device: PointerDevice,
    },
    /// The wheel scrolled.
    Wheel {
        /// Horizontal scroll delta.
        delta_x: f32,
        /// Vertical scroll delta.
        delta_y: f32,
    },
}

/// Polled state of one gamepad.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GamepadState {
    /// Pressed flag per button index.
    pub buttons: Vec<bool>,
    /// Axis values, nominally in `[-1.0, 1.0]`.
    pub axes: Vec<f32>,
}

impl GamepadState {
    /// A state with `buttons` unpressed buttons and `axes` centred axes.
    pub fn neutral(buttons: usize, axes: usize) -> Self {
        Self {
            buttons: vec![false; buttons],
            axes: vec![0.0; axes],
        }
    }

    /// Returns a copy with `button` set to `pressed`. Out-of-range indices are ignored.
    pub fn with_button(mut self, button: usize, pressed: bool) -> Self {
        if let Some(slot) = self.buttons.get_mut(button) {
            *slot = pressed;
        }
        self
    }

    /// Returns a copy with `axis` set to `value`. Out-of-range indices are ignored.
    pub fn with_axis(mut self, axis: usize, value: f32) -> Self {
        if let Some(slot) = self.axes.get_mut(axis) {
            *slot = value;
        }
        self
    }
}

/// Gamepad lifecycle and polling events.
#[derive(Debug, Clone, PartialEq)]
pub enum GamepadEvent {
    /// A gamepad appeared at `index`.
    Connected {
        /// Host device index.
        index: u32,
        /// State at connection time.
        state: GamepadState,
    },
    /// The gamepad at `index` went away.
    Disconnected {
        /// Host device index.
        index: u32,
    },
    /// The host polled the gamepad at `index`.
    Polled {
        /// Host device index.
        index: u32,
        /// Current state.
        state: GamepadState,
    },
}

/// A cardinal stick direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StickDirection {
    /// Up.
    Up,
    /// Down.
    Down,
    /// Left.
    Left,
    /// Right.
    Right,
}

impl StickDirection {
    /// Every direction, in declaration order.
    pub const ALL: [StickDirection; 4] = [
        StickDirection::Up,
        StickDirection::Down,
        StickDirection::Left,
        StickDirection::Right,
    ];

    /// The logical button this direction drives.
    pub fn button(self) -> LogicalButton {
        match self {
            StickDirection::Up => LogicalButton::Up,
            StickDirection::Down => LogicalButton::Down,
            StickDirection::Left => LogicalButton::Left,
            StickDirection::Right => LogicalButton::Right,
        }
    }
}

/// Events from the on-screen virtual joystick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VirtualStickEvent {
    /// The stick entered a new dominant direction.
    Direction(StickDirection),
    /// The stick moved; `x`/`y` are already normalised to `[-1.0, 1.0]`.
    Moved {
        /// Horizontal deflection.
        x: f32,
        /// Vertical deflection (positive is down).
        y: f32,
    },
    /// The touch ended and the stick recentred.
    End,
}

/// A raw event as delivered by a host collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    /// Keyboard transition.
    Key(KeyEvent),
    /// Pointer transition or movement.
    Pointer(PointerEvent),
    /// Gamepad lifecycle or poll.
    Gamepad(GamepadEvent),
    /// Virtual joystick activity.
    VirtualStick(VirtualStickEvent),
}

impl RawInputEvent {
    /// The source this event belongs to.
    pub fn source(&self) -> InputSource {
        match self {
            RawInputEvent::Key(_) => InputSource::Keyboard,
            RawInputEvent::Pointer(_) => InputSource::Pointer,
            RawInputEvent::Gamepad(
                GamepadEvent::Connected { index, .. }
                | GamepadEvent::Disconnected { index }
                | GamepadEvent::Polled { index, .. },
            ) => InputSource::Gamepad(*index),
            RawInputEvent::VirtualStick(_) => InputSource::VirtualStick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_follows_variant() {
        assert_eq!(
            RawInputEvent::Key(KeyEvent::down("KeyZ")).source(),
            InputSource::Keyboard
        );
        assert_eq!(
            RawInputEvent::Gamepad(GamepadEvent::Disconnected { index: 3 }).source(),
            InputSource::Gamepad(3)
        );
        assert_eq!(
            RawInputEvent::VirtualStick(VirtualStickEvent::End).source(),
            InputSource::VirtualStick
        );
    }

    #[test]
    fn gamepad_state_builders_ignore_out_of_range() {
        let state = GamepadState::neutral(2, 1)
            .with_button(1, true)
            .with_button(9, true)
            .with_axis(0, -0.75)
            .with_axis(4, 1.0);
        assert_eq!(state.buttons, vec![false, true]);
        assert_eq!(state.axes, vec![-0.75]);
    }
}
