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

use super::button::{ButtonState, LogicalButton};
use super::event::{PointerDevice, PointerSample};

/// Pointer state as seen by one simulation tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerState {
    /// Last known horizontal position in canvas-local coordinates.
    pub x: f32,
    /// Last known vertical position in canvas-local coordinates.
    pub y: f32,
    /// Bit `n` is set while pointer button `n` is down.
    pub buttons: u16,
    /// The device that produced the latest pointer event, if any.
    pub device: Option<PointerDevice>,
    /// Every position reported since the previous tick, oldest first.
    pub samples: Vec<PointerSample>,
    /// Wheel movement accumulated since the previous tick.
    pub wheel: (f32, f32),
}

impl PointerState {
    /// Returns `true` while pointer button `button` is down.
    pub fn is_down(&self, button: u8) -> bool {
        button < 16 && self.buttons & (1 << button) != 0
    }
}

/// Normalised analog stick values after the deadzone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalogAxes {
    /// Horizontal axis in `[-1.0, 1.0]`.
    pub x: f32,
    /// Vertical axis in `[-1.0, 1.0]`, positive is down.
    pub y: f32,
}

/// The authoritative input state for exactly one simulation tick.
///
/// Built by the aggregator at a tick boundary and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputSnapshot {
    tick: u64,
    buttons: [ButtonState; LogicalButton::COUNT],
    pointer: PointerState,
    axes: AnalogAxes,
}

impl InputSnapshot {
    /// Assembles a snapshot. Intended for the aggregator and for tests.
    pub fn new(
        tick: u64,
        buttons: [ButtonState; LogicalButton::COUNT],
        pointer: PointerState,
        axes: AnalogAxes,
    ) -> Self {
        Self {
            tick,
            buttons,
            pointer,
            axes,
        }
    }

    /// Sequence number of the tick this snapshot belongs to, starting at 1.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Edge-detected state of `button`.
    pub fn button(&self, button: LogicalButton) -> ButtonState {
        self.buttons[button.index()]
    }

    /// Every button state, indexed by [`LogicalButton::index`].
    pub fn buttons(&self) -> &[ButtonState; LogicalButton::COUNT] {
        &self.buttons
    }

    /// Shorthand for `self.button(button).is_pressed()`.
    pub fn pressed(&self, button: LogicalButton) -> bool {
        self.button(button).is_pressed()
    }

    /// Shorthand for `self.button(button).is_just_pressed()`.
    pub fn just_pressed(&self, button: LogicalButton) -> bool {
        self.button(button).is_just_pressed()
    }

    /// Shorthand for `self.button(button).is_just_released()`.
    pub fn just_released(&self, button: LogicalButton) -> bool {
        self.button(button).is_just_released()
    }

    /// Pointer state for this tick.
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Analog stick values for this tick.
    pub fn axes(&self) -> AnalogAxes {
        self.axes
    }
}
