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

//! Differential polling for gamepads.
//!
//! Hosts expose gamepads only through polling. The tracker keeps the previous
//! button and stick-direction state per device index and turns each poll into
//! press/release edges, which is the only way a gamepad contributes to the
//! logical buttons.

use std::collections::{BTreeMap, BTreeSet};
use turbo_core::input::{GamepadState, StickDirection};

/// A physical gamepad input that can be pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PadInput {
    /// A button by standard-layout index.
    Button(usize),
    /// The stick pushed past the deadzone in a direction.
    Stick(StickDirection),
}

/// A transition detected by comparing two polls of one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadEdge {
    /// Host device index.
    pub index: u32,
    /// What changed.
    pub input: PadInput,
    /// `true` for a press, `false` for a release.
    pub pressed: bool,
}

#[derive(Debug)]
struct Device {
    buttons: Vec<bool>,
    directions: [bool; 4],
    stick: (f32, f32),
    held: BTreeSet<PadInput>,
}

/// Previous-state tables keyed by device index.
#[derive(Debug)]
pub struct GamepadTracker {
    devices: BTreeMap<u32, Device>,
    deadzone: f32,
    stick_axes: [usize; 2],
}

impl GamepadTracker {
    /// Creates an empty tracker.
    pub fn new(deadzone: f32, stick_axes: [usize; 2]) -> Self {
        Self {
            devices: BTreeMap::new(),
            deadzone,
            stick_axes,
        }
    }

    /// Starts tracking `index` from its current state.
    ///
    /// Whatever is already pressed becomes the baseline and produces no edge,
    /// so nothing held at connection time counts as pressed until it is
    /// released and pressed again. Reconnecting an index discards its old table.
    pub fn connect(&mut self, index: u32, state: &GamepadState) {
        let stick = self.read_stick(state, (0.0, 0.0));
        let device = Device {
            buttons: state.buttons.clone(),
            directions: self.directions(stick),
            stick,
            held: BTreeSet::new(),
        };
        log::info!(
            "Gamepad connected at index {index}: {} buttons, {} axes.",
            state.buttons.len(),
            state.axes.len()
        );
        self.devices.insert(index, device);
    }

    /// Stops tracking `index`. Returns `false` if it was not connected.
    ///
    /// No release edges are produced: whatever the device held simply stops
    /// contributing.
    pub fn disconnect(&mut self, index: u32) -> bool {
        let removed = self.devices.remove(&index).is_some();
        if removed {
            log::info!("Gamepad disconnected from index {index}.");
        }
        removed
    }

    /// Compares `state` with the previous poll of `index` and returns the edges.
    ///
    /// Polling an index that is not connected connects it instead and returns
    /// no edges.
    pub fn poll(&mut self, index: u32, state: &GamepadState) -> Vec<GamepadEdge> {
        if !self.devices.contains_key(&index) {
            self.connect(index, state);
            return Vec::new();
        }

        let previous_stick = self.devices[&index].stick;
        let stick = self.read_stick(state, previous_stick);
        let directions = self.directions(stick);
        let Some(device) = self.devices.get_mut(&index) else {
            return Vec::new();
        };

        let mut edges = Vec::new();
        let count = device.buttons.len().max(state.buttons.len());
        for button in 0..count {
            let was = device.buttons.get(button).copied().unwrap_or(false);
            let now = state.buttons.get(button).copied().unwrap_or(false);
            if was != now {
                edges.push(GamepadEdge {
                    index,
                    input: PadInput::Button(button),
                    pressed: now,
                });
            }
        }
        for (slot, direction) in StickDirection::ALL.iter().enumerate() {
            if device.directions[slot] != directions[slot] {
                edges.push(GamepadEdge {
                    index,
                    input: PadInput::Stick(*direction),
                    pressed: directions[slot],
                });
            }
        }

        for edge in &edges {
            if edge.pressed {
                device.held.insert(edge.input);
            } else {
                device.held.remove(&edge.input);
            }
        }
        device.buttons = state.buttons.clone();
        device.directions = directions;
        device.stick = stick;
        edges
    }

    /// Returns `true` if `index` is being tracked.
    pub fn is_connected(&self, index: u32) -> bool {
        self.devices.contains_key(&index)
    }

    /// Indices of every tracked device, ascending.
    pub fn connected(&self) -> impl Iterator<Item = u32> + '_ {
        self.devices.keys().copied()
    }

    /// Inputs of `index` currently counted as pressed.
    pub fn held(&self, index: u32) -> impl Iterator<Item = PadInput> + '_ {
        self.devices
            .get(&index)
            .into_iter()
            .flat_map(|device| device.held.iter().copied())
    }

    /// Raw stick position of `index` (before the deadzone).
    pub fn stick(&self, index: u32) -> Option<(f32, f32)> {
        self.devices.get(&index).map(|device| device.stick)
    }

    fn read_stick(&self, state: &GamepadState, previous: (f32, f32)) -> (f32, f32) {
        let read = |axis: usize, fallback: f32| match state.axes.get(axis) {
            Some(value) if !value.is_finite() => fallback,
            Some(value) => value.clamp(-1.0, 1.0),
            None => 0.0,
        };
        (
            read(self.stick_axes[0], previous.0),
            read(self.stick_axes[1], previous.1),
        )
    }

    fn directions(&self, (x, y): (f32, f32)) -> [bool; 4] {
        [
            y < -self.deadzone,
            y > self.deadzone,
            x < -self.deadzone,
            x > self.deadzone,
        ]
    }
}
