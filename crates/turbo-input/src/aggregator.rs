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

//! The per-tick input aggregator.

use std::collections::BTreeMap;

use turbo_core::input::{
    AnalogAxes, GamepadEvent, InputSnapshot, KeyEvent, LogicalButton, PointerEvent,
    PointerSample, PointerState, RawInputEvent, StickDirection, VirtualStickEvent,
};
use turbo_core::{EventBus, EventPublisher};

use crate::edges::{ButtonMask, EdgeDetector};
use crate::gamepad::{GamepadTracker, PadInput};
use crate::mapping::InputConfig;
use crate::virtual_stick::VirtualStick;

/// Pointer buttons beyond this index do not fit the button mask.
const POINTER_BUTTONS: u8 = 16;

/// A cloneable, thread-safe handle for recording raw input events.
///
/// Recording never blocks. Events recorded after the owning aggregator has
/// been dropped are discarded.
#[derive(Debug, Clone)]
pub struct InputRecorder {
    publisher: EventPublisher<RawInputEvent>,
}

impl InputRecorder {
    /// Appends a raw event to the current tick window.
    ///
    /// The source is the one carried by the event, see
    /// [`RawInputEvent::source`].
    pub fn record_event(&self, event: RawInputEvent) {
        log::trace!("Recording {:?} event.", event.source());
        self.publisher.publish(event);
    }

    /// Records a key press. Repeats must use [`Self::record_event`].
    pub fn key_down(&self, code: impl Into<String>) {
        self.record_event(RawInputEvent::Key(KeyEvent::down(code)));
    }

    /// Records a key release.
    pub fn key_up(&self, code: impl Into<String>) {
        self.record_event(RawInputEvent::Key(KeyEvent::up(code)));
    }

    /// Records a pointer event.
    pub fn pointer(&self, event: PointerEvent) {
        self.record_event(RawInputEvent::Pointer(event));
    }

    /// Records the result of polling gamepad `index`.
    pub fn gamepad(&self, event: GamepadEvent) {
        self.record_event(RawInputEvent::Gamepad(event));
    }

    /// Records a virtual joystick event.
    pub fn virtual_stick(&self, event: VirtualStickEvent) {
        self.record_event(RawInputEvent::VirtualStick(event));
    }

    /// Returns `true` once the aggregator has been dropped.
    pub fn is_detached(&self) -> bool {
        self.publisher.is_disconnected()
    }
}

/// Folds raw events into one [`InputSnapshot`] per simulation tick.
///
/// Each source keeps its own pressed state. At a tick boundary the sources
/// are OR-merged per logical button and edges are computed against the merged
/// result, never per source.
#[derive(Debug)]
pub struct InputAggregator {
    config: InputConfig,
    events: EventBus<RawInputEvent>,
    /// Physical codes currently down, with the binding resolved at key-down.
    keys: BTreeMap<String, Option<LogicalButton>>,
    pointer: PointerState,
    gamepads: GamepadTracker,
    stick: VirtualStick,
    edges: EdgeDetector,
    touched: ButtonMask,
    tick: u64,
}

impl InputAggregator {
    /// Creates an aggregator using `config` for bindings and deadzone.
    pub fn new(config: InputConfig) -> Self {
        let gamepads = GamepadTracker::new(config.deadzone, config.mapping.stick_axes);
        Self {
            config,
            events: EventBus::new(),
            keys: BTreeMap::new(),
            pointer: PointerState::default(),
            gamepads,
            stick: VirtualStick::default(),
            edges: EdgeDetector::default(),
            touched: [false; LogicalButton::COUNT],
            tick: 0,
        }
    }

    /// Returns a new recording handle.
    pub fn recorder(&self) -> InputRecorder {
        InputRecorder {
            publisher: self.events.publisher(),
        }
    }

    /// Records an event directly, without going through a recorder.
    pub fn record_event(&self, event: RawInputEvent) {
        self.events.publisher().publish(event);
    }

    /// The configuration in use.
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Number of the last snapshot produced, `0` before the first drain.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of raw events waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.events.pending()
    }

    /// Gamepad state as of the last drain.
    pub fn gamepads(&self) -> &GamepadTracker {
        &self.gamepads
    }

    /// Consumes everything recorded since the previous call and produces the
    /// snapshot for the next tick.
    pub fn drain_tick(&mut self) -> InputSnapshot {
        let events = self.events.drain();
        let count = events.len();
        for event in events {
            self.apply(event);
        }

        let held = self.merged();
        let touched = std::mem::replace(&mut self.touched, [false; LogicalButton::COUNT]);
        let buttons = self.edges.fold(&held, &touched);
        let axes = self.merged_axes();

        let pointer = PointerState {
            samples: std::mem::take(&mut self.pointer.samples),
            ..self.pointer.clone()
        };
        self.pointer.wheel = (0.0, 0.0);

        self.tick += 1;
        log::trace!("Input tick {} folded {count} raw events.", self.tick);
        InputSnapshot::new(self.tick, buttons, pointer, axes)
    }

    fn apply(&mut self, event: RawInputEvent) {
        match event {
            RawInputEvent::Key(key) => self.apply_key(key),
            RawInputEvent::Pointer(pointer) => self.apply_pointer(pointer),
            RawInputEvent::Gamepad(gamepad) => self.apply_gamepad(gamepad),
            RawInputEvent::VirtualStick(stick) => {
                if let Some(direction) = self.stick.apply(&stick) {
                    self.touch(direction.button());
                }
            }
        }
    }

    fn apply_key(&mut self, event: KeyEvent) {
        if event.repeat {
            return;
        }
        if event.pressed {
            let binding = self.key_binding(&event);
            if let Some(button) = binding {
                self.touch(button);
            }
            self.keys.insert(event.code, binding);
        } else {
            self.keys.remove(&event.code);
        }
    }

    fn key_binding(&self, event: &KeyEvent) -> Option<LogicalButton> {
        let mapping = &self.config.mapping;
        mapping.key(&event.code).or_else(|| mapping.key(&event.key))
    }

    fn apply_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved {
                x,
                y,
                device,
                coalesced,
            } => {
                if !self.move_pointer(x, y) {
                    return;
                }
                self.pointer.device = Some(device);
                if coalesced.is_empty() {
                    self.pointer.samples.push(PointerSample { x, y });
                } else {
                    self.pointer.samples.extend(
                        coalesced
                            .into_iter()
                            .filter(|sample| sample.x.is_finite() && sample.y.is_finite()),
                    );
                }
            }
            PointerEvent::Down {
                x,
                y,
                button,
                device,
            } => {
                if button >= POINTER_BUTTONS {
                    log::trace!("Ignoring pointer button {button}.");
                    return;
                }
                self.move_pointer(x, y);
                self.pointer.device = Some(device);
                self.pointer.buttons |= 1 << button;
                if let Some(logical) = self.config.mapping.pointer_button(button) {
                    self.touch(logical);
                }
            }
            PointerEvent::Up {
                x,
                y,
                button,
                device,
            } => {
                if button >= POINTER_BUTTONS {
                    return;
                }
                self.move_pointer(x, y);
                self.pointer.device = Some(device);
                self.pointer.buttons &= !(1 << button);
            }
            PointerEvent::Wheel { delta_x, delta_y } => {
                if delta_x.is_finite() && delta_y.is_finite() {
                    self.pointer.wheel.0 += delta_x;
                    self.pointer.wheel.1 += delta_y;
                }
            }
        }
    }

    fn move_pointer(&mut self, x: f32, y: f32) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            log::trace!("Ignoring pointer position ({x}, {y}).");
            return false;
        }
        self.pointer.x = x;
        self.pointer.y = y;
        true
    }

    fn apply_gamepad(&mut self, event: GamepadEvent) {
        match event {
            GamepadEvent::Connected { index, state } => self.gamepads.connect(index, &state),
            GamepadEvent::Disconnected { index } => {
                self.gamepads.disconnect(index);
            }
            GamepadEvent::Polled { index, state } => {
                for edge in self.gamepads.poll(index, &state) {
                    if !edge.pressed {
                        continue;
                    }
                    if let Some(button) = self.pad_binding(edge.input) {
                        self.touch(button);
                    }
                }
            }
        }
    }

    fn pad_binding(&self, input: PadInput) -> Option<LogicalButton> {
        match input {
            PadInput::Button(index) => self.config.mapping.gamepad_button(index),
            PadInput::Stick(direction) => Some(direction.button()),
        }
    }

    fn touch(&mut self, button: LogicalButton) {
        self.touched[button.index()] = true;
    }

    fn merged(&self) -> ButtonMask {
        let mut held = [false; LogicalButton::COUNT];
        let mut press = |button: Option<LogicalButton>| {
            if let Some(button) = button {
                held[button.index()] = true;
            }
        };

        for binding in self.keys.values() {
            press(*binding);
        }
        for bit in 0..POINTER_BUTTONS {
            if self.pointer.is_down(bit) {
                press(self.config.mapping.pointer_button(bit));
            }
        }
        for index in self.gamepads.connected() {
            for input in self.gamepads.held(index) {
                press(self.pad_binding(input));
            }
        }
        press(self.stick.direction().map(StickDirection::button));
        held
    }

    fn merged_axes(&self) -> AnalogAxes {
        let mut candidates = vec![self.stick.vector()];
        for index in self.gamepads.connected() {
            if let Some((x, y)) = self.gamepads.stick(index) {
                candidates.push((
                    self.config.apply_deadzone(x),
                    self.config.apply_deadzone(y),
                ));
            }
        }

        let pick = |values: &mut dyn Iterator<Item = f32>| {
            values.fold(0.0_f32, |best, value| {
                if value.abs() > best.abs() {
                    value
                } else {
                    best
                }
            })
        };
        AnalogAxes {
            x: pick(&mut candidates.iter().map(|c| c.0)),
            y: pick(&mut candidates.iter().map(|c| c.1)),
        }
    }
}

impl Default for InputAggregator {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_core::input::{ButtonState, GamepadState, PointerDevice};

    #[test]
    fn key_press_produces_edges_over_ticks() {
        let mut aggregator = InputAggregator::default();
        let recorder = aggregator.recorder();

        recorder.key_down("ArrowUp");
        let first = aggregator.drain_tick();
        assert_eq!(first.tick(), 1);
        assert!(first.just_pressed(LogicalButton::Up));

        assert_eq!(aggregator.drain_tick().button(LogicalButton::Up), ButtonState::Held);

        recorder.key_up("ArrowUp");
        assert!(aggregator.drain_tick().just_released(LogicalButton::Up));
        assert_eq!(
            aggregator.drain_tick().button(LogicalButton::Up),
            ButtonState::Released
        );
    }

    #[test]
    fn key_repeat_is_ignored() {
        let mut aggregator = InputAggregator::default();
        aggregator.record_event(RawInputEvent::Key(KeyEvent {
            repeat: true,
            ..KeyEvent::down("KeyZ")
        }));
        assert_eq!(
            aggregator.drain_tick().button(LogicalButton::A),
            ButtonState::Released
        );
    }

    #[test]
    fn key_bound_by_layout_identifier_stays_held() {
        let mut config = InputConfig::default();
        config.mapping.keys.insert("q".to_string(), LogicalButton::Select);
        let mut aggregator = InputAggregator::new(config);
        aggregator.record_event(RawInputEvent::Key(KeyEvent {
            key: "q".to_string(),
            code: "KeyQ".to_string(),
            pressed: true,
            repeat: false,
        }));

        assert!(aggregator.drain_tick().just_pressed(LogicalButton::Select));
        assert_eq!(
            aggregator.drain_tick().button(LogicalButton::Select),
            ButtonState::Held
        );

        aggregator.record_event(RawInputEvent::Key(KeyEvent {
            key: "q".to_string(),
            code: "KeyQ".to_string(),
            pressed: false,
            repeat: false,
        }));
        assert!(aggregator.drain_tick().just_released(LogicalButton::Select));
    }

    #[test]
    fn unmapped_key_is_ignored() {
        let mut aggregator = InputAggregator::default();
        aggregator.record_event(RawInputEvent::Key(KeyEvent::down("F13")));
        let snapshot = aggregator.drain_tick();
        assert!(LogicalButton::ALL.iter().all(|b| !snapshot.pressed(*b)));
    }

    #[test]
    fn pointer_samples_reset_each_tick() {
        let mut aggregator = InputAggregator::default();
        let recorder = aggregator.recorder();
        recorder.pointer(PointerEvent::Moved {
            x: 10.0,
            y: 20.0,
            device: PointerDevice::Touch,
            coalesced: vec![
                PointerSample { x: 8.0, y: 18.0 },
                PointerSample { x: 10.0, y: 20.0 },
            ],
        });
        recorder.pointer(PointerEvent::Down {
            x: 10.0,
            y: 20.0,
            button: 0,
            device: PointerDevice::Touch,
        });
        recorder.pointer(PointerEvent::Wheel {
            delta_x: 0.0,
            delta_y: 3.0,
        });

        let snapshot = aggregator.drain_tick();
        let pointer = snapshot.pointer();
        assert_eq!(pointer.samples.len(), 2);
        assert!(pointer.is_down(0));
        assert_eq!(pointer.device, Some(PointerDevice::Touch));
        assert_eq!(pointer.wheel, (0.0, 3.0));

        let next = aggregator.drain_tick();
        assert!(next.pointer().samples.is_empty());
        assert_eq!(next.pointer().wheel, (0.0, 0.0));
        assert_eq!((next.pointer().x, next.pointer().y), (10.0, 20.0));
        assert!(next.pointer().is_down(0));
    }

    #[test]
    fn out_of_range_pointer_button_is_ignored() {
        let mut aggregator = InputAggregator::default();
        aggregator.record_event(RawInputEvent::Pointer(PointerEvent::Down {
            x: 1.0,
            y: 1.0,
            button: 40,
            device: PointerDevice::Mouse,
        }));
        assert_eq!(aggregator.drain_tick().pointer().buttons, 0);
    }

    #[test]
    fn stick_axes_pass_deadzone() {
        let mut aggregator = InputAggregator::default();
        let recorder = aggregator.recorder();
        let pad = GamepadState::neutral(16, 2);
        recorder.gamepad(GamepadEvent::Connected {
            index: 0,
            state: pad.clone(),
        });
        recorder.gamepad(GamepadEvent::Polled {
            index: 0,
            state: pad.clone().with_axis(0, 0.75).with_axis(1, 0.25),
        });

        let snapshot = aggregator.drain_tick();
        assert_eq!(snapshot.axes(), AnalogAxes { x: 0.5, y: 0.0 });
        assert!(snapshot.just_pressed(LogicalButton::Right));
        assert!(!snapshot.pressed(LogicalButton::Down));
    }

    #[test]
    fn virtual_stick_wins_axis_ties() {
        let mut aggregator = InputAggregator::default();
        let recorder = aggregator.recorder();
        recorder.virtual_stick(VirtualStickEvent::Moved { x: -1.0, y: 0.0 });
        recorder.gamepad(GamepadEvent::Polled {
            index: 0,
            state: GamepadState::neutral(16, 2),
        });
        recorder.gamepad(GamepadEvent::Polled {
            index: 0,
            state: GamepadState::neutral(16, 2).with_axis(0, 1.0),
        });
        assert_eq!(aggregator.drain_tick().axes().x, -1.0);
    }

    #[test]
    fn recording_after_drop_is_silent() {
        let aggregator = InputAggregator::default();
        let recorder = aggregator.recorder();
        drop(aggregator);
        assert!(recorder.is_detached());
        recorder.key_down("KeyZ");
    }
}
