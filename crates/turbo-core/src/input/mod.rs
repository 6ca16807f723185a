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

//! The engine-wide input vocabulary.
//!
//! Raw events describe what a host device reported; logical buttons and
//! snapshots describe what the simulation sees. Translation between the two
//! lives in `turbo-input`.

mod button;
mod event;
mod snapshot;

pub use self::button::{ButtonState, LogicalButton};
pub use self::event::{
    GamepadEvent, GamepadState, InputSource, KeyEvent, PointerDevice, PointerEvent,
    PointerSample, RawInputEvent, StickDirection, VirtualStickEvent,
};
pub use self::snapshot::{AnalogAxes, InputSnapshot, PointerState};
