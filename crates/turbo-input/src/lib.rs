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

//! # Turbo Input
//!
//! The input aggregator. Host callbacks record raw events at any time through
//! an [`InputRecorder`]; once per simulation tick the scheduler calls
//! [`InputAggregator::drain_tick`], which folds everything recorded since the
//! previous tick into one immutable [`InputSnapshot`](turbo_core::input::InputSnapshot).
//!
//! Several physical inputs may drive the same logical button. Sources are
//! merged with a logical OR *before* edge detection, so overlapping presses
//! from two devices yield a single `JustPressed`.

#![warn(missing_docs)]

mod aggregator;
mod edges;
mod gamepad;
mod mapping;
mod virtual_stick;

pub use aggregator::{InputAggregator, InputRecorder};
pub use gamepad::{GamepadEdge, GamepadTracker, PadInput};
pub use mapping::{InputConfig, InputMapping, DEFAULT_DEADZONE};
pub use virtual_stick::VirtualStick;
