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

//! On-screen joystick layer.
//!
//! The touch joystick reports a discrete direction whenever the thumb enters a
//! new quadrant, a continuous position while it moves, and an end event when it
//! is lifted. Directions drive the same logical buttons as the arrow keys.

use turbo_core::input::{StickDirection, VirtualStickEvent};

/// Current state of the virtual joystick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VirtualStick {
    direction: Option<StickDirection>,
    vector: (f32, f32),
}

impl VirtualStick {
    /// Applies one event. Returns the direction that became pressed, if any.
    pub fn apply(&mut self, event: &VirtualStickEvent) -> Option<StickDirection> {
        match *event {
            VirtualStickEvent::Direction(direction) => {
                let changed = self.direction != Some(direction);
                self.direction = Some(direction);
                changed.then_some(direction)
            }
            VirtualStickEvent::Moved { x, y } => {
                if x.is_nan() || y.is_nan() {
                    log::trace!("Ignoring virtual stick move with NaN coordinates.");
                } else {
                    self.vector = (x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
                }
                None
            }
            VirtualStickEvent::End => {
                self.direction = None;
                self.vector = (0.0, 0.0);
                None
            }
        }
    }

    /// The direction currently held, if any.
    pub fn direction(&self) -> Option<StickDirection> {
        self.direction
    }

    /// Stick displacement in `[-1, 1]` on both axes.
    pub fn vector(&self) -> (f32, f32) {
        self.vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_direction_replaces_previous() {
        let mut stick = VirtualStick::default();
        assert_eq!(
            stick.apply(&VirtualStickEvent::Direction(StickDirection::Up)),
            Some(StickDirection::Up)
        );
        assert_eq!(
            stick.apply(&VirtualStickEvent::Direction(StickDirection::Up)),
            None
        );
        stick.apply(&VirtualStickEvent::Direction(StickDirection::Left));
        assert_eq!(stick.direction(), Some(StickDirection::Left));
    }

    #[test]
    fn end_recentres() {
        let mut stick = VirtualStick::default();
        stick.apply(&VirtualStickEvent::Direction(StickDirection::Down));
        stick.apply(&VirtualStickEvent::Moved { x: 0.2, y: 3.0 });
        assert_eq!(stick.vector(), (0.2, 1.0));

        stick.apply(&VirtualStickEvent::End);
        assert_eq!(stick.direction(), None);
        assert_eq!(stick.vector(), (0.0, 0.0));
    }

    #[test]
    fn nan_move_is_ignored() {
        let mut stick = VirtualStick::default();
        stick.apply(&VirtualStickEvent::Moved { x: 0.5, y: 0.5 });
        stick.apply(&VirtualStickEvent::Moved { x: f32::NAN, y: 0.0 });
        assert_eq!(stick.vector(), (0.5, 0.5));
    }
}
