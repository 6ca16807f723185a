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

//! Edge detection against the merged pressed state.

use turbo_core::input::{ButtonState, LogicalButton};

/// Per-button pressed flags, indexed by [`LogicalButton::index`].
pub(crate) type ButtonMask = [bool; LogicalButton::COUNT];

/// Remembers what the previous tick reported and derives the next states.
#[derive(Debug, Default)]
pub(crate) struct EdgeDetector {
    previous: ButtonMask,
}

impl EdgeDetector {
    /// Folds one tick worth of merged input into button states.
    ///
    /// `held` is the OR of every source at the end of the window. `touched`
    /// marks buttons some source pressed during the window, so a press and
    /// release between two ticks still reports `JustPressed` once, followed by
    /// `JustReleased` on the next tick.
    pub(crate) fn fold(
        &mut self,
        held: &ButtonMask,
        touched: &ButtonMask,
    ) -> [ButtonState; LogicalButton::COUNT] {
        let mut states = [ButtonState::Released; LogicalButton::COUNT];
        for slot in 0..LogicalButton::COUNT {
            let was = self.previous[slot];
            let now = held[slot] || (touched[slot] && !was);
            states[slot] = match (was, now) {
                (false, false) => ButtonState::Released,
                (false, true) => ButtonState::JustPressed,
                (true, true) => ButtonState::Held,
                (true, false) => ButtonState::JustReleased,
            };
            self.previous[slot] = now;
        }
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(buttons: &[LogicalButton]) -> ButtonMask {
        let mut mask = [false; LogicalButton::COUNT];
        for button in buttons {
            mask[button.index()] = true;
        }
        mask
    }

    #[test]
    fn press_hold_release_cycle() {
        let mut detector = EdgeDetector::default();
        let a = LogicalButton::A.index();
        let down = mask(&[LogicalButton::A]);
        let none = mask(&[]);

        assert_eq!(detector.fold(&down, &down)[a], ButtonState::JustPressed);
        assert_eq!(detector.fold(&down, &none)[a], ButtonState::Held);
        assert_eq!(detector.fold(&none, &none)[a], ButtonState::JustReleased);
        assert_eq!(detector.fold(&none, &none)[a], ButtonState::Released);
    }

    #[test]
    fn tap_inside_one_window_is_not_lost() {
        let mut detector = EdgeDetector::default();
        let b = LogicalButton::B.index();
        let none = mask(&[]);

        assert_eq!(
            detector.fold(&none, &mask(&[LogicalButton::B]))[b],
            ButtonState::JustPressed
        );
        assert_eq!(detector.fold(&none, &none)[b], ButtonState::JustReleased);
    }

    #[test]
    fn release_and_repress_while_held_stays_held() {
        let mut detector = EdgeDetector::default();
        let up = mask(&[LogicalButton::Up]);
        detector.fold(&up, &up);
        assert_eq!(
            detector.fold(&up, &up)[LogicalButton::Up.index()],
            ButtonState::Held
        );
    }
}
