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

//! A simulation that only observes what it is fed.

use std::sync::{Arc, Mutex};

use turbo_core::input::{InputSnapshot, LogicalButton};
use turbo_runtime::{
    RenderContext, Simulation, StepContext, StepError, TransientError,
};

/// What the diagnostic simulation saw, shared with the player for reporting.
#[derive(Debug, Default, Clone)]
pub struct Observations {
    pub steps: u64,
    pub renders: u64,
    pub presses: Vec<(u64, LogicalButton)>,
    pub last_pointer: Option<(f32, f32)>,
}

/// Logs input edges and counts steps and renders.
pub struct DiagnosticSimulation {
    code_len: usize,
    render_every: u64,
    observations: Arc<Mutex<Observations>>,
}

impl DiagnosticSimulation {
    pub fn new(code_len: usize, render_every: u64, observations: Arc<Mutex<Observations>>) -> Self {
        Self {
            code_len,
            render_every: render_every.max(1),
            observations,
        }
    }
}

impl Simulation for DiagnosticSimulation {
    fn step(&mut self, ctx: &StepContext, input: &InputSnapshot) -> Result<(), StepError> {
        let mut seen = self
            .observations
            .lock()
            .map_err(|_| StepError::fatal("observation lock poisoned"))?;
        seen.steps += 1;
        for button in LogicalButton::ALL {
            if input.just_pressed(button) {
                log::info!("Tick {}: {button:?} pressed.", ctx.tick);
                seen.presses.push((ctx.tick, button));
            }
            if input.just_released(button) {
                log::info!("Tick {}: {button:?} released.", ctx.tick);
            }
        }
        if !input.pointer().samples.is_empty() {
            seen.last_pointer = Some((input.pointer().x, input.pointer().y));
        }
        Ok(())
    }

    fn render(&mut self, ctx: &RenderContext) -> Result<(), TransientError> {
        let mut seen = self
            .observations
            .lock()
            .map_err(|_| TransientError::Other("observation lock poisoned".into()))?;
        seen.renders += 1;
        if ctx.frame % self.render_every == 0 {
            log::debug!(
                "Frame {}: {} steps this callback, alpha {:.2}, {} bytes of code.",
                ctx.frame,
                ctx.steps,
                ctx.alpha,
                self.code_len
            );
        }
        Ok(())
    }
}
