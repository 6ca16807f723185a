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

use std::time::Duration;

use turbo_core::input::{InputSnapshot, LogicalButton};
use turbo_input::InputAggregator;
use turbo_runtime::{
    FrameClock, FrameReport, FrameScheduler, RenderContext, SchedulerState, Simulation,
    StepContext, StepError, TransientError,
};

/// Records every step and render, failing on request.
#[derive(Default)]
struct Script {
    steps: Vec<(u64, bool)>,
    renders: Vec<u64>,
    fatal_at: Option<u64>,
    recoverable_at: Option<u64>,
    render_fails: bool,
}

impl Simulation for Script {
    fn step(&mut self, ctx: &StepContext, input: &InputSnapshot) -> Result<(), StepError> {
        self.steps.push((ctx.tick, input.pressed(LogicalButton::A)));
        if self.fatal_at == Some(ctx.tick) {
            return Err(StepError::fatal("out of bounds"));
        }
        if self.recoverable_at == Some(ctx.tick) {
            return Err(StepError::recoverable("audio underrun"));
        }
        Ok(())
    }

    fn render(&mut self, ctx: &RenderContext) -> Result<(), TransientError> {
        if self.render_fails {
            return Err(TransientError::SurfaceLost);
        }
        self.renders.push(ctx.frame);
        Ok(())
    }
}

fn running(fps: u32, cap: u32) -> FrameScheduler {
    let mut scheduler = FrameScheduler::new(FrameClock::new(fps, cap).unwrap());
    scheduler.start().unwrap();
    scheduler
}

#[test]
fn identical_deltas_give_identical_runs() {
    let deltas: Vec<Duration> = [16_667_000u64, 15_900_000, 33_400_000, 1_000_000, 250_000_000, 0, 16_000_000]
        .into_iter()
        .map(Duration::from_nanos)
        .collect();

    let run = || {
        let mut scheduler = running(60, 5);
        let mut sim = Script::default();
        let mut input = InputAggregator::default();
        let reports: Vec<FrameReport> = deltas
            .iter()
            .map(|delta| scheduler.advance(*delta, &mut sim, &mut input))
            .collect();
        (reports, sim.steps)
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert!(first.0.iter().any(|r| r.capped));
}

#[test]
fn large_stall_is_capped_and_remainder_kept() {
    let mut scheduler = running(60, 5);
    let step = scheduler.clock().step_duration();
    let mut sim = Script::default();
    let mut input = InputAggregator::default();

    let report = scheduler.advance(step * 100, &mut sim, &mut input);
    assert_eq!(report.steps, 5);
    assert!(report.capped);
    assert!(report.rendered);
    assert_eq!(report.residual, step * 95);

    let report = scheduler.advance(Duration::ZERO, &mut sim, &mut input);
    assert_eq!(report.steps, 5);
    assert_eq!(report.residual, step * 90);
    assert_eq!(scheduler.stats().capped_callbacks, 2);
}

#[test]
fn fatal_step_stops_without_rendering() {
    let mut scheduler = running(10, 5);
    let mut sim = Script {
        fatal_at: Some(2),
        ..Script::default()
    };
    let mut input = InputAggregator::default();

    let report = scheduler.advance(Duration::from_millis(400), &mut sim, &mut input);
    assert_eq!(report.steps, 2);
    assert!(!report.rendered);
    assert!(sim.renders.is_empty());
    assert_eq!(scheduler.state(), SchedulerState::Stopped);

    let fault = scheduler.last_error().unwrap();
    assert_eq!(fault.tick, 2);
    assert_eq!(fault.reason, "out of bounds");

    let report = scheduler.advance(Duration::from_secs(1), &mut sim, &mut input);
    assert_eq!(report.steps, 0);
    assert_eq!(sim.steps.len(), 2);
}

#[test]
fn recoverable_step_keeps_running() {
    let mut scheduler = running(10, 5);
    let mut sim = Script {
        recoverable_at: Some(1),
        ..Script::default()
    };
    let mut input = InputAggregator::default();

    let report = scheduler.advance(Duration::from_millis(200), &mut sim, &mut input);
    assert_eq!(report.steps, 2);
    assert!(report.rendered);
    assert_eq!(scheduler.state(), SchedulerState::Running);
    assert_eq!(scheduler.stats().recoverable_errors, 1);
}

#[test]
fn render_failure_skips_frame_only() {
    let mut scheduler = running(10, 5);
    let mut sim = Script {
        render_fails: true,
        ..Script::default()
    };
    let mut input = InputAggregator::default();

    for _ in 0..3 {
        let report = scheduler.advance(Duration::from_millis(100), &mut sim, &mut input);
        assert_eq!(report.steps, 1);
        assert!(!report.rendered);
    }
    assert_eq!(scheduler.state(), SchedulerState::Running);
    assert_eq!(scheduler.stats().skipped_renders, 3);

    sim.render_fails = false;
    assert!(scheduler.advance(Duration::ZERO, &mut sim, &mut input).rendered);
    assert_eq!(sim.renders, vec![4]);
}

#[test]
fn render_happens_without_steps() {
    let mut scheduler = running(10, 5);
    let mut sim = Script::default();
    let mut input = InputAggregator::default();
    let report = scheduler.advance(Duration::from_millis(30), &mut sim, &mut input);
    assert_eq!(report.steps, 0);
    assert!(report.rendered);
    assert_eq!(report.residual, Duration::from_millis(30));
}

#[test]
fn pause_holds_time_and_skips_the_gap() {
    let mut scheduler = running(10, 5);
    let mut sim = Script::default();
    let mut input = InputAggregator::default();

    scheduler.on_frame(Duration::from_millis(1000), &mut sim, &mut input);
    scheduler.on_frame(Duration::from_millis(1150), &mut sim, &mut input);
    assert_eq!(sim.steps.len(), 1);
    assert_eq!(scheduler.clock().accumulated(), Duration::from_millis(50));

    scheduler.pause().unwrap();
    let report = scheduler.on_frame(Duration::from_millis(5000), &mut sim, &mut input);
    assert_eq!(report, FrameReport {
        residual: Duration::from_millis(50),
        ..FrameReport::default()
    });

    scheduler.resume().unwrap();
    let report = scheduler.on_frame(Duration::from_millis(9000), &mut sim, &mut input);
    assert_eq!(report.steps, 0);
    let report = scheduler.on_frame(Duration::from_millis(9050), &mut sim, &mut input);
    assert_eq!(report.steps, 1);
    assert_eq!(report.residual, Duration::ZERO);
}

#[test]
fn each_step_sees_its_own_snapshot() {
    let mut scheduler = running(10, 5);
    let mut sim = Script::default();
    let mut input = InputAggregator::default();
    let recorder = input.recorder();

    recorder.key_down("KeyZ");
    scheduler.advance(Duration::from_millis(200), &mut sim, &mut input);
    recorder.key_up("KeyZ");
    scheduler.advance(Duration::from_millis(100), &mut sim, &mut input);

    assert_eq!(sim.steps, vec![(1, true), (2, true), (3, false)]);
}
