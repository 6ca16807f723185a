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

//! The fixed-step frame scheduler.
//!
//! The host calls [`FrameScheduler::on_frame`] once per display refresh. While
//! running, the scheduler converts elapsed wall-clock time into a bounded
//! number of simulation steps, each fed one freshly drained input snapshot,
//! then asks the simulation to render once.

use std::time::Duration;

use turbo_core::input::InputSnapshot;
use turbo_input::InputAggregator;

use crate::clock::FrameClock;
use crate::error::{FatalError, SchedulerError, SchedulerState, StepError, TransientError};

/// Information handed to each simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepContext {
    /// Sequence number of this step, starting at 1.
    pub tick: u64,
    /// Simulated time covered by one step.
    pub step_duration: Duration,
}

/// Information handed to each render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    /// Sequence number of this render pass, starting at 1.
    pub frame: u64,
    /// Steps taken in the callback that precedes this render.
    pub steps: u32,
    /// Fraction of a step accumulated but not yet simulated.
    pub alpha: f64,
}

/// The game logic driven by the scheduler.
pub trait Simulation {
    /// Advances the simulation by exactly one fixed step.
    fn step(&mut self, ctx: &StepContext, input: &InputSnapshot) -> Result<(), StepError>;

    /// Draws the latest simulation state.
    fn render(&mut self, ctx: &RenderContext) -> Result<(), TransientError>;
}

/// What one host callback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Simulation steps executed.
    pub steps: u32,
    /// Whether the render pass completed.
    pub rendered: bool,
    /// Whether the step cap was hit with whole steps still owed.
    pub capped: bool,
    /// Accumulated time carried to the next callback.
    pub residual: Duration,
}

/// Running totals since the scheduler was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Callbacks processed while running.
    pub callbacks: u64,
    /// Simulation steps executed.
    pub steps: u64,
    /// Render passes that completed.
    pub rendered: u64,
    /// Render passes that failed and were skipped.
    pub skipped_renders: u64,
    /// Callbacks that hit the step cap.
    pub capped_callbacks: u64,
    /// Steps that reported a recoverable failure.
    pub recoverable_errors: u64,
}

/// Drives a [`Simulation`] at a fixed rate from irregular host callbacks.
#[derive(Debug)]
pub struct FrameScheduler {
    state: SchedulerState,
    clock: FrameClock,
    baseline: Option<Duration>,
    tick: u64,
    frame: u64,
    stats: FrameStats,
    last_error: Option<FatalError>,
}

impl FrameScheduler {
    /// Creates an idle scheduler around `clock`.
    pub fn new(clock: FrameClock) -> Self {
        Self {
            state: SchedulerState::Idle,
            clock,
            baseline: None,
            tick: 0,
            frame: 0,
            stats: FrameStats::default(),
            last_error: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// The underlying clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Counters since creation.
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Number of steps taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The fault that stopped the scheduler. `None` after a clean stop.
    pub fn last_error(&self) -> Option<&FatalError> {
        self.last_error.as_ref()
    }

    /// `Idle -> Running`.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        self.transition(SchedulerState::Idle, SchedulerState::Running)?;
        self.baseline = None;
        Ok(())
    }

    /// `Running -> Paused`. Accumulated time is held.
    pub fn pause(&mut self) -> Result<(), SchedulerError> {
        self.transition(SchedulerState::Running, SchedulerState::Paused)
    }

    /// `Paused -> Running`. The paused interval is not replayed.
    pub fn resume(&mut self) -> Result<(), SchedulerError> {
        self.transition(SchedulerState::Paused, SchedulerState::Running)?;
        self.baseline = None;
        Ok(())
    }

    /// Moves to the terminal `Stopped` state from any other state.
    pub fn stop(&mut self) -> Result<(), SchedulerError> {
        if self.state == SchedulerState::Stopped {
            return Err(SchedulerError::InvalidTransition {
                from: self.state,
                to: SchedulerState::Stopped,
            });
        }
        log::info!("Frame scheduler stopped after {} steps.", self.tick);
        self.state = SchedulerState::Stopped;
        Ok(())
    }

    /// Handles a host timing callback carrying a monotonic `timestamp`.
    ///
    /// The first callback after start or resume only establishes the
    /// baseline. A timestamp earlier than the previous one counts as no time.
    pub fn on_frame(
        &mut self,
        timestamp: Duration,
        simulation: &mut dyn Simulation,
        input: &mut InputAggregator,
    ) -> FrameReport {
        if self.state != SchedulerState::Running {
            return self.idle_report();
        }
        let delta = match self.baseline {
            Some(previous) => timestamp.saturating_sub(previous),
            None => Duration::ZERO,
        };
        self.baseline = Some(timestamp);
        self.advance(delta, simulation, input)
    }

    /// Handles a host callback that already knows the elapsed time.
    pub fn advance(
        &mut self,
        delta: Duration,
        simulation: &mut dyn Simulation,
        input: &mut InputAggregator,
    ) -> FrameReport {
        if self.state != SchedulerState::Running {
            return self.idle_report();
        }

        self.stats.callbacks += 1;
        self.clock.begin_callback(delta);
        let mut report = FrameReport::default();

        while self.clock.consume_step() {
            let snapshot = input.drain_tick();
            self.tick += 1;
            report.steps += 1;
            self.stats.steps += 1;

            let ctx = StepContext {
                tick: self.tick,
                step_duration: self.clock.step_duration(),
            };
            match simulation.step(&ctx, &snapshot) {
                Ok(()) => {}
                Err(StepError::Recoverable(reason)) => {
                    log::warn!("Step {} recovered from: {reason}", self.tick);
                    self.stats.recoverable_errors += 1;
                }
                Err(StepError::Fatal(reason)) => {
                    let fault = FatalError {
                        tick: self.tick,
                        reason,
                    };
                    log::error!("Stopping frame scheduler: {fault}");
                    self.last_error = Some(fault);
                    self.state = SchedulerState::Stopped;
                    report.residual = self.clock.accumulated();
                    return report;
                }
            }
        }

        report.capped = self.clock.is_behind();
        if report.capped {
            self.stats.capped_callbacks += 1;
            log::debug!(
                "Step cap of {} reached; carrying {:?}.",
                self.clock.max_steps_per_callback(),
                self.clock.accumulated()
            );
        }

        self.frame += 1;
        let ctx = RenderContext {
            frame: self.frame,
            steps: report.steps,
            alpha: self.clock.alpha(),
        };
        match simulation.render(&ctx) {
            Ok(()) => {
                report.rendered = true;
                self.stats.rendered += 1;
            }
            Err(e) => {
                log::error!("Rendering error: {e}");
                self.stats.skipped_renders += 1;
            }
        }

        report.residual = self.clock.accumulated();
        log::trace!(
            "Frame {}: {} steps, residual {:?}.",
            self.frame,
            report.steps,
            report.residual
        );
        report
    }

    fn idle_report(&self) -> FrameReport {
        FrameReport {
            residual: self.clock.accumulated(),
            ..FrameReport::default()
        }
    }

    fn transition(
        &mut self,
        from: SchedulerState,
        to: SchedulerState,
    ) -> Result<(), SchedulerError> {
        if self.state != from {
            return Err(SchedulerError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        log::info!("Frame scheduler {from} -> {to}.");
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        steps: Vec<u64>,
        renders: u64,
    }

    impl Simulation for Counter {
        fn step(&mut self, ctx: &StepContext, _input: &InputSnapshot) -> Result<(), StepError> {
            self.steps.push(ctx.tick);
            Ok(())
        }

        fn render(&mut self, _ctx: &RenderContext) -> Result<(), TransientError> {
            self.renders += 1;
            Ok(())
        }
    }

    fn running(fps: u32, cap: u32) -> FrameScheduler {
        let mut scheduler = FrameScheduler::new(FrameClock::new(fps, cap).unwrap());
        scheduler.start().unwrap();
        scheduler
    }

    #[test]
    fn lifecycle_transitions_are_checked() {
        let mut scheduler = FrameScheduler::new(FrameClock::new(60, 5).unwrap());
        assert_eq!(
            scheduler.pause(),
            Err(SchedulerError::InvalidTransition {
                from: SchedulerState::Idle,
                to: SchedulerState::Paused
            })
        );
        scheduler.start().unwrap();
        assert!(scheduler.start().is_err());
        scheduler.pause().unwrap();
        scheduler.resume().unwrap();
        scheduler.stop().unwrap();
        assert!(scheduler.stop().is_err());
        assert!(scheduler.resume().is_err());
        assert!(scheduler.last_error().is_none());
    }

    #[test]
    fn idle_scheduler_ignores_callbacks() {
        let mut scheduler = FrameScheduler::new(FrameClock::new(60, 5).unwrap());
        let mut sim = Counter::default();
        let mut input = InputAggregator::default();
        let report = scheduler.advance(Duration::from_secs(1), &mut sim, &mut input);
        assert_eq!(report, FrameReport::default());
        assert_eq!(sim.renders, 0);
    }

    #[test]
    fn first_timestamp_sets_baseline() {
        let mut scheduler = running(10, 5);
        let mut sim = Counter::default();
        let mut input = InputAggregator::default();

        let report = scheduler.on_frame(Duration::from_secs(100), &mut sim, &mut input);
        assert_eq!(report.steps, 0);
        assert!(report.rendered);

        let report = scheduler.on_frame(
            Duration::from_secs(100) + Duration::from_millis(200),
            &mut sim,
            &mut input,
        );
        assert_eq!(report.steps, 2);
        assert_eq!(sim.steps, vec![1, 2]);
    }

    #[test]
    fn backwards_timestamp_is_zero_delta() {
        let mut scheduler = running(10, 5);
        let mut sim = Counter::default();
        let mut input = InputAggregator::default();
        scheduler.on_frame(Duration::from_secs(5), &mut sim, &mut input);
        let report = scheduler.on_frame(Duration::from_secs(4), &mut sim, &mut input);
        assert_eq!(report.steps, 0);
        assert_eq!(report.residual, Duration::ZERO);
    }

    #[test]
    fn each_step_drains_one_snapshot() {
        let mut scheduler = running(10, 5);
        let mut sim = Counter::default();
        let mut input = InputAggregator::default();
        scheduler.advance(Duration::from_millis(300), &mut sim, &mut input);
        assert_eq!(input.tick(), 3);
        assert_eq!(scheduler.tick(), 3);
    }
}
