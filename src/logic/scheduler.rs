//! Fixed-rate frame scheduler.
//!
//! Runs a step's init once, then calls its update at a fixed logical frame
//! rate against a monotonic clock. The elapsed-time check decides when a
//! frame runs; the sleep between checks only yields the processor.

use crate::models::constants::SCHEDULER_SLEEP_MS;
use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    /// Current time in seconds from an arbitrary origin.
    fn now(&self) -> f64;
    /// Yields the processor for roughly `duration`.
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `Instant`.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Deterministic clock for tests. Sleeping advances time; clones share it.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration.as_secs_f64());
    }
}

/// A unit of work paced by the scheduler.
pub trait FrameStep {
    /// Runs once before the first frame. An error aborts the step.
    fn init(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Runs one frame. `elapsed` is the time since the step started.
    /// Returns `true` once the step should stop.
    fn update(&mut self, elapsed: f64) -> bool;

    /// Runs on every loop iteration, before the pacing check.
    fn poll(&mut self) {}

    /// Runs right after each update.
    fn end_frame(&mut self) {}
}

pub struct FrameScheduler<C: Clock> {
    clock: C,
    frame_rate: f64,
    sleep: Duration,
}

impl<C: Clock> FrameScheduler<C> {
    pub fn new(clock: C, frame_rate: f64) -> Self {
        let frame_rate = if frame_rate.is_finite() && frame_rate >= 1.0 {
            frame_rate
        } else {
            log::warn!("LOGIC: Invalid frame rate {}, using 1 fps", frame_rate);
            1.0
        };
        Self {
            clock,
            frame_rate,
            sleep: Duration::from_millis(SCHEDULER_SLEEP_MS),
        }
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Minimum time between two updates, in seconds.
    pub fn frame_delay(&self) -> f64 {
        1.0 / self.frame_rate
    }

    /// Runs `step` until its update asks to stop.
    ///
    /// Returns the number of updates performed, or the init error.
    pub fn run<S: FrameStep + ?Sized>(&self, step: &mut S) -> Result<u64, String> {
        step.init()?;

        let delay = self.frame_delay();

        // The first frame always runs, without waiting for the clock.
        let mut should_stop = step.update(0.0);
        step.end_frame();
        let mut frames = 1;

        let start = self.clock.now();
        let mut previous_update = start;

        while !should_stop {
            step.poll();
            let now = self.clock.now();

            if now - previous_update >= delay {
                should_stop = step.update(now - start);
                step.end_frame();
                previous_update = now;
                frames += 1;
            }

            self.clock.sleep(self.sleep);
        }

        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the elapsed time of every update and stops after `limit` frames.
    struct Recorder {
        clock: ManualClock,
        limit: usize,
        elapsed: Vec<f64>,
        clock_at_update: Vec<f64>,
        polls: usize,
        end_frames: usize,
        init_result: Result<(), String>,
        update_cost: f64,
    }

    impl Recorder {
        fn new(clock: ManualClock, limit: usize) -> Self {
            Self {
                clock,
                limit,
                elapsed: Vec::new(),
                clock_at_update: Vec::new(),
                polls: 0,
                end_frames: 0,
                init_result: Ok(()),
                update_cost: 0.0,
            }
        }
    }

    impl FrameStep for Recorder {
        fn init(&mut self) -> Result<(), String> {
            self.init_result.clone()
        }

        fn update(&mut self, elapsed: f64) -> bool {
            self.elapsed.push(elapsed);
            self.clock_at_update.push(self.clock.now());
            self.clock.advance(self.update_cost);
            self.elapsed.len() >= self.limit
        }

        fn poll(&mut self) {
            self.polls += 1;
        }

        fn end_frame(&mut self) {
            self.end_frames += 1;
        }
    }

    #[test]
    fn test_first_frame_runs_immediately() {
        let clock = ManualClock::new();
        let scheduler = FrameScheduler::new(clock.clone(), 60.0);
        let mut step = Recorder::new(clock.clone(), 1);

        assert_eq!(scheduler.run(&mut step), Ok(1));
        assert_eq!(step.elapsed, vec![0.0]);
        assert_eq!(step.polls, 0);
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn test_init_failure_aborts_step() {
        let clock = ManualClock::new();
        let scheduler = FrameScheduler::new(clock.clone(), 60.0);
        let mut step = Recorder::new(clock, 10);
        step.init_result = Err("missing level".to_string());

        assert_eq!(scheduler.run(&mut step), Err("missing level".to_string()));
        assert!(step.elapsed.is_empty());
    }

    #[test]
    fn test_frames_are_paced_at_frame_rate() {
        let clock = ManualClock::new();
        let scheduler = FrameScheduler::new(clock.clone(), 60.0);
        let mut step = Recorder::new(clock, 30);

        assert_eq!(scheduler.run(&mut step), Ok(30));

        let delay = 1.0 / 60.0;
        let sleep = SCHEDULER_SLEEP_MS as f64 / 1000.0;
        for pair in step.clock_at_update[1..].windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap >= delay - 1e-9, "frames too close: {}", gap);
            assert!(gap <= delay + sleep + 1e-9, "frame dropped: {}", gap);
        }
        assert_eq!(step.end_frames, 30);
    }

    #[test]
    fn test_elapsed_is_measured_from_step_start() {
        let clock = ManualClock::new();
        clock.set(100.0);
        let scheduler = FrameScheduler::new(clock.clone(), 10.0);
        let mut step = Recorder::new(clock, 5);

        scheduler.run(&mut step).unwrap();

        assert_eq!(step.elapsed[0], 0.0);
        for (i, elapsed) in step.elapsed.iter().enumerate().skip(1) {
            assert!(*elapsed >= 0.1 * i as f64 - 1e-9);
            assert!(*elapsed < 0.1 * i as f64 + 0.01 * i as f64);
        }
    }

    #[test]
    fn test_slow_frame_is_not_replayed() {
        let clock = ManualClock::new();
        let scheduler = FrameScheduler::new(clock.clone(), 60.0);
        let mut step = Recorder::new(clock, 6);
        // Every update takes three frame intervals.
        step.update_cost = 3.0 / 60.0;

        scheduler.run(&mut step).unwrap();

        // One update per satisfied check, never a burst of catch-up frames.
        for pair in step.clock_at_update[1..].windows(2) {
            assert!(pair[1] - pair[0] >= 3.0 / 60.0 - 1e-9);
        }
        assert_eq!(step.elapsed.len(), 6);
    }

    #[test]
    fn test_poll_runs_between_frames() {
        let clock = ManualClock::new();
        let scheduler = FrameScheduler::new(clock.clone(), 100.0);
        let mut step = Recorder::new(clock, 3);

        scheduler.run(&mut step).unwrap();

        // 10 ms frames with 1 ms sleeps: several polls per frame.
        assert!(step.polls >= 2 * 9);
    }

    #[test]
    fn test_invalid_frame_rate_is_clamped() {
        let scheduler = FrameScheduler::new(ManualClock::new(), 0.0);
        assert_eq!(scheduler.frame_rate(), 1.0);
        let scheduler = FrameScheduler::new(ManualClock::new(), f64::NAN);
        assert_eq!(scheduler.frame_delay(), 1.0);
    }
}
