//! Frame-rate limiter with a leftover accumulator.

use log::debug;

/// Callbacks run for every admitted frame, in declaration order.
pub trait FrameHooks {
    /// Simulation work, before anything is drawn.
    fn before_tick(&mut self, elapsed_ms: f64);

    /// Drawing.
    fn tick(&mut self, elapsed_ms: f64);

    fn after_tick(&mut self, _elapsed_ms: f64) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunnerState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// Admits at most `fps` frames per second from a caller-owned loop.
///
/// The caller passes a monotonic timestamp in milliseconds to [`Runner::tick`]
/// as often as it likes. A frame runs once a full interval has elapsed since
/// the last one; the part of the elapsed time beyond a whole number of
/// intervals carries over so the average rate stays at `fps`.
#[derive(Debug, Clone, PartialEq)]
pub struct Runner {
    fps: f64,
    interval: f64,
    last_time: f64,
    last_over_time: f64,
    state: RunnerState,
}

impl Runner {
    /// A non-positive or non-finite `fps` falls back to 60.
    pub fn new(fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 60.0 };
        Self {
            fps,
            interval: 1000.0 / fps,
            last_time: 0.0,
            last_over_time: 0.0,
            state: RunnerState::Stopped,
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Milliseconds between frames.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunnerState::Running
    }

    /// Start, or resume, counting from `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.last_time = now_ms;
        self.last_over_time = 0.0;
        self.state = RunnerState::Running;
        debug!("runner started at {:.1} fps", self.fps);
    }

    /// Stop admitting frames. Everything else is kept.
    pub fn pause(&mut self) {
        if self.state == RunnerState::Running {
            self.state = RunnerState::Paused;
        }
    }

    pub fn stop(&mut self) {
        self.state = RunnerState::Stopped;
        self.last_over_time = 0.0;
    }

    /// Run `hooks` if a frame is due at `now_ms`.
    ///
    /// Returns the milliseconds elapsed since the previous frame when one ran.
    pub fn tick(&mut self, now_ms: f64, hooks: &mut impl FrameHooks) -> Option<f64> {
        if !self.is_running() {
            return None;
        }

        let elapsed = now_ms - self.last_time;
        if elapsed < self.interval {
            return None;
        }

        self.last_over_time = elapsed % self.interval;
        self.last_time = now_ms - self.last_over_time;

        hooks.before_tick(elapsed);
        hooks.tick(elapsed);
        hooks.after_tick(elapsed);
        Some(elapsed)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        frames: usize,
    }

    impl FrameHooks for Recorder {
        fn before_tick(&mut self, _elapsed_ms: f64) {
            self.calls.push("before");
        }

        fn tick(&mut self, _elapsed_ms: f64) {
            self.calls.push("tick");
            self.frames += 1;
        }

        fn after_tick(&mut self, _elapsed_ms: f64) {
            self.calls.push("after");
        }
    }

    #[test]
    fn test_interval_from_fps() {
        assert_eq!(Runner::new(50.0).interval(), 20.0);
        assert!((Runner::default().interval() - 1000.0 / 60.0).abs() < 1e-10);
        assert_eq!(Runner::new(0.0).fps(), 60.0);
        assert_eq!(Runner::new(f64::NAN).fps(), 60.0);
    }

    #[test]
    fn test_stopped_runner_admits_nothing() {
        let mut runner = Runner::new(50.0);
        let mut hooks = Recorder::default();
        assert_eq!(runner.tick(1000.0, &mut hooks), None);
        assert!(hooks.calls.is_empty());
    }

    #[test]
    fn test_hooks_run_in_order() {
        let mut runner = Runner::new(50.0);
        let mut hooks = Recorder::default();
        runner.start(0.0);

        assert_eq!(runner.tick(10.0, &mut hooks), None);
        assert_eq!(runner.tick(20.0, &mut hooks), Some(20.0));
        assert_eq!(hooks.calls, vec!["before", "tick", "after"]);
    }

    #[test]
    fn test_leftover_carries_forward() {
        let mut runner = Runner::new(50.0);
        let mut hooks = Recorder::default();
        runner.start(0.0);

        // 25ms elapsed: 5ms of it counts towards the next frame
        assert!(runner.tick(25.0, &mut hooks).is_some());
        assert_eq!(runner.tick(39.0, &mut hooks), None);
        assert_eq!(runner.tick(40.0, &mut hooks), Some(20.0));
        assert_eq!(hooks.frames, 2);
    }

    #[test]
    fn test_long_stall_runs_a_single_frame() {
        let mut runner = Runner::new(50.0);
        let mut hooks = Recorder::default();
        runner.start(0.0);

        assert_eq!(runner.tick(1010.0, &mut hooks), Some(1010.0));
        assert_eq!(hooks.frames, 1);
        assert_eq!(runner.tick(1019.0, &mut hooks), None);
        assert!(runner.tick(1020.0, &mut hooks).is_some());
    }

    #[test]
    fn test_average_rate_holds() {
        let mut runner = Runner::new(60.0);
        let mut hooks = Recorder::default();
        runner.start(0.0);

        // Poll every 7ms for one second
        let mut now = 0.0;
        while now <= 1000.0 {
            runner.tick(now, &mut hooks);
            now += 7.0;
        }
        assert!((55..=60).contains(&hooks.frames), "{} frames", hooks.frames);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut runner = Runner::new(50.0);
        let mut hooks = Recorder::default();
        runner.start(0.0);
        runner.pause();
        assert_eq!(runner.state(), RunnerState::Paused);
        assert_eq!(runner.tick(100.0, &mut hooks), None);

        runner.start(100.0);
        assert_eq!(runner.tick(119.0, &mut hooks), None);
        assert!(runner.tick(120.0, &mut hooks).is_some());

        runner.stop();
        runner.pause();
        assert_eq!(runner.state(), RunnerState::Stopped);
    }
}
