//! Frame clock with fixed-timestep accumulator

use std::time::Instant;

/// Longest wall-clock gap a single tick may contribute
const MAX_FRAME_DELTA: f64 = 0.25;

/// Tracks elapsed time and converts it into whole simulation steps.
///
/// Point motion is defined per step, so the host feeds wall-clock time in and
/// runs one panel update per consumed step.
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last tick in seconds
    pub delta_time: f64,
    /// Step interval (default: 1/60 second)
    pub fixed_timestep: f64,
    /// Accumulated time awaiting consumption
    accumulator: f64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            accumulator: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    /// Create a clock with the default 60Hz step
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock stepping at `hz`
    pub fn with_rate(hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / hz,
            ..Self::default()
        }
    }

    /// Advance from the wall clock. Call once per presented frame.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed);
    }

    /// Advance by an explicit amount of time (headless hosts and tests)
    pub fn advance(&mut self, seconds: f64) {
        // Clamp so a stalled host does not queue a burst of catch-up steps
        self.delta_time = seconds.clamp(0.0, MAX_FRAME_DELTA);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Returns true if there's enough accumulated time for a step
    pub fn should_step(&self) -> bool {
        self.accumulator >= self.fixed_timestep
    }

    /// Consume one step from the accumulator
    pub fn consume_step(&mut self) {
        self.accumulator -= self.fixed_timestep;
    }

    /// Drop whole steps still queued, keeping the partial remainder
    pub fn discard_backlog(&mut self) {
        self.accumulator %= self.fixed_timestep;
    }
}
