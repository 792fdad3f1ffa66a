/// Frame timing for the simulation
///
/// Wall-clock frame time is accumulated and consumed in fixed steps so the
/// session always advances by the same `dt`, no matter how fast frames arrive.
use std::time::{Duration, Instant};

/// Simulation rate (60 steps per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667);

/// Upper bound on steps per frame so a stall cannot snowball
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Fixed-step frame clock
#[derive(Debug)]
pub struct FrameClock {
    accumulator: Duration,
    last_frame_time: Instant,
    paused: bool,
    frame_count: u64,
    step_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Begin a frame using the wall clock; returns the number of fixed steps to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` of elapsed time; returns the number of fixed steps to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;
        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::warn!(
                "Frame took {:?}, dropping {:?} of simulation time",
                frame_time,
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        self.step_count += steps as u64;
        steps
    }

    /// Step length in seconds
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // No catch-up burst for the time spent paused
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Simulation resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.step_count(), 0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_fixed_timestep() {
        let clock = FrameClock::new();
        assert!((clock.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_short_frame_accumulates() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(Duration::from_millis(10)), 0);
        assert_eq!(clock.advance(Duration::from_millis(10)), 1);
        assert_eq!(clock.step_count(), 1);
    }

    #[test]
    fn test_two_steps() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(Duration::from_millis(34)), 2);
    }

    #[test]
    fn test_long_frame_capped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(Duration::from_millis(300)), MAX_STEPS_PER_FRAME);
        // Excess time was dropped
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_paused_no_steps() {
        let mut clock = FrameClock::new();
        clock.pause();
        assert_eq!(clock.advance(Duration::from_millis(100)), 0);
        assert_eq!(clock.frame_count(), 1);

        clock.resume();
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = FrameClock::new();
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_begin_frame_counts() {
        let mut clock = FrameClock::new();
        clock.begin_frame();
        clock.begin_frame();
        assert_eq!(clock.frame_count(), 2);
    }
}
