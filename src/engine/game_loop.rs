/// Match tick pacing
///
/// The match advances in fixed 60 Hz ticks no matter how often the window
/// redraws, so animation speed (counted in ticks) is the same on every display.
/// Each redraw asks `begin_frame` how many ticks to run before presenting.
use log::debug;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Simulation rate in ticks per second
const TICK_RATE: u64 = 60;
const TICK_DURATION: Duration = Duration::from_micros(1_000_000 / TICK_RATE);

/// Maximum ticks per redraw; a stall longer than this is dropped, not replayed
const MAX_TICKS_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Tick clock state
pub struct GameLoop {
    /// Time not yet consumed by whole ticks
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Recent frame durations for the FPS average
    frame_times: VecDeque<Duration>,

    /// Frames begun so far
    frame_count: u64,

    /// Ticks handed out so far
    tick_count: u64,

    /// Average redraw rate over the window
    current_fps: f32,
}

impl GameLoop {
    /// Create a new game loop starting now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: now,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            tick_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        self.begin_frame_at(Instant::now())
    }

    fn begin_frame_at(&mut self, now: Instant) -> u32 {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }
        if self.frame_count % FPS_WINDOW_SIZE as u64 == 0 {
            self.update_fps();
            debug!("{:.1} fps, {} ticks", self.current_fps, self.tick_count);
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= TICK_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= TICK_DURATION;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = self.accumulator.min(TICK_DURATION);
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Get current FPS
    #[cfg(test)]
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames begun
    #[cfg(test)]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of ticks handed out
    #[cfg(test)]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    fn update_fps(&mut self) {
        let total: Duration = self.frame_times.iter().sum();
        let avg = total.as_secs_f32() / self.frame_times.len().max(1) as f32;
        self.current_fps = if avg > 0.0 { 1.0 / avg } else { 0.0 };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
