use std::collections::VecDeque;
use std::time::Instant;

/// Number of frame samples the FPS average is computed over
const FRAME_SAMPLES: usize = 60;

/// Wall-clock frame timer with a windowed FPS average.
#[derive(Debug)]
pub struct Timer {
    last_instant: Instant,
    delta_time: f32,
    frame_times: VecDeque<f32>,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a timer anchored at the current instant
    pub fn new() -> Self {
        Self {
            last_instant: Instant::now(),
            delta_time: 0.0,
            frame_times: VecDeque::with_capacity(FRAME_SAMPLES),
        }
    }

    /// Marks a frame boundary and records the elapsed time
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        if self.frame_times.len() == FRAME_SAMPLES {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(self.delta_time);
    }

    /// Seconds elapsed between the two most recent updates
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Frames per second averaged over the sample window
    pub fn average_fps(&self) -> f32 {
        let total: f32 = self.frame_times.iter().sum();
        if total > 0.0 {
            self.frame_times.len() as f32 / total
        } else {
            0.0
        }
    }

    /// Discards all samples and re-anchors the timer
    pub fn reset(&mut self) {
        self.last_instant = Instant::now();
        self.delta_time = 0.0;
        self.frame_times.clear();
    }
}
