// pacer.rs - Bounds the cycle rate to a maximum frames-per-second

use std::time::{Duration, Instant};

pub fn frame_interval(max_fps: f64) -> Duration {
    Duration::from_secs_f64(1.0 / max_fps)
}

pub struct Pacer {
    pub update_interval: Duration,
    pub last_update: Instant,
}

impl Pacer {
    pub fn new(max_fps: f64) -> Self {
        Self {
            update_interval: frame_interval(max_fps),
            last_update: Instant::now(),
        }
    }

    pub fn fps(&self) -> f64 {
        1.0 / self.update_interval.as_secs_f64()
    }

    pub fn set_fps(&mut self, fps: f64) {
        self.update_interval = frame_interval(fps);
    }

    /// True at most once per interval; arms the next interval when it fires.
    pub fn ready(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last_update) >= self.update_interval {
            self.last_update = now;
            true
        } else {
            false
        }
    }

    /// Time left until the next cycle is due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.update_interval
            .saturating_sub(now.duration_since(self.last_update))
    }
}
