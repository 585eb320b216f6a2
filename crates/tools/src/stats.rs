use std::collections::VecDeque;
use std::time::Duration;

/// Rolling frame-time window behind the FPS / ms readout.
#[derive(Debug, Clone)]
pub struct FrameStats {
    samples: VecDeque<Duration>,
    window: usize,
    total: Duration,
}

impl FrameStats {
    /// Keep the last `window` frame times (at least one).
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window),
            window,
            total: Duration::ZERO,
        }
    }

    pub fn record(&mut self, frame_time: Duration) {
        if self.samples.len() == self.window {
            if let Some(old) = self.samples.pop_front() {
                self.total -= old;
            }
        }
        self.samples.push_back(frame_time);
        self.total += frame_time;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean frame time in milliseconds over the window.
    pub fn frame_ms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.total.as_secs_f32() * 1000.0 / self.samples.len() as f32
    }

    pub fn fps(&self) -> f32 {
        let ms = self.frame_ms();
        if ms > 0.0 { 1000.0 / ms } else { 0.0 }
    }

    /// Slowest frame in the window, in milliseconds.
    pub fn worst_ms(&self) -> f32 {
        self.samples
            .iter()
            .max()
            .map_or(0.0, |d| d.as_secs_f32() * 1000.0)
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(60)
    }
}
