//! Fixed-step updates and frame pacing

/// Accumulates frame time and hands out whole fixed steps.
///
/// If a frame takes so long that more than `max_steps` would be needed, the
/// excess is dropped so a slow frame cannot snowball into slower ones.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    max_steps: u32,
    accumulator: f64,
    total_steps: u64,
}

impl FixedTimestep {
    pub fn new(step: f64, max_steps: u32) -> Self {
        Self {
            step: step.max(1e-6),
            max_steps: max_steps.max(1),
            accumulator: 0.0,
            total_steps: 0,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Add a frame's elapsed time; returns how many updates to run now
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps && self.accumulator >= self.step {
            tracing::debug!(dropped = self.accumulator, "update falling behind, dropping time");
            self.accumulator %= self.step;
        }
        self.total_steps += steps as u64;
        steps
    }

    /// Fraction of a step left over, for interpolating the draw
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step) as f32
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Sleeps out the rest of the frame to hold a target frame rate
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    /// Target frame time in seconds (None = unlocked)
    frame_time: Option<f64>,
}

impl FrameLimiter {
    pub fn new(frame_time: Option<f64>) -> Self {
        Self { frame_time }
    }

    pub fn frame_time(&self) -> Option<f64> {
        self.frame_time
    }

    /// Time still to wait given how long the frame has taken so far
    pub fn remaining(&self, elapsed: f64) -> f64 {
        self.frame_time.map(|t| (t - elapsed).max(0.0)).unwrap_or(0.0)
    }

    /// Block until the frame that started at `frame_start` has lasted the
    /// target time. `now` reads the clock in seconds.
    pub fn wait(&self, frame_start: f64, now: impl Fn() -> f64) {
        let Some(target) = self.frame_time else { return };
        if self.remaining(now() - frame_start) <= 0.0 {
            return;
        }

        // Native: use sleep for bulk, then spin-wait for precision
        #[cfg(not(target_arch = "wasm32"))]
        {
            let spin_margin = 0.002;
            while now() - frame_start + spin_margin < target {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
            while now() - frame_start < target {
                std::hint::spin_loop();
            }
        }
        // WASM: the browser paces frames; blocking would only stall it
        #[cfg(target_arch = "wasm32")]
        {
            let _ = target;
        }
    }
}

/// Rolling frame-rate estimate
#[derive(Debug, Clone)]
pub struct FrameStats {
    frame_count: u64,
    elapsed: f64,
    samples: [f32; 32],
    cursor: usize,
    filled: usize,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_count: 0,
            elapsed: 0.0,
            samples: [0.0; 32],
            cursor: 0,
            filled: 0,
        }
    }
}

impl FrameStats {
    pub fn record(&mut self, frame_dt: f32) {
        self.frame_count += 1;
        self.elapsed += frame_dt as f64;
        self.samples[self.cursor] = frame_dt;
        self.cursor = (self.cursor + 1) % self.samples.len();
        self.filled = (self.filled + 1).min(self.samples.len());
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Seconds since the loop started
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn average_frame_time(&self) -> f32 {
        if self.filled == 0 {
            return 0.0;
        }
        self.samples[..self.filled].iter().sum::<f32>() / self.filled as f32
    }

    pub fn fps(&self) -> f32 {
        let avg = self.average_frame_time();
        if avg <= 0.0 { 0.0 } else { 1.0 / avg }
    }
}
