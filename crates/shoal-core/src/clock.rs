use instant::Instant;

/// Frame timing handed to every update, in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub elapsed_ms: f64,
    pub delta_ms: f32,
}

impl FrameTime {
    pub fn new(elapsed_ms: f64, delta_ms: f32) -> Self {
        Self {
            elapsed_ms,
            delta_ms,
        }
    }
}

/// Wall clock for hosts that do not supply their own frame times.
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    pub fn advance(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        FrameTime {
            elapsed_ms: (now - self.start).as_secs_f64() * 1000.0,
            delta_ms: dt.as_secs_f32() * 1000.0,
        }
    }
}

/// Fixed-step clock, for headless runs and tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedStep {
    step_ms: f32,
    elapsed_ms: f64,
}

impl FixedStep {
    pub fn new(step_ms: f32) -> Self {
        Self {
            step_ms,
            elapsed_ms: 0.0,
        }
    }

    pub fn advance(&mut self) -> FrameTime {
        self.elapsed_ms += self.step_ms as f64;
        FrameTime::new(self.elapsed_ms, self.step_ms)
    }
}
