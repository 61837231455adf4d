use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Clamped time since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,

    /// Exponentially smoothed ticks per second.
    pub fps: f32,
}

/// Produces `FrameTime` snapshots for one loop (render loop or simulation tick).
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// produce a pathological step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
    fps: f32,
    smoothing: f32,
}

impl FrameClock {
    /// Clock with a 0.1 ms .. 250 ms delta clamp.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
            fps: 0.0,
            smoothing: 0.1,
        }
    }

    /// Weight of the newest sample in the fps average, in `(0, 1]`.
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing.clamp(f32::EPSILON, 1.0);
        self
    }

    /// Resets the baseline, e.g. after the loop was suspended.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max)
            .as_secs_f32();
        self.last = now;

        let sample = 1.0 / dt;
        self.fps = if self.frame_index == 0 {
            sample
        } else {
            self.fps + (sample - self.fps) * self.smoothing
        };

        let ft = FrameTime { dt, now, frame_index: self.frame_index, fps: self.fps };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
