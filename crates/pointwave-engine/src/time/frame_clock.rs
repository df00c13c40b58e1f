use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds (clamped).
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// One clock per render loop. The delta it reports is what the scene feeds to
/// the shader time uniform, so it is clamped to keep the animation from
/// jumping after the process was paused by a debugger or the window was
/// hidden.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline.
    ///
    /// Called when the window is re-shown so the first frame after a long
    /// pause does not report the whole pause as delta.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock to the current instant.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    ///
    /// Instants earlier than the previous tick count as a zero delta before
    /// clamping.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
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

    fn clock() -> FrameClock {
        FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(100))
    }

    #[test]
    fn frame_index_counts_ticks() {
        let mut c = clock();
        let base = Instant::now();
        assert_eq!(c.tick_at(base).frame_index, 0);
        assert_eq!(c.tick_at(base + Duration::from_millis(16)).frame_index, 1);
        assert_eq!(c.tick_at(base + Duration::from_millis(32)).frame_index, 2);
    }

    #[test]
    fn delta_within_clamps_is_reported_as_is() {
        let mut c = clock();
        let base = Instant::now();
        c.tick_at(base);
        let ft = c.tick_at(base + Duration::from_millis(20));
        assert!((ft.dt - 0.020).abs() < 1e-6);
    }

    #[test]
    fn zero_delta_is_raised_to_minimum() {
        let mut c = clock();
        let base = Instant::now();
        c.tick_at(base);
        let ft = c.tick_at(base);
        assert!((ft.dt - 0.001).abs() < 1e-6);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut c = clock();
        let base = Instant::now();
        c.tick_at(base);
        let ft = c.tick_at(base + Duration::from_secs(10));
        assert!((ft.dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn earlier_instant_does_not_go_negative() {
        let mut c = clock();
        let base = Instant::now() + Duration::from_secs(1);
        c.tick_at(base);
        let ft = c.tick_at(base - Duration::from_millis(500));
        assert!(ft.dt > 0.0);
    }
}
