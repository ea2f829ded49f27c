use std::time::Duration;

/// Recurring trigger for obstacle spawns, fed with elapsed frame time.
///
/// The frame loop advances it once per frame and turns every fire into a
/// spawn event in that frame's event queue. Tests drive it with synthetic
/// durations instead of a wall clock.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval: Duration,
    elapsed: Duration,
}

impl SpawnTimer {
    pub fn new(interval: Duration) -> Self {
        SpawnTimer {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Returns how many intervals completed during `dt`. Leftover time carries over.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}
