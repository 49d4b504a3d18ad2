use std::time::Instant;

/// Monotonic time source in microseconds.
pub trait Clock {
    fn now_micros(&self) -> i64;
}

/// [`Instant`]-backed clock counting from its creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_micros(&self) -> i64 {
        self.start.elapsed().as_micros() as i64
    }
}

/// Rate limiter for pointer samples.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    interval: i64,
    last: Option<i64>,
}

impl Throttle {
    pub fn new(interval_micros: i64) -> Self {
        Self {
            interval: interval_micros,
            last: None,
        }
    }

    /// Accepts `now` if at least one interval passed since the last accepted
    /// instant, recording it as the new reference.
    pub fn accept(&mut self, now: i64) -> bool {
        if self.last.is_some_and(|last| now - last < self.interval) {
            return false;
        }
        self.last = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
