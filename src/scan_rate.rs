//! Poll scan-rate instrumentation.
//!
//! Counts motion polls over rolling one-second windows. Only wired into the
//! driver with the `scan-rate` feature; it never influences sensor traffic.

/// Length of one measurement window in milliseconds.
pub const WINDOW_MS: u32 = 1_000;

/// Monotonic millisecond time source.
///
/// The counter is expected to wrap around at `u32::MAX`.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&mut self) -> u32;
}

/// Clock that never advances, used when no time source is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClock;

impl Clock for NoClock {
    fn now_ms(&mut self) -> u32 {
        0
    }
}

/// Reads-per-second counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanRate {
    count: u32,
    last_count: u32,
    window_start: u32,
}

impl ScanRate {
    /// Creates a counter whose first window opens at `now_ms`.
    pub const fn new(now_ms: u32) -> Self {
        Self {
            count: 0,
            last_count: 0,
            window_start: now_ms,
        }
    }

    /// Counts one poll and closes the window once it has lasted [`WINDOW_MS`].
    ///
    /// Returns the finished window's count when a window closes.
    pub fn record(&mut self, now_ms: u32) -> Option<u32> {
        self.count = self.count.wrapping_add(1);

        if now_ms.wrapping_sub(self.window_start) < WINDOW_MS {
            return None;
        }

        info!("pmw3360 scan frequency: {}", self.count);
        self.last_count = self.count;
        self.count = 0;
        self.window_start = now_ms;
        Some(self.last_count)
    }

    /// Polls counted in the most recently closed window.
    pub const fn last(&self) -> u32 {
        self.last_count
    }

    /// Polls counted so far in the open window.
    pub const fn pending(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_polls_of_a_full_window() {
        let mut rate = ScanRate::new(0);
        for t in 0..249u32 {
            assert_eq!(rate.record(t * 4), None);
        }
        assert_eq!(rate.last(), 0);

        assert_eq!(rate.record(1_000), Some(250));
        assert_eq!(rate.last(), 250);
        assert_eq!(rate.pending(), 0);

        rate.record(1_500);
        assert_eq!(rate.pending(), 1);
        assert_eq!(rate.last(), 250);
    }

    #[test]
    fn window_survives_timer_wraparound() {
        let start = u32::MAX - 400;
        let mut rate = ScanRate::new(start);
        assert_eq!(rate.record(start.wrapping_add(10)), None);
        assert_eq!(rate.record(start.wrapping_add(999)), None);
        assert_eq!(rate.record(start.wrapping_add(1_000)), Some(3));
    }
}
