// Copyright (c) 2026 James O. Schreckengast
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Deadline-based repeating timers.
//!
//! The event loop sleeps until the earliest deadline of the running timers
//! instead of polling, so every periodic activity is expressed as an
//! [`Interval`] that is asked whether it fired at a given instant.

use std::time::{Duration, Instant};

/// A repeating timer with a fixed period.
///
/// Ticks that were missed while the loop was busy or asleep are dropped
/// rather than replayed, so a stalled window never bursts to catch up.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    /// Create an interval whose first tick is one period after `start`.
    pub fn new(start: Instant, period: Duration) -> Self {
        Self {
            period,
            next: start + period,
        }
    }

    /// Create an interval ticking `per_second` times a second.
    pub fn per_second(start: Instant, per_second: u32) -> Self {
        Self::new(start, Duration::from_secs(1) / per_second.max(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Instant of the next tick.
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Returns true if a tick is due at `now`, and schedules the next one.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn does_not_fire_before_first_period() {
        let start = Instant::now();
        let mut interval = Interval::new(start, Duration::from_secs(1));
        assert!(!interval.fire(start));
        assert!(!interval.fire(start + Duration::from_millis(999)));
        assert!(interval.fire(start + Duration::from_secs(1)));
    }

    #[test]
    fn keeps_cadence_when_on_time() {
        let start = Instant::now();
        let mut interval = Interval::new(start, Duration::from_secs(1));
        assert!(interval.fire(start + Duration::from_millis(1_010)));
        assert_eq!(interval.deadline(), start + Duration::from_secs(2));
        assert!(!interval.fire(start + Duration::from_millis(1_500)));
        assert!(interval.fire(start + Duration::from_secs(2)));
    }

    #[test]
    fn skips_missed_ticks() {
        let start = Instant::now();
        let mut interval = Interval::new(start, Duration::from_secs(1));
        let late = start + Duration::from_millis(5_300);
        assert!(interval.fire(late));
        assert_eq!(interval.deadline(), late + Duration::from_secs(1));
        assert!(!interval.fire(late));
    }

    #[test]
    fn per_second_divides_one_second() {
        let start = Instant::now();
        assert_eq!(
            Interval::per_second(start, 4).period(),
            Duration::from_millis(250)
        );
        assert_eq!(
            Interval::per_second(start, 0).period(),
            Duration::from_secs(1)
        );
    }
}
