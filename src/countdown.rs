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

//! Countdown to the event moment.
//!
//! The remaining time is a pure function of the event moment and the current
//! wall-clock time. [`Countdown`] recomputes it once per second.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::schedule::Interval;

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

/// Countdown refresh cadence.
pub const TICK: Duration = Duration::from_secs(1);

/// Source of the current local civil time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Parse a 24-hour `HH:MM` time of day.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| Error::InvalidTimeOfDay(input.to_string()))
}

/// Absolute date and time-of-day the countdown targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMoment {
    date: NaiveDate,
    time: NaiveTime,
}

impl EventMoment {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        // Only hour and minute are configurable.
        let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        Self { date, time }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Same date, new `HH:MM` time of day.
    pub fn with_time_of_day(&self, input: &str) -> Result<Self> {
        Ok(Self::new(self.date, parse_time_of_day(input)?))
    }

    /// Time of day as `HH:MM`.
    pub fn time_label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// Date as `September 29, 2025`.
    pub fn date_label(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

impl fmt::Display for EventMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time_label())
    }
}

/// Time left until the event, or `Elapsed` once it has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainingDuration {
    Remaining {
        days: u64,
        hours: u64,
        minutes: u64,
        seconds: u64,
    },
    Elapsed,
}

impl RemainingDuration {
    pub fn is_elapsed(&self) -> bool {
        matches!(self, RemainingDuration::Elapsed)
    }
}

/// Break the gap between `now` and the event into days/hours/minutes/seconds.
///
/// Each field is projected independently from the total millisecond
/// difference: `days` is not calendar-aware and `hours` wraps at 24.
pub fn compute(now: NaiveDateTime, event: &EventMoment) -> RemainingDuration {
    let diff = event.naive().signed_duration_since(now).num_milliseconds();
    if diff <= 0 {
        return RemainingDuration::Elapsed;
    }
    let diff = diff.unsigned_abs();
    RemainingDuration::Remaining {
        days: diff / MILLIS_PER_DAY,
        hours: (diff / MILLIS_PER_HOUR) % 24,
        minutes: (diff / MILLIS_PER_MINUTE) % 60,
        seconds: (diff / MILLIS_PER_SECOND) % 60,
    }
}

/// A running countdown: the event moment, a clock and a one-second timer.
pub struct Countdown<C: Clock = LocalClock> {
    clock: C,
    event: EventMoment,
    ticker: Interval,
    remaining: RemainingDuration,
}

impl<C: Clock> Countdown<C> {
    /// Compute the first value immediately and schedule the next tick.
    pub fn start(clock: C, event: EventMoment, now: Instant) -> Self {
        let remaining = compute(clock.now(), &event);
        info!("Countdown started for {event}: {remaining:?}");
        Self {
            clock,
            event,
            ticker: Interval::new(now, TICK),
            remaining,
        }
    }

    pub fn event(&self) -> &EventMoment {
        &self.event
    }

    pub fn remaining(&self) -> RemainingDuration {
        self.remaining
    }

    pub fn deadline(&self) -> Instant {
        self.ticker.deadline()
    }

    /// Recompute on a due tick. Returns true when the displayed value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.ticker.fire(now) {
            return false;
        }
        let next = compute(self.clock.now(), &self.event);
        if next == self.remaining {
            return false;
        }
        if next.is_elapsed() {
            info!("Countdown reached {}", self.event);
        }
        self.remaining = next;
        true
    }

    /// Replace the time of day. The new moment is used from the next tick on.
    pub fn set_time_of_day(&mut self, input: &str) -> Result<()> {
        match self.event.with_time_of_day(input) {
            Ok(event) => {
                info!("Event time changed from {} to {}", self.event, event);
                self.event = event;
                Ok(())
            }
            Err(err) => {
                warn!("Keeping event time {}: {err}", self.event.time_label());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn party() -> EventMoment {
        EventMoment::new(
            NaiveDate::from_ymd_opt(2025, 9, 29).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        )
    }

    struct FixedClock(Cell<NaiveDateTime>);

    impl Clock for &FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0.get()
        }
    }

    #[test]
    fn thirty_seconds_before_start() {
        assert_eq!(
            compute(at("2025-09-29T16:59:30"), &party()),
            RemainingDuration::Remaining {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 30
            }
        );
    }

    #[test]
    fn past_event_is_elapsed() {
        let yesterday = EventMoment::new(
            NaiveDate::from_ymd_opt(2025, 9, 28).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        );
        assert_eq!(
            compute(at("2025-09-29T00:00:00"), &yesterday),
            RemainingDuration::Elapsed
        );
    }

    #[test]
    fn exact_start_is_elapsed() {
        assert!(compute(at("2025-09-29T17:00:00"), &party()).is_elapsed());
    }

    #[test]
    fn sub_second_remainder_floors_to_zero() {
        let now = at("2025-09-29T16:59:59") + chrono::Duration::milliseconds(500);
        assert_eq!(
            compute(now, &party()),
            RemainingDuration::Remaining {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 0
            }
        );
    }

    #[test]
    fn multi_day_breakdown() {
        assert_eq!(
            compute(at("2025-09-25T14:27:10"), &party()),
            RemainingDuration::Remaining {
                days: 4,
                hours: 2,
                minutes: 32,
                seconds: 50
            }
        );
    }

    #[test]
    fn fields_stay_in_range() {
        let event = party();
        let mut now = at("2025-06-01T00:00:07");
        while now < event.naive() {
            match compute(now, &event) {
                RemainingDuration::Remaining {
                    hours,
                    minutes,
                    seconds,
                    ..
                } => {
                    assert!(hours < 24);
                    assert!(minutes < 60);
                    assert!(seconds < 60);
                }
                RemainingDuration::Elapsed => panic!("elapsed before {event} at {now}"),
            }
            now += chrono::Duration::seconds(7_919);
        }
    }

    #[test]
    fn compute_is_idempotent() {
        let now = at("2025-09-01T08:15:00");
        assert_eq!(compute(now, &party()), compute(now, &party()));
    }

    #[test]
    fn parses_time_of_day() {
        assert_eq!(
            parse_time_of_day("09:05").unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day(" 23:59 ").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_time_of_day() {
        for input in ["", "17", "24:00", "12:60", "ab:cd", "17:00:30", "17-00"] {
            assert!(
                matches!(parse_time_of_day(input), Err(Error::InvalidTimeOfDay(_))),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn labels() {
        let event = party();
        assert_eq!(event.time_label(), "17:00");
        assert_eq!(event.date_label(), "September 29, 2025");
        assert_eq!(event.to_string(), "2025-09-29 17:00");
    }

    #[test]
    fn new_drops_seconds() {
        let event = EventMoment::new(
            NaiveDate::from_ymd_opt(2025, 9, 29).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 42).unwrap(),
        );
        assert_eq!(event, party());
    }

    #[test]
    fn countdown_ticks_once_per_second() {
        let clock = FixedClock(Cell::new(at("2025-09-29T16:59:30")));
        let start = Instant::now();
        let mut countdown = Countdown::start(&clock, party(), start);

        clock.0.set(at("2025-09-29T16:59:31"));
        assert!(!countdown.poll(start + Duration::from_millis(500)));
        assert!(countdown.poll(start + TICK));
        assert_eq!(
            countdown.remaining(),
            RemainingDuration::Remaining {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 29
            }
        );
    }

    #[test]
    fn time_change_applies_on_next_tick() {
        let clock = FixedClock(Cell::new(at("2025-09-29T12:00:00")));
        let start = Instant::now();
        let mut countdown = Countdown::start(&clock, party(), start);
        assert!(!countdown.remaining().is_elapsed());

        countdown.set_time_of_day("09:00").unwrap();
        assert!(!countdown.remaining().is_elapsed());
        assert!(countdown.poll(start + TICK));
        assert!(countdown.remaining().is_elapsed());

        countdown.set_time_of_day("17:00").unwrap();
        assert!(countdown.poll(start + TICK * 2));
        assert!(!countdown.remaining().is_elapsed());
    }

    #[test]
    fn rejected_time_keeps_event() {
        let clock = FixedClock(Cell::new(at("2025-09-29T12:00:00")));
        let mut countdown = Countdown::start(&clock, party(), Instant::now());
        assert!(countdown.set_time_of_day("7pm").is_err());
        assert_eq!(countdown.event(), &party());
    }
}
