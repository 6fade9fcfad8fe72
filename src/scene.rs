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

//! The running celebration screen.
//!
//! A [`Scene`] owns everything that ticks: the one-second countdown timer,
//! the frame timer and the confetti it drives. It is created when the window
//! comes up and dropped when the window goes away, which stops both timers.

use std::time::Instant;

use tracing::{debug, info};

use crate::confetti::{Bounds, Confetti};
use crate::countdown::{Clock, Countdown, EventMoment, LocalClock, RemainingDuration};
use crate::draw::{self, Backdrop, TextPainter};
use crate::schedule::Interval;

/// Longest text the time entry accepts (`HH:MM`).
const ENTRY_MAX_LEN: usize = 5;

const INK: [u8; 4] = [0x5a, 0x3d, 0x5c, 0xff];
const ACCENT: [u8; 4] = [0xd6, 0x33, 0x84, 0xff];
const MUTED: [u8; 4] = [0x7a, 0x6a, 0x80, 0xff];
const CARD: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
const CARD_ALPHA: f64 = 0.7;

const HEADING: &str = "Countdown to Our Big Day";
const CELEBRATION: &str = "It's Our Celebration Day!";
const EDIT_HINT: &str = "Press T to change the event time";

/// Everything a scene needs to start.
#[derive(Debug, Clone)]
pub struct SceneSettings {
    pub title: String,
    pub event: EventMoment,
    pub seed: Option<u64>,
    pub frames_per_second: u32,
}

/// Keyboard input the scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Backspace,
    Enter,
    Escape,
}

/// What the caller should do after a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// State changed; redraw.
    Redraw,
    /// Leave the application.
    Quit,
    Ignored,
}

/// Text field for a new `HH:MM` time of day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeEntry {
    text: String,
}

impl TimeEntry {
    /// Append a digit or colon. Returns false if the character was refused.
    pub fn push(&mut self, ch: char) -> bool {
        if self.text.len() >= ENTRY_MAX_LEN || !(ch.is_ascii_digit() || ch == ':') {
            return false;
        }
        self.text.push(ch);
        true
    }

    pub fn pop(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

pub struct Scene<C: Clock = LocalClock> {
    title: String,
    countdown: Countdown<C>,
    frames: Interval,
    confetti: Confetti,
    backdrop: Backdrop,
    entry: Option<TimeEntry>,
    notice: Option<String>,
}

impl Scene<LocalClock> {
    pub fn start(settings: &SceneSettings, bounds: Bounds, now: Instant) -> Self {
        Self::start_with_clock(settings, LocalClock, bounds, now)
    }
}

impl<C: Clock> Scene<C> {
    pub fn start_with_clock(
        settings: &SceneSettings,
        clock: C,
        bounds: Bounds,
        now: Instant,
    ) -> Self {
        info!(
            "Scene started at {}x{}, {} fps",
            bounds.width, bounds.height, settings.frames_per_second
        );
        Self {
            title: settings.title.clone(),
            countdown: Countdown::start(clock, settings.event, now),
            frames: Interval::per_second(now, settings.frames_per_second),
            confetti: Confetti::seeded(bounds, settings.seed),
            backdrop: Backdrop::new(bounds.width, bounds.height),
            entry: None,
            notice: None,
        }
    }

    pub fn countdown(&self) -> &Countdown<C> {
        &self.countdown
    }

    pub fn confetti(&self) -> &Confetti {
        &self.confetti
    }

    pub fn entry(&self) -> Option<&TimeEntry> {
        self.entry.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Earliest instant at which [`Scene::poll`] has work to do.
    pub fn next_deadline(&self) -> Instant {
        self.countdown.deadline().min(self.frames.deadline())
    }

    /// Run whichever timers are due. Returns true if a redraw is needed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let ticked = self.countdown.poll(now);
        let framed = self.frames.fire(now);
        if framed {
            self.confetti.advance();
        }
        ticked || framed
    }

    /// Follow the surface to a new size.
    pub fn resize(&mut self, bounds: Bounds) {
        self.confetti.resize(bounds);
        if (self.backdrop.width(), self.backdrop.height()) != (bounds.width, bounds.height) {
            self.backdrop = Backdrop::new(bounds.width, bounds.height);
        }
    }

    pub fn handle_key(&mut self, key: Keystroke) -> KeyOutcome {
        match self.entry.as_mut() {
            None => match key {
                Keystroke::Char('t' | 'T') => {
                    debug!("Time entry opened");
                    self.entry = Some(TimeEntry::default());
                    self.notice = None;
                    KeyOutcome::Redraw
                }
                Keystroke::Escape | Keystroke::Char('q' | 'Q' | ' ') => KeyOutcome::Quit,
                _ => KeyOutcome::Ignored,
            },
            Some(entry) => match key {
                Keystroke::Char(ch) => {
                    if entry.push(ch) {
                        KeyOutcome::Redraw
                    } else {
                        KeyOutcome::Ignored
                    }
                }
                Keystroke::Backspace => {
                    if entry.pop() {
                        KeyOutcome::Redraw
                    } else {
                        KeyOutcome::Ignored
                    }
                }
                Keystroke::Escape => {
                    debug!("Time entry cancelled");
                    self.entry = None;
                    KeyOutcome::Redraw
                }
                Keystroke::Enter => {
                    let text = entry.text().to_string();
                    self.entry = None;
                    self.notice = self
                        .countdown
                        .set_time_of_day(&text)
                        .err()
                        .map(|err| err.to_string());
                    KeyOutcome::Redraw
                }
            },
        }
    }

    /// Paint the whole screen: backdrop, confetti, then the countdown panel.
    pub fn render(&self, frame: &mut [u8], width: u32, height: u32, painter: &TextPainter) {
        draw::clear(frame);
        self.backdrop.paint(frame);
        draw::render_confetti(frame, self.confetti.particles(), width, height);
        self.render_panel(frame, width, height, painter);
    }

    #[allow(clippy::cast_precision_loss)] // width/height fit in f32 mantissa for reasonable screens
    fn render_panel(&self, frame: &mut [u8], width: u32, height: u32, painter: &TextPainter) {
        let w = width as f32;
        let h = height as f32;
        let center = w / 2.0;
        // Font sizes follow the shorter side so portrait windows still fit.
        let unit = w.min(h * 1.6) / 100.0;

        let text = |frame: &mut [u8], s: &str, size: f32, x: f32, y: f32, color: [u8; 4]| {
            painter.draw_centered(frame, width, height, s, size, x, y, color);
        };

        text(frame, &self.title, unit * 6.0, center, h * 0.18, ACCENT);
        text(frame, HEADING, unit * 3.6, center, h * 0.30, INK);

        match self.countdown.remaining() {
            RemainingDuration::Remaining {
                days,
                hours,
                minutes,
                seconds,
            } => {
                let cards = [
                    (days, "Days"),
                    (hours, "Hours"),
                    (minutes, "Minutes"),
                    (seconds, "Seconds"),
                ];
                let half_card = f64::from(unit * 17.0) / 2.0;
                let top = f64::from(h * 0.38);
                let bottom = f64::from(h * 0.66);
                for (i, (value, label)) in cards.iter().enumerate() {
                    let cx = w * (0.2 + 0.2 * i as f32);
                    let left = f64::from(cx) - half_card;
                    let right = f64::from(cx) + half_card;
                    draw::fill_rect(
                        frame, width, height, left, top, right, bottom, CARD, CARD_ALPHA,
                    );
                    text(frame, &value.to_string(), unit * 8.0, cx, h * 0.54, ACCENT);
                    text(frame, label, unit * 2.6, cx, h * 0.62, INK);
                }
            }
            RemainingDuration::Elapsed => {
                text(frame, CELEBRATION, unit * 6.0, center, h * 0.54, ACCENT);
            }
        }

        let event = self.countdown.event();
        let event_line = format!(
            "Event Time: {} on {}",
            event.time_label(),
            event.date_label()
        );
        text(frame, &event_line, unit * 2.8, center, h * 0.78, INK);

        let footer = match (&self.entry, &self.notice) {
            (Some(entry), _) => format!(
                "New event time: {}_   (Enter to apply, Esc to cancel)",
                entry.text()
            ),
            (None, Some(notice)) => notice.clone(),
            (None, None) => EDIT_HINT.to_string(),
        };
        text(frame, &footer, unit * 2.2, center, h * 0.88, MUTED);
    }
}

impl<C: Clock> Drop for Scene<C> {
    fn drop(&mut self) {
        info!("Scene stopped, countdown and frame timers released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_accepts_digits_and_colon_only() {
        let mut entry = TimeEntry::default();
        for ch in "9a:3x0".chars() {
            entry.push(ch);
        }
        assert_eq!(entry.text(), "9:30");
    }

    #[test]
    fn entry_is_capped_at_five_characters() {
        let mut entry = TimeEntry::default();
        for ch in "12:345".chars() {
            entry.push(ch);
        }
        assert_eq!(entry.text(), "12:34");
        assert!(!entry.push('5'));
        assert!(entry.pop());
        assert_eq!(entry.text(), "12:3");
    }

    #[test]
    fn empty_entry_pop_is_noop() {
        let mut entry = TimeEntry::default();
        assert!(!entry.pop());
        assert_eq!(entry.text(), "");
    }
}
