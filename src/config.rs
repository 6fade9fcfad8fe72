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

//! Command-line configuration.

use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use clap::Parser;

use crate::countdown::{parse_time_of_day, EventMoment};
use crate::scene::SceneSettings;

fn parse_time_arg(input: &str) -> Result<NaiveTime, String> {
    parse_time_of_day(input).map_err(|err| err.to_string())
}

/// Celebration countdown over falling confetti.
#[derive(Debug, Clone, Parser)]
#[command(name = "confetti-countdown", version, about)]
pub struct Config {
    /// Event date (YYYY-MM-DD)
    #[arg(long, env = "CONFETTI_EVENT_DATE", default_value = "2025-09-29")]
    pub date: NaiveDate,

    /// Event start time, 24-hour local time (HH:MM)
    #[arg(long, env = "CONFETTI_EVENT_TIME", default_value = "17:00", value_parser = parse_time_arg)]
    pub time: NaiveTime,

    /// Headline shown above the countdown
    #[arg(long, env = "CONFETTI_TITLE", default_value = "Welcome to My 1st Birthday!")]
    pub title: String,

    /// Seed for reproducible confetti
    #[arg(long, env = "CONFETTI_SEED")]
    pub seed: Option<u64>,

    /// Animation frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Window width in pixels; omit both sizes for fullscreen
    #[arg(long, requires = "height", value_parser = clap::value_parser!(u32).range(100..=7680))]
    pub width: Option<u32>,

    /// Window height in pixels
    #[arg(long, requires = "width", value_parser = clap::value_parser!(u32).range(100..=4320))]
    pub height: Option<u32>,

    /// Force CPU rendering (softbuffer) instead of GPU
    #[arg(long)]
    pub cpu: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn event(&self) -> EventMoment {
        EventMoment::new(self.date, self.time)
    }

    /// Fixed window size, or `None` for fullscreen.
    pub fn window_size(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            title: self.title.clone(),
            event: self.event(),
            seed: self.seed,
            frames_per_second: self.fps,
        }
    }
}
