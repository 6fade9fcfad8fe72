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

//! Celebration countdown over a falling confetti backdrop.
//!
//! The screen is made of two independent parts: a countdown recomputed every
//! second from the wall clock ([`countdown`]) and fifty confetti squares
//! advanced and redrawn every frame ([`confetti`], [`draw`]). A [`Scene`]
//! owns both timers for as long as the window is up.

pub mod config;
pub mod confetti;
pub mod countdown;
pub mod draw;
pub mod error;
pub mod scene;
pub mod schedule;
pub mod surface;

pub use config::Config;
pub use confetti::{Bounds, Confetti, Particle, CONFETTI_COUNT};
pub use countdown::{compute, Clock, Countdown, EventMoment, LocalClock, RemainingDuration};
pub use error::{Error, Result};
pub use scene::{KeyOutcome, Keystroke, Scene, SceneSettings};
