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

//! Falling confetti.
//!
//! A fixed number of squares fall from above the visible area, spinning as
//! they go. A square that drops past the bottom edge is recycled in place
//! with fresh random attributes instead of being removed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Number of confetti pieces on screen.
pub const CONFETTI_COUNT: usize = 50;

/// Distance below the bottom edge at which a piece is recycled.
const RECYCLE_MARGIN: f64 = 50.0;

const MIN_SIZE: f64 = 5.0;
const MAX_SIZE: f64 = 15.0;
const MIN_FALL_SPEED: f64 = 2.0;
const MAX_FALL_SPEED: f64 = 5.0;
/// Rotation speed bound in degrees per frame, applied in both directions.
const MAX_SPIN: f64 = 5.0;

/// Pastel confetti colors (RGBA).
pub const PALETTE: [[u8; 4]; 4] = [
    [0xff, 0x99, 0x99, 0xff],
    [0x99, 0xcc, 0xff, 0xff],
    [0xcc, 0xff, 0xcc, 0xff],
    [0xff, 0xcc, 0x99, 0xff],
];

/// Logical size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One confetti piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Center position in logical pixels.
    pub x: f64,
    pub y: f64,
    /// Side length of the square.
    pub size: f64,
    /// Pixels fallen per frame.
    pub speed_y: f64,
    /// Degrees. Grows without wrapping.
    pub rotation: f64,
    /// Degrees per frame.
    pub rotation_speed: f64,
    pub color: [u8; 4],
}

impl Particle {
    /// A fresh piece somewhere above the visible area.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds) -> Self {
        let width = f64::from(bounds.width);
        let height = f64::from(bounds.height);
        Particle {
            x: rng.gen::<f64>() * width,
            y: (rng.gen::<f64>() - 1.0) * height,
            size: rng.gen_range(MIN_SIZE..MAX_SIZE),
            speed_y: rng.gen_range(MIN_FALL_SPEED..MAX_FALL_SPEED),
            rotation: rng.gen_range(0.0..360.0),
            rotation_speed: rng.gen_range(-MAX_SPIN..MAX_SPIN),
            color: PALETTE[rng.gen_range(0..PALETTE.len())],
        }
    }

    /// Reinitialize every attribute in place.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: Bounds) {
        *self = Self::random(rng, bounds);
    }

    /// Fall and spin by one frame. Returns true if the piece was recycled.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: Bounds) -> bool {
        self.y += self.speed_y;
        self.rotation += self.rotation_speed;
        if self.y > f64::from(bounds.height) + RECYCLE_MARGIN {
            self.reset(rng, bounds);
            return true;
        }
        false
    }

    pub fn angle_radians(&self) -> f64 {
        self.rotation.to_radians()
    }
}

/// The full set of confetti and the random source that recycles it.
pub struct Confetti<R = StdRng> {
    particles: [Particle; CONFETTI_COUNT],
    bounds: Bounds,
    rng: R,
}

impl Confetti<StdRng> {
    /// Seeded confetti is reproducible; `None` seeds from OS entropy.
    pub fn seeded(bounds: Bounds, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(bounds, rng)
    }
}

impl<R: Rng> Confetti<R> {
    pub fn with_rng(bounds: Bounds, mut rng: R) -> Self {
        let particles = std::array::from_fn(|_| Particle::random(&mut rng, bounds));
        Self {
            particles,
            bounds,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Advance every piece by one frame. Returns how many were recycled.
    pub fn advance(&mut self) -> usize {
        let mut recycled = 0;
        for particle in &mut self.particles {
            if particle.advance(&mut self.rng, self.bounds) {
                recycled += 1;
            }
        }
        recycled
    }

    /// Track a new surface size. Existing positions are left as they are and
    /// settle into the new bounds as pieces recycle.
    pub fn resize(&mut self, bounds: Bounds) {
        if bounds != self.bounds {
            debug!(
                "Confetti bounds {}x{} -> {}x{}",
                self.bounds.width, self.bounds.height, bounds.width, bounds.height
            );
            self.bounds = bounds;
        }
    }
}
