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

//! Software drawing into an RGBA frame of logical pixels.
//!
//! Every function here takes the frame as `&mut [u8]` together with its
//! width and height, so the same code paints the GPU texture and the CPU
//! fallback buffer.

use rusttype::{Font, Scale};

use crate::confetti::Particle;
use crate::error::{Error, Result};

/// Embedded font data (DejaVu Sans Bold, Bitstream Vera license).
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// Top-left color of the backdrop gradient (#fff0f5).
pub const BACKDROP_START: [u8; 4] = [0xff, 0xf0, 0xf5, 0xff];
/// Bottom-right color of the backdrop gradient (#e6f3ff).
pub const BACKDROP_END: [u8; 4] = [0xe6, 0xf3, 0xff, 0xff];

// Glyph pixels below this coverage are skipped.
const MIN_COVERAGE: f32 = 0.05;

/// Convert f64 to unsigned dimension, clamping negative values to 0.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coord_to_pixel_unsigned(v: f64) -> u32 {
    v.max(0.0) as u32
}

/// Convert f64 color component (0.0-255.0) to u8.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn color_component(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[inline]
fn pixel_index(x: u32, y: u32, width: u32) -> usize {
    (y as usize * width as usize + x as usize) * 4
}

fn lerp_color(from: [u8; 4], to: [u8; 4], t: f64) -> [u8; 4] {
    let mut out = [0u8; 4];
    for (channel, (a, b)) in out.iter_mut().zip(from.iter().zip(to.iter())) {
        *channel = color_component(f64::from(*a) + (f64::from(*b) - f64::from(*a)) * t);
    }
    out
}

/// Blend `color` over the pixel at `idx` with opacity `alpha` (0.0-1.0).
fn blend_pixel(frame: &mut [u8], idx: usize, color: [u8; 4], alpha: f64) {
    let alpha = alpha.clamp(0.0, 1.0);
    for channel in 0..3 {
        let dst = f64::from(frame[idx + channel]);
        let src = f64::from(color[channel]);
        frame[idx + channel] = color_component(src * alpha + dst * (1.0 - alpha));
    }
    frame[idx + 3] = 255;
}

/// Wipe the frame to transparent black.
pub fn clear(frame: &mut [u8]) {
    frame.fill(0);
}

/// Diagonal two-color gradient from the top-left to the bottom-right corner,
/// precomputed once per surface size.
pub struct Backdrop {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Backdrop {
    pub fn new(width: u32, height: u32) -> Self {
        let w = f64::from(width);
        let h = f64::from(height);
        let length_sq = w * w + h * h;
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        if width > 0 {
            for (i, pixel) in pixels.chunks_exact_mut(4).enumerate() {
                // Precision loss acceptable: pixel indices are far below 2^52
                #[allow(clippy::cast_precision_loss)]
                let (x, y) = ((i % width as usize) as f64, (i / width as usize) as f64);
                // Projection of the pixel center onto the gradient axis.
                let t = (((x + 0.5) * w + (y + 0.5) * h) / length_sq).clamp(0.0, 1.0);
                pixel.copy_from_slice(&lerp_color(BACKDROP_START, BACKDROP_END, t));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Copy the gradient into a frame of the same size. Frames of another
    /// size are left untouched.
    pub fn paint(&self, frame: &mut [u8]) {
        if frame.len() == self.pixels.len() {
            frame.copy_from_slice(&self.pixels);
        }
    }
}

/// Fill a square of side `size` centered at (`cx`, `cy`), rotated clockwise
/// by `angle` radians.
#[allow(clippy::too_many_arguments)]
pub fn fill_rotated_square(
    frame: &mut [u8],
    width: u32,
    height: u32,
    cx: f64,
    cy: f64,
    size: f64,
    angle: f64,
    color: [u8; 4],
) {
    let half = size / 2.0;
    let reach = half * std::f64::consts::SQRT_2;

    let min_x = coord_to_pixel_unsigned((cx - reach).floor());
    let max_x = coord_to_pixel_unsigned((cx + reach).ceil()).min(width);
    let min_y = coord_to_pixel_unsigned((cy - reach).floor());
    let max_y = coord_to_pixel_unsigned((cy + reach).ceil()).min(height);

    let (sin, cos) = angle.sin_cos();
    for y in min_y..max_y {
        for x in min_x..max_x {
            let dx = f64::from(x) + 0.5 - cx;
            let dy = f64::from(y) + 0.5 - cy;
            // Undo the rotation to test against the axis-aligned square.
            let u = dx * cos + dy * sin;
            let v = dy * cos - dx * sin;
            if u.abs() <= half && v.abs() <= half {
                let idx = pixel_index(x, y, width);
                frame[idx..idx + 4].copy_from_slice(&color);
            }
        }
    }
}

/// Render all confetti as rotated squares.
pub fn render_confetti(frame: &mut [u8], particles: &[Particle], width: u32, height: u32) {
    for particle in particles {
        fill_rotated_square(
            frame,
            width,
            height,
            particle.x,
            particle.y,
            particle.size,
            particle.angle_radians(),
            particle.color,
        );
    }
}

/// Blend an axis-aligned rectangle over the frame.
#[allow(clippy::too_many_arguments)]
pub fn fill_rect(
    frame: &mut [u8],
    width: u32,
    height: u32,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    color: [u8; 4],
    alpha: f64,
) {
    let min_x = coord_to_pixel_unsigned(left);
    let max_x = coord_to_pixel_unsigned(right).min(width);
    let min_y = coord_to_pixel_unsigned(top);
    let max_y = coord_to_pixel_unsigned(bottom).min(height);
    for y in min_y..max_y {
        for x in min_x..max_x {
            blend_pixel(frame, pixel_index(x, y, width), color, alpha);
        }
    }
}

/// Rasterizes text with the embedded font.
pub struct TextPainter {
    font: Font<'static>,
}

impl TextPainter {
    pub fn new() -> Result<Self> {
        let font = Font::try_from_bytes(FONT_DATA).ok_or(Error::Font)?;
        Ok(Self { font })
    }

    /// Advance width of `text` at `font_size` pixels.
    pub fn measure(&self, text: &str, font_size: f32) -> f32 {
        let scale = Scale::uniform(font_size);
        self.font
            .layout(text, scale, rusttype::point(0.0, 0.0))
            .last()
            .map_or(0.0, |g| {
                g.position().x + g.unpositioned().h_metrics().advance_width
            })
    }

    /// Draw `text` horizontally centered on `center_x` with its baseline at
    /// `baseline_y`, blended over the existing pixels.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_centered(
        &self,
        frame: &mut [u8],
        width: u32,
        height: u32,
        text: &str,
        font_size: f32,
        center_x: f32,
        baseline_y: f32,
        color: [u8; 4],
    ) {
        let scale = Scale::uniform(font_size);
        let start_x = center_x - self.measure(text, font_size) / 2.0;
        let glyphs = self
            .font
            .layout(text, scale, rusttype::point(start_x, baseline_y));

        for glyph in glyphs {
            let Some(bounding_box) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|glyph_x, glyph_y, coverage| {
                // Font library provides u32 glyph coords, bounding box has i32 positions
                #[allow(clippy::cast_possible_wrap)]
                let px = bounding_box.min.x + glyph_x as i32;
                #[allow(clippy::cast_possible_wrap)]
                let py = bounding_box.min.y + glyph_y as i32;

                #[allow(clippy::cast_sign_loss)]
                if px >= 0
                    && (px as u32) < width
                    && py >= 0
                    && (py as u32) < height
                    && coverage > MIN_COVERAGE
                {
                    let idx = pixel_index(px as u32, py as u32, width);
                    blend_pixel(frame, idx, color, f64::from(coverage));
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 100;
    const H: u32 = 80;

    fn blank() -> Vec<u8> {
        vec![0u8; (W * H * 4) as usize]
    }

    fn pixel(frame: &[u8], x: u32, y: u32) -> [u8; 4] {
        let idx = pixel_index(x, y, W);
        [frame[idx], frame[idx + 1], frame[idx + 2], frame[idx + 3]]
    }

    #[test]
    fn backdrop_runs_from_start_to_end_color() {
        let backdrop = Backdrop::new(W, H);
        let mut frame = blank();
        backdrop.paint(&mut frame);
        assert_eq!(pixel(&frame, 0, 0), BACKDROP_START);
        assert_eq!(pixel(&frame, W - 1, H - 1), BACKDROP_END);

        let middle = pixel(&frame, W / 2, H / 2);
        assert!(middle[0] < BACKDROP_START[0] && middle[0] > BACKDROP_END[0]);
        assert_eq!(middle[3], 255);
    }

    #[test]
    fn backdrop_of_other_size_is_ignored() {
        let backdrop = Backdrop::new(W / 2, H);
        let mut frame = blank();
        backdrop.paint(&mut frame);
        assert!(frame.iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_backdrop() {
        let backdrop = Backdrop::new(0, 0);
        assert_eq!((backdrop.width(), backdrop.height()), (0, 0));
        backdrop.paint(&mut []);
    }

    #[test]
    fn square_covers_its_center_only() {
        let mut frame = blank();
        let red = [255, 0, 0, 255];
        fill_rotated_square(&mut frame, W, H, 50.0, 40.0, 10.0, 0.0, red);
        assert_eq!(pixel(&frame, 49, 39), red);
        assert_eq!(pixel(&frame, 45, 35), red);
        assert_eq!(pixel(&frame, 55, 40), [0, 0, 0, 0]);
        assert_eq!(pixel(&frame, 10, 10), [0, 0, 0, 0]);
    }

    #[test]
    fn rotation_turns_corners_outward() {
        let red = [255, 0, 0, 255];
        let mut upright = blank();
        fill_rotated_square(&mut upright, W, H, 50.0, 40.0, 10.0, 0.0, red);
        let mut tilted = blank();
        fill_rotated_square(
            &mut tilted,
            W,
            H,
            50.0,
            40.0,
            10.0,
            std::f64::consts::FRAC_PI_4,
            red,
        );
        // 5.5px right of center: outside the upright square, inside the diamond.
        assert_eq!(pixel(&upright, 55, 39), [0, 0, 0, 0]);
        assert_eq!(pixel(&tilted, 55, 39), red);
        // Corner of the upright square falls outside the diamond.
        assert_eq!(pixel(&upright, 45, 35), red);
        assert_eq!(pixel(&tilted, 45, 35), [0, 0, 0, 0]);
    }

    #[test]
    fn offscreen_squares_are_clipped() {
        let mut frame = blank();
        let blue = [0, 0, 255, 255];
        fill_rotated_square(&mut frame, W, H, -30.0, -30.0, 14.0, 1.0, blue);
        fill_rotated_square(&mut frame, W, H, 500.0, 500.0, 14.0, 1.0, blue);
        assert!(frame.iter().all(|&b| b == 0));

        fill_rotated_square(&mut frame, W, H, 0.0, 0.0, 14.0, 0.0, blue);
        assert_eq!(pixel(&frame, 0, 0), blue);
    }

    #[test]
    fn translucent_rect_blends() {
        let mut frame = blank();
        fill_rect(&mut frame, W, H, 10.0, 10.0, 20.0, 20.0, [200, 100, 0, 255], 0.5);
        assert_eq!(pixel(&frame, 15, 15), [100, 50, 0, 255]);
        assert_eq!(pixel(&frame, 25, 15), [0, 0, 0, 0]);
    }

    #[test]
    fn text_is_centered_and_visible() {
        let painter = TextPainter::new().unwrap();
        assert!(painter.measure("1234", 20.0) > painter.measure("1", 20.0));
        assert_eq!(painter.measure("", 20.0), 0.0);

        let mut frame = blank();
        painter.draw_centered(&mut frame, W, H, "88", 30.0, 50.0, 50.0, [255, 255, 255, 255]);
        let lit: Vec<u32> = (0..W)
            .filter(|&x| (0..H).any(|y| pixel(&frame, x, y)[0] > 0))
            .collect();
        assert!(!lit.is_empty());
        let left = *lit.first().unwrap();
        let right = *lit.last().unwrap();
        assert!(left > 25 && right < 75, "text spans {left}..{right}");
    }
}
