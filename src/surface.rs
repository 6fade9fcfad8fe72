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

//! Window-backed RGBA surfaces.
//!
//! Drawing happens in logical pixels. The GPU backend (`pixels`, wgpu)
//! scales its texture to the window; the CPU backend (`softbuffer`) keeps a
//! logical buffer and scales it by nearest neighbor when presenting.

use std::num::NonZeroU32;
use std::rc::Rc;

use ouroboros::self_referencing;
use pixels::{Pixels, SurfaceTexture};
use tracing::{info, warn};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::confetti::Bounds;
use crate::error::{Error, Result};

/// Convert physical pixels to logical pixels given a scale factor.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn physical_to_logical(physical: u32, scale_factor: f64) -> u32 {
    (f64::from(physical) / scale_factor) as u32
}

/// Logical bounds of a window's inner area.
pub fn logical_bounds(size: PhysicalSize<u32>, scale_factor: f64) -> Bounds {
    Bounds::new(
        physical_to_logical(size.width, scale_factor),
        physical_to_logical(size.height, scale_factor),
    )
}

/// GPU render context using ouroboros for safe self-referential struct.
/// Pixels borrows from Window, so they must be in the same struct.
#[self_referencing]
struct GpuSurface {
    window: Rc<Window>,
    bounds: Bounds,
    #[borrows(window)]
    #[covariant]
    pixels: Pixels<'this>,
}

/// CPU render context using softbuffer (no self-reference needed).
struct CpuSurface {
    window: Rc<Window>,
    bounds: Bounds,
    physical: PhysicalSize<u32>,
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    buffer: Vec<u8>, // RGBA, logical size
}

fn rgba_buffer(bounds: Bounds) -> Vec<u8> {
    vec![0u8; bounds.width as usize * bounds.height as usize * 4]
}

// softbuffer errors may carry non-Send sources, so only the message is kept.
fn cpu_error(err: softbuffer::SoftBufferError) -> Error {
    Error::Cpu(err.to_string())
}

fn non_zero(size: PhysicalSize<u32>) -> Option<(NonZeroU32, NonZeroU32)> {
    Some((NonZeroU32::new(size.width)?, NonZeroU32::new(size.height)?))
}

impl CpuSurface {
    fn new(window: Rc<Window>, bounds: Bounds, physical: PhysicalSize<u32>) -> Result<Self> {
        let context = softbuffer::Context::new(Rc::clone(&window)).map_err(cpu_error)?;
        let mut surface =
            softbuffer::Surface::new(&context, Rc::clone(&window)).map_err(cpu_error)?;
        if let Some((width, height)) = non_zero(physical) {
            surface.resize(width, height).map_err(cpu_error)?;
        }
        Ok(Self {
            window,
            bounds,
            physical,
            surface,
            buffer: rgba_buffer(bounds),
        })
    }

    fn resize(&mut self, physical: PhysicalSize<u32>, bounds: Bounds) -> Result<()> {
        if let Some((width, height)) = non_zero(physical) {
            self.surface.resize(width, height).map_err(cpu_error)?;
        }
        self.physical = physical;
        self.bounds = bounds;
        self.buffer = rgba_buffer(bounds);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if non_zero(self.physical).is_none() {
            return Ok(());
        }
        let mut sb_buffer = self.surface.buffer_mut().map_err(cpu_error)?;

        // Scale from logical to physical dimensions using nearest-neighbor
        let logical_width = self.bounds.width as usize;
        let logical_height = self.bounds.height as usize;
        let physical_width = self.physical.width as usize;
        let physical_height = self.physical.height as usize;

        for py in 0..physical_height {
            for px in 0..physical_width {
                let lx = px * logical_width / physical_width;
                let ly = py * logical_height / physical_height;

                let src_idx = (ly * logical_width + lx) * 4;
                let dst_idx = py * physical_width + px;

                if src_idx + 2 < self.buffer.len() {
                    let r = u32::from(self.buffer[src_idx]);
                    let g = u32::from(self.buffer[src_idx + 1]);
                    let b = u32::from(self.buffer[src_idx + 2]);
                    sb_buffer[dst_idx] = (r << 16) | (g << 8) | b;
                }
            }
        }

        sb_buffer.present().map_err(cpu_error)?;
        Ok(())
    }
}

fn try_create_gpu_surface(
    window: &Rc<Window>,
    bounds: Bounds,
    physical: PhysicalSize<u32>,
) -> Result<GpuSurface> {
    let surface = GpuSurfaceTryBuilder {
        window: Rc::clone(window),
        bounds,
        pixels_builder: |win: &Rc<Window>| {
            let surface_texture =
                SurfaceTexture::new(physical.width, physical.height, win.as_ref());
            Pixels::new(bounds.width, bounds.height, surface_texture)
        },
    }
    .try_build()?;
    Ok(surface)
}

enum Backend {
    Gpu(Box<GpuSurface>),
    Cpu(CpuSurface),
}

/// Render surface supporting both GPU and CPU backends.
pub struct RenderSurface {
    backend: Backend,
}

impl RenderSurface {
    /// Create a surface for `window`, trying the GPU first unless `force_cpu`
    /// is set.
    pub fn create(window: &Rc<Window>, bounds: Bounds, force_cpu: bool) -> Result<Self> {
        let physical = window.inner_size();
        let backend = if force_cpu {
            info!("Rendering: CPU (softbuffer) [forced]");
            Backend::Cpu(CpuSurface::new(Rc::clone(window), bounds, physical)?)
        } else {
            match try_create_gpu_surface(window, bounds, physical) {
                Ok(gpu) => {
                    info!("Rendering: GPU (pixels/wgpu)");
                    Backend::Gpu(Box::new(gpu))
                }
                Err(gpu_error) => {
                    warn!("GPU unavailable ({gpu_error}), using CPU rendering");
                    Backend::Cpu(CpuSurface::new(Rc::clone(window), bounds, physical)?)
                }
            }
        };
        Ok(Self { backend })
    }

    pub fn window(&self) -> &Window {
        match &self.backend {
            Backend::Gpu(gpu) => gpu.borrow_window(),
            Backend::Cpu(cpu) => &cpu.window,
        }
    }

    /// Logical size of the frame.
    pub fn bounds(&self) -> Bounds {
        match &self.backend {
            Backend::Gpu(gpu) => *gpu.borrow_bounds(),
            Backend::Cpu(cpu) => cpu.bounds,
        }
    }

    /// Call `f` with the RGBA frame.
    pub fn with_frame<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        match &mut self.backend {
            Backend::Gpu(gpu) => gpu.with_pixels_mut(|pixels| f(pixels.frame_mut())),
            Backend::Cpu(cpu) => f(cpu.buffer.as_mut_slice()),
        }
    }

    pub fn present(&mut self) -> Result<()> {
        match &mut self.backend {
            Backend::Gpu(gpu) => gpu.with_pixels_mut(|pixels| pixels.render())?,
            Backend::Cpu(cpu) => cpu.present()?,
        }
        Ok(())
    }

    /// Match the window's new size. The frame is reallocated at the new
    /// logical size and starts out blank.
    pub fn resize(&mut self, physical: PhysicalSize<u32>, bounds: Bounds) -> Result<()> {
        match &mut self.backend {
            Backend::Gpu(gpu) => {
                if non_zero(physical).is_none() || bounds.width == 0 || bounds.height == 0 {
                    return Ok(());
                }
                gpu.with_pixels_mut(|pixels| -> Result<()> {
                    pixels.resize_surface(physical.width, physical.height)?;
                    pixels.resize_buffer(bounds.width, bounds.height)?;
                    Ok(())
                })?;
                gpu.with_bounds_mut(|current| *current = bounds);
                Ok(())
            }
            Backend::Cpu(cpu) => cpu.resize(physical, bounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_size_divides_by_scale() {
        assert_eq!(physical_to_logical(2560, 2.0), 1280);
        assert_eq!(physical_to_logical(1920, 1.0), 1920);
        assert_eq!(physical_to_logical(1000, 1.5), 666);
        assert_eq!(
            logical_bounds(PhysicalSize::new(3000, 2000), 2.0),
            Bounds::new(1500, 1000)
        );
    }

    #[test]
    fn zero_sizes_are_not_resizable() {
        assert!(non_zero(PhysicalSize::new(0, 10)).is_none());
        assert!(non_zero(PhysicalSize::new(10, 0)).is_none());
        assert!(non_zero(PhysicalSize::new(10, 10)).is_some());
    }
}
