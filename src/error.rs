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

//! Crate-wide error type.

use thiserror::Error;

/// Errors raised while configuring or running the celebration screen.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid time of day `{0}`: expected HH:MM")]
    InvalidTimeOfDay(String),

    #[error("failed to load embedded font")]
    Font,

    #[error("requested size {requested_width}x{requested_height} exceeds display size {max_width}x{max_height}")]
    WindowTooLarge {
        requested_width: u32,
        requested_height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("GPU surface error: {0}")]
    Gpu(#[from] pixels::Error),

    #[error("GPU texture resize failed: {0}")]
    Texture(#[from] pixels::TextureError),

    #[error("CPU surface error: {0}")]
    Cpu(String),
}

pub type Result<T> = std::result::Result<T, Error>;
