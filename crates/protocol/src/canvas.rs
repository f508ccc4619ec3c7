//! Canvas dimensions and the raw byte-stream decoder.

use serde::{Deserialize, Serialize};

use crate::{Color, DecodeError};

/// Canvas dimensions as reported by the service.
///
/// Wire form is `{"width": int, "height": int}`. Obtained once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells on the canvas.
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Expected byte length of the raw canvas stream (3 bytes per cell).
    pub fn stream_len(self) -> usize {
        self.area() * 3
    }
}

/// The full 2D grid of cell colors.
///
/// Built once per decode and returned by value; there is no shared mutable
/// canvas state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    size: CanvasSize,
    cells: Vec<Color>,
}

impl Canvas {
    /// Decode a canvas from the raw stream of 3-byte RGB groups.
    ///
    /// The stream is row-major with x fastest: the first triple is (0, 0),
    /// the next (1, 0), and the `width`-th triple starts row 1 at (0, 1).
    /// The stream length must be exactly `3 * width * height`; anything else
    /// is a [`DecodeError::CanvasLength`], never a truncated or padded
    /// canvas.
    pub fn from_bytes(size: CanvasSize, data: &[u8]) -> Result<Self, DecodeError> {
        let expected = size.stream_len();
        if data.len() != expected {
            return Err(DecodeError::CanvasLength {
                expected,
                actual: data.len(),
            });
        }
        let cells = data
            .chunks_exact(3)
            .map(|rgb| Color::new(rgb[0], rgb[1], rgb[2]))
            .collect();
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Color at (x, y), or `None` outside `[0, width) x [0, height)`.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(self.cells[y as usize * self.size.width as usize + x as usize])
    }

    /// Row-major view of all cells, x fastest.
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }
}
