//! Shared protocol crate for the pixels client.
//!
//! This crate contains:
//! - The color and pixel value types with their hex codec
//! - Canvas decoding from the raw service byte stream
//! - Wire (JSON) representations of the service payloads

mod canvas;
mod color;
mod error;
mod pixel;

pub use canvas::{Canvas, CanvasSize};
pub use color::Color;
pub use error::DecodeError;
pub use pixel::Pixel;
