//! A single canvas cell: coordinate plus color.

use serde::{Deserialize, Serialize};

use crate::{Color, DecodeError};

/// One pixel on the canvas.
///
/// Coordinates are caller-supplied and not range-checked here; the service
/// validates bounds. Wire form is `{"x": int, "y": int, "rgb": "rrggbb"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    #[serde(rename = "rgb")]
    pub color: Color,
}

impl Pixel {
    pub const fn new(x: u32, y: u32, color: Color) -> Self {
        Self { x, y, color }
    }

    /// Construct from a coordinate pair and a hex color string.
    pub fn from_hex(x: u32, y: u32, hex: &str) -> Result<Self, DecodeError> {
        Ok(Self::new(x, y, Color::from_hex(hex)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_decode() {
        let pixel: Pixel = serde_json::from_str(r#"{"x": 3, "y": 7, "rgb": "ff00ff"}"#).unwrap();
        assert_eq!(pixel, Pixel::new(3, 7, Color::new(255, 0, 255)));
    }

    #[test]
    fn test_wire_encode() {
        let pixel = Pixel::from_hex(1, 2, "#00FF00").unwrap();
        assert_eq!(
            serde_json::to_value(pixel).unwrap(),
            serde_json::json!({"x": 1, "y": 2, "rgb": "00ff00"})
        );
    }

    #[test]
    fn test_wire_rejects_bad_color() {
        assert!(serde_json::from_str::<Pixel>(r#"{"x": 0, "y": 0, "rgb": "nope"}"#).is_err());
    }
}
