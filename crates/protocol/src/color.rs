//! RGB color value and its hex codec.

use std::fmt;

use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, Serializer};

use crate::DecodeError;

/// RGB color of a single canvas cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from exactly six hex digits, optionally prefixed with `#`.
    ///
    /// Case-insensitive. Anything else fails with
    /// [`DecodeError::InvalidHex`]; malformed input is never clamped or
    /// truncated.
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DecodeError::InvalidHex(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| DecodeError::InvalidHex(s.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Lowercase six-digit hex form, no `#` prefix.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// On the wire a color is its hex string (`{"rgb": "00ff00"}`).

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        for hex in ["000000", "ffffff", "1a2b3c", "ff0000"] {
            let color = Color::from_hex(hex).unwrap();
            assert_eq!(color.to_hex(), hex);
            assert_eq!(Color::from_hex(&color.to_hex()).unwrap(), color);
        }
    }

    #[test]
    fn test_hex_prefix_and_case() {
        assert_eq!(
            Color::from_hex("#FF00aB").unwrap(),
            Color::new(0xff, 0x00, 0xab)
        );
        assert_eq!(Color::from_hex("#FF00aB").unwrap().to_hex(), "ff00ab");
    }

    #[test]
    fn test_hex_rejects_malformed() {
        for bad in ["12345", "1234567", "#zzzzzz", "", "#", "12 456", "#12345"] {
            assert!(
                matches!(Color::from_hex(bad), Err(DecodeError::InvalidHex(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_wire_form() {
        let color: Color = serde_json::from_str("\"00ff00\"").unwrap();
        assert_eq!(color, Color::new(0, 255, 0));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"00ff00\"");
        assert!(serde_json::from_str::<Color>("\"greenish\"").is_err());
    }
}
