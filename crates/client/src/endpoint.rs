//! The fixed set of remote operations.

/// One of the four operations the service exposes.
///
/// Each endpoint is its own rate-limit bucket; the service may throttle one
/// while the others stay wide open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Canvas dimensions.
    GetSize,
    /// The full canvas as a raw byte stream.
    GetPixels,
    /// A single pixel.
    GetPixel,
    /// Write a single pixel.
    SetPixel,
}

impl Endpoint {
    /// Number of endpoints; sizes per-endpoint limiter storage.
    pub const COUNT: usize = 4;

    /// Path of this endpoint under the service base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::GetSize => "get_size",
            Endpoint::GetPixels => "get_pixels",
            Endpoint::GetPixel => "get_pixel",
            Endpoint::SetPixel => "set_pixel",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Endpoint::GetSize => 0,
            Endpoint::GetPixels => 1,
            Endpoint::GetPixel => 2,
            Endpoint::SetPixel => 3,
        }
    }
}
