use crate::foundation::error::{LottieError, LottieResult};

/// Opaque handle of the widget an asset draws into.
///
/// Issued by the widget system; the engine resolves it to its own object.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct WidgetId(pub u64);

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "widget#{}", self.0)
    }
}

/// Pixel dimensions of an asset's draw target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create validated dimensions (both sides non-zero).
    pub fn new(width: u32, height: u32) -> LottieResult<Self> {
        if width == 0 || height == 0 {
            return Err(LottieError::validation(format!(
                "dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Size in bytes of a tightly packed buffer with `bytes_per_pixel` bytes per pixel.
    pub fn byte_len(self, bytes_per_pixel: usize) -> usize {
        self.pixel_count().saturating_mul(bytes_per_pixel)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Convert a byte count to whole KiB for log lines.
pub(crate) fn kib(bytes: usize) -> usize {
    bytes / 1024
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
