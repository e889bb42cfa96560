use crate::error::FarbfeldError;
use crate::farbfeld::Header;

/// Resource limits checked against a farbfeld header before any pixel
/// buffer is allocated.
///
/// Farbfeld headers are 16 bytes that can claim up to `u32::MAX` square
/// pixels, so decoding untrusted input without limits lets the input pick
/// the allocation size. All fields default to `None` (no limit).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of any single allocation the decoder makes: the output
    /// channel vector, and with [`crate::ReadStrategy::WholeImage`] the raw
    /// payload buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Limits that reject nothing.
    pub const NONE: Limits = Limits {
        max_width: None,
        max_height: None,
        max_pixels: None,
        max_memory_bytes: None,
    };

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    pub fn with_max_memory(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    /// Check header dimensions against the width, height and pixel limits.
    pub(crate) fn check_header(&self, header: &Header) -> Result<(), FarbfeldError> {
        let (width, height) = (header.width, header.height);
        if let Some(max_w) = self.max_width.filter(|&m| width > m) {
            return Err(FarbfeldError::LimitExceeded(format!(
                "width {width} exceeds limit {max_w}"
            )));
        }
        if let Some(max_h) = self.max_height.filter(|&m| height > m) {
            return Err(FarbfeldError::LimitExceeded(format!(
                "height {height} exceeds limit {max_h}"
            )));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max_px) = self.max_pixels.filter(|&m| pixels > m) {
            return Err(FarbfeldError::LimitExceeded(format!(
                "pixel count {pixels} exceeds limit {max_px}"
            )));
        }
        Ok(())
    }

    /// Check that an allocation of `bytes` is within the memory limit.
    pub(crate) fn check_allocation(&self, bytes: usize) -> Result<(), FarbfeldError> {
        match self.max_memory_bytes {
            Some(max_mem) if bytes as u64 > max_mem => Err(FarbfeldError::LimitExceeded(
                format!("allocation of {bytes} bytes exceeds memory limit {max_mem}"),
            )),
            _ => Ok(()),
        }
    }
}
