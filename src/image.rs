use crate::channel::{Channel, ChannelDepth};
use crate::error::FarbfeldError;

/// Channels per pixel. Farbfeld is always RGBA.
pub const CHANNELS: usize = 4;

/// An RGBA image held as a flat, row-major channel vector.
///
/// `C` picks the channel model: `u16` keeps the full farbfeld precision,
/// `u8` narrows on decode (see [`Channel`]). The length of the channel
/// vector is always `width * height * 4`; every constructor and mutator
/// checks it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FarbfeldImage<C: Channel> {
    width: u32,
    height: u32,
    data: Vec<C>,
}

/// Number of channel values an image of `width` x `height` holds.
pub(crate) fn channel_count(width: u32, height: u32) -> Result<usize, FarbfeldError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(CHANNELS))
        .ok_or(FarbfeldError::DimensionsTooLarge { width, height })
}

impl<C: Channel> FarbfeldImage<C> {
    /// Create an image from explicit dimensions and channel data.
    ///
    /// Fails with [`FarbfeldError::ArgumentError`] unless
    /// `data.len() == width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<C>) -> Result<Self, FarbfeldError> {
        let expected = channel_count(width, height)?;
        if data.len() != expected {
            return Err(FarbfeldError::ArgumentError {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A 0x0 image.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    /// Image filled with a single RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [C; 4]) -> Result<Self, FarbfeldError> {
        let count = channel_count(width, height)?;
        let mut data = Vec::with_capacity(count);
        for _ in 0..count / CHANNELS {
            data.extend_from_slice(&rgba);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Built by the decoder once the channel vector is complete.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<C>) -> Self {
        debug_assert_eq!(Some(data.len()), channel_count(width, height).ok());
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> ChannelDepth {
        C::DEPTH
    }

    /// Whether the image has no pixels (zero width or zero height).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the channel data.
    pub fn data(&self) -> &[C] {
        &self.data
    }

    /// Copy of the channel data, detached from this image.
    pub fn get_data(&self) -> Vec<C> {
        self.data.clone()
    }

    /// Replace the channel data.
    ///
    /// The new data must have the same length as the current dimensions
    /// require; otherwise the image is left untouched.
    pub fn set_data(&mut self, data: Vec<C>) -> Result<(), FarbfeldError> {
        let expected = self.data.len();
        if data.len() != expected {
            return Err(FarbfeldError::ArgumentError {
                expected,
                actual: data.len(),
            });
        }
        self.data = data;
        Ok(())
    }

    /// Take ownership of the channel data.
    pub fn into_data(self) -> Vec<C> {
        self.data
    }

    /// Channels of row `y`, or `None` when out of bounds.
    pub fn row(&self, y: u32) -> Option<&[C]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        self.data.get(start..start + stride)
    }

    /// Iterate rows top to bottom. Yields nothing for zero-width images.
    pub fn rows(&self) -> impl Iterator<Item = &[C]> {
        let stride = (self.width as usize * CHANNELS).max(1);
        self.data.chunks_exact(stride)
    }

    /// RGBA value of the pixel at (`x`, `y`), or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[C; 4]> {
        if x >= self.width {
            return None;
        }
        let row = self.row(y)?;
        let off = x as usize * CHANNELS;
        Some([row[off], row[off + 1], row[off + 2], row[off + 3]])
    }
}

impl<C: Channel> Default for FarbfeldImage<C> {
    fn default() -> Self {
        Self::empty()
    }
}
