//! Conversions between [`FarbfeldImage`] and 8-bit display bitmaps.
//!
//! Viewers and GUI toolkits mostly want 8 bits per channel, either in RGBA
//! byte order or in the BGRA order of little-endian 32bpp ARGB bitmaps.
//! Everything here walks whole pixels with `chunks_exact`, so a short or
//! misaligned buffer is rejected up front instead of being read past.
//!
//! 8-bit values are widened with [`Channel::from_u8`] (doubled byte for
//! `u16`) and narrowed with [`Channel::to_u8`] (`>> 8` for `u16`).

use crate::channel::{Channel, ChannelDepth};
use crate::error::FarbfeldError;
use crate::image::{CHANNELS, FarbfeldImage, channel_count};

/// Byte positions of R, G, B, A within a 4-byte bitmap pixel.
#[derive(Clone, Copy)]
struct Order([usize; 4]);

const RGBA: Order = Order([0, 1, 2, 3]);
const BGRA: Order = Order([2, 1, 0, 3]);

impl<C: Channel> FarbfeldImage<C> {
    /// Import an 8-bit RGBA bitmap (`width * height * 4` bytes).
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, FarbfeldError> {
        Self::from_bitmap(width, height, bytes, RGBA)
    }

    /// Import an 8-bit BGRA bitmap, the in-memory layout of a little-endian
    /// 32bpp ARGB surface.
    pub fn from_bgra8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, FarbfeldError> {
        Self::from_bitmap(width, height, bytes, BGRA)
    }

    /// Export as an 8-bit RGBA bitmap.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.to_bitmap(RGBA)
    }

    /// Export as an 8-bit BGRA bitmap.
    pub fn to_bgra8(&self) -> Vec<u8> {
        self.to_bitmap(BGRA)
    }

    /// Re-express the image in another channel model.
    ///
    /// 16 to 8 bits narrows exactly as decoding would; 8 to 16 bits uses the
    /// doubled-byte widening so that 8-bit white stays full-scale white.
    pub fn convert<D: Channel>(&self) -> FarbfeldImage<D> {
        let data: Vec<D> = match C::DEPTH {
            ChannelDepth::Eight => self.data().iter().map(|&c| D::from_u8(c.to_u8())).collect(),
            ChannelDepth::Sixteen => self
                .data()
                .iter()
                .map(|&c| D::from_wire(c.to_wire()))
                .collect(),
        };
        FarbfeldImage::from_parts(self.width(), self.height(), data)
    }

    fn from_bitmap(
        width: u32,
        height: u32,
        bytes: &[u8],
        order: Order,
    ) -> Result<Self, FarbfeldError> {
        let expected = channel_count(width, height)?;
        if bytes.len() != expected {
            return Err(FarbfeldError::ArgumentError {
                expected,
                actual: bytes.len(),
            });
        }
        let [r, g, b, a] = order.0;
        let mut data = Vec::with_capacity(expected);
        for px in bytes.chunks_exact(CHANNELS) {
            data.extend_from_slice(&[
                C::from_u8(px[r]),
                C::from_u8(px[g]),
                C::from_u8(px[b]),
                C::from_u8(px[a]),
            ]);
        }
        Ok(FarbfeldImage::from_parts(width, height, data))
    }

    fn to_bitmap(&self, order: Order) -> Vec<u8> {
        let mut out = vec![0u8; self.data().len()];
        let [r, g, b, a] = order.0;
        for (dst, src) in out
            .chunks_exact_mut(CHANNELS)
            .zip(self.data().chunks_exact(CHANNELS))
        {
            dst[r] = src[0].to_u8();
            dst[g] = src[1].to_u8();
            dst[b] = src[2].to_u8();
            dst[a] = src[3].to_u8();
        }
        out
    }
}

#[cfg(feature = "rgb")]
impl<C: Channel> FarbfeldImage<C> {
    /// View the channel data as typed RGBA pixels, without copying.
    pub fn as_pixels(&self) -> &[rgb::RGBA<C>] {
        use rgb::AsPixels as _;
        self.data().as_pixels()
    }
}

#[cfg(feature = "imgref")]
impl<C: Channel> FarbfeldImage<C> {
    /// Zero-copy 2D view of the pixels.
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA<C>> {
        imgref::ImgRef::new(
            self.as_pixels(),
            self.width() as usize,
            self.height() as usize,
        )
    }

    /// Copy the pixels into an owned [`imgref::ImgVec`].
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA<C>> {
        imgref::ImgVec::new(
            self.as_pixels().to_vec(),
            self.width() as usize,
            self.height() as usize,
        )
    }

    /// Build an image from a (possibly strided) 2D pixel view.
    pub fn from_imgref(img: imgref::ImgRef<'_, rgb::RGBA<C>>) -> Result<Self, FarbfeldError> {
        let too_large = || FarbfeldError::DimensionsTooLarge {
            width: u32::try_from(img.width()).unwrap_or(u32::MAX),
            height: u32::try_from(img.height()).unwrap_or(u32::MAX),
        };
        let width = u32::try_from(img.width()).map_err(|_| too_large())?;
        let height = u32::try_from(img.height()).map_err(|_| too_large())?;

        let mut data = Vec::with_capacity(channel_count(width, height)?);
        for row in img.rows() {
            for px in row {
                data.extend_from_slice(&[px.r, px.g, px.b, px.a]);
            }
        }
        FarbfeldImage::new(width, height, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgra_import_reorders_channels() {
        // B, G, R, A
        let img = FarbfeldImage::<u8>::from_bgra8(1, 1, &[10, 20, 30, 40]).unwrap();
        assert_eq!(img.pixel(0, 0), Some([30, 20, 10, 40]));
        assert_eq!(img.to_bgra8(), vec![10, 20, 30, 40]);
        assert_eq!(img.to_rgba8(), vec![30, 20, 10, 40]);
    }

    #[test]
    fn rgba_import_widens_doubled_byte() {
        let img = FarbfeldImage::<u16>::from_rgba8(1, 1, &[255, 255, 0, 128]).unwrap();
        assert_eq!(img.data(), &[65535, 65535, 0, 32896]);
        assert_eq!(img.to_rgba8(), vec![255, 255, 0, 128]);
    }

    #[test]
    fn bitmap_length_is_checked() {
        let err = FarbfeldImage::<u16>::from_rgba8(2, 2, &[0; 15]).unwrap_err();
        assert!(matches!(
            err,
            FarbfeldError::ArgumentError {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn convert_between_depths() {
        let wide = FarbfeldImage::<u16>::new(1, 1, vec![0xFFFF, 0x80FF, 0x00FF, 0x1234]).unwrap();
        let narrow: FarbfeldImage<u8> = wide.convert();
        assert_eq!(narrow.data(), &[0xFF, 0x80, 0x00, 0x12]);

        let back: FarbfeldImage<u16> = narrow.convert();
        assert_eq!(back.data(), &[0xFFFF, 0x8080, 0x0000, 0x1212]);

        let same: FarbfeldImage<u16> = wide.convert();
        assert_eq!(same, wide);
    }
}
