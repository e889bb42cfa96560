//! Farbfeld wire format: header codec and format sniffing.
//!
//! ```text
//! offset  size            field
//! 0       8               "farbfeld" magic
//! 8       4               width, u32 big-endian
//! 12      4               height, u32 big-endian
//! 16      width*height*8  pixels, row-major, R G B A as u16 big-endian
//! ```
//!
//! The RGB data should be sRGB and not alpha-premultiplied; the codec does
//! not interpret it either way.

pub(crate) mod decode;
pub(crate) mod encode;

use std::io::{Read, Write};

use crate::channel::ChannelDepth;
use crate::endian::{pack_u32, unpack_u32};
use crate::error::{FarbfeldError, Section};
use crate::image::CHANNELS;

/// The 8-byte magic every farbfeld stream starts with.
pub const MAGIC: [u8; 8] = *b"farbfeld";

/// Size of the full header: magic, width and height.
pub const HEADER_LEN: usize = 16;

/// Bytes per on-disk pixel record (four u16 samples).
pub const RECORD_LEN: usize = CHANNELS * 2;

/// Image dimensions read from a farbfeld header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    pub width: u32,
    pub height: u32,
}

impl Header {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> Result<usize, FarbfeldError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| self.too_large())
    }

    /// Channel values a decoded image of this size holds.
    pub fn channel_count(&self) -> Result<usize, FarbfeldError> {
        self.pixel_count()?
            .checked_mul(CHANNELS)
            .ok_or_else(|| self.too_large())
    }

    /// Bytes a decoded image of this size takes at the given channel depth.
    pub fn output_bytes(&self, depth: ChannelDepth) -> Result<usize, FarbfeldError> {
        self.channel_count()?
            .checked_mul(depth.bytes())
            .ok_or_else(|| self.too_large())
    }

    /// Bytes of one encoded row.
    pub fn row_len(&self) -> Result<usize, FarbfeldError> {
        (self.width as usize)
            .checked_mul(RECORD_LEN)
            .ok_or_else(|| self.too_large())
    }

    /// Bytes of pixel payload following the header.
    pub fn payload_len(&self) -> Result<usize, FarbfeldError> {
        self.pixel_count()?
            .checked_mul(RECORD_LEN)
            .ok_or_else(|| self.too_large())
    }

    fn too_large(&self) -> FarbfeldError {
        FarbfeldError::DimensionsTooLarge {
            width: self.width,
            height: self.height,
        }
    }
}

/// Read 8 bytes from the current position of `source` and report whether
/// they are the farbfeld magic.
///
/// A source with fewer than 8 bytes left, or one that fails to read, gives
/// `false`. Up to 8 bytes are consumed either way; rewind or duplicate the
/// source first if it has to be read again from the start.
pub fn is_valid<R: Read + ?Sized>(source: &mut R) -> bool {
    let mut magic = [0u8; 8];
    match source.read_exact(&mut magic) {
        Ok(()) => magic == MAGIC,
        Err(_) => false,
    }
}

/// Whether `data` starts with the farbfeld magic.
pub fn is_valid_bytes(data: &[u8]) -> bool {
    data.starts_with(&MAGIC)
}

/// Read the width and height fields. The magic must already be consumed.
pub fn read_header<R: Read + ?Sized>(source: &mut R) -> Result<Header, FarbfeldError> {
    let mut dims = [0u8; 8];
    source
        .read_exact(&mut dims)
        .map_err(|e| FarbfeldError::from_read(e, Section::Header))?;
    let width = unpack_u32([dims[0], dims[1], dims[2], dims[3]]);
    let height = unpack_u32([dims[4], dims[5], dims[6], dims[7]]);
    Ok(Header { width, height })
}

/// Check the magic, then read the dimensions.
pub fn probe<R: Read + ?Sized>(source: &mut R) -> Result<Header, FarbfeldError> {
    if !is_valid(source) {
        return Err(FarbfeldError::InvalidMagic);
    }
    read_header(source)
}

/// Write the magic followed by the big-endian width and height.
pub fn write_header<W: Write + ?Sized>(
    sink: &mut W,
    width: u32,
    height: u32,
) -> Result<(), FarbfeldError> {
    let mut header = [0u8; HEADER_LEN];
    header[..8].copy_from_slice(&MAGIC);
    header[8..12].copy_from_slice(&pack_u32(width));
    header[12..16].copy_from_slice(&pack_u32(height));
    sink.write_all(&header).map_err(FarbfeldError::WriteFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn sniff_accepts_exact_magic() {
        assert!(is_valid(&mut &b"farbfeld\0\0\0\x01\0\0\0\x01"[..]));
        assert!(is_valid(&mut &b"farbfeld"[..]));
    }

    #[test]
    fn sniff_rejects_other_content() {
        assert!(!is_valid(&mut &b"Farbfeld"[..]));
        assert!(!is_valid(&mut &b"\x89PNG\r\n\x1a\n"[..]));
        assert!(!is_valid(&mut &b"farbfel"[..]));
        assert!(!is_valid(&mut &b""[..]));
    }

    #[test]
    fn sniff_consumes_eight_bytes() {
        let mut cursor = Cursor::new(b"farbfeldREST".to_vec());
        assert!(is_valid(&mut cursor));
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn header_write_then_read() {
        let mut out = Vec::new();
        write_header(&mut out, 2, 3).unwrap();
        assert_eq!(out.len(), HEADER_LEN);
        assert_eq!(&out[..8], b"farbfeld");
        assert_eq!(&out[8..], &[0, 0, 0, 2, 0, 0, 0, 3]);

        let header = probe(&mut out.as_slice()).unwrap();
        assert_eq!(header, Header::new(2, 3));
    }

    #[test]
    fn short_header_is_truncated() {
        let err = read_header(&mut &[0u8, 0, 0, 1, 0][..]).unwrap_err();
        assert!(matches!(
            err,
            FarbfeldError::TruncatedInput(Section::Header)
        ));
    }

    #[test]
    fn header_rejects_bad_magic() {
        let err = probe(&mut &b"P6\n1 1\n255\n\0\0\0\0\0\0"[..]).unwrap_err();
        assert!(matches!(err, FarbfeldError::InvalidMagic));
    }

    #[test]
    fn header_sizes() {
        let header = Header::new(2, 3);
        assert_eq!(header.pixel_count().unwrap(), 6);
        assert_eq!(header.channel_count().unwrap(), 24);
        assert_eq!(header.row_len().unwrap(), 16);
        assert_eq!(header.payload_len().unwrap(), 48);
        assert_eq!(header.output_bytes(ChannelDepth::Sixteen).unwrap(), 48);
        assert_eq!(header.output_bytes(ChannelDepth::Eight).unwrap(), 24);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn output_bytes_overflow() {
        let header = Header::new(0x8000_0000, 0x4000_0000);
        assert!(header.channel_count().is_ok());
        assert!(matches!(
            header.output_bytes(ChannelDepth::Sixteen),
            Err(FarbfeldError::DimensionsTooLarge { .. })
        ));
    }
}
