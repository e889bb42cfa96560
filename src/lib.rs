//! # zenfarbfeld
//!
//! Streaming decoder and encoder for [farbfeld](https://tools.suckless.org/farbfeld/),
//! the lossless, uncompressed RGBA image format:
//!
//! ```text
//! "farbfeld" | width u32 BE | height u32 BE | width*height * [R G B A] u16 BE
//! ```
//!
//! ## Channel models
//!
//! Images decode into [`FarbfeldImage<C>`], where `C` is the channel type:
//!
//! - `u16` keeps every sample exactly as stored; encode/decode round-trips
//!   bit for bit.
//! - `u8` narrows each sample with `>> 8` on decode and widens with `<< 8` on
//!   encode. 8-bit data round-trips, 16-bit detail below the top byte is
//!   dropped.
//!
//! ## I/O
//!
//! The codec works on any [`std::io::Read`]/[`std::io::Write`]. Pixels are
//! read and written one image row at a time, which keeps memory bounded by
//! the image width while avoiding a syscall per sample on unbuffered
//! sources. [`ReadStrategy::WholeImage`] reads the payload in one call for
//! inputs of known, bounded size.
//!
//! ## Non-Goals
//!
//! - Compression (farbfeld is meant to be piped through a general-purpose
//!   compressor)
//! - Animation or multiple frames
//! - Color management
//!
//! ## Credits
//!
//! The codec layout follows the farbfeld module of zenbitmaps, which in turn
//! draws from [zune-farbfeld](https://github.com/etemesi254/zune-image)
//! by Caleb Etemesi (MIT/Apache-2.0/Zlib licensed).
//!
//! ## Usage
//!
//! ```
//! use zenfarbfeld::{FarbfeldImage, decode, encode_to_vec, is_farbfeld_bytes};
//!
//! let image = FarbfeldImage::<u16>::new(1, 1, vec![65535, 0, 0, 65535])?;
//! let bytes = encode_to_vec(&image)?;
//! assert!(is_farbfeld_bytes(&bytes));
//!
//! let decoded: FarbfeldImage<u16> = decode(bytes.as_slice())?;
//! assert_eq!(decoded, image);
//! # Ok::<(), zenfarbfeld::FarbfeldError>(())
//! ```

#![forbid(unsafe_code)]

#[macro_use]
mod logging;

mod bitmap;
mod channel;
mod endian;
mod error;
mod farbfeld;
mod image;
mod limits;
mod stop;

use std::io::{Read, Write};

// Re-exports
pub use channel::{Channel, ChannelDepth};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{FarbfeldError, Section};
pub use farbfeld::decode::{FarbfeldDecoder, ReadStrategy};
pub use farbfeld::encode::FarbfeldEncoder;
pub use farbfeld::{
    HEADER_LEN, Header, MAGIC, RECORD_LEN, probe, read_header, write_header,
};
pub use image::{CHANNELS, FarbfeldImage};
pub use limits::Limits;
pub use stop::StopReader;

/// Decode a farbfeld image from `source`.
///
/// Fails with [`FarbfeldError::InvalidMagic`] if the stream does not start
/// with the farbfeld magic, and [`FarbfeldError::TruncatedInput`] if it ends
/// before the header or pixel payload is complete.
pub fn decode<C: Channel, R: Read>(source: R) -> Result<FarbfeldImage<C>, FarbfeldError> {
    FarbfeldDecoder::new(source).decode()
}

/// [`decode`] with resource limits applied to the header before allocating.
pub fn decode_with_limits<C: Channel, R: Read>(
    source: R,
    limits: &Limits,
) -> Result<FarbfeldImage<C>, FarbfeldError> {
    FarbfeldDecoder::new(source)
        .with_limits(limits.clone())
        .decode()
}

/// [`decode`] that gives up with [`FarbfeldError::Cancelled`] once `stop`
/// trips. The token is checked before every read from `source`.
pub fn decode_stoppable<C: Channel, R: Read, S: Stop>(
    source: R,
    stop: S,
) -> Result<FarbfeldImage<C>, FarbfeldError> {
    let mut decoder = FarbfeldDecoder::new(StopReader::new(source, stop));
    let result = decoder.decode();
    let reason = decoder.into_inner().take_reason();
    match (result, reason) {
        (Err(_), Some(reason)) => Err(FarbfeldError::Cancelled(reason)),
        (result, _) => result,
    }
}

/// Encode `image` to `sink` as farbfeld.
pub fn encode<C: Channel, W: Write>(
    sink: W,
    image: &FarbfeldImage<C>,
) -> Result<(), FarbfeldError> {
    FarbfeldEncoder::new(sink).encode(image)?;
    Ok(())
}

/// Encode `image` into a new byte vector.
pub fn encode_to_vec<C: Channel>(image: &FarbfeldImage<C>) -> Result<Vec<u8>, FarbfeldError> {
    let size = Header::new(image.width(), image.height())
        .payload_len()?
        .saturating_add(HEADER_LEN);
    let mut out = Vec::with_capacity(size);
    FarbfeldEncoder::new(&mut out).encode(image)?;
    Ok(out)
}

/// [`encode`] that gives up with [`FarbfeldError::Cancelled`] once `stop`
/// trips. The token is checked before every write to `sink`.
pub fn encode_stoppable<C: Channel, W: Write, S: Stop>(
    sink: W,
    image: &FarbfeldImage<C>,
    stop: S,
) -> Result<(), FarbfeldError> {
    let mut encoder = FarbfeldEncoder::new(StopReader::new(sink, stop));
    let result = encoder.encode(image);
    let reason = encoder.into_inner().take_reason();
    match (result, reason) {
        (Err(_), Some(reason)) => Err(FarbfeldError::Cancelled(reason)),
        (result, _) => result.map(|_| ()),
    }
}

/// Whether the next 8 bytes of `source` are the farbfeld magic.
///
/// Short or failing sources give `false`. Consumes up to 8 bytes.
pub fn is_farbfeld<R: Read>(mut source: R) -> bool {
    farbfeld::is_valid(&mut source)
}

/// Whether `data` starts with the farbfeld magic.
pub fn is_farbfeld_bytes(data: &[u8]) -> bool {
    farbfeld::is_valid_bytes(data)
}
