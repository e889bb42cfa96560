//! Farbfeld pixel stream encoder.

use std::io::Write;

use crate::channel::Channel;
use crate::endian::pack_u16;
use crate::error::FarbfeldError;
use crate::farbfeld::{HEADER_LEN, Header, write_header};
use crate::image::{CHANNELS, FarbfeldImage};

/// A farbfeld encoder writing to any [`Write`] sink.
///
/// Each image row is converted into a row buffer and handed to the sink in
/// one `write_all`, so an unbuffered sink such as a [`std::fs::File`] sees
/// `height + 1` writes rather than one per sample.
///
/// A failed write aborts the encode with [`FarbfeldError::WriteFailed`].
/// Whatever reached the sink before the failure stays there; removing a
/// half-written file is up to the caller.
pub struct FarbfeldEncoder<W: Write> {
    writer: W,
}

impl<W: Write> FarbfeldEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Encode `image`, returning the number of bytes written.
    ///
    /// `u16` images are written as stored. `u8` images are expanded with
    /// `value << 8`, the inverse of the decoder's narrowing.
    pub fn encode<C: Channel>(&mut self, image: &FarbfeldImage<C>) -> Result<usize, FarbfeldError> {
        let header = Header::new(image.width(), image.height());
        let total = header
            .payload_len()?
            .checked_add(HEADER_LEN)
            .ok_or(FarbfeldError::DimensionsTooLarge {
                width: header.width,
                height: header.height,
            })?;
        debug!(
            "encoding {}x{} farbfeld from {:?} channels",
            header.width,
            header.height,
            C::DEPTH
        );

        write_header(&mut self.writer, header.width, header.height)?;

        let mut row_buf = Vec::with_capacity(header.row_len()?);
        for row in image.rows() {
            row_buf.clear();
            for pixel in row.chunks_exact(CHANNELS) {
                for &channel in pixel {
                    row_buf.extend_from_slice(&pack_u16(channel.to_wire()));
                }
            }
            self.writer
                .write_all(&row_buf)
                .map_err(FarbfeldError::WriteFailed)?;
        }
        self.writer.flush().map_err(FarbfeldError::WriteFailed)?;

        Ok(total)
    }

    /// Give back the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
