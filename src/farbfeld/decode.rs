//! Farbfeld pixel stream decoder.

use std::io::Read;

use crate::channel::Channel;
use crate::endian::unpack_record;
use crate::error::{FarbfeldError, Section};
use crate::farbfeld::{Header, RECORD_LEN, probe};
use crate::image::FarbfeldImage;
use crate::limits::Limits;

/// Channels reserved up front before the first row is read. Larger images
/// grow row by row, so a lying header on a short stream cannot force a huge
/// allocation before the truncation is seen.
const PREALLOC_CHANNELS: usize = 1 << 22;

/// Initial capacity of the row (or payload) byte buffer. Longer rows grow
/// only as bytes actually arrive from the source.
const PREALLOC_BYTES: usize = 1 << 23;

/// How the decoder pulls pixel data from the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadStrategy {
    /// Read one image row at a time into a reused row buffer. Memory use
    /// is bounded by the width.
    #[default]
    Rows,
    /// Read the whole payload in one go. Slightly faster, but holds
    /// the full encoded image in memory next to the output; subject to
    /// [`Limits::max_memory_bytes`].
    WholeImage,
}

/// A streaming farbfeld decoder over any [`Read`] source.
///
/// The source is read sequentially and never rewound. After a successful
/// [`decode`](Self::decode) the source is positioned right after the pixel
/// payload, so concatenated farbfeld streams can be decoded by calling
/// `decode` again.
pub struct FarbfeldDecoder<R: Read> {
    reader: R,
    header: Option<Header>,
    header_pending: bool,
    limits: Limits,
    strategy: ReadStrategy,
}

impl<R: Read> FarbfeldDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            header: None,
            header_pending: false,
            limits: Limits::NONE,
            strategy: ReadStrategy::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_strategy(mut self, strategy: ReadStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check the magic and read the dimensions.
    ///
    /// Calling this again before [`decode`](Self::decode) returns the same
    /// header without touching the source.
    pub fn decode_headers(&mut self) -> Result<Header, FarbfeldError> {
        if self.header_pending {
            if let Some(header) = self.header {
                return Ok(header);
            }
        }
        let header = probe(&mut self.reader)?;
        debug!("farbfeld header: {}x{}", header.width, header.height);
        self.limits.check_header(&header)?;

        self.header = Some(header);
        self.header_pending = true;
        Ok(header)
    }

    /// Width and height of the last header read, if any.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.header.map(|h| (h.width, h.height))
    }

    /// Decode one image, reading the header first if it was not read yet.
    ///
    /// On error nothing is returned; the source is left wherever the failure
    /// happened.
    pub fn decode<C: Channel>(&mut self) -> Result<FarbfeldImage<C>, FarbfeldError> {
        let header = self.decode_headers()?;
        self.header_pending = false;

        let count = header.channel_count()?;
        self.limits.check_allocation(header.output_bytes(C::DEPTH)?)?;
        if count == 0 {
            return Ok(FarbfeldImage::from_parts(header.width, header.height, Vec::new()));
        }

        let mut out: Vec<C> = Vec::with_capacity(count.min(PREALLOC_CHANNELS));
        trace!("decoding {count} channels with {:?}", self.strategy);
        match self.strategy {
            ReadStrategy::Rows => self.read_rows(&header, &mut out)?,
            ReadStrategy::WholeImage => self.read_whole(&header, &mut out)?,
        }
        debug_assert_eq!(out.len(), count);

        Ok(FarbfeldImage::from_parts(header.width, header.height, out))
    }

    /// Give back the source, positioned after whatever was consumed.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_rows<C: Channel>(
        &mut self,
        header: &Header,
        out: &mut Vec<C>,
    ) -> Result<(), FarbfeldError> {
        let row_len = header.row_len()?;
        self.limits.check_allocation(row_len)?;

        let mut row = Vec::with_capacity(row_len.min(PREALLOC_BYTES));
        for _ in 0..header.height {
            read_chunk(&mut self.reader, &mut row, row_len)?;
            convert_row(&row, out);
        }
        Ok(())
    }

    fn read_whole<C: Channel>(
        &mut self,
        header: &Header,
        out: &mut Vec<C>,
    ) -> Result<(), FarbfeldError> {
        let payload_len = header.payload_len()?;
        self.limits.check_allocation(payload_len)?;

        let mut payload = Vec::with_capacity(payload_len.min(PREALLOC_BYTES));
        read_chunk(&mut self.reader, &mut payload, payload_len)?;
        convert_row(&payload, out);
        Ok(())
    }
}

/// Replace the contents of `buf` with exactly `len` bytes from `reader`.
///
/// `buf` grows with the data read, not with `len`, so a short source fails
/// with `TruncatedInput` before the claimed size is ever allocated.
fn read_chunk<R: Read>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    len: usize,
) -> Result<(), FarbfeldError> {
    buf.clear();
    reader
        .take(len as u64)
        .read_to_end(buf)
        .map_err(|e| FarbfeldError::from_read(e, Section::PixelData))?;
    if buf.len() != len {
        return Err(FarbfeldError::TruncatedInput(Section::PixelData));
    }
    Ok(())
}

/// Append the channels of a run of whole records to `out`.
#[inline]
fn convert_row<C: Channel>(bytes: &[u8], out: &mut Vec<C>) {
    out.reserve(bytes.len() / 2);
    for record in bytes.chunks_exact(RECORD_LEN) {
        let [r, g, b, a] = unpack_record(record);
        out.extend_from_slice(&[
            C::from_wire(r),
            C::from_wire(g),
            C::from_wire(b),
            C::from_wire(a),
        ]);
    }
}
